//! Order Workflow
//!
//! This example walks an order record through its lifecycle.
//!
//! Key concepts:
//! - Declaring states, events and hooks with the builder
//! - Persisting the current state in a record column
//! - Halting a transition from an action
//! - Sharing a specification between related types with a registry
//! - Generated helper methods and a Graphviz export
//!
//! Run with: RUST_LOG=stateline=info cargo run --example order_workflow

use serde_json::{json, Map};
use stateline::builder::{transition, EventBuilder};
use stateline::core::{Outcome, Specification};
use stateline::diagram::{to_dot, DiagramOptions};
use stateline::engine::{Dispatch, Machine, MachineError};
use stateline::machine_sugar;
use stateline::resolver::Registry;
use stateline::store::{RecordStore, StoreConfig};
use tracing_subscriber::EnvFilter;

struct Order {
    id: u64,
    in_stock: bool,
    notifications: Vec<String>,
}

machine_sugar! {
    trait OrderMachine for Order {
        states {
            is_submitted => "submitted",
            is_shipped => "shipped",
        }
        events {
            accept => "accept",
            ship => "ship",
        }
        sets {
            is_open => "open",
        }
    }
}

fn order_spec() -> Specification<Order> {
    Specification::builder()
        .state("submitted")
        .event(
            EventBuilder::new("accept")
                .to("accepted")
                .meta("doc_weight", 8)
                .action(|order: &mut Order, _args| {
                    if order.in_stock {
                        Outcome::proceed()
                    } else {
                        Outcome::halt("items are back-ordered")
                    }
                }),
        )
        .event(transition("cancel", "cancelled"))
        .state("accepted")
        .event(EventBuilder::new("ship").to("shipped").meta("doc_weight", 8))
        .event(transition("cancel", "cancelled"))
        .on_exit(|order: &mut Order, t| {
            order
                .notifications
                .push(format!("order {} left {} via {}", order.id, t.from, t.event));
            Ok(())
        })
        .state("shipped")
        .state("cancelled")
        .state_set("open", ["submitted", "accepted"])
        .entry_callback("shipped", |order: &mut Order, _t| {
            order.notifications.push(format!("order {} shipped", order.id));
            Ok(())
        })
        .on_transition(|_order: &mut Order, t| {
            println!("  {} -> {} ({})", t.from, t.to, t.event);
            Ok(())
        })
        .build()
        .expect("order specification is valid")
}

fn main() -> Result<(), MachineError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Order Workflow Example ===\n");

    let mut registry = Registry::new();
    registry.register("Order", None, Some(order_spec()));
    registry.register("GiftOrder", Some("Order"), None);

    let spec = registry.resolve("GiftOrder")?;

    let mut record = Map::new();
    record.insert("id".to_string(), json!(42));
    let mut store = RecordStore::new(record, StoreConfig::with_column("status"));
    store.write_initial_state(&*spec)?;

    let order = Order {
        id: 42,
        in_stock: false,
        notifications: Vec::new(),
    };
    let mut machine = Machine::with_store(spec, order, store).with_history(16);

    println!("Submitted: {}", machine.is_submitted()?);
    println!("Open: {}\n", machine.is_open()?);

    println!("Accepting while out of stock...");
    if let Dispatch::Halted { reason } = machine.accept(&[])? {
        println!("  halted: {}", reason.as_deref().unwrap_or("no reason"));
    }

    machine.host_mut().in_stock = true;
    println!("\nAccepting after restock...");
    machine.accept(&[])?;

    println!("\nShipping...");
    machine.ship(&[])?;
    println!("Shipped: {}", machine.is_shipped()?);
    println!("Open: {}\n", machine.is_open()?);

    println!("Cancelling a shipped order...");
    if let Err(err) = machine.process_event("cancel", &[]) {
        println!("  rejected: {err}\n");
    }

    println!("Notifications:");
    for note in &machine.host().notifications {
        println!("  - {note}");
    }

    if let Some(history) = machine.history() {
        println!("\nPath: {}", history.path().join(" -> "));
    }
    println!("Record: {}", serde_json::Value::Object(machine.store().record().clone()));

    println!("\nCheckpoint:\n{}", machine.checkpoint()?.to_json()?);

    println!(
        "\nDiagram:\n{}",
        to_dot(&**machine.spec(), "orders_state_machine", &DiagramOptions::default())
    );

    Ok(())
}
