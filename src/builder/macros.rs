//! Macros for ergonomic per-state and per-event helpers.

/// Generate an extension trait with state predicates and event triggers.
///
/// Every generated method delegates to `Machine::is_in`, `Machine::in_set`
/// or `Machine::process_event`.
///
/// # Example
///
/// ```
/// use stateline::builder::transition;
/// use stateline::core::Specification;
/// use stateline::engine::Machine;
/// use stateline::machine_sugar;
/// use std::sync::Arc;
///
/// struct Article;
///
/// machine_sugar! {
///     pub trait ArticleMachine for Article {
///         states {
///             is_new => "new",
///             is_rejected => "rejected",
///         }
///         events {
///             reject => "reject",
///         }
///         sets {
///             is_finished => "finished",
///         }
///     }
/// }
///
/// let spec = Specification::builder()
///     .state("new")
///     .event(transition("reject", "rejected"))
///     .state("rejected")
///     .state_set("finished", ["rejected"])
///     .build()
///     .unwrap();
///
/// let mut article = Machine::new(Arc::new(spec), Article);
/// assert!(article.is_new().unwrap());
/// article.reject(&[]).unwrap();
/// assert!(article.is_rejected().unwrap());
/// assert!(article.is_finished().unwrap());
/// ```
#[macro_export]
macro_rules! machine_sugar {
    (
        $(#[$meta:meta])*
        $vis:vis trait $name:ident for $host:ty {
            $(states { $($state_fn:ident => $state:literal),* $(,)? })?
            $(events { $($event_fn:ident => $event:literal),* $(,)? })?
            $(sets { $($set_fn:ident => $set:literal),* $(,)? })?
        }
    ) => {
        $(#[$meta])*
        $vis trait $name {
            $($(
                fn $state_fn(&self) -> ::std::result::Result<bool, $crate::engine::MachineError>;
            )*)?
            $($(
                fn $event_fn(
                    &mut self,
                    args: &[$crate::Value],
                ) -> ::std::result::Result<$crate::engine::Dispatch, $crate::engine::MachineError>;
            )*)?
            $($(
                fn $set_fn(&self) -> ::std::result::Result<bool, $crate::engine::MachineError>;
            )*)?
        }

        impl<S: $crate::store::StateStore> $name for $crate::engine::Machine<$host, S> {
            $($(
                fn $state_fn(&self) -> ::std::result::Result<bool, $crate::engine::MachineError> {
                    self.is_in($state)
                }
            )*)?
            $($(
                fn $event_fn(
                    &mut self,
                    args: &[$crate::Value],
                ) -> ::std::result::Result<$crate::engine::Dispatch, $crate::engine::MachineError> {
                    self.process_event($event, args)
                }
            )*)?
            $($(
                fn $set_fn(&self) -> ::std::result::Result<bool, $crate::engine::MachineError> {
                    self.in_set($set)
                }
            )*)?
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::builder::transition;
    use crate::core::Specification;
    use crate::engine::{Machine, MachineError};
    use std::sync::Arc;

    struct Order;

    machine_sugar! {
        trait OrderMachine for Order {
            states {
                is_submitted => "submitted",
                is_accepted => "accepted",
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

    fn order() -> Machine<Order> {
        let spec = Specification::builder()
            .state("submitted")
            .event(transition("accept", "accepted"))
            .state("accepted")
            .event(transition("ship", "shipped"))
            .state("shipped")
            .state_set("open", ["submitted", "accepted"])
            .build()
            .unwrap();
        Machine::new(Arc::new(spec), Order)
    }

    #[test]
    fn predicates_follow_current_state() {
        let mut order = order();
        assert!(order.is_submitted().unwrap());
        assert!(!order.is_accepted().unwrap());
        assert!(order.is_open().unwrap());

        order.accept(&[]).unwrap();
        order.ship(&[]).unwrap();

        assert!(order.is_shipped().unwrap());
        assert!(!order.is_open().unwrap());
    }

    #[test]
    fn triggers_respect_current_state() {
        let mut order = order();
        let result = order.ship(&[]);

        assert!(matches!(result, Err(MachineError::NoTransitionAllowed { .. })));
        assert!(order.is_submitted().unwrap());
    }

    #[test]
    fn sugar_works_without_sets() {
        machine_sugar! {
            pub trait Minimal for Order {
                states { is_submitted_too => "submitted" }
            }
        }

        assert!(order().is_submitted_too().unwrap());
    }
}
