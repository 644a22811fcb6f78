//! Graphviz export of a specification.
//!
//! States become box nodes and events become labelled edges. An event's
//! `doc_weight` metadata becomes the edge weight, so the typical path through
//! the machine can be pulled onto a straight line.

use crate::core::Specification;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;
use tracing::info;

/// Rendering options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramOptions {
    /// Attributes placed in the `graph [...]` statement
    pub graph_options: String,
    /// Renderer binary
    pub renderer: String,
    /// Output format passed to the renderer as `-T<format>`
    pub format: String,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            graph_options: r#"rankdir="LR", size="7,11.6", ratio="fill""#.to_string(),
            renderer: "dot".to_string(),
            format: "pdf".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Renderer '{renderer}' could not be started: {source}")]
    Spawn {
        renderer: String,
        #[source]
        source: io::Error,
    },

    #[error("Renderer '{renderer}' exited with {status}: {stderr}")]
    RendererFailed {
        renderer: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// "ship_order" -> "Ship order"
pub fn humanize(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('"', "\\\""))
}

/// Render `spec` as a DOT digraph named `name`.
///
/// ```rust
/// use stateline::builder::EventBuilder;
/// use stateline::core::Specification;
/// use stateline::diagram::{to_dot, DiagramOptions};
///
/// let spec = Specification::<()>::builder()
///     .state("new")
///     .event(EventBuilder::new("approve").to("approved").meta("doc_weight", 8))
///     .state("approved")
///     .build()
///     .unwrap();
///
/// let dot = to_dot(&spec, "orders_state_machine", &DiagramOptions::default());
/// assert!(dot.starts_with(r#"digraph "orders_state_machine" {"#));
/// assert!(dot.contains(r#""new" -> "approved" [label="Approve", weight=8];"#));
/// ```
pub fn to_dot<H>(spec: &Specification<H>, name: &str, options: &DiagramOptions) -> String {
    let mut dot = String::new();
    let _ = writeln!(dot, "digraph {} {{", quote(name));
    let _ = writeln!(dot, "  graph [{}];", options.graph_options);
    let _ = writeln!(dot, "  node [shape=box];");
    let _ = writeln!(dot, "  edge [len=1];");

    for state in spec.states() {
        let _ = writeln!(dot, "  {} [label={}];", quote(state.name()), quote(state.name()));
        for event in state.events() {
            let weight = event
                .doc_weight()
                .map(|w| format!(", weight={w}"))
                .unwrap_or_default();
            let _ = writeln!(
                dot,
                "  {} -> {} [label={}{}];",
                quote(state.name()),
                quote(event.to()),
                quote(&humanize(event.name())),
                weight
            );
        }
    }

    dot.push_str("}\n");
    dot
}

/// Write `generated_<name>.dot` into `target_dir` and run the renderer on it.
///
/// Returns the path of the rendered file, `generated_<name>.<format>`.
pub fn render<H>(
    spec: &Specification<H>,
    name: &str,
    target_dir: &Path,
    options: &DiagramOptions,
) -> Result<PathBuf, DiagramError> {
    let dot_path = target_dir.join(format!("generated_{name}.dot"));
    let out_path = target_dir.join(format!("generated_{name}.{}", options.format));

    fs::write(&dot_path, to_dot(spec, name, options)).map_err(|source| DiagramError::Write {
        path: dot_path.clone(),
        source,
    })?;

    let output = Command::new(&options.renderer)
        .arg(format!("-T{}", options.format))
        .arg(format!("-o{}", out_path.display()))
        .arg(&dot_path)
        .output()
        .map_err(|source| DiagramError::Spawn {
            renderer: options.renderer.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(DiagramError::RendererFailed {
            renderer: options.renderer.clone(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    info!(path = %out_path.display(), "diagram rendered");
    Ok(out_path)
}
