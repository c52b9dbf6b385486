//! Subcommand implementations

pub mod animate;
pub mod graph;
pub mod path;
pub mod randomize;

use crate::output::{ErrorMessage, Output, OutputFormat};
use anyhow::{Context, Result};
use std::path::Path;
use waypath_core::{Graph, PathError};

/// The graph named by `--graph`, or the built-in sample graph.
pub fn load_graph(file: Option<&Path>) -> Result<Graph> {
    match file {
        Some(path) => Graph::load(path)
            .with_context(|| format!("Failed to load graph from {}", path.display())),
        None => Ok(Graph::pantheon()),
    }
}

/// Print a search failure as a user-facing notice and exit with status 1.
pub fn exit_with_notice(err: &PathError, format: OutputFormat) -> ! {
    let message = match err {
        PathError::InvalidEndpoint { .. } => {
            ErrorMessage::with_details(err.to_string(), "Run `waypath graph` to list node ids")
        }
        _ => ErrorMessage::new(err.to_string()),
    };
    let _ = Output::new(message, format).render();
    std::process::exit(1);
}
