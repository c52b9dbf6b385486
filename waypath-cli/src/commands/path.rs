//! `waypath path` - one shortest-path query.

use super::exit_with_notice;
use crate::output::{format_weight, Output, OutputFormat, TableDisplay};
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use waypath_core::{Graph, PathResult, Session};

#[derive(Debug, Serialize)]
pub struct PathReport {
    pub path: Vec<String>,
    pub distance: f64,
    pub hops: usize,
    /// Display names, parallel to `path`.
    #[serde(skip)]
    pub names: Vec<String>,
}

impl PathReport {
    pub fn new(result: PathResult, graph: &Graph) -> Self {
        let names = result
            .path
            .iter()
            .map(|id| graph.node(id).map_or_else(|| id.clone(), |n| n.name.clone()))
            .collect();
        Self {
            hops: result.hops(),
            path: result.path,
            distance: result.distance,
            names,
        }
    }
}

impl TableDisplay for PathReport {
    fn to_table(&self) -> String {
        let mut output = String::new();
        let first = self.path.first().map(String::as_str).unwrap_or_default();
        let last = self.path.last().map(String::as_str).unwrap_or_default();

        output.push_str(&format!(
            "{} {} {} {}\n",
            "Path from".bold(),
            first.cyan(),
            "to".bold(),
            last.cyan()
        ));
        output.push_str(&format!("{}\n", "-".repeat(60)));

        for (i, (id, name)) in self.path.iter().zip(&self.names).enumerate() {
            let prefix = if i == 0 {
                "START".green().to_string()
            } else if i == self.path.len() - 1 {
                "END  ".red().to_string()
            } else {
                format!("{:5}", i)
            };
            output.push_str(&format!("  {} {} {}\n", prefix, name, format!("({})", id).dimmed()));

            if i < self.path.len() - 1 {
                output.push_str(&format!("       {}\n", "|".dimmed()));
                output.push_str(&format!("       {}\n", "v".dimmed()));
            }
        }

        output.push_str(&format!(
            "\n{}: {} ({} hops)",
            "Distance".bold(),
            format_weight(self.distance),
            self.hops
        ));
        output
    }
}

pub async fn run(graph: Graph, from: &str, to: &str, format: OutputFormat) -> Result<()> {
    let mut session = Session::with_graph(graph);
    let selected = session
        .select_origin(from)
        .and_then(|_| session.select_destination(to));
    if let Err(e) = selected {
        exit_with_notice(&e, format);
    }

    match session.find_path() {
        Ok(result) => Output::new(PathReport::new(result, session.graph()), format).render(),
        Err(e) => exit_with_notice(&e, format),
    }
}
