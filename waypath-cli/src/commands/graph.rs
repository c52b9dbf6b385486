//! `waypath graph` - list nodes and edges.

use crate::output::{format_weight, Output, OutputConfig, OutputFormat, TableDisplay, TableOutput};
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use waypath_core::{Graph, GraphData};

/// Node and edge lists; serializes in the same shape `--graph` reads.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct GraphListing(pub GraphData);

impl TableDisplay for GraphListing {
    fn to_table(&self) -> String {
        let config = OutputConfig::new(OutputFormat::Table);
        let nodes: Vec<Vec<String>> = self
            .0
            .nodes
            .iter()
            .map(|n| {
                vec![
                    n.id.clone(),
                    n.name.clone(),
                    format!("{:.0}", n.position.x),
                    format!("{:.0}", n.position.y),
                ]
            })
            .collect();
        let edges: Vec<Vec<String>> = self
            .0
            .edges
            .iter()
            .map(|e| vec![e.source.clone(), e.target.clone(), format_weight(e.weight)])
            .collect();

        format!(
            "{} ({})\n{}\n\n{} ({})\n{}",
            "Nodes".bold(),
            nodes.len(),
            TableOutput::format_rows(&["ID", "NAME", "X", "Y"], &nodes, &config),
            "Edges".bold(),
            edges.len(),
            TableOutput::format_rows(&["FROM", "TO", "WEIGHT"], &edges, &config),
        )
    }
}

pub async fn run(graph: &Graph, format: OutputFormat) -> Result<()> {
    Output::new(GraphListing(graph.to_data()), format).render()
}
