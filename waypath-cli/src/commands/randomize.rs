//! `waypath randomize` - draw new edge weights.

use super::graph::GraphListing;
use crate::output::{JsonOutput, Output, OutputConfig, OutputFormat, SuccessMessage};
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use waypath_core::{Graph, Session, SessionSettings};

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// The graph with every weight redrawn from `settings.weight_range`.
pub fn randomized(graph: Graph, settings: SessionSettings, seed: Option<u64>) -> Graph {
    let mut session = Session::with_graph(graph).with_settings(settings);
    session.randomize_weights(&mut rng_for(seed));
    let range = session.settings().weight_range;
    tracing::info!(
        "Randomized {} edge weights in {}..={}",
        session.graph().edge_count(),
        range.min,
        range.max
    );
    session.graph().clone()
}

pub async fn run(
    graph: Graph,
    settings: SessionSettings,
    seed: Option<u64>,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let graph = randomized(graph, settings, seed);
    let listing = GraphListing(graph.to_data());

    match output {
        Some(path) => {
            let json = JsonOutput::format(&listing, &OutputConfig::new(OutputFormat::Json));
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            Output::new(
                SuccessMessage::new(format!(
                    "Wrote {} edges to {}",
                    graph.edge_count(),
                    path.display()
                )),
                format,
            )
            .render()
        }
        None => Output::new(listing, format).render(),
    }
}
