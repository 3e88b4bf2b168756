// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Edge commands - follow, unfollow and list the follow relation

use super::{open_graph, persist, resolve_vertex};
use anyhow::{Context, Result};
use std::path::Path;

/// Run the follow command
pub fn follow(graph_file: &Path, who: &str, whom: &str) -> Result<()> {
    let mut graph = open_graph(graph_file)?;
    let from = resolve_vertex(&graph, who)?;
    let to = resolve_vertex(&graph, whom)?;

    graph
        .add_edge(from, to)
        .with_context(|| format!("Cannot make {} follow {}", who, whom))?;
    persist(&mut graph, graph_file)?;

    println!("{} now follows {}", who, whom);
    Ok(())
}

/// Run the unfollow command
pub fn unfollow(graph_file: &Path, who: &str, whom: &str) -> Result<()> {
    let mut graph = open_graph(graph_file)?;
    let from = resolve_vertex(&graph, who)?;
    let to = resolve_vertex(&graph, whom)?;

    graph
        .remove_edge(from, to)
        .with_context(|| format!("Cannot make {} unfollow {}", who, whom))?;
    persist(&mut graph, graph_file)?;

    println!("{} no longer follows {}", who, whom);
    Ok(())
}

/// Run the edges command
pub fn list(graph_file: &Path) -> Result<()> {
    let graph = open_graph(graph_file)?;

    if graph.edge_count() == 0 {
        println!("No edges defined. Use 'followgraph follow' to create one.");
        return Ok(());
    }

    println!("Edges ({}):", graph.edge_count());
    for (id, targets) in graph.edges() {
        if targets.is_empty() {
            continue;
        }
        let Some(source) = graph.vertex(id) else { continue };
        let names: Vec<String> = targets
            .iter()
            .filter_map(|t| graph.vertex(*t))
            .map(ToString::to_string)
            .collect();
        println!("  {} -> {}", source, names.join(", "));
    }
    Ok(())
}
