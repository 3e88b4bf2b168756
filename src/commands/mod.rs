// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Command implementations
//!
//! Every command loads the graph file, acts, and writes the file back when it
//! changed something. A missing file is an empty graph.

pub mod account;
pub mod admin;
pub mod completions;
pub mod config;
pub mod edge;
pub mod export;
pub mod view;

use followgraph::account::VertexId;
use followgraph::graph::SocialGraph;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load the graph at `path`, or an empty one if the file does not exist
pub fn open_graph(path: &Path) -> Result<SocialGraph> {
    let mut graph = SocialGraph::new();
    if path.exists() {
        graph
            .load(path)
            .with_context(|| format!("Failed to load graph from {}", path.display()))?;
    } else {
        debug!("No graph at {}, starting empty", path.display());
    }
    Ok(graph)
}

/// Write the graph to `path`, creating parent directories
pub fn persist(graph: &mut SocialGraph, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    graph
        .save(path)
        .with_context(|| format!("Failed to save graph to {}", path.display()))
}

/// Resolve an id, display name or name to a vertex id
pub fn resolve_vertex(graph: &SocialGraph, query: &str) -> Result<VertexId> {
    if let Some(id) = query.parse().ok().and_then(VertexId::new) {
        if graph.contains(id) {
            return Ok(id);
        }
        anyhow::bail!("No vertex with id {}", id);
    }

    let mut matches: Vec<_> = graph
        .vertices()
        .filter(|v| v.display_name() == query)
        .collect();
    if matches.is_empty() {
        matches = graph.vertices().filter(|v| v.name() == query).collect();
    }

    match matches.len() {
        0 => anyhow::bail!("No vertex found matching: {}", query),
        1 => Ok(matches[0].id()),
        _ => {
            eprintln!("Multiple vertices match '{}':", query);
            for v in &matches {
                eprintln!("  {} ({})", v, v.id());
            }
            anyhow::bail!("Ambiguous name. Use the id.");
        }
    }
}
