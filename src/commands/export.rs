// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Export command - exports the follower graph to various formats

use super::open_graph;
use super::view::VertexSummary;
use followgraph::codec;
use followgraph::graph::SocialGraph;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Graphviz DOT format
    Dot,
    /// JSON format
    Json,
    /// The native line format
    Text,
}

impl ExportFormat {
    /// Get file extension for format
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Json => "json",
            Self::Text => "txt",
        }
    }
}

/// Render the graph in `format`, ranking it first for JSON
pub fn render(graph: &mut SocialGraph, format: ExportFormat) -> Result<String> {
    Ok(match format {
        ExportFormat::Dot => graph.to_dot(),
        ExportFormat::Json => {
            graph.generate_ranking();
            let vertices: Vec<VertexSummary> = graph.vertices().map(VertexSummary::from).collect();
            serde_json::to_string_pretty(&vertices).context("Failed to serialize graph to JSON")?
        }
        ExportFormat::Text => codec::encode(graph),
    })
}

/// Run the export command
pub fn run(graph_file: &Path, format: ExportFormat, output: Option<PathBuf>) -> Result<()> {
    info!("Exporting to {}", format.extension());

    let mut graph = open_graph(graph_file)?;
    if graph.is_empty() {
        eprintln!("Warning: Graph is empty. Run 'followgraph add-user' first.");
    }

    let content = render(&mut graph, format)?;

    match output {
        Some(path) => {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
            println!("Exported to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }

    Ok(())
}
