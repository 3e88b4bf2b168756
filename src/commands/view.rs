// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Read-only views - listings, statistics, distances

use super::{open_graph, resolve_vertex};
use followgraph::account::{Vertex, VertexId};
use followgraph::distance::UNREACHED;
use followgraph::graph::SocialGraph;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

/// Orderings offered by `list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SortOrder {
    /// Insertion order
    Insertion,
    /// Display name
    Name,
    /// Out-degree, highest first
    Degree,
    /// Rank, highest first
    Rank,
}

/// Kind filter offered by `list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum KindFilter {
    /// Every vertex
    All,
    /// Individuals only
    Users,
    /// Pages only
    Pages,
}

impl KindFilter {
    fn accepts(self, vertex: &Vertex) -> bool {
        match self {
            Self::All => true,
            Self::Users => vertex.is_individual(),
            Self::Pages => vertex.is_page(),
        }
    }
}

/// Serializable summary of one vertex
#[derive(Debug, Clone, Serialize)]
pub struct VertexSummary {
    /// Vertex id
    pub id: VertexId,
    /// "individual" or "page"
    pub kind: &'static str,
    /// Display name
    pub display: String,
    /// Age of an individual
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Ids followed
    pub follows: Vec<VertexId>,
    /// Ids following
    pub followers: Vec<VertexId>,
    /// Admin ids of a page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admins: Option<Vec<VertexId>>,
    /// Rank from the last ranking run
    pub rank: f64,
}

impl From<&Vertex> for VertexSummary {
    fn from(v: &Vertex) -> Self {
        Self {
            id: v.id(),
            kind: if v.is_individual() { "individual" } else { "page" },
            display: v.display_name(),
            age: v.age(),
            follows: v.out_neighbors().iter().copied().collect(),
            followers: v.followers().iter().copied().collect(),
            admins: v.admins().map(|a| a.iter().copied().collect()),
            rank: v.rank(),
        }
    }
}

/// Graph-wide statistics
#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    /// Number of vertices
    pub vertices: usize,
    /// Number of follow edges
    pub edges: usize,
    /// Number of individuals
    pub individuals: usize,
    /// Number of pages
    pub pages: usize,
    /// Mean age of individuals
    pub average_age: Option<f64>,
    /// Number of strongly connected components
    pub strongly_connected_components: usize,
}

impl From<&SocialGraph> for Stats {
    fn from(graph: &SocialGraph) -> Self {
        Self {
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
            individuals: graph.individual_count(),
            pages: graph.page_count(),
            average_age: graph.average_age(),
            strongly_connected_components: graph.strongly_connected_count(),
        }
    }
}

fn names(graph: &SocialGraph, ids: impl Iterator<Item = VertexId>) -> String {
    ids.filter_map(|id| graph.vertex(id))
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Run the list command
pub fn list(graph_file: &Path, sort: SortOrder, kind: KindFilter, json: bool) -> Result<()> {
    let mut graph = open_graph(graph_file)?;
    graph.generate_ranking();

    let ordered: Vec<&Vertex> = match sort {
        SortOrder::Insertion => graph.vertices().collect(),
        SortOrder::Name => graph.sorted_by_display(),
        SortOrder::Degree => graph.sorted_by_out_degree(),
        SortOrder::Rank => graph.sorted_by_rank(),
    };
    let selected: Vec<&Vertex> = ordered.into_iter().filter(|v| kind.accepts(v)).collect();

    if json {
        let summaries: Vec<VertexSummary> = selected.iter().map(|v| VertexSummary::from(*v)).collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if selected.is_empty() {
        println!("No vertices. Use 'followgraph add-user' or 'followgraph add-page' to create one.");
        return Ok(());
    }

    println!("Vertices ({}):", selected.len());
    for v in selected {
        println!(
            "  {:>4}  {}  (follows {}, followers {}, rank {:.4})",
            v.id(),
            v,
            v.out_degree(),
            v.in_degree(),
            v.rank()
        );
    }
    Ok(())
}

/// Run the info command
pub fn info(graph_file: &Path, query: &str, json: bool) -> Result<()> {
    let mut graph = open_graph(graph_file)?;
    graph.generate_ranking();
    let id = resolve_vertex(&graph, query)?;
    let Some(v) = graph.vertex(id) else {
        anyhow::bail!("No vertex with id {}", id);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&VertexSummary::from(v))?);
        return Ok(());
    }

    println!("ID: {}", v.id());
    println!("Name: {}", v);
    if let Some(age) = v.age() {
        println!("Age: {}", age);
        println!("Follows: {}", names(&graph, v.out_neighbors().iter().copied()));
    }
    println!("Followed by: {}", names(&graph, v.followers().iter().copied()));
    if let Some(admins) = v.admins() {
        println!("Admins: {}", names(&graph, admins.iter().copied()));
    }
    println!("Rank: {}", v.rank());
    println!("Out-degree: {}", v.out_degree());
    println!("In-degree: {}", v.in_degree());
    Ok(())
}

/// Run the stats command
pub fn stats(graph_file: &Path, json: bool) -> Result<()> {
    let graph = open_graph(graph_file)?;
    let stats = Stats::from(&graph);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Vertices: {}", stats.vertices);
    println!("Edges: {}", stats.edges);
    println!("Individuals: {}", stats.individuals);
    println!("Pages: {}", stats.pages);
    match stats.average_age {
        Some(age) => println!("Average age: {:.2}", age),
        None => println!("Average age: n/a"),
    }
    println!("Strongly connected components: {}", stats.strongly_connected_components);
    Ok(())
}

/// Run the distance command
pub fn distance(graph_file: &Path, source: &str, json: bool) -> Result<()> {
    let mut graph = open_graph(graph_file)?;
    let source = resolve_vertex(&graph, source)?;
    graph.compute_smallest_distance_from(source)?;

    let hops: Vec<(VertexId, Option<u32>)> = graph
        .ids()
        .filter(|&id| id != source)
        .map(|id| {
            let d = graph.distance(id, source).filter(|&d| d != UNREACHED);
            (id, d)
        })
        .collect();

    if json {
        let map: serde_json::Map<String, serde_json::Value> = hops
            .iter()
            .map(|(id, d)| (id.to_string(), serde_json::json!(d)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    let Some(origin) = graph.vertex(source) else {
        anyhow::bail!("No vertex with id {}", source);
    };
    println!("Distances from {}:", origin);
    for (id, d) in hops {
        let Some(v) = graph.vertex(id) else { continue };
        match d {
            Some(d) => println!("  {}: {}", v, d),
            None => println!("  {}: unreachable", v),
        }
    }
    Ok(())
}
