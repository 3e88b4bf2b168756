// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! The follower graph container
//!
//! Vertices live in an insertion-ordered arena keyed by [`VertexId`]. Every
//! relation is recorded on both endpoints, and every mutation checks its
//! preconditions before touching anything, so a rejected call leaves the graph
//! exactly as it was.

use crate::account::{Account, Vertex, VertexId};
use crate::error::{GraphError, Result};
use crate::notify::{GraphEvent, ObserverId, Observers};
use indexmap::{IndexMap, IndexSet};
use petgraph::algo::kosaraju_scc;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use tracing::debug;

/// Directed graph of individuals and pages
#[derive(Debug)]
pub struct SocialGraph {
    /// All vertices, in insertion order
    vertices: IndexMap<VertexId, Vertex>,
    /// Id handed to the next inserted vertex, `None` once ids run out
    next_id: Option<VertexId>,
    /// Change observers
    observers: Observers,
}

impl Default for SocialGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SocialGraph {
    /// Create a new empty graph
    #[must_use]
    pub fn new() -> Self {
        Self {
            vertices: IndexMap::new(),
            next_id: Some(VertexId::FIRST),
            observers: Observers::default(),
        }
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Register a callback run after every successful mutation
    pub fn subscribe(&mut self, callback: impl FnMut(&GraphEvent) + 'static) -> ObserverId {
        self.observers.subscribe(callback)
    }

    /// Remove a previously registered callback
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub(crate) fn notify(&mut self, event: GraphEvent) {
        self.observers.notify(&event);
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Insert an account under the next sequential id
    pub fn add_vertex(&mut self, account: Account) -> Result<VertexId> {
        let id = self.next_id.ok_or(GraphError::IdsExhausted)?;
        self.next_id = id.next();
        self.vertices.insert(id, Vertex::attach(id, account));
        debug!("Added vertex {}", id);
        self.notify(GraphEvent::VertexAdded(id));
        Ok(id)
    }

    /// Insert an account under an explicit id, leaving the counter alone
    pub(crate) fn insert_with_id(&mut self, id: VertexId, account: Account) -> Result<()> {
        if self.vertices.contains_key(&id) {
            return Err(GraphError::DuplicateVertex(id));
        }
        self.vertices.insert(id, Vertex::attach(id, account));
        Ok(())
    }

    /// Remove a vertex and every relation that mentions it
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<()> {
        if self.vertices.shift_remove(&id).is_none() {
            return Err(GraphError::UnknownVertex(id));
        }
        for vertex in self.vertices.values_mut() {
            vertex.forget(id);
        }
        debug!("Removed vertex {}", id);
        self.notify(GraphEvent::VertexRemoved(id));
        Ok(())
    }

    /// Make individual `from` follow `to`
    pub fn add_edge(&mut self, from: VertexId, to: VertexId) -> Result<()> {
        self.link(from, to)?;
        debug!("Added edge {} -> {}", from, to);
        self.notify(GraphEvent::EdgeAdded { from, to });
        Ok(())
    }

    /// Wire an edge on both endpoints without notifying
    pub(crate) fn link(&mut self, from: VertexId, to: VertexId) -> Result<()> {
        let source = self.vertex(from).ok_or(GraphError::UnknownVertex(from))?;
        if !source.is_individual() {
            return Err(GraphError::NotAnIndividual(from));
        }
        if source.out_neighbors().contains(&to) {
            return Err(GraphError::EdgeExists { from, to });
        }
        if !self.contains(to) {
            return Err(GraphError::UnknownVertex(to));
        }

        self.vertex_mut(from)?.add_neighbor(to)?;
        self.vertex_mut(to)?.add_follower(from)
    }

    /// Make `from` stop following `to`
    pub fn remove_edge(&mut self, from: VertexId, to: VertexId) -> Result<()> {
        let source = self.vertex(from).ok_or(GraphError::UnknownVertex(from))?;
        if !source.out_neighbors().contains(&to) {
            return Err(GraphError::EdgeMissing { from, to });
        }

        self.vertex_mut(from)?.remove_neighbor(to)?;
        self.vertex_mut(to)?.remove_follower(from)?;
        debug!("Removed edge {} -> {}", from, to);
        self.notify(GraphEvent::EdgeRemoved { from, to });
        Ok(())
    }

    /// Make individual `admin` an administrator of `page`
    pub fn add_admin(&mut self, page: VertexId, admin: VertexId) -> Result<()> {
        self.grant(page, admin)?;
        debug!("Added admin {} to page {}", admin, page);
        self.notify(GraphEvent::AdminAdded { page, admin });
        Ok(())
    }

    /// Record an admin without notifying
    pub(crate) fn grant(&mut self, page: VertexId, admin: VertexId) -> Result<()> {
        let admins = self.page_admins(page)?;
        if admins.contains(&admin) {
            return Err(GraphError::AdminExists { page, admin });
        }
        match self.vertex(admin) {
            None => return Err(GraphError::UnknownVertex(admin)),
            Some(v) if !v.is_individual() => return Err(GraphError::NotAnIndividual(admin)),
            Some(_) => {}
        }
        self.vertex_mut(page)?.add_admin(admin)
    }

    /// Withdraw `admin` from the administrators of `page`
    pub fn remove_admin(&mut self, page: VertexId, admin: VertexId) -> Result<()> {
        if !self.page_admins(page)?.contains(&admin) {
            return Err(GraphError::AdminMissing { page, admin });
        }
        self.vertex_mut(page)?.remove_admin(admin)?;
        debug!("Removed admin {} from page {}", admin, page);
        self.notify(GraphEvent::AdminRemoved { page, admin });
        Ok(())
    }

    /// Drop every vertex and restart ids at 1
    pub(crate) fn clear(&mut self) {
        self.vertices.clear();
        self.next_id = Some(VertexId::FIRST);
    }

    pub(crate) fn set_next_id(&mut self, id: Option<VertexId>) {
        self.next_id = id;
    }

    pub(crate) fn vertex_mut(&mut self, id: VertexId) -> Result<&mut Vertex> {
        self.vertices.get_mut(&id).ok_or(GraphError::UnknownVertex(id))
    }

    pub(crate) fn vertices_mut(&mut self) -> impl Iterator<Item = &mut Vertex> {
        self.vertices.values_mut()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Get a vertex by id
    #[must_use]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    /// Whether a vertex with this id exists
    #[must_use]
    pub fn contains(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    /// First vertex whose name (family name for individuals) matches
    #[must_use]
    pub fn vertex_by_name(&self, name: &str) -> Option<&Vertex> {
        self.vertices.values().find(|v| v.name() == name)
    }

    /// First vertex whose display name matches
    #[must_use]
    pub fn vertex_by_display_name(&self, display: &str) -> Option<&Vertex> {
        self.vertices.values().find(|v| v.display_name() == display)
    }

    /// All vertices, in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    /// All ids, in insertion order
    pub fn ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys().copied()
    }

    /// Id the next inserted vertex will receive, `None` once ids run out
    #[must_use]
    pub fn next_id(&self) -> Option<VertexId> {
        self.next_id
    }

    /// Get vertex count
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get edge count (sum of out-degrees)
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.vertices.values().map(Vertex::out_degree).sum()
    }

    /// Check if the graph is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of vertices `id` follows
    pub fn out_degree(&self, id: VertexId) -> Result<usize> {
        self.vertex(id)
            .map(Vertex::out_degree)
            .ok_or(GraphError::UnknownVertex(id))
    }

    /// Number of followers of `id`
    pub fn in_degree(&self, id: VertexId) -> Result<usize> {
        self.vertex(id)
            .map(Vertex::in_degree)
            .ok_or(GraphError::UnknownVertex(id))
    }

    /// Admins of a page
    pub fn page_admins(&self, page: VertexId) -> Result<&IndexSet<VertexId>> {
        self.vertex(page)
            .ok_or(GraphError::UnknownVertex(page))?
            .admins()
            .ok_or(GraphError::NotAPage(page))
    }

    /// Number of individuals
    #[must_use]
    pub fn individual_count(&self) -> usize {
        self.vertices.values().filter(|v| v.is_individual()).count()
    }

    /// Number of pages
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.vertices.values().filter(|v| v.is_page()).count()
    }

    /// Mean age of individuals, `None` without any
    #[must_use]
    pub fn average_age(&self) -> Option<f64> {
        let ages: Vec<u32> = self.vertices.values().filter_map(Vertex::age).collect();
        if ages.is_empty() {
            return None;
        }
        let total: f64 = ages.iter().map(|&a| f64::from(a)).sum();
        #[allow(clippy::cast_precision_loss)]
        let count = ages.len() as f64;
        Some(total / count)
    }

    /// Vertices ordered by display name
    #[must_use]
    pub fn sorted_by_display(&self) -> Vec<&Vertex> {
        let mut sorted: Vec<&Vertex> = self.vertices.values().collect();
        sorted.sort_by(|a, b| a.display_cmp(b));
        sorted
    }

    /// Vertices ordered by out-degree, highest first
    #[must_use]
    pub fn sorted_by_out_degree(&self) -> Vec<&Vertex> {
        let mut sorted: Vec<&Vertex> = self.vertices.values().collect();
        sorted.sort_by(|a, b| b.out_degree().cmp(&a.out_degree()));
        sorted
    }

    /// Vertices ordered by rank, highest first
    #[must_use]
    pub fn sorted_by_rank(&self) -> Vec<&Vertex> {
        let mut sorted: Vec<&Vertex> = self.vertices.values().collect();
        sorted.sort_by(|a, b| b.rank().total_cmp(&a.rank()));
        sorted
    }

    /// The follow relation: each vertex with the vertices it follows
    #[must_use]
    pub fn edges(&self) -> IndexMap<VertexId, Vec<VertexId>> {
        self.vertices
            .iter()
            .map(|(id, v)| (*id, v.out_neighbors().iter().copied().collect()))
            .collect()
    }

    // =========================================================================
    // petgraph projection
    // =========================================================================

    /// Project the follow relation onto a petgraph graph
    #[must_use]
    pub fn to_petgraph(&self) -> DiGraph<VertexId, ()> {
        let mut graph = DiGraph::with_capacity(self.vertices.len(), self.edge_count());
        let node_indices: HashMap<VertexId, NodeIndex> = self
            .vertices
            .keys()
            .map(|&id| (id, graph.add_node(id)))
            .collect();

        for (id, vertex) in &self.vertices {
            for target in vertex.out_neighbors() {
                graph.add_edge(node_indices[id], node_indices[target], ());
            }
        }
        graph
    }

    /// Number of strongly connected components
    #[must_use]
    pub fn strongly_connected_count(&self) -> usize {
        kosaraju_scc(&self.to_petgraph()).len()
    }

    /// Export to DOT format for Graphviz
    #[must_use]
    pub fn to_dot(&self) -> String {
        let labelled = self.to_petgraph().map(
            |_, id| self.vertices[id].display_name(),
            |_, _| "",
        );
        format!("{}", Dot::with_config(&labelled, &[Config::EdgeNoLabel]))
    }
}
