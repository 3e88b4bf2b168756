// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Influence ranking over the follower graph
//!
//! A fixed-pass PageRank. Ranks are updated in place, in vertex insertion
//! order, so a vertex visited later in a pass already sees the new ranks of
//! the vertices visited before it. This is not the synchronous update of
//! textbook PageRank; results are reproducible bit for bit for a given
//! insertion order.

use crate::account::VertexId;
use crate::graph::SocialGraph;
use tracing::trace;

/// Share of rank passed along follow edges
pub const DAMPING: f64 = 0.85;

/// Share of rank spread evenly over every vertex
pub const TELEPORT: f64 = 0.15;

/// Number of passes; there is no convergence check
pub const ITERATIONS: usize = 101;

impl SocialGraph {
    /// Recompute the rank of every vertex
    pub fn generate_ranking(&mut self) {
        if self.is_empty() {
            return;
        }
        for vertex in self.vertices_mut() {
            vertex.set_rank(1.0);
        }

        #[allow(clippy::cast_precision_loss)]
        let teleport = TELEPORT / self.vertex_count() as f64;
        let order: Vec<VertexId> = self.ids().collect();

        for pass in 0..ITERATIONS {
            for &id in &order {
                let inflow = self.inflow(id);
                if let Ok(vertex) = self.vertex_mut(id) {
                    vertex.set_rank(teleport + DAMPING * inflow);
                }
            }
            trace!(pass, "ranking pass complete");
        }
    }

    /// Sum of rank shares received from the followers of `id`
    fn inflow(&self, id: VertexId) -> f64 {
        let Some(vertex) = self.vertex(id) else {
            return 0.0;
        };
        vertex
            .followers()
            .iter()
            .filter_map(|&f| self.vertex(f))
            .map(|follower| {
                debug_assert!(follower.out_degree() > 0, "follower {} follows nobody", follower.id());
                #[allow(clippy::cast_precision_loss)]
                let share = follower.rank() / follower.out_degree() as f64;
                share
            })
            .sum()
    }
}
