// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Hop distances from a single source
//!
//! Dijkstra with unit weights and a linear scan for the closest pending
//! vertex. Distances are recorded on each reached vertex, keyed by source.

use crate::account::VertexId;
use crate::error::{GraphError, Result};
use crate::graph::SocialGraph;
use tracing::debug;

/// Distance recorded for vertices the source cannot reach
pub const UNREACHED: u32 = 10_000_000;

impl SocialGraph {
    /// Record on every vertex its hop count from `source`
    ///
    /// Every vertex starts at [`UNREACHED`]; the source's own distance map is
    /// then cleared, so it has no recorded distance to itself. Relaxation
    /// overwrites on ties (`<=`).
    pub fn compute_smallest_distance_from(&mut self, source: VertexId) -> Result<()> {
        if !self.contains(source) {
            return Err(GraphError::UnknownVertex(source));
        }
        for vertex in self.vertices_mut() {
            vertex.set_distance(source, UNREACHED);
        }
        self.vertex_mut(source)?.clear_distances();

        let mut pending: Vec<VertexId> = self.ids().collect();
        while let Some((position, closest, hops)) = self.closest(&pending, source) {
            pending.remove(position);

            let targets: Vec<VertexId> = match self.vertex(closest) {
                Some(vertex) => vertex.out_neighbors().iter().copied().collect(),
                None => continue,
            };
            for target in targets {
                let alt = hops + 1;
                if alt <= self.working_distance(target, source) {
                    self.vertex_mut(target)?.set_distance(source, alt);
                }
            }
        }

        debug!("Computed distances from {}", source);
        Ok(())
    }

    /// Hop count from `source` to `vertex`, `None` for the source itself
    #[must_use]
    pub fn distance(&self, vertex: VertexId, source: VertexId) -> Option<u32> {
        self.vertex(vertex)?.distance_from(source)
    }

    /// First pending vertex with the smallest distance, with its position
    fn closest(&self, pending: &[VertexId], source: VertexId) -> Option<(usize, VertexId, u32)> {
        pending
            .iter()
            .enumerate()
            .map(|(position, &id)| (position, id, self.working_distance(id, source)))
            .min_by_key(|&(_, _, hops)| hops)
    }

    /// Recorded distance, reading a missing entry (the source) as zero
    fn working_distance(&self, id: VertexId, source: VertexId) -> u32 {
        self.distance(id, source).unwrap_or(0)
    }
}
