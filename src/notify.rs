// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Change notification for graph observers
//!
//! Observers are plain callbacks run synchronously after a mutation has been
//! fully applied. They see the event only, never the graph, so a handler
//! cannot mutate the graph it is observing.

use crate::account::VertexId;
use std::fmt;

/// What changed in the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphEvent {
    /// A vertex was inserted
    VertexAdded(VertexId),
    /// A vertex and all its relations were removed
    VertexRemoved(VertexId),
    /// `from` started following `to`
    EdgeAdded {
        /// Follower
        from: VertexId,
        /// Followed vertex
        to: VertexId,
    },
    /// `from` stopped following `to`
    EdgeRemoved {
        /// Follower
        from: VertexId,
        /// Followed vertex
        to: VertexId,
    },
    /// `admin` now administers `page`
    AdminAdded {
        /// Page account
        page: VertexId,
        /// Individual
        admin: VertexId,
    },
    /// `admin` no longer administers `page`
    AdminRemoved {
        /// Page account
        page: VertexId,
        /// Individual
        admin: VertexId,
    },
    /// The graph was replaced by the contents of a file
    Loaded,
    /// The graph was written to a file
    Saved,
}

/// Handle returned by [`Observers::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Callback = Box<dyn FnMut(&GraphEvent)>;

/// Registered change observers
#[derive(Default)]
pub struct Observers {
    next: u64,
    callbacks: Vec<(ObserverId, Callback)>,
}

impl Observers {
    /// Register a callback
    pub fn subscribe(&mut self, callback: impl FnMut(&GraphEvent) + 'static) -> ObserverId {
        let id = ObserverId(self.next);
        self.next += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Drop a callback; `false` if it was not registered
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(registered, _)| *registered != id);
        self.callbacks.len() != before
    }

    pub(crate) fn notify(&mut self, event: &GraphEvent) {
        for (_, callback) in &mut self.callbacks {
            callback(event);
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}
