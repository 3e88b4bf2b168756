// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error types for the follower graph
//!
//! There are two classes of failure. [`GraphError`] is a broken contract on
//! the caller's side (following twice, removing an absent vertex, ...): the
//! offending operation returns without touching the graph, and a correct
//! caller never sees one. [`CodecError`] is bad external data or a failed
//! read/write of the graph file, which callers are expected to report.

use crate::account::VertexId;
use std::path::PathBuf;

/// Precondition violation on a vertex or graph operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Account construction with an empty name or a zero age
    #[error("invalid account: {0}")]
    InvalidAccount(&'static str),

    /// The referenced vertex is not part of the graph
    #[error("vertex {0} is not in the graph")]
    UnknownVertex(VertexId),

    /// A vertex with this id is already part of the graph
    #[error("vertex {0} is already in the graph")]
    DuplicateVertex(VertexId),

    /// Only individuals can follow or administer
    #[error("vertex {0} is not an individual")]
    NotAnIndividual(VertexId),

    /// Only pages have admins
    #[error("vertex {0} is not a page")]
    NotAPage(VertexId),

    /// Every id up to `u32::MAX` has been handed out
    #[error("no vertex ids left")]
    IdsExhausted,

    /// `from` already follows `to`
    #[error("{from} already follows {to}")]
    EdgeExists {
        /// Follower
        from: VertexId,
        /// Followed vertex
        to: VertexId,
    },

    /// `from` does not follow `to`
    #[error("{from} does not follow {to}")]
    EdgeMissing {
        /// Follower
        from: VertexId,
        /// Followed vertex
        to: VertexId,
    },

    /// `admin` already administers `page`
    #[error("{admin} is already an admin of {page}")]
    AdminExists {
        /// Page account
        page: VertexId,
        /// Individual
        admin: VertexId,
    },

    /// `admin` does not administer `page`
    #[error("{admin} is not an admin of {page}")]
    AdminMissing {
        /// Page account
        page: VertexId,
        /// Individual
        admin: VertexId,
    },
}

/// Failure while reading, writing or decoding a graph file
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The file could not be read or written
    #[error("failed to access {}: {source}", path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A line matches neither the individual nor the page grammar
    #[error("line {line}: matches neither the individual nor the page grammar")]
    Malformed {
        /// 1-based line number
        line: usize,
    },

    /// Two lines declare the same id
    #[error("line {line}: id {id} is declared twice")]
    DuplicateId {
        /// 1-based line number of the second declaration
        line: usize,
        /// Repeated id
        id: VertexId,
    },

    /// A neighbor or admin list names an id no line declares
    #[error("line {line}: reference to undeclared id {id}")]
    UnresolvedReference {
        /// 1-based line number holding the reference
        line: usize,
        /// Missing id
        id: VertexId,
    },

    /// Wiring a declared relation violated a graph invariant
    #[error("line {line}: {source}")]
    InvalidRelation {
        /// 1-based line number holding the relation
        line: usize,
        /// Rejected operation
        #[source]
        source: GraphError,
    },
}

/// Result alias for graph operations
pub type Result<T> = std::result::Result<T, GraphError>;
