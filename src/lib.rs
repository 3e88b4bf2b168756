// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Followgraph library - who follows whom, and who matters
//!
//! This crate keeps a directed graph of individuals and pages, ranks every
//! account by influence, measures hop distances from any account, and stores
//! the whole graph in a small line-oriented text format.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod account;
pub mod codec;
pub mod config;
pub mod distance;
pub mod error;
pub mod graph;
pub mod notify;
pub mod rank;

/// Prelude for common imports
pub mod prelude {
    pub use crate::account::{Account, AccountKind, Vertex, VertexId};
    pub use crate::distance::UNREACHED;
    pub use crate::error::{CodecError, GraphError};
    pub use crate::graph::SocialGraph;
    pub use crate::notify::{GraphEvent, ObserverId};
}
