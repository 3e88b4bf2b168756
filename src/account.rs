// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Account kinds and the per-vertex state of the follower graph
//!
//! An [`Account`] is what a caller builds and hands to the graph; once inserted
//! it becomes a [`Vertex`] carrying its id, adjacency, rank and distances.
//! Adjacency is stored as ids into the graph arena, never as references.

use crate::error::{GraphError, Result};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroU32;

/// Identifier of a vertex, unique and positive within a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(NonZeroU32);

impl VertexId {
    /// The id handed to the first vertex of an empty graph
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Wrap a raw id, `None` for zero
    #[must_use]
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// Raw integer value
    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// The id following this one, `None` past `u32::MAX`
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind-specific state of an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountKind {
    /// A person; the only kind allowed to follow or administer
    Individual {
        /// First name
        given_name: String,
        /// Age in years, always positive
        age: u32,
    },
    /// A page, administered by individuals
    Page {
        /// Individuals administering this page, in insertion order
        admins: IndexSet<VertexId>,
    },
}

/// An account not yet attached to a graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    name: String,
    kind: AccountKind,
}

impl Account {
    /// Build an individual account
    pub fn individual(given_name: impl Into<String>, name: impl Into<String>, age: u32) -> Result<Self> {
        let given_name = given_name.into();
        let name = name.into();
        check_name(&name, "name must not be empty")?;
        check_name(&given_name, "first name must not be empty")?;
        if age == 0 {
            return Err(GraphError::InvalidAccount("age must be positive"));
        }
        Ok(Self {
            name,
            kind: AccountKind::Individual { given_name, age },
        })
    }

    /// Build a page account with no admins
    pub fn page(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        check_name(&name, "name must not be empty")?;
        Ok(Self {
            name,
            kind: AccountKind::Page {
                admins: IndexSet::new(),
            },
        })
    }

    /// Name (family name for individuals)
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind-specific state
    #[must_use]
    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }
}

/// Names are stored one per line in graph files
fn check_name(value: &str, empty: &'static str) -> Result<()> {
    if value.is_empty() {
        return Err(GraphError::InvalidAccount(empty));
    }
    if value.contains(['\n', '\r']) {
        return Err(GraphError::InvalidAccount("names must not contain line breaks"));
    }
    Ok(())
}

/// An account attached to a graph
#[derive(Debug, Clone)]
pub struct Vertex {
    id: VertexId,
    name: String,
    kind: AccountKind,
    out_neighbors: IndexSet<VertexId>,
    in_followers: IndexSet<VertexId>,
    rank: f64,
    distances: HashMap<VertexId, u32>,
}

impl Vertex {
    pub(crate) fn attach(id: VertexId, account: Account) -> Self {
        Self {
            id,
            name: account.name,
            kind: account.kind,
            out_neighbors: IndexSet::new(),
            in_followers: IndexSet::new(),
            rank: 1.0,
            distances: HashMap::new(),
        }
    }

    /// Id assigned by the graph
    #[must_use]
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Name (family name for individuals)
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind-specific state
    #[must_use]
    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }

    /// Whether this vertex is an individual
    #[must_use]
    pub fn is_individual(&self) -> bool {
        matches!(self.kind, AccountKind::Individual { .. })
    }

    /// Whether this vertex is a page
    #[must_use]
    pub fn is_page(&self) -> bool {
        matches!(self.kind, AccountKind::Page { .. })
    }

    /// First name of an individual
    #[must_use]
    pub fn given_name(&self) -> Option<&str> {
        match &self.kind {
            AccountKind::Individual { given_name, .. } => Some(given_name),
            AccountKind::Page { .. } => None,
        }
    }

    /// Age of an individual
    #[must_use]
    pub fn age(&self) -> Option<u32> {
        match self.kind {
            AccountKind::Individual { age, .. } => Some(age),
            AccountKind::Page { .. } => None,
        }
    }

    /// Admins of a page
    #[must_use]
    pub fn admins(&self) -> Option<&IndexSet<VertexId>> {
        match &self.kind {
            AccountKind::Page { admins } => Some(admins),
            AccountKind::Individual { .. } => None,
        }
    }

    /// "First Last" for individuals, the name for pages
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.kind {
            AccountKind::Individual { given_name, .. } => format!("{given_name} {}", self.name),
            AccountKind::Page { .. } => self.name.clone(),
        }
    }

    /// Order two vertices by display name, whatever their kinds
    #[must_use]
    pub fn display_cmp(&self, other: &Self) -> Ordering {
        self.display_name().cmp(&other.display_name())
    }

    /// Vertices this one follows, in follow order
    #[must_use]
    pub fn out_neighbors(&self) -> &IndexSet<VertexId> {
        &self.out_neighbors
    }

    /// Vertices following this one, in follow order
    #[must_use]
    pub fn followers(&self) -> &IndexSet<VertexId> {
        &self.in_followers
    }

    /// Number of vertices followed
    #[must_use]
    pub fn out_degree(&self) -> usize {
        self.out_neighbors.len()
    }

    /// Number of followers
    #[must_use]
    pub fn in_degree(&self) -> usize {
        self.in_followers.len()
    }

    /// Influence score from the last ranking run
    #[must_use]
    pub fn rank(&self) -> f64 {
        self.rank
    }

    /// Hop count from `source` recorded by the last distance run from it
    #[must_use]
    pub fn distance_from(&self, source: VertexId) -> Option<u32> {
        self.distances.get(&source).copied()
    }

    pub(crate) fn add_neighbor(&mut self, target: VertexId) -> Result<()> {
        if !self.out_neighbors.insert(target) {
            return Err(GraphError::EdgeExists { from: self.id, to: target });
        }
        Ok(())
    }

    pub(crate) fn remove_neighbor(&mut self, target: VertexId) -> Result<()> {
        if !self.out_neighbors.shift_remove(&target) {
            return Err(GraphError::EdgeMissing { from: self.id, to: target });
        }
        Ok(())
    }

    pub(crate) fn add_follower(&mut self, follower: VertexId) -> Result<()> {
        if !self.in_followers.insert(follower) {
            return Err(GraphError::EdgeExists { from: follower, to: self.id });
        }
        Ok(())
    }

    pub(crate) fn remove_follower(&mut self, follower: VertexId) -> Result<()> {
        if !self.in_followers.shift_remove(&follower) {
            return Err(GraphError::EdgeMissing { from: follower, to: self.id });
        }
        Ok(())
    }

    pub(crate) fn add_admin(&mut self, admin: VertexId) -> Result<()> {
        let page = self.id;
        match &mut self.kind {
            AccountKind::Page { admins } => {
                if admins.insert(admin) {
                    Ok(())
                } else {
                    Err(GraphError::AdminExists { page, admin })
                }
            }
            AccountKind::Individual { .. } => Err(GraphError::NotAPage(page)),
        }
    }

    pub(crate) fn remove_admin(&mut self, admin: VertexId) -> Result<()> {
        let page = self.id;
        match &mut self.kind {
            AccountKind::Page { admins } => {
                if admins.shift_remove(&admin) {
                    Ok(())
                } else {
                    Err(GraphError::AdminMissing { page, admin })
                }
            }
            AccountKind::Individual { .. } => Err(GraphError::NotAPage(page)),
        }
    }

    /// Drop every trace of `gone` from this vertex
    pub(crate) fn forget(&mut self, gone: VertexId) {
        self.out_neighbors.shift_remove(&gone);
        self.in_followers.shift_remove(&gone);
        self.distances.remove(&gone);
        if let AccountKind::Page { admins } = &mut self.kind {
            admins.shift_remove(&gone);
        }
    }

    pub(crate) fn set_rank(&mut self, rank: f64) {
        self.rank = rank;
    }

    pub(crate) fn set_distance(&mut self, source: VertexId, hops: u32) {
        self.distances.insert(source, hops);
    }

    pub(crate) fn clear_distances(&mut self) {
        self.distances.clear();
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            AccountKind::Individual { given_name, .. } => write!(f, "{given_name} {}", self.name),
            AccountKind::Page { .. } => f.write_str(&self.name),
        }
    }
}
