// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Line-oriented text format for the follower graph
//!
//! One line per vertex, in graph order:
//!
//! ```text
//! {id = 1, name = Lovelace, firstname = Ada, age = 36, neighbors = [2, 3]}
//! {id = 2, name = Events, admins = [1]}
//! ```
//!
//! Ids are written as stored and read back verbatim. Neighbor and admin lists
//! may point forward, so decoding declares every vertex first and wires the
//! relations in a second pass.

use crate::account::{Account, AccountKind, VertexId};
use crate::error::CodecError;
use crate::graph::SocialGraph;
use crate::notify::GraphEvent;
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{info, warn};

/// Result alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

fn individual_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^\{id = (?P<id>[0-9]+), name = (?P<name>.+), firstname = (?P<firstname>.+), age = (?P<age>[0-9]+), neighbors = \[(?P<ids>(?:[0-9]+, )+[0-9]+|[0-9]*)\]\}$",
        )
        .expect("individual line pattern is valid")
    })
}

fn page_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^\{id = (?P<id>[0-9]+), name = (?P<name>.+), admins = \[(?P<ids>(?:[0-9]+, )+[0-9]+|[0-9]*)\]\}$",
        )
        .expect("page line pattern is valid")
    })
}

/// Render the whole graph, one `\n`-terminated line per vertex
#[must_use]
pub fn encode(graph: &SocialGraph) -> String {
    let mut out = String::new();
    for vertex in graph.vertices() {
        let id = vertex.id();
        let name = vertex.name();
        match vertex.kind() {
            AccountKind::Individual { given_name, age } => {
                let neighbors = join_ids(vertex.out_neighbors().iter().copied());
                out.push_str(&format!(
                    "{{id = {id}, name = {name}, firstname = {given_name}, age = {age}, neighbors = [{neighbors}]}}\n"
                ));
            }
            AccountKind::Page { admins } => {
                let admins = join_ids(admins.iter().copied());
                out.push_str(&format!("{{id = {id}, name = {name}, admins = [{admins}]}}\n"));
            }
        }
    }
    out
}

fn join_ids(ids: impl Iterator<Item = VertexId>) -> String {
    ids.map(|id| id.to_string()).collect::<Vec<_>>().join(", ")
}

/// Build a fresh graph from encoded text
pub fn decode(text: &str) -> Result<SocialGraph> {
    let mut graph = SocialGraph::new();
    decode_into(&mut graph, text)?;
    Ok(graph)
}

/// One parsed line, relations not yet wired
struct Declaration {
    id: VertexId,
    account: Account,
    references: Vec<VertexId>,
}

fn parse_line(text: &str) -> Option<Declaration> {
    if let Some(caps) = individual_line().captures(text) {
        let age = caps["age"].parse().ok()?;
        let account = Account::individual(&caps["firstname"], &caps["name"], age).ok()?;
        return declaration(&caps, account);
    }
    if let Some(caps) = page_line().captures(text) {
        let account = Account::page(&caps["name"]).ok()?;
        return declaration(&caps, account);
    }
    None
}

fn declaration(caps: &Captures<'_>, account: Account) -> Option<Declaration> {
    Some(Declaration {
        id: parse_id(&caps["id"])?,
        account,
        references: parse_ids(&caps["ids"])?,
    })
}

fn parse_id(raw: &str) -> Option<VertexId> {
    raw.trim().parse().ok().and_then(VertexId::new)
}

fn parse_ids(raw: &str) -> Option<Vec<VertexId>> {
    if raw.is_empty() {
        return Some(Vec::new());
    }
    raw.split(',').map(parse_id).collect()
}

/// Decode `text` into `graph`, which must be empty
fn decode_into(graph: &mut SocialGraph, text: &str) -> Result<()> {
    let mut declared = Vec::new();
    let mut highest: Option<VertexId> = None;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let Some(declaration) = parse_line(raw) else {
            warn!("Rejecting line {}: {:?}", line, raw);
            return Err(CodecError::Malformed { line });
        };
        let Declaration { id, account, references } = declaration;
        graph
            .insert_with_id(id, account)
            .map_err(|_| CodecError::DuplicateId { line, id })?;
        highest = highest.max(Some(id));
        declared.push((line, id, references));
    }

    for (line, id, references) in declared {
        let is_page = graph.vertex(id).is_some_and(|v| v.is_page());
        for target in references {
            if !graph.contains(target) {
                return Err(CodecError::UnresolvedReference { line, id: target });
            }
            let wired = if is_page {
                graph.grant(id, target)
            } else {
                graph.link(id, target)
            };
            wired.map_err(|source| CodecError::InvalidRelation { line, source })?;
        }
    }

    graph.set_next_id(highest.map_or(Some(VertexId::FIRST), VertexId::next));
    Ok(())
}

impl SocialGraph {
    /// Write the graph to `path`, replacing the file
    pub fn save(&mut self, path: &Path) -> Result<()> {
        fs::write(path, encode(self)).map_err(|source| CodecError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Saved {} vertices to {}", self.vertex_count(), path.display());
        self.notify(GraphEvent::Saved);
        Ok(())
    }

    /// Replace the graph with the contents of `path`
    ///
    /// A read failure leaves the graph untouched; a decoding failure,
    /// including bytes that are not UTF-8, leaves it empty.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let bytes = fs::read(path).map_err(|source| CodecError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => {
                let valid = &err.as_bytes()[..err.utf8_error().valid_up_to()];
                let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
                warn!("Rejecting line {}: not UTF-8", line);
                self.clear();
                return Err(CodecError::Malformed { line });
            }
        };
        self.load_from_str(&text)?;
        info!("Loaded {} vertices from {}", self.vertex_count(), path.display());
        Ok(())
    }

    /// Replace the graph with decoded `text`; empty on failure
    pub fn load_from_str(&mut self, text: &str) -> Result<()> {
        self.clear();
        if let Err(err) = decode_into(self, text) {
            self.clear();
            return Err(err);
        }
        self.notify(GraphEvent::Loaded);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use std::cell::Cell;
    use std::rc::Rc;

    fn id(raw: u32) -> VertexId {
        VertexId::new(raw).unwrap()
    }

    fn sample() -> SocialGraph {
        let mut graph = SocialGraph::new();
        let ada = graph.add_vertex(Account::individual("Ada", "Lovelace", 36).unwrap()).unwrap();
        let alan = graph.add_vertex(Account::individual("Alan", "Turing", 41).unwrap()).unwrap();
        let events = graph.add_vertex(Account::page("Events").unwrap()).unwrap();
        graph.add_edge(ada, alan).unwrap();
        graph.add_edge(ada, events).unwrap();
        graph.add_edge(alan, ada).unwrap();
        graph.add_admin(events, alan).unwrap();
        graph.add_admin(events, ada).unwrap();
        graph
    }

    #[test]
    fn test_encode_format() {
        let text = encode(&sample());
        assert_eq!(
            text,
            "{id = 1, name = Lovelace, firstname = Ada, age = 36, neighbors = [2, 3]}\n\
             {id = 2, name = Turing, firstname = Alan, age = 41, neighbors = [1]}\n\
             {id = 3, name = Events, admins = [2, 1]}\n"
        );
    }

    #[test]
    fn test_empty_lists_render_as_empty_brackets() {
        let mut graph = SocialGraph::new();
        graph.add_vertex(Account::individual("Ada", "Lovelace", 36).unwrap()).unwrap();
        graph.add_vertex(Account::page("Events").unwrap()).unwrap();

        assert_eq!(
            encode(&graph),
            "{id = 1, name = Lovelace, firstname = Ada, age = 36, neighbors = []}\n\
             {id = 2, name = Events, admins = []}\n"
        );
    }

    #[test]
    fn test_decode_resolves_forward_references() {
        let text = "{id = 4, name = Lovelace, firstname = Ada, age = 36, neighbors = [9, 7]}\n\
                    {id = 7, name = Events, admins = [4]}\n\
                    {id = 9, name = Turing, firstname = Alan, age = 41, neighbors = []}\n";
        let graph = decode(text).unwrap();

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.next_id(), Some(id(10)));
        let ada = graph.vertex(id(4)).unwrap();
        assert_eq!(ada.out_neighbors().iter().copied().collect::<Vec<_>>(), vec![id(9), id(7)]);
        assert!(graph.vertex(id(9)).unwrap().followers().contains(&id(4)));
        assert!(graph.page_admins(id(7)).unwrap().contains(&id(4)));
    }

    #[test]
    fn test_round_trip_preserves_ids_after_removal() {
        let mut graph = sample();
        graph.remove_vertex(id(1)).unwrap();
        let reloaded = decode(&encode(&graph)).unwrap();

        assert_eq!(reloaded.ids().collect::<Vec<_>>(), vec![id(2), id(3)]);
        assert_eq!(reloaded.next_id(), Some(id(4)));
        assert_eq!(encode(&reloaded), encode(&graph));
    }

    #[test]
    fn test_decode_rejects_bad_lines() {
        let cases = [
            ("{id = 1, name = Events, admins = []}\nnot a vertex\n", CodecError::Malformed { line: 2 }),
            ("{id = 1, name = Events, admins = [2,3]}\n", CodecError::Malformed { line: 1 }),
            ("{id = 0, name = Events, admins = []}\n", CodecError::Malformed { line: 1 }),
            ("{id = 1, name = Lovelace, firstname = Ada, age = 0, neighbors = []}\n", CodecError::Malformed { line: 1 }),
            ("{id = 99999999999, name = Events, admins = []}\n", CodecError::Malformed { line: 1 }),
        ];
        for (text, expected) in cases {
            let err = decode(text).unwrap_err();
            assert_eq!(err.to_string(), expected.to_string(), "input {text:?}");
        }
    }

    #[test]
    fn test_decode_rejects_bad_references() {
        let duplicate = "{id = 1, name = A, admins = []}\n{id = 1, name = B, admins = []}\n";
        assert!(matches!(
            decode(duplicate),
            Err(CodecError::DuplicateId { line: 2, .. })
        ));

        let dangling = "{id = 1, name = Lovelace, firstname = Ada, age = 36, neighbors = [5]}\n";
        assert!(matches!(
            decode(dangling),
            Err(CodecError::UnresolvedReference { line: 1, .. })
        ));

        let page_admin = "{id = 1, name = A, admins = [2]}\n{id = 2, name = B, admins = []}\n";
        assert!(matches!(
            decode(page_admin),
            Err(CodecError::InvalidRelation { line: 1, .. })
        ));

        let repeated = "{id = 1, name = Lovelace, firstname = Ada, age = 36, neighbors = [1, 1]}\n";
        assert!(matches!(
            decode(repeated),
            Err(CodecError::InvalidRelation { line: 1, .. })
        ));
    }

    #[test]
    fn test_failed_load_leaves_graph_empty() {
        let mut graph = sample();
        let notified = Rc::new(Cell::new(0));
        {
            let notified = Rc::clone(&notified);
            graph.subscribe(move |_| notified.set(notified.get() + 1));
        }

        let text = "{id = 5, name = Events, admins = []}\n{broken}\n";
        assert!(graph.load_from_str(text).is_err());
        assert!(graph.is_empty());
        assert_eq!(graph.next_id(), Some(VertexId::FIRST));
        assert_eq!(notified.get(), 0);

        graph.load_from_str("{id = 5, name = Events, admins = []}\r\n").unwrap();
        assert_eq!(graph.vertex_count(), 1);
        assert_eq!(graph.next_id(), Some(id(6)));
        assert_eq!(notified.get(), 1);
    }

    #[test]
    fn test_empty_text_is_an_empty_graph() {
        let graph = decode("").unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.next_id(), Some(VertexId::FIRST));
    }

    #[test]
    fn test_highest_id_exhausts_the_counter() {
        let text = "{id = 4294967295, name = Lovelace, firstname = Ada, age = 36, neighbors = []}\n\
                    {id = 1, name = Turing, firstname = Alan, age = 41, neighbors = [4294967295]}\n";
        let mut graph = decode(text).unwrap();
        let last = id(u32::MAX);
        assert_eq!(graph.next_id(), None);

        assert_eq!(
            graph.add_vertex(Account::page("Events").unwrap()),
            Err(GraphError::IdsExhausted)
        );
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.vertex(last).unwrap().given_name(), Some("Ada"));
        assert!(graph.vertex(last).unwrap().followers().contains(&id(1)));
        assert!(graph.vertex(id(1)).unwrap().out_neighbors().contains(&last));
    }

    #[test]
    fn test_non_utf8_file_is_malformed() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("graph.txt");
        let mut bytes = b"{id = 1, name = Events, admins = []}\n{id = 2, name = ".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(b", admins = []}\n");
        fs::write(&path, bytes).unwrap();

        let mut graph = sample();
        let err = graph.load(&path).unwrap_err();
        assert!(matches!(err, CodecError::Malformed { line: 2 }));
        assert!(graph.is_empty());
    }

    #[test]
    fn test_names_with_separators() {
        let mut graph = SocialGraph::new();
        graph.add_vertex(Account::individual("Jean, Paul", "de la Tour = x", 50).unwrap()).unwrap();
        let reloaded = decode(&encode(&graph)).unwrap();
        let v = reloaded.vertex(VertexId::FIRST).unwrap();
        assert_eq!(v.given_name(), Some("Jean, Paul"));
        assert_eq!(v.name(), "de la Tour = x");
    }
}
