// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Account commands - create and remove individuals and pages

use super::{open_graph, persist, resolve_vertex};
use followgraph::account::Account;
use anyhow::{Context, Result};
use std::path::Path;

/// Run the add-user command
pub fn add_user(graph_file: &Path, first: &str, name: &str, age: u32) -> Result<()> {
    let account = Account::individual(first, name, age).context("Invalid user")?;
    let mut graph = open_graph(graph_file)?;

    let id = graph.add_vertex(account)?;
    persist(&mut graph, graph_file)?;

    println!("Created user: {} {} (id {})", first, name, id);
    Ok(())
}

/// Run the add-page command
pub fn add_page(graph_file: &Path, name: &str) -> Result<()> {
    let account = Account::page(name).context("Invalid page")?;
    let mut graph = open_graph(graph_file)?;

    let id = graph.add_vertex(account)?;
    persist(&mut graph, graph_file)?;

    println!("Created page: {} (id {})", name, id);
    Ok(())
}

/// Run the remove command
pub fn remove(graph_file: &Path, query: &str) -> Result<()> {
    let mut graph = open_graph(graph_file)?;
    let id = resolve_vertex(&graph, query)?;
    let display = graph
        .vertex(id)
        .map(ToString::to_string)
        .unwrap_or_default();

    graph.remove_vertex(id)?;
    persist(&mut graph, graph_file)?;

    println!("Removed {} (id {})", display, id);
    Ok(())
}
