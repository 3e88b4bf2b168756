// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Admin commands - manage who administers a page

use super::{open_graph, persist, resolve_vertex};
use anyhow::{Context, Result};
use std::path::Path;

/// Run admin command
pub fn run(graph_file: &Path, action: &str, page: &str, user: Option<&str>) -> Result<()> {
    let mut graph = open_graph(graph_file)?;
    let page_id = resolve_vertex(&graph, page)?;

    match action {
        "add" => {
            let user = user.ok_or_else(|| anyhow::anyhow!("A user is required"))?;
            let user_id = resolve_vertex(&graph, user)?;
            graph
                .add_admin(page_id, user_id)
                .with_context(|| format!("Cannot make {} an admin of {}", user, page))?;
            persist(&mut graph, graph_file)?;
            println!("{} is now an admin of {}", user, page);
        }

        "remove" | "rm" => {
            let user = user.ok_or_else(|| anyhow::anyhow!("A user is required"))?;
            let user_id = resolve_vertex(&graph, user)?;
            graph
                .remove_admin(page_id, user_id)
                .with_context(|| format!("Cannot remove {} from the admins of {}", user, page))?;
            persist(&mut graph, graph_file)?;
            println!("{} is no longer an admin of {}", user, page);
        }

        "list" | "ls" => {
            let admins = graph.page_admins(page_id)?;
            if admins.is_empty() {
                println!("{} has no admins.", page);
                return Ok(());
            }
            println!("Admins of {} ({}):", page, admins.len());
            for admin in admins.iter().filter_map(|&a| graph.vertex(a)) {
                println!("  {} ({})", admin, admin.id());
            }
        }

        other => {
            anyhow::bail!("Unknown action: {}. Valid: add, remove, list", other);
        }
    }

    Ok(())
}
