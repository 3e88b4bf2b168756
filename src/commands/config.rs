// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

use followgraph::config::Config;
use anyhow::{Context, Result};

/// Print the effective configuration as TOML
pub fn run(config: &Config) -> Result<()> {
    tracing::info!("Showing configuration");
    let text = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
    print!("{}", text);
    Ok(())
}
