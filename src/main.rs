// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Followgraph CLI - who follows whom, and who matters

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use commands::{export::ExportFormat, view::KindFilter, view::SortOrder};
use followgraph::config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "followgraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "FOLLOWGRAPH_CONFIG")]
    config: Option<std::path::PathBuf>,

    /// Graph file override
    #[arg(long, env = "FOLLOWGRAPH_FILE")]
    graph: Option<std::path::PathBuf>,

    /// Output in JSON format
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an individual account
    AddUser {
        /// First name
        #[arg(long)]
        first: String,

        /// Family name
        #[arg(long)]
        name: String,

        /// Age in years
        #[arg(long)]
        age: u32,
    },

    /// Create a page account
    AddPage {
        /// Page name
        name: String,
    },

    /// Remove an account and every relation it has
    Remove {
        /// Id, display name or name
        vertex: String,
    },

    /// Make an individual follow another account
    Follow {
        /// Follower
        who: String,

        /// Account to follow
        whom: String,
    },

    /// Make an individual stop following an account
    Unfollow {
        /// Follower
        who: String,

        /// Account to stop following
        whom: String,
    },

    /// Manage page admins
    Admin {
        /// Action: add, remove, list
        action: String,

        /// Page
        page: String,

        /// Individual to add or remove
        user: Option<String>,
    },

    /// Show one account
    Info {
        /// Id, display name or name
        vertex: String,
    },

    /// List accounts
    List {
        /// Ordering
        #[arg(long, value_enum, default_value = "insertion")]
        sort: SortOrder,

        /// Kind filter
        #[arg(long, value_enum, default_value = "all")]
        kind: KindFilter,
    },

    /// Show graph statistics
    Stats,

    /// Show the follow relation
    Edges,

    /// Hop distances from one account to every other
    Distance {
        /// Source account
        source: String,
    },

    /// Export graph to various formats
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value = "dot")]
        format: ExportFormat,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Show the effective configuration
    Config,

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = config::load(cli.config.as_deref())?;
    if let Some(graph) = cli.graph {
        config.graph_file = graph;
    }

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => tracing::Level::ERROR,
        0 => config.level().unwrap_or(tracing::Level::INFO),
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr);
    match EnvFilter::try_from_default_env() {
        Ok(filter) => subscriber.with_env_filter(filter).init(),
        Err(_) => subscriber.with_max_level(log_level).init(),
    }

    let graph_file = config.graph_file.as_path();

    // Execute command
    match cli.command {
        Commands::AddUser { first, name, age } => {
            commands::account::add_user(graph_file, &first, &name, age)
        }
        Commands::AddPage { name } => {
            commands::account::add_page(graph_file, &name)
        }
        Commands::Remove { vertex } => {
            commands::account::remove(graph_file, &vertex)
        }
        Commands::Follow { who, whom } => {
            commands::edge::follow(graph_file, &who, &whom)
        }
        Commands::Unfollow { who, whom } => {
            commands::edge::unfollow(graph_file, &who, &whom)
        }
        Commands::Admin { action, page, user } => {
            commands::admin::run(graph_file, &action, &page, user.as_deref())
        }
        Commands::Info { vertex } => {
            commands::view::info(graph_file, &vertex, cli.json)
        }
        Commands::List { sort, kind } => {
            commands::view::list(graph_file, sort, kind, cli.json)
        }
        Commands::Stats => {
            commands::view::stats(graph_file, cli.json)
        }
        Commands::Edges => {
            commands::edge::list(graph_file)
        }
        Commands::Distance { source } => {
            commands::view::distance(graph_file, &source, cli.json)
        }
        Commands::Export { format, output } => {
            commands::export::run(graph_file, format, output)
        }
        Commands::Config => {
            commands::config::run(&config)
        }
        Commands::Completions { shell } => {
            commands::completions::run(shell, &mut Cli::command())
        }
    }
}
