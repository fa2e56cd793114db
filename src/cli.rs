//! Command-line interface definition for datadash
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for datasets, the current user, and the persisted
//! chat session.

use clap::{Parser, Subcommand};

/// datadash - analytics dashboard client
///
/// Browse datasets, inspect or update the signed-in user, and manage the
/// persisted chat session from the terminal.
#[derive(Parser, Debug, Clone)]
#[command(name = "datadash")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the session database directory
    #[arg(long, env = "DATADASH_STORAGE_PATH")]
    pub storage_path: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for datadash
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Browse datasets
    Datasets {
        /// Dataset subcommand
        #[command(subcommand)]
        command: DatasetCommand,
    },

    /// Inspect or update the signed-in user
    User {
        /// User subcommand
        #[command(subcommand)]
        command: UserCommand,
    },

    /// Manage the persisted chat session
    Session {
        /// Session subcommand
        #[command(subcommand)]
        command: SessionCommand,
    },
}

/// Dataset subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum DatasetCommand {
    /// List all datasets
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show a single dataset
    Show {
        /// Dataset identifier
        id: String,

        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Fetch one page of datasets
    Page {
        /// 1-based page index
        #[arg(long)]
        page: Option<u32>,

        /// Page size (defaults to 10)
        #[arg(long)]
        page_size: Option<u32>,

        /// Free-text filter on name and description
        #[arg(long)]
        keyword: Option<String>,

        /// Only datasets created by this user
        #[arg(long)]
        creator: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// User subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum UserCommand {
    /// Show the signed-in user
    Me {
        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Update profile fields of the signed-in user
    Update {
        /// New username
        #[arg(long)]
        username: Option<String>,

        /// New email address
        #[arg(long)]
        email: Option<String>,

        /// New avatar URL
        #[arg(long)]
        avatar: Option<String>,
    },
}

/// Session subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SessionCommand {
    /// Print the persisted session id
    Show,

    /// Persist a new session id
    Set {
        /// Session identifier
        id: String,
    },

    /// Forget the persisted session id
    Clear,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            storage_path: None,
            command: Commands::Session {
                command: SessionCommand::Show,
            },
        }
    }
}
