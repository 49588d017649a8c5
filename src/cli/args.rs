//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Composable cost hierarchies and ordered notification chains
#[derive(Parser, Debug)]
#[command(name = "rcompose")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Directory holding a local .rcompose.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Total the costs of every hierarchy in a manifest
    Cost {
        /// Manifest file (TOML, [[entry]] tables)
        #[arg(value_hint = ValueHint::FilePath)]
        manifest: String,

        /// Print the cost tree
        #[arg(short, long)]
        tree: bool,
    },

    /// Send a message through a chain of channels
    Notify {
        /// Message to deliver
        message: String,

        /// Channels in delivery order (default: config default_channels)
        #[arg(long, value_delimiter = ',')]
        via: Vec<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Print the config template
    Template,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
