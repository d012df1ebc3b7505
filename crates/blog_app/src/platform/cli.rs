use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Read the spacetraveling blog from the command line.
#[derive(Debug, Parser)]
#[command(name = "spacetraveling", version)]
pub struct Cli {
    /// Configuration file (defaults to ./spacetraveling.ron when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also write logs to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List post summaries.
    Posts {
        /// Keep loading pages until none are left.
        #[arg(long)]
        all: bool,
        /// Posts per page (overrides the config).
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Show one post with its reading time.
    Post {
        /// Post identifier (uid).
        uid: String,
        /// Count words on visible text instead of raw markup.
        #[arg(long)]
        strip_markup: bool,
    },
    /// Print the route of every post.
    Paths {
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Write every post as prepared JSON into a directory.
    Prepare {
        out_dir: PathBuf,
        /// Rewrite files even when they are younger than the revalidate window.
        #[arg(long)]
        force: bool,
        #[arg(long)]
        strip_markup: bool,
    },
}
