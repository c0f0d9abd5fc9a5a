mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "theologia-cli", about = "Theological terms reference and study feed", version)]
struct Cli {
    /// Data directory (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Catalog JSON file (overrides config)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Build a study feed, favouring stale and saved terms
    Feed {
        /// Queue length (default from config)
        #[arg(long)]
        count: Option<usize>,
        /// Fixed random seed
        #[arg(long)]
        seed: Option<u64>,
        /// Record every queued term as seen
        #[arg(long)]
        mark_seen: bool,
    },

    /// Show a term with linked definition and related terms
    Show {
        /// Term id or name (partial names resolve)
        term: String,
    },

    /// Resolve a reference label to a term id
    Resolve {
        reference: String,
    },

    /// Search names and short definitions
    Search {
        query: String,
        /// Maximum results
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// List initials with term counts
    Letters,

    /// Toggle a term's saved state
    Save {
        term: String,
    },

    /// List saved terms, most recent first
    Saved,

    /// Show a random term
    Random,

    /// Add a custom term
    Add {
        name: String,
        /// Short definition
        #[arg(long)]
        short: String,
        /// Full definition (defaults to the short one)
        #[arg(long)]
        full: Option<String>,
    },

    /// Record a finished quiz
    Quiz {
        /// Correct answers
        score: u32,
        /// Questions asked
        total: u32,
    },

    /// Streak, progress and quiz accuracy
    Stats,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let app = app::App::new(cli.data_dir, cli.catalog)?;

    match cli.command {
        Command::Feed { count, seed, mark_seen } => {
            commands::feed::run(&app, count, seed, mark_seen, &cli.format, use_color)?;
        }
        Command::Show { term } => {
            commands::show::run(&app, &term, &cli.format, use_color)?;
        }
        Command::Resolve { reference } => {
            commands::resolve::run(&app, &reference, &cli.format)?;
        }
        Command::Search { query, limit } => {
            commands::search::run(&app, &query, limit, &cli.format, use_color)?;
        }
        Command::Letters => {
            commands::letters::run(&app, &cli.format)?;
        }
        Command::Save { term } => {
            commands::saved::run_toggle(&app, &term, &cli.format)?;
        }
        Command::Saved => {
            commands::saved::run_list(&app, &cli.format, use_color)?;
        }
        Command::Random => {
            commands::random::run(&app, &cli.format, use_color)?;
        }
        Command::Add { name, short, full } => {
            commands::add::run(&app, &name, &short, full.as_deref(), &cli.format)?;
        }
        Command::Quiz { score, total } => {
            commands::quiz::run(&app, score, total, &cli.format)?;
        }
        Command::Stats => {
            commands::stats::run(&app, &cli.format)?;
        }
    }

    Ok(())
}
