//! CLI frontend for the spells campaign tool.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use colored::Colorize;

#[derive(Parser)]
#[command(
    name = "spells",
    about = "Game-master helpers for the spells campaign tool",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and resolve oracle text with choices, tables, and dice
    ///
    /// Oracle text mixes plain prose with choices `{option1|option2}`,
    /// table references `[table_name]` and dice such as `1d4` or `2d6+1`.
    /// Prints JSON with the original input and the resolved result.
    Oracle {
        /// The oracle text to resolve
        text: String,

        /// JSON file mapping table names to oracle text
        #[arg(short, long)]
        tables: Option<PathBuf>,

        /// RNG seed for reproducible results (default: current time)
        #[arg(short, long)]
        seed: Option<u64>,

        /// How deeply table references may nest
        #[arg(long, default_value_t = spells_oracle::OracleConfig::default().max_depth)]
        max_depth: usize,
    },

    /// Roll a dice expression such as 3d6 or 1d20+4
    Roll {
        /// Dice expression in NdM, NdM+K or NdM-K notation
        expression: String,

        /// RNG seed for reproducible results (default: current time)
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Show how oracle text is parsed, without resolving it
    Parse {
        /// The oracle text to parse
        text: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Oracle {
            text,
            tables,
            seed,
            max_depth,
        } => commands::oracle::run(&text, tables.as_deref(), seed, max_depth),
        Commands::Roll { expression, seed } => commands::roll::run(&expression, seed),
        Commands::Parse { text } => commands::parse::run(&text),
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red().bold());
        process::exit(1);
    }
}
