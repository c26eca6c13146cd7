//! CLI frontend for the Talespinner interactive fiction engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tale",
    about = "Play and check branching Talespinner stories",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a story interactively
    Play {
        /// Path to the story JSON document
        story: PathBuf,

        /// Directory holding save files
        #[arg(long, default_value = ".tale-saves")]
        saves_dir: PathBuf,

        /// Save-slot namespace (default: story file stem)
        #[arg(long)]
        game_id: Option<String>,

        /// Reveal scene text character by character
        #[arg(long)]
        typewriter: bool,
    },

    /// Validate a story document and report authoring problems
    Check {
        /// Path to the story JSON document
        story: PathBuf,
    },

    /// List or delete save slots for a game
    Saves {
        /// Save-slot namespace used when playing
        game_id: String,

        /// Directory holding save files
        #[arg(long, default_value = ".tale-saves")]
        saves_dir: PathBuf,

        /// Delete a single slot by name
        #[arg(long)]
        delete: Option<String>,

        /// Delete every slot for this game
        #[arg(long)]
        clear: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            story,
            saves_dir,
            game_id,
            typewriter,
        } => commands::play::run(&story, &saves_dir, game_id.as_deref(), typewriter),
        Commands::Check { story } => commands::check::run(&story),
        Commands::Saves {
            game_id,
            saves_dir,
            delete,
            clear,
        } => commands::saves::run(&game_id, &saves_dir, delete.as_deref(), clear),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
