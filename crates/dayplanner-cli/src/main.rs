use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "dayplanner", version, about = "Day Planner CLI")]
struct Cli {
    /// Planner document (defaults to planner.default_document from config)
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a fresh document with the built-in presets
    Init {
        /// Overwrite an existing document
        #[arg(long)]
        force: bool,
    },
    /// Show the timeline and the category breakdown
    Show {
        /// Output the whole document as JSON
        #[arg(long)]
        json: bool,
    },
    /// Drop a task onto the timeline at a pixel offset
    Drop {
        /// Task template name
        task: String,
        /// Raw pointer offset from the top of the timeline
        #[arg(allow_hyphen_values = true)]
        offset_px: f64,
    },
    /// Placed block gestures
    Block {
        #[command(subcommand)]
        action: commands::block::BlockAction,
    },
    /// Task template management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Category management
    Category {
        #[command(subcommand)]
        action: commands::category::CategoryAction,
    },
    /// Time per category
    Breakdown {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Grid math utilities
    Grid {
        #[command(subcommand)]
        action: commands::grid::GridAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("DAYPLANNER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let file = cli.file;
    let result = match cli.command {
        Commands::Init { force } => commands::document::init(file, force),
        Commands::Show { json } => commands::document::show(file, json),
        Commands::Drop { task, offset_px } => commands::block::drop_task(file, &task, offset_px),
        Commands::Block { action } => commands::block::run(file, action),
        Commands::Task { action } => commands::task::run(file, action),
        Commands::Category { action } => commands::category::run(file, action),
        Commands::Breakdown { json } => commands::breakdown::run(file, json),
        Commands::Grid { action } => commands::grid::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "dayplanner", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
