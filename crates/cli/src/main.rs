use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wirekit_cli::{export_command, repair_command, scan_command};

#[derive(Parser)]
#[command(name = "wirekit")]
#[command(about = "Offline tools for wirekit JSON stores", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report integrity problems in a store file without changing it
    Scan {
        /// Path to the JSON store
        store: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fix repairable integrity problems
    Repair {
        /// Path to the JSON store
        store: PathBuf,

        /// Write the repaired store here instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export one project as a static-site zip
    Export {
        /// Path to the JSON store
        store: PathBuf,

        /// Id of the project to export
        project_id: String,

        /// Zip path (default: `<project-slug>-wireframes.zip`)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// CSS file to use instead of the built-in stylesheet
        #[arg(long)]
        stylesheet: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wirekit_cli=info,wirekit_export=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scan { store, json } => scan_command(&store, json),
        Commands::Repair { store, output } => repair_command(&store, output.as_deref()),
        Commands::Export {
            store,
            project_id,
            output,
            stylesheet,
        } => export_command(&store, &project_id, output.as_deref(), stylesheet.as_deref()),
    };

    match result {
        Ok(outcome) if outcome.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(2),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
