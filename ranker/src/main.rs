use anyhow::Result;
use clap::{Parser, Subcommand};
use ranker::{load_documents, rank, render_text, resolve_config, RankOptions};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "ranker")]
#[command(about = "Rank a closed collection of linked pages with PageRank", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank pages from JSON/JSONL files or a directory and print the top results
    Rank {
        /// Input path (file or directory)
        #[arg(long)]
        input: PathBuf,
        /// JSON file with decay/epsilon/limit; flags below take precedence
        #[arg(long)]
        config: Option<PathBuf>,
        /// Probability of following a link instead of teleporting
        #[arg(long)]
        decay: Option<f64>,
        /// Convergence threshold on the largest per-page change
        #[arg(long)]
        epsilon: Option<f64>,
        /// Maximum number of iterations
        #[arg(long)]
        limit: Option<usize>,
        /// Number of results to print
        #[arg(long, default_value_t = 10)]
        top: usize,
        /// Print a JSON report instead of plain text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank { input, config, decay, epsilon, limit, top, json } => {
            let pagerank = resolve_config(config.as_deref(), decay, epsilon, limit)?;

            let pages = load_documents(&input)?;
            let report = rank(&pages, &RankOptions { config: pagerank, top })?;
            tracing::info!(iterations = report.iterations, converged = report.converged, "ranking complete");

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_text(&report));
            }
            Ok(())
        }
    }
}
