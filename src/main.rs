use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

use megasena::reports::{format_draws, format_ranking, format_sets, highlight_ticket, observation};
use megasena::{RandSource, ResultsClient, Session, SqliteStore, config};

#[derive(Parser)]
#[command(name = "megasena", about = "Mega-Sena results and number set generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download every published result and show the most drawn numbers
    Fetch,

    /// Show the most drawn numbers from cached results
    Ranking,

    /// List cached results, newest first
    Results {
        #[arg(short, long, default_value = "10")]
        last: usize,
    },

    /// Generate a set of six numbers
    Generate {
        /// Starting numbers, comma separated (e.g. "4, 17, 33")
        #[arg(default_value = "")]
        seeds: String,

        /// Seed the random generator for reproducible sets
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show the latest generated sets, most recent first
    History {
        #[arg(short, long, default_value = "10")]
        last: usize,
    },

    /// Delete every generated set
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let store = SqliteStore::open(&config.database_path)
        .with_context(|| format!("opening {}", config.database_path.display()))?;
    let client = ResultsClient::new(&config.results_url, config.http_timeout)?;

    let rng = match &cli.command {
        Command::Generate { seed: Some(seed), .. } => StdRng::seed_from_u64(*seed),
        _ => StdRng::from_entropy(),
    };
    let mut session = Session::new(store, client, Box::new(RandSource(rng)))?;

    match cli.command {
        Command::Fetch => {
            let count = session.fetch_results().await?;
            println!("Loaded {} results.\n", count);
            print!("{}", format_ranking(session.ranking()));
        }
        Command::Ranking => print!("{}", format_ranking(session.ranking())),
        Command::Results { last } => {
            let newest: Vec<_> = session.draws().iter().rev().take(last).cloned().collect();
            print!("{}", format_draws(&newest));
        }
        Command::Generate { seeds, .. } => {
            let set = session.generate(&seeds)?;
            println!(
                "#{}  {}  {}",
                set.id,
                highlight_ticket(&set.ticket, session.ranking()),
                observation(&set)
            );
        }
        Command::History { last } => {
            let sets = session.recent_sets(last)?;
            print!("{}", format_sets(&sets, session.ranking()));
        }
        Command::Clear => {
            session.clear_sets()?;
            println!("All generated sets deleted.");
        }
    }

    Ok(())
}
