//! DreamTeam Stats CLI
//!
//! Roster validation, match history listing, and CSV export of saved match
//! documents.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use dt_core::{
    events_to_csv, player_summaries, summaries_to_csv, MatchStore, RosterStore,
};

#[derive(Parser)]
#[command(name = "dt")]
#[command(about = "DreamTeam Stats tools: roster checks and match exports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a roster document
    Roster {
        /// Roster JSON file path
        #[arg(long, default_value = "roster.json")]
        file: PathBuf,
    },

    /// List saved match documents, most recent first
    Matches {
        /// Match document directory
        #[arg(long, default_value = "matches")]
        dir: PathBuf,
    },

    /// Export a saved match document as CSV
    Export {
        /// Match document path (match_*.json)
        #[arg(long)]
        r#match: PathBuf,

        /// Output CSV path for the event rows
        #[arg(long)]
        out: PathBuf,

        /// Optional output CSV path for the per-player summary
        #[arg(long)]
        summary: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Roster { file } => {
            let store = RosterStore::new(&file);
            let roster = store.load();
            let violations = roster.validate();

            println!(
                "{} players, coach: {}",
                roster.players.len(),
                if roster.coach.is_empty() { "(unset)" } else { &roster.coach }
            );
            if violations.is_empty() {
                println!("roster OK");
            } else {
                for violation in &violations {
                    println!("  - {}", violation);
                }
                anyhow::bail!("{} validation finding(s)", violations.len());
            }
        }

        Commands::Matches { dir } => {
            let store = MatchStore::new(&dir);
            let listing = store
                .list_matches()
                .with_context(|| format!("listing matches in {:?}", dir))?;
            if listing.is_empty() {
                println!("no saved matches in {:?}", dir);
            }
            for summary in listing {
                println!(
                    "{}  vs {}  {}  ({} actions)  {}",
                    summary.date,
                    summary.opponent,
                    summary.score,
                    summary.action_count,
                    summary.path.display()
                );
            }
        }

        Commands::Export {
            r#match,
            out,
            summary,
        } => {
            let dir = r#match.parent().unwrap_or_else(|| std::path::Path::new("."));
            let store = MatchStore::new(dir);
            let doc = store
                .load_match(&r#match)
                .with_context(|| format!("loading match document {:?}", r#match))?;

            let csv = events_to_csv(&doc.stats)?;
            std::fs::write(&out, csv).with_context(|| format!("writing {:?}", out))?;
            println!("wrote {} event rows to {:?}", doc.stats.len(), out);

            if let Some(summary_path) = summary {
                let summaries = player_summaries(&doc.stats);
                let csv = summaries_to_csv(&summaries)?;
                std::fs::write(&summary_path, csv)
                    .with_context(|| format!("writing {:?}", summary_path))?;
                println!(
                    "wrote {} summary rows to {:?}",
                    summaries.len(),
                    summary_path
                );
            }
        }
    }

    Ok(())
}
