use clap::{Parser, Subcommand};
use colored::*;
use std::env;

use chainflux::ledger::{ChainStore, DEFAULT_CHAIN_FILE, DEFAULT_DIFFICULTY, Ledger};

#[derive(Parser)]
#[command(author, version, about = "Terminal dashboard for the ChainFlux ledger", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk the chain, newest block first
    View,
    /// Queue a narrative event
    Add {
        title: String,
        narrative: String,
        /// Comma-separated indices of earlier blocks this event links to
        #[arg(long, default_value = "")]
        links: String,
        /// Mine the queued event before exiting
        #[arg(long)]
        mine: bool,
    },
    /// Mine the oldest queued event
    Mine,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    env_logger::init();

    let cli = Cli::parse();

    let chain_file = env::var("CHAIN_FILE").unwrap_or_else(|_| DEFAULT_CHAIN_FILE.to_string());
    let difficulty: u32 = env::var("DIFFICULTY")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_DIFFICULTY);

    let mut ledger = Ledger::open(ChainStore::new(&chain_file), difficulty)?;

    match cli.command {
        Commands::View => view(&ledger),
        Commands::Add {
            title,
            narrative,
            links,
            mine,
        } => {
            let linked_blocks = parse_links(&links);
            ledger.enqueue_event(title, narrative, linked_blocks);
            println!("{}", "Event added to the queue.".bright_green());
            if mine {
                mine_one(&mut ledger)?;
            } else {
                println!(
                    "{}",
                    "The queue lives in memory; pass --mine to seal it before exiting.".yellow()
                );
            }
        }
        Commands::Mine => mine_one(&mut ledger)?,
    }

    Ok(())
}

fn parse_links(raw: &str) -> Vec<u64> {
    raw.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}

fn mine_one(ledger: &mut Ledger) -> Result<(), Box<dyn std::error::Error>> {
    match ledger.mine_next()? {
        Some(index) => println!(
            "{}",
            format!("Block #{index} mined and added to the chain!").bright_green()
        ),
        None => println!("{}", "No pending events to mine.".yellow()),
    }
    Ok(())
}

fn view(ledger: &Ledger) {
    println!("{}", "📖  ChainFlux — Narrative Ledger".bright_cyan());
    println!("{}", "-------------------------------".bright_cyan());
    for block in ledger.chain().iter().rev() {
        println!();
        println!(
            "{}",
            format!("Block #{}: {}", block.index, block.title).bright_yellow()
        );
        println!("  time:  {}", format_timestamp(block.timestamp));
        println!("  links: {:?}", block.linked_blocks);
        println!("  hash:  {}", block.hash);
        println!("  prev:  {}", block.previous_hash);
        println!("  {}", block.narrative);
    }
}

fn format_timestamp(ts: f64) -> String {
    chrono::DateTime::from_timestamp(ts as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| ts.to_string())
}
