use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use dungeon_core::journal_file::{load_journal_from_file, save_journal_to_file};
use dungeon_core::{LogEvent, ReplayResult, generate_map, replay_journal};
use tools::autoplay::{Pilot, PilotSettings};
use tools::config_file::{default_config_toml, load_config};
use tools::render::{MapSummary, ascii_map};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Optional TOML config; defaults apply to anything it omits
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a floor and print it
    Generate {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        /// Print a JSON summary instead of the ASCII map
        #[arg(long)]
        json: bool,
    },
    /// Play a scripted run and optionally save its journal
    Simulate {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = 20_000)]
        max_ticks: u64,
        #[arg(long, default_value_t = 0.1)]
        dt: f32,
        #[arg(long, default_value_t = 10)]
        attack: i32,
        /// Where to write the `.jsonl` event journal
        #[arg(short, long)]
        journal: Option<PathBuf>,
        /// Print every log event
        #[arg(short, long)]
        verbose: bool,
    },
    /// Replay a saved journal and print its final state
    Replay {
        #[arg(short, long)]
        journal: PathBuf,
    },
    /// Print the default configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Generate { seed, json } => {
            let map = generate_map(seed, &config.layout);
            if json {
                println!("{}", serde_json::to_string_pretty(&MapSummary::of(&map))?);
            } else {
                print!("{}", ascii_map(&map));
                println!("Seed: {seed}  Rooms: {}", map.graph.len());
                if let Some(shortfall) = map.shortfall {
                    println!(
                        "Shortfall: built {} of {} rooms in {} attempts",
                        shortfall.built, shortfall.target, shortfall.attempts
                    );
                }
            }
        }
        Command::Simulate { seed, max_ticks, dt, attack, journal, verbose } => {
            let settings = PilotSettings { dt, attack_damage: attack, max_ticks };
            let mut pilot = Pilot::new(seed, config, settings);
            let report = pilot.run_to_end();
            if verbose {
                for event in pilot.world().log() {
                    println!("{event:?}");
                }
            }
            let gaps = pilot.world().log().iter().filter(|event| matches!(event, LogEvent::ConfigGap(_))).count();

            println!("Simulation complete.");
            println!("Stop: {:?}", report.stop);
            println!("Final Tick: {}", report.ticks);
            println!("Score: {}", report.score);
            println!("Rooms Entered: {}  Cleared: {}", report.rooms_entered, report.rooms_cleared);
            println!("Config Gaps: {gaps}");
            println!("Snapshot Hash: {}", report.snapshot_hash);

            if let Some(path) = journal {
                save_journal_to_file(&path, pilot.journal())
                    .with_context(|| format!("Failed to write journal file: {}", path.display()))?;
                println!("Journal: {} ({} events)", path.display(), pilot.journal().records.len());
            }
        }
        Command::Replay { journal } => {
            let loaded = load_journal_from_file(&journal)
                .map_err(|e| anyhow!("Failed to load journal {}: {e}", journal.display()))?;
            let result: ReplayResult = replay_journal(&config, &loaded.journal)
                .map_err(|e| anyhow!("Replay failed during execution: {e:?}"))?;

            println!("Replay complete.");
            println!("Final Tick: {}", result.final_tick);
            println!("Outcome: {:?}", result.outcome);
            println!("Score: {}", result.score);
            println!("Rooms Cleared: {}", result.rooms_cleared);
            println!("Snapshot Hash: {}", result.final_snapshot_hash);
        }
        Command::Config => print!("{}", default_config_toml()?),
    }

    Ok(())
}
