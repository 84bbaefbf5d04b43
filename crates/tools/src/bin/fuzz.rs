use std::collections::BTreeMap;

use anyhow::{Result, anyhow, ensure};
use clap::Parser;
use dungeon_core::{
    BossPhase, Direction, DungeonConfig, EntityId, GeneratedMap, RoomState, RoomType, World, generate_map,
    replay_journal,
};
use tools::autoplay::{Pilot, PilotSettings, StopReason};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Consecutive seeds to play, starting at `seed`
    #[arg(short, long, default_value_t = 20)]
    runs: u64,
    #[arg(short, long, default_value_t = 5_000)]
    ticks: u64,
}

fn check_map(map: &GeneratedMap, item_fraction: f32) -> Result<()> {
    let graph = &map.graph;
    ensure!(graph.is_connected(), "map is not connected");
    ensure!(graph.is_empty() || graph.edge_count() == graph.len() - 1, "map is not a tree");
    ensure!(graph.count_of(RoomType::Start) == 1, "expected exactly one start room");
    ensure!(graph.count_of(RoomType::Boss) <= 1, "more than one boss room");
    let item_cap = (graph.len() as f32 * item_fraction).floor() as usize;
    ensure!(graph.count_of(RoomType::Item) <= item_cap, "too many item rooms");

    for (coord, _) in graph.iter() {
        let doors = map.doors.get(&coord).ok_or_else(|| anyhow!("room {coord:?} has no door record"))?;
        for direction in Direction::ALL {
            let neighbor = coord.step(direction);
            ensure!(
                doors.has(direction) == graph.contains(neighbor),
                "door {direction:?} of {coord:?} disagrees with the graph"
            );
            if let Some(other) = map.doors.get(&neighbor) {
                ensure!(other.has(direction.opposite()) == doors.has(direction), "asymmetric door at {coord:?}");
            }
        }
    }
    Ok(())
}

#[derive(Default)]
struct Watch {
    score: u32,
    phases: BTreeMap<EntityId, BossPhase>,
}

impl Watch {
    fn check(&mut self, world: &World) -> Result<()> {
        for room in world.rooms().values() {
            ensure!(
                room.doors_locked() == (room.state() == RoomState::Active),
                "room {:?} lock state disagrees with {:?}",
                room.coord(),
                room.state()
            );
        }

        let health = world.player().health.health();
        ensure!(health.current() <= health.max(), "player health above max");

        ensure!(world.score() >= self.score, "score decreased");
        self.score = world.score();

        for boss in world.boss_ids() {
            let Some(phase) = world.boss_phase(boss) else {
                continue;
            };
            if let Some(previous) = self.phases.insert(boss, phase) {
                ensure!(phase >= previous, "boss phase went back from {previous:?} to {phase:?}");
            }
        }
        Ok(())
    }
}

fn fuzz_seed(seed: u64, config: &DungeonConfig, max_ticks: u64) -> Result<StopReason> {
    check_map(&generate_map(seed, &config.layout), config.layout.item_room_fraction)?;

    let settings = PilotSettings { max_ticks, ..PilotSettings::default() };
    let mut pilot = Pilot::new(seed, config.clone(), settings);
    check_map(pilot.world().map(), config.layout.item_room_fraction)?;

    let mut watch = Watch::default();
    let stop = loop {
        let stop = pilot.step();
        watch.check(pilot.world())?;
        if let Some(stop) = stop {
            break stop;
        }
    };

    let (world, journal) = pilot.into_parts();
    let replayed = replay_journal(config, &journal).map_err(|e| anyhow!("seed {seed}: replay failed: {e:?}"))?;
    ensure!(replayed.final_snapshot_hash == world.snapshot_hash(), "seed {seed}: replay diverged");
    ensure!(replayed.final_tick == world.current_tick(), "seed {seed}: replay tick differs");
    Ok(stop)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = DungeonConfig::default();

    println!("Starting fuzz harness on seeds {}..{} for max {} ticks each...", args.seed, args.seed + args.runs, args.ticks);
    for seed in args.seed..args.seed.saturating_add(args.runs) {
        let stop = fuzz_seed(seed, &config, args.ticks)?;
        println!("seed {seed}: {stop:?}");
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
