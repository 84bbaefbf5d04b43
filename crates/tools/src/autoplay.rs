//! Scripted pilot that plays a run through the public event interface and
//! records it, for the CLI and the fuzz harness.

use std::collections::{BTreeSet, HashMap, VecDeque};

use dungeon_core::rng::{choose, seeded};
use dungeon_core::world::EntityKind;
use dungeon_core::{DungeonConfig, EntityId, EventJournal, GridCoord, RecordedRun, RunOutcome, World, WorldEvent};
use rand_chacha::ChaCha8Rng;

#[derive(Clone, Debug, PartialEq)]
pub struct PilotSettings {
    pub dt: f32,
    pub attack_damage: i32,
    pub max_ticks: u64,
}

impl Default for PilotSettings {
    fn default() -> Self {
        Self { dt: 0.1, attack_damage: 10, max_ticks: 20_000 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    Finished(RunOutcome),
    TickBudget,
    /// Every room has been visited and none is left to fight in.
    Exhausted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PilotReport {
    pub stop: StopReason,
    pub ticks: u64,
    pub score: u32,
    pub rooms_entered: usize,
    pub rooms_cleared: usize,
    pub snapshot_hash: u64,
}

pub struct Pilot {
    run: RecordedRun,
    rng: ChaCha8Rng,
    settings: PilotSettings,
    /// Loot already tried once; refused pickups are not retried.
    tried_loot: BTreeSet<EntityId>,
}

impl Pilot {
    pub fn new(seed: u64, config: DungeonConfig, settings: PilotSettings) -> Self {
        Self {
            run: RecordedRun::new(seed, config),
            rng: seeded(seed ^ 0x9110_7000),
            settings,
            tried_loot: BTreeSet::new(),
        }
    }

    pub fn world(&self) -> &World {
        self.run.world()
    }

    pub fn journal(&self) -> &EventJournal {
        self.run.journal()
    }

    pub fn into_parts(self) -> (World, EventJournal) {
        self.run.into_parts()
    }

    /// One decision: strike a hostile, grab loot in reach, or walk one room. Returns the
    /// stop reason once the run cannot continue.
    pub fn step(&mut self) -> Option<StopReason> {
        let world = self.run.world();
        if let Some(outcome) = world.outcome() {
            return Some(StopReason::Finished(outcome));
        }
        if world.current_tick() >= self.settings.max_ticks {
            return Some(StopReason::TickBudget);
        }

        let targets = world.living_hostiles();
        if let Some(target) = choose(&mut self.rng, &targets).copied() {
            self.run.handle(WorldEvent::DamageEntity { entity: target, amount: self.settings.attack_damage });
        } else if let Some(loot) = loot_in_reach(world, &self.tried_loot) {
            self.tried_loot.insert(loot);
            self.run.handle(WorldEvent::PickUp { entity: loot });
        } else if let Some(next) = next_room_toward_unvisited(world) {
            let to = world.room_center(next);
            self.run.handle(WorldEvent::PlayerMoved { to });
        } else {
            return Some(StopReason::Exhausted);
        }
        self.run.handle(WorldEvent::Tick { dt: self.settings.dt });
        None
    }

    pub fn run_to_end(&mut self) -> PilotReport {
        let stop = loop {
            if let Some(stop) = self.step() {
                break stop;
            }
        };
        self.report(stop)
    }

    fn report(&self, stop: StopReason) -> PilotReport {
        let world = self.run.world();
        PilotReport {
            stop,
            ticks: world.current_tick(),
            score: world.score(),
            rooms_entered: world.rooms().values().filter(|room| room.player_entered()).count(),
            rooms_cleared: world.rooms_cleared(),
            snapshot_hash: world.snapshot_hash(),
        }
    }
}

fn loot_in_reach(world: &World, tried: &BTreeSet<EntityId>) -> Option<EntityId> {
    let player = world.player().pos;
    let reach = world.config().player.pickup_radius;
    world
        .arena()
        .entities()
        .find(|(id, entity)| {
            matches!(entity.kind, EntityKind::Loot { .. })
                && !tried.contains(id)
                && entity.pos.distance(player) <= reach
        })
        .map(|(id, _)| id)
}

/// First step of the shortest door path to the nearest room not yet entered.
pub fn next_room_toward_unvisited(world: &World) -> Option<GridCoord> {
    let start = world.current_room()?;
    let mut came_from: HashMap<GridCoord, GridCoord> = HashMap::new();
    let mut seen = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(coord) = queue.pop_front() {
        let room = world.room(coord)?;
        if coord != start && !room.player_entered() {
            let mut step = coord;
            while let Some(previous) = came_from.get(&step).copied() {
                if previous == start {
                    break;
                }
                step = previous;
            }
            return Some(step);
        }
        for direction in room.doors().open_directions() {
            let neighbor = coord.step(direction);
            if seen.insert(neighbor) {
                came_from.insert(neighbor, coord);
                queue.push_back(neighbor);
            }
        }
    }
    None
}
