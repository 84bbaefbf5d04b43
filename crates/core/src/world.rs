//! Single-threaded run simulation: one generated floor, its room controllers,
//! every live entity, and the player.
//!
//! All mutation goes through [`World::handle`]. Triggers (room entry, damage)
//! apply immediately; `Tick` advances the clock, boss routines, enemy chase,
//! projectiles and delayed despawns in that order.

use std::collections::BTreeMap;
use std::mem;

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::boss::{BossCommand, BossHealth, BossRoutine, RoutineContext};
use crate::config::{DungeonConfig, PrefabSpec};
use crate::elements::ElementInventory;
use crate::health::{Health, PlayerHealth};
use crate::host::{Diagnostics, Spawner};
use crate::mapgen::{GeneratedMap, generate_map};
use crate::rng::{mix_seed_stream, seeded};
use crate::room::{RoomController, RoomState};
use crate::score::ScoreBoard;
use crate::types::*;

mod arena;
mod bosses;
mod combat;
mod hash;
mod motion;
mod pickup;

pub use arena::{Arena, BossBrain, Entity, EntityKind};

#[cfg(test)]
mod tests;

/// Seed stream reserved for simulation draws, separate from map generation.
const SIM_STREAM: u64 = 0x5157_0001;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    PlayerEnteredRoom { room: GridCoord },
    PlayerMoved { to: Vec2 },
    DamageEntity { entity: EntityId, amount: i32 },
    DamagePlayer { amount: i32 },
    HealPlayer { amount: i32 },
    /// Collects a loot entity within the player's pickup radius.
    PickUp { entity: EntityId },
    DiscardElement,
    Tick { dt: f32 },
    Regenerate,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub health: PlayerHealth,
    pub elements: ElementInventory,
}

pub struct World {
    seed: u64,
    config: DungeonConfig,
    generation: u64,
    rng: ChaCha8Rng,
    tick: u64,
    map: GeneratedMap,
    rooms: BTreeMap<GridCoord, RoomController>,
    arena: Arena,
    player: Player,
    score: ScoreBoard,
    current_room: Option<GridCoord>,
    outcome: Option<RunOutcome>,
}

impl World {
    /// Builds the first floor and places the player in the start room.
    /// `config` is expected to have passed [`DungeonConfig::validate`].
    pub fn new(seed: u64, config: DungeonConfig) -> Self {
        let map = generate_map(mix_seed_stream(seed, 0), &config.layout);
        let arena = Arena::new(&config);
        let player = Player {
            pos: Vec2::ZERO,
            health: PlayerHealth::new(config.player.max_health, config.player.invincibility_duration),
            elements: ElementInventory::new(),
        };
        let mut world = Self {
            seed,
            rng: seeded(mix_seed_stream(seed, SIM_STREAM)),
            config,
            generation: 0,
            tick: 0,
            map,
            rooms: BTreeMap::new(),
            arena,
            player,
            score: ScoreBoard::new(),
            current_room: None,
            outcome: None,
        };
        world.install_floor();
        world
    }

    /// Events after the run has ended are ignored.
    pub fn handle(&mut self, event: WorldEvent) {
        if self.outcome.is_some() {
            return;
        }
        match event {
            WorldEvent::PlayerEnteredRoom { room } => {
                if let Some(center) = self.rooms.get(&room).map(RoomController::center)
                    && self.may_leave_for(room)
                {
                    self.player.pos = center;
                    self.enter_room(room);
                }
            }
            WorldEvent::PlayerMoved { to } => self.move_player(to),
            WorldEvent::DamageEntity { entity, amount } => self.damage_entity(entity, amount),
            WorldEvent::DamagePlayer { amount } => self.damage_player(amount),
            WorldEvent::HealPlayer { amount } => {
                self.player.health.heal(amount);
            }
            WorldEvent::PickUp { entity } => self.pick_up(entity),
            WorldEvent::DiscardElement => self.discard_element(),
            WorldEvent::Tick { dt } => self.step(dt),
            WorldEvent::Regenerate => self.regenerate(),
        }
    }

    /// Replaces the floor wholesale. Score, player health and elements carry over.
    /// A lost run stays lost.
    pub fn regenerate(&mut self) {
        if self.outcome == Some(RunOutcome::Defeat) {
            return;
        }
        self.generation += 1;
        self.map = generate_map(mix_seed_stream(self.seed, self.generation), &self.config.layout);
        let now = self.arena.now;
        let log = mem::take(&mut self.arena.log);
        self.arena = Arena::new(&self.config);
        self.arena.now = now;
        self.arena.log = log;
        self.rooms.clear();
        self.current_room = None;
        self.outcome = None;
        self.install_floor();
    }

    fn install_floor(&mut self) {
        self.arena.report(LogEvent::MapGenerated { seed: self.map.seed, rooms: self.map.graph.len() });
        if let Some(shortfall) = self.map.shortfall {
            self.arena.report(LogEvent::GenerationShortfall {
                built: shortfall.built,
                target: shortfall.target,
                attempts: shortfall.attempts,
            });
        }

        for (coord, room_type) in self.map.graph.iter() {
            let doors = self.map.doors.get(&coord).copied().unwrap_or_default();
            let template = self.config.rooms.for_type(room_type).clone();
            let room = RoomController::new(coord, room_type, self.room_center(coord), doors, template);
            room.install(&mut self.arena);
            self.rooms.insert(coord, room);
        }

        let start = self.map.start();
        self.player.pos = self.room_center(start);
        self.enter_room(start);
    }

    fn enter_room(&mut self, coord: GridCoord) {
        self.current_room = Some(coord);
        if let Some(room) = self.rooms.get_mut(&coord) {
            room.on_player_entered(&mut self.arena, &mut self.rng);
        }
        self.check_victory(coord);
    }

    fn move_player(&mut self, to: Vec2) {
        let target = self.room_at(to).filter(|coord| self.rooms.contains_key(coord));
        if target != self.current_room && self.current_room_locked() {
            return;
        }
        self.player.pos = to;
        if let Some(coord) = target
            && self.current_room != Some(coord)
        {
            self.enter_room(coord);
        }
    }

    /// Locked doors keep the player in the current room.
    fn may_leave_for(&self, coord: GridCoord) -> bool {
        self.current_room == Some(coord) || !self.current_room_locked()
    }

    fn current_room_locked(&self) -> bool {
        self.current_room.and_then(|current| self.rooms.get(&current)).is_some_and(RoomController::doors_locked)
    }

    fn check_victory(&mut self, coord: GridCoord) {
        if let Some(room) = self.rooms.get(&coord)
            && room.room_type() == RoomType::Boss
            && room.player_entered()
            && room.is_cleared()
        {
            self.outcome = Some(RunOutcome::Victory);
        }
    }

    fn step(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.tick += 1;
        self.arena.now += f64::from(dt);

        self.advance_bosses(dt);
        self.advance_enemies(dt);
        if self.outcome.is_none() {
            self.advance_projectiles(dt);
        }
        self.arena.flush_despawns();
    }

    pub fn room_center(&self, coord: GridCoord) -> Vec2 {
        Vec2::new(
            coord.x as f32 * self.config.layout.room_width,
            coord.y as f32 * self.config.layout.room_height,
        )
    }

    /// The grid cell whose room rectangle contains `pos`.
    pub fn room_at(&self, pos: Vec2) -> Option<GridCoord> {
        let x = (pos.x / self.config.layout.room_width).round();
        let y = (pos.y / self.config.layout.room_height).round();
        if !(x.is_finite() && y.is_finite()) {
            return None;
        }
        Some(GridCoord::new(x as i32, y as i32))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn now(&self) -> f64 {
        self.arena.now
    }

    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    pub fn map(&self) -> &GeneratedMap {
        &self.map
    }

    pub fn rooms(&self) -> &BTreeMap<GridCoord, RoomController> {
        &self.rooms
    }

    pub fn room(&self, coord: GridCoord) -> Option<&RoomController> {
        self.rooms.get(&coord)
    }

    pub fn rooms_cleared(&self) -> usize {
        self.rooms.values().filter(|room| room.player_entered() && room.state() == RoomState::Cleared).count()
    }

    pub fn current_room(&self) -> Option<GridCoord> {
        self.current_room
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.arena.log
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn door_blocking(&self, room: GridCoord, direction: Direction) -> Option<bool> {
        self.arena.door_blocking(room, direction)
    }

    /// Living enemies and bosses bound to `room`, in key order.
    pub fn hostiles_in_room(&self, room: GridCoord) -> Vec<EntityId> {
        self.arena
            .entities
            .iter()
            .filter(|(_, entity)| entity.room == Some(room) && entity.is_hostile_alive())
            .map(|(id, _)| id)
            .collect()
    }

    /// Every living hostile, minions included.
    pub fn living_hostiles(&self) -> Vec<EntityId> {
        self.arena
            .entities
            .iter()
            .filter(|(_, entity)| entity.is_hostile_alive())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn is_alive(&self, entity: EntityId) -> bool {
        self.arena.entities.get(entity).is_some_and(|found| found.is_hostile_alive())
    }

    pub fn boss_phase(&self, entity: EntityId) -> Option<BossPhase> {
        self.arena.entity(entity).and_then(Entity::boss).map(|brain| brain.health.phase())
    }

    pub fn boss_ids(&self) -> Vec<EntityId> {
        self.arena.entities().filter(|(_, entity)| entity.boss().is_some()).map(|(id, _)| id).collect()
    }
}
