//! Per-room clear state machine: `Idle -> Active -> Cleared`.
//!
//! A room spawns its enemies on the player's first entry, locks its doors
//! while any of them live, and unlocks (and drops loot) once the last one
//! reports its defeat. Every transition is driven by an explicit call; the
//! room never polls.

use std::collections::BTreeSet;

use rand_chacha::ChaCha8Rng;

use crate::config::RoomTemplate;
use crate::host::{RoomHost, RoomLink};
use crate::mapgen::DoorConfiguration;
use crate::rng::{choose, pick_index, range_inclusive};
use crate::types::{ConfigGap, EntityId, GridCoord, LogEvent, RoomType, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoomState {
    Idle,
    Active,
    Cleared,
}

#[derive(Clone, Debug)]
pub struct RoomController {
    coord: GridCoord,
    room_type: RoomType,
    center: Vec2,
    doors: DoorConfiguration,
    doors_locked: bool,
    template: RoomTemplate,
    teleport_points: Vec<Vec2>,
    minion_spawn_points: Vec<Vec2>,
    state: RoomState,
    active_enemies: BTreeSet<EntityId>,
    player_entered: bool,
    chest_opened: bool,
}

impl RoomController {
    pub fn new(
        coord: GridCoord,
        room_type: RoomType,
        center: Vec2,
        doors: DoorConfiguration,
        template: RoomTemplate,
    ) -> Self {
        let state = if template.spawn_enemies_on_enter { RoomState::Idle } else { RoomState::Cleared };
        let absolute = |offsets: &[Vec2]| offsets.iter().map(|offset| center + *offset).collect();
        Self {
            coord,
            room_type,
            center,
            doors,
            doors_locked: false,
            teleport_points: absolute(&template.boss_teleport_points),
            minion_spawn_points: absolute(&template.minion_spawn_points),
            template,
            state,
            active_enemies: BTreeSet::new(),
            player_entered: false,
            chest_opened: false,
        }
    }

    /// Pushes the initial unlocked state of every existing door to the host.
    pub fn install(&self, host: &mut impl RoomHost) {
        for direction in self.doors.open_directions() {
            host.set_blocking(self.coord, direction, false);
        }
    }

    pub fn coord(&self) -> GridCoord {
        self.coord
    }

    pub fn room_type(&self) -> RoomType {
        self.room_type
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn doors(&self) -> DoorConfiguration {
        self.doors
    }

    pub fn doors_locked(&self) -> bool {
        self.doors_locked
    }

    pub fn state(&self) -> RoomState {
        self.state
    }

    pub fn is_cleared(&self) -> bool {
        self.state == RoomState::Cleared
    }

    pub fn player_entered(&self) -> bool {
        self.player_entered
    }

    pub fn active_enemies(&self) -> &BTreeSet<EntityId> {
        &self.active_enemies
    }

    pub fn on_player_entered(&mut self, host: &mut impl RoomHost, rng: &mut ChaCha8Rng) {
        if self.player_entered {
            return;
        }
        self.player_entered = true;
        host.report(LogEvent::PlayerEnteredRoom { room: self.coord });

        self.open_chest(host, rng);
        if self.state == RoomState::Idle {
            self.spawn_enemies(host, rng);
        }
    }

    /// Untracked enemies (already removed, or never spawned here) are ignored.
    pub fn on_enemy_defeated(
        &mut self,
        enemy: EntityId,
        host: &mut impl RoomHost,
        rng: &mut ChaCha8Rng,
    ) {
        if !self.active_enemies.remove(&enemy) {
            return;
        }
        if self.active_enemies.is_empty() && self.state == RoomState::Active {
            self.clear(host, rng);
        }
    }

    fn spawn_enemies(&mut self, host: &mut impl RoomHost, rng: &mut ChaCha8Rng) {
        let template = &self.template;
        if template.enemy_prefabs.is_empty() || template.enemy_spawn_points.is_empty() {
            self.clear(host, rng);
            return;
        }

        let count = range_inclusive(rng, template.min_enemies, template.max_enemies);
        let link = RoomLink {
            room: self.coord,
            teleport_points: &self.teleport_points,
            minion_spawn_points: &self.minion_spawn_points,
        };
        for _ in 0..count {
            let prefab = &template.enemy_prefabs[pick_index(rng, template.enemy_prefabs.len())];
            let offset =
                template.enemy_spawn_points[pick_index(rng, template.enemy_spawn_points.len())];
            if let Some(enemy) = host.spawn(prefab, self.center + offset, 0.0) {
                host.bind_room(enemy, link);
                self.active_enemies.insert(enemy);
            }
        }

        // Nothing materialised: locking now would seal the room for good.
        if self.active_enemies.is_empty() {
            self.clear(host, rng);
            return;
        }

        host.report(LogEvent::EnemiesSpawned { room: self.coord, count: self.active_enemies.len() });
        self.state = RoomState::Active;
        self.set_doors_locked(host, true);
    }

    fn clear(&mut self, host: &mut impl RoomHost, rng: &mut ChaCha8Rng) {
        self.state = RoomState::Cleared;
        host.report(LogEvent::RoomCleared { room: self.coord });
        self.set_doors_locked(host, false);
        if self.template.spawn_loot_on_clear {
            self.spawn_loot(host, rng);
        }
    }

    fn spawn_loot(&self, host: &mut impl RoomHost, rng: &mut ChaCha8Rng) {
        let Some(point) = self.template.loot_point else {
            host.report(LogEvent::ConfigGap(ConfigGap::NoLootPoint { room: self.coord }));
            return;
        };
        let Some(prefab) = choose(rng, &self.template.loot_prefabs) else {
            host.report(LogEvent::ConfigGap(ConfigGap::NoLootPool { room: self.coord }));
            return;
        };
        if host.spawn(prefab, self.center + point, 0.0).is_some() {
            host.report(LogEvent::LootSpawned { room: self.coord, prefab: prefab.clone() });
        }
    }

    fn open_chest(&mut self, host: &mut impl RoomHost, rng: &mut ChaCha8Rng) {
        if self.chest_opened || self.room_type != RoomType::Item {
            return;
        }
        self.chest_opened = true;

        let Some(prefab) = choose(rng, &self.template.chest_loot) else {
            host.report(LogEvent::ConfigGap(ConfigGap::NoLootPool { room: self.coord }));
            return;
        };
        let point = self.template.loot_point.unwrap_or(Vec2::ZERO);
        if host.spawn(prefab, self.center + point, 0.0).is_some() {
            host.report(LogEvent::ChestOpened { room: self.coord, prefab: prefab.clone() });
        }
    }

    fn set_doors_locked(&mut self, host: &mut impl RoomHost, locked: bool) {
        self.doors_locked = locked;
        for direction in self.doors.open_directions() {
            host.set_blocking(self.coord, direction, locked);
        }
        host.report(if locked {
            LogEvent::DoorsLocked { room: self.coord }
        } else {
            LogEvent::DoorsUnlocked { room: self.coord }
        });
    }
}
