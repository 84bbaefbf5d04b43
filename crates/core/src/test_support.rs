//! Shared test fixtures for room and boss suites.
//! `RecordingHost` stands in for the arena and remembers every call.

use std::collections::{BTreeMap, BTreeSet};

use slotmap::SlotMap;

use crate::config::standard_prefabs;
use crate::host::{Combatants, DoorColliders, Diagnostics, RoomLink, Spawner};
use crate::types::{ConfigGap, Direction, EntityId, GridCoord, LogEvent, PrefabId, Vec2};

#[derive(Debug)]
pub(crate) struct Spawned {
    pub prefab: PrefabId,
    pub pos: Vec2,
}

#[derive(Debug)]
pub(crate) struct RecordingHost {
    known: BTreeSet<PrefabId>,
    entities: SlotMap<EntityId, Spawned>,
    pub despawned: Vec<(EntityId, f32)>,
    pub doors: BTreeMap<(GridCoord, Direction), bool>,
    pub bindings: BTreeMap<EntityId, GridCoord>,
    pub log: Vec<LogEvent>,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self {
            known: standard_prefabs().into_keys().collect(),
            entities: SlotMap::with_key(),
            despawned: Vec::new(),
            doors: BTreeMap::new(),
            bindings: BTreeMap::new(),
            log: Vec::new(),
        }
    }
}

impl RecordingHost {
    pub fn blocking(&self, room: GridCoord, direction: Direction) -> Option<bool> {
        self.doors.get(&(room, direction)).copied()
    }

    pub fn bound_room(&self, entity: EntityId) -> Option<GridCoord> {
        self.bindings.get(&entity).copied()
    }

    pub fn spawned_of(&self, prefab: &str) -> usize {
        self.entities.values().filter(|spawned| spawned.prefab == prefab).count()
    }

    pub fn spawned_at(&self, prefab: &str) -> Vec<Vec2> {
        self.entities.values().filter(|spawned| spawned.prefab == prefab).map(|spawned| spawned.pos).collect()
    }

    pub fn total_spawned(&self) -> usize {
        self.entities.len()
    }

    pub fn count(&self, predicate: impl Fn(&LogEvent) -> bool) -> usize {
        self.log.iter().filter(|event| predicate(event)).count()
    }
}

impl Spawner for RecordingHost {
    fn spawn(&mut self, prefab: &str, pos: Vec2, _rotation_deg: f32) -> Option<EntityId> {
        if !self.known.contains(prefab) {
            self.log.push(LogEvent::ConfigGap(ConfigGap::UnknownPrefab { prefab: prefab.to_string() }));
            return None;
        }
        Some(self.entities.insert(Spawned { prefab: prefab.to_string(), pos }))
    }

    fn despawn(&mut self, entity: EntityId, delay_secs: f32) {
        self.despawned.push((entity, delay_secs));
    }
}

impl DoorColliders for RecordingHost {
    fn set_blocking(&mut self, room: GridCoord, direction: Direction, blocking: bool) {
        self.doors.insert((room, direction), blocking);
    }
}

impl Combatants for RecordingHost {
    fn bind_room(&mut self, entity: EntityId, link: RoomLink<'_>) {
        self.bindings.insert(entity, link.room);
    }
}

impl Diagnostics for RecordingHost {
    fn report(&mut self, event: LogEvent) {
        self.log.push(event);
    }
}
