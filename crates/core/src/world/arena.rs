//! In-process host for rooms and bosses: entity storage, door colliders,
//! delayed despawns, and the event log.

use slotmap::SlotMap;

use super::*;
use crate::config::BossConfig;
use crate::host::{Combatants, DoorColliders, RoomLink};

#[derive(Clone, Debug, PartialEq)]
pub struct BossBrain {
    pub health: BossHealth,
    pub routine: BossRoutine,
    pub teleport_points: Vec<Vec2>,
    pub minion_spawn_points: Vec<Vec2>,
}

impl BossBrain {
    fn new(config: &BossConfig) -> Self {
        Self {
            health: BossHealth::new(config.max_health, config.phase2_threshold),
            routine: BossRoutine::new(),
            teleport_points: Vec::new(),
            minion_spawn_points: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum EntityKind {
    Enemy {
        health: Health,
        contact_damage: i32,
        attack_cooldown: f32,
        speed: f32,
        score: u32,
        last_attack_at: Option<f64>,
    },
    Boss {
        score: u32,
        brain: BossBrain,
    },
    Projectile {
        velocity: Vec2,
        expires_at: f64,
        damage: i32,
    },
    Loot {
        element: Option<Element>,
        heal: i32,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub prefab: PrefabId,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub rotation_deg: f32,
    /// Room that spawned this entity and expects its defeat notice.
    pub room: Option<GridCoord>,
}

impl Entity {
    pub fn is_hostile(&self) -> bool {
        matches!(self.kind, EntityKind::Enemy { .. } | EntityKind::Boss { .. })
    }

    pub fn is_hostile_alive(&self) -> bool {
        match &self.kind {
            EntityKind::Enemy { health, .. } => health.is_alive(),
            EntityKind::Boss { brain, .. } => brain.health.is_alive(),
            EntityKind::Projectile { .. } | EntityKind::Loot { .. } => false,
        }
    }

    pub fn boss(&self) -> Option<&BossBrain> {
        match &self.kind {
            EntityKind::Boss { brain, .. } => Some(brain),
            _ => None,
        }
    }
}

pub struct Arena {
    pub(super) prefabs: BTreeMap<PrefabId, PrefabSpec>,
    pub(super) boss_config: BossConfig,
    pub(super) entities: SlotMap<EntityId, Entity>,
    pub(super) doors: BTreeMap<(GridCoord, Direction), bool>,
    pub(super) despawns: Vec<(EntityId, f64)>,
    pub(super) now: f64,
    pub(super) log: Vec<LogEvent>,
}

impl Arena {
    pub(super) fn new(config: &DungeonConfig) -> Self {
        Self {
            prefabs: config.prefabs.clone(),
            boss_config: config.boss.clone(),
            entities: SlotMap::with_key(),
            doors: BTreeMap::new(),
            despawns: Vec::new(),
            now: 0.0,
            log: Vec::new(),
        }
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn count_of_prefab(&self, prefab: &str) -> usize {
        self.entities.values().filter(|entity| entity.prefab == prefab).count()
    }

    pub fn door_blocking(&self, room: GridCoord, direction: Direction) -> Option<bool> {
        self.doors.get(&(room, direction)).copied()
    }

    pub fn pending_despawns(&self) -> usize {
        self.despawns.len()
    }

    /// Removes every entity whose despawn time has passed.
    pub(super) fn flush_despawns(&mut self) {
        let now = self.now;
        let (due, pending): (Vec<_>, Vec<_>) = self.despawns.drain(..).partition(|(_, at)| *at <= now);
        self.despawns = pending;
        for (id, _) in due {
            self.entities.remove(id);
        }
    }

    /// Rewinds a freshly spawned projectile so that after the tick's own
    /// `dt` of travel it has flown exactly `age` seconds.
    pub(super) fn backdate_projectile(&mut self, id: EntityId, age: f32, dt: f32) {
        let Some(entity) = self.entities.get_mut(id) else {
            return;
        };
        if let EntityKind::Projectile { velocity, expires_at, .. } = &mut entity.kind {
            entity.pos = entity.pos + *velocity * (age - dt);
            *expires_at -= f64::from(age.max(0.0));
        }
    }

    fn kind_for(&self, spec: &PrefabSpec, rotation_deg: f32) -> EntityKind {
        match *spec {
            PrefabSpec::Enemy { max_health, contact_damage, attack_cooldown, speed, score } => EntityKind::Enemy {
                health: Health::new(max_health),
                contact_damage,
                attack_cooldown,
                speed,
                score,
                last_attack_at: None,
            },
            PrefabSpec::Boss { score } => EntityKind::Boss { score, brain: BossBrain::new(&self.boss_config) },
            PrefabSpec::Projectile { speed, lifetime, damage } => EntityKind::Projectile {
                velocity: Vec2::from_angle_degrees(rotation_deg) * speed,
                expires_at: self.now + f64::from(lifetime.max(0.0)),
                damage,
            },
            PrefabSpec::Loot { element, heal } => EntityKind::Loot { element, heal },
        }
    }
}

impl Spawner for Arena {
    fn spawn(&mut self, prefab: &str, pos: Vec2, rotation_deg: f32) -> Option<EntityId> {
        let Some(spec) = self.prefabs.get(prefab) else {
            self.report(LogEvent::ConfigGap(ConfigGap::UnknownPrefab { prefab: prefab.to_string() }));
            return None;
        };
        let kind = self.kind_for(spec, rotation_deg);
        Some(self.entities.insert(Entity { prefab: prefab.to_string(), kind, pos, rotation_deg, room: None }))
    }

    /// A second request for the same entity keeps the earlier deadline.
    fn despawn(&mut self, entity: EntityId, delay_secs: f32) {
        if !self.entities.contains_key(entity) {
            return;
        }
        let at = self.now + f64::from(delay_secs.max(0.0));
        match self.despawns.iter_mut().find(|(queued, _)| *queued == entity) {
            Some((_, existing)) => *existing = existing.min(at),
            None => self.despawns.push((entity, at)),
        }
    }
}

impl DoorColliders for Arena {
    fn set_blocking(&mut self, room: GridCoord, direction: Direction, blocking: bool) {
        self.doors.insert((room, direction), blocking);
    }
}

impl Combatants for Arena {
    fn bind_room(&mut self, entity: EntityId, link: RoomLink<'_>) {
        let Some(found) = self.entities.get_mut(entity) else {
            return;
        };
        found.room = Some(link.room);
        if let EntityKind::Boss { brain, .. } = &mut found.kind {
            brain.teleport_points = link.teleport_points.to_vec();
            brain.minion_spawn_points = link.minion_spawn_points.to_vec();
        }
    }
}

impl Diagnostics for Arena {
    fn report(&mut self, event: LogEvent) {
        self.log.push(event);
    }
}
