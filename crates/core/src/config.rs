//! Tunable content and generation parameters.
//!
//! Every section deserializes with `#[serde(default)]`, so a config file only
//! needs to name the values it overrides. Defaults mirror the shipped game.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Element, PrefabId, RoomType, Vec2};

pub mod prefabs {
    pub const SHADE: &str = "shade";
    pub const SHADOWLING: &str = "shadowling";
    pub const VOID_WEAVER: &str = "void_weaver";
    pub const SHADOW_BOLT: &str = "shadow_bolt";
    pub const HEALTH_ORB: &str = "health_orb";
    pub const VOID_CORE: &str = "void_core";
    pub const ELEMENT_FIRE: &str = "element_fire";
    pub const ELEMENT_WATER: &str = "element_water";
    pub const ELEMENT_EARTH: &str = "element_earth";
    pub const ELEMENT_AIR: &str = "element_air";
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    NonPositiveRoomSize,
    ZeroAttemptFactor,
    FractionOutOfRange { field: &'static str },
    NonPositiveHealth { field: &'static str },
    EnemyRangeInverted { room_type: RoomType },
    NegativeDuration { field: &'static str },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    pub layout: LayoutConfig,
    pub rooms: RoomTemplates,
    pub prefabs: BTreeMap<PrefabId, PrefabSpec>,
    pub boss: BossConfig,
    pub player: PlayerConfig,
}

impl Default for DungeonConfig {
    /// A `prefabs` table in a config file replaces the stock catalog wholesale.
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            rooms: RoomTemplates::default(),
            prefabs: standard_prefabs(),
            boss: BossConfig::default(),
            player: PlayerConfig::default(),
        }
    }
}

impl DungeonConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        if !(layout.room_width > 0.0 && layout.room_height > 0.0) {
            return Err(ConfigError::NonPositiveRoomSize);
        }
        if layout.max_attempt_factor == 0 {
            return Err(ConfigError::ZeroAttemptFactor);
        }
        check_fraction("layout.item_room_fraction", layout.item_room_fraction)?;
        check_fraction("boss.phase2_threshold", self.boss.phase2_threshold)?;
        check_fraction("boss.phase2_volley_probability", self.boss.phase2_volley_probability)?;
        if self.boss.max_health <= 0 {
            return Err(ConfigError::NonPositiveHealth { field: "boss.max_health" });
        }
        if self.player.max_health <= 0 {
            return Err(ConfigError::NonPositiveHealth { field: "player.max_health" });
        }
        for (field, value) in [
            ("boss.time_between_projectiles", self.boss.time_between_projectiles),
            ("boss.attack_cycle_cooldown", self.boss.attack_cycle_cooldown),
            ("boss.teleport_pause", self.boss.teleport_pause),
            ("boss.summon_recovery", self.boss.summon_recovery),
            ("player.invincibility_duration", self.player.invincibility_duration),
        ] {
            if value < 0.0 {
                return Err(ConfigError::NegativeDuration { field });
            }
        }
        for room_type in
            [RoomType::Start, RoomType::Normal, RoomType::Boss, RoomType::Item, RoomType::Empty]
        {
            let template = self.rooms.for_type(room_type);
            if template.min_enemies > template.max_enemies {
                return Err(ConfigError::EnemyRangeInverted { room_type });
            }
        }
        Ok(())
    }
}

fn check_fraction(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) { Ok(()) } else { Err(ConfigError::FractionOutOfRange { field }) }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub target_room_count: usize,
    pub max_attempt_factor: usize,
    pub item_room_fraction: f32,
    pub room_width: f32,
    pub room_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            target_room_count: 15,
            max_attempt_factor: 5,
            item_room_fraction: 0.1,
            room_width: 15.0,
            room_height: 9.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomTemplates {
    pub start: RoomTemplate,
    pub normal: RoomTemplate,
    pub boss: RoomTemplate,
    pub item: RoomTemplate,
    pub empty: RoomTemplate,
}

impl RoomTemplates {
    pub fn for_type(&self, room_type: RoomType) -> &RoomTemplate {
        match room_type {
            RoomType::Start => &self.start,
            RoomType::Normal => &self.normal,
            RoomType::Boss => &self.boss,
            RoomType::Item => &self.item,
            RoomType::Empty => &self.empty,
        }
    }
}

impl Default for RoomTemplates {
    fn default() -> Self {
        let corners =
            vec![Vec2::new(-4.0, 2.0), Vec2::new(4.0, 2.0), Vec2::new(-4.0, -2.0), Vec2::new(4.0, -2.0)];
        Self {
            start: RoomTemplate::quiet(),
            normal: RoomTemplate {
                enemy_prefabs: vec![prefabs::SHADE.to_string()],
                enemy_spawn_points: corners,
                spawn_enemies_on_enter: true,
                min_enemies: 1,
                max_enemies: 3,
                loot_prefabs: vec![prefabs::HEALTH_ORB.to_string()],
                loot_point: Some(Vec2::ZERO),
                spawn_loot_on_clear: true,
                ..RoomTemplate::quiet()
            },
            boss: RoomTemplate {
                enemy_prefabs: vec![prefabs::VOID_WEAVER.to_string()],
                enemy_spawn_points: vec![Vec2::ZERO],
                spawn_enemies_on_enter: true,
                min_enemies: 1,
                max_enemies: 1,
                loot_prefabs: vec![prefabs::VOID_CORE.to_string()],
                loot_point: Some(Vec2::ZERO),
                spawn_loot_on_clear: true,
                boss_teleport_points: vec![
                    Vec2::new(-5.0, 3.0),
                    Vec2::new(5.0, 3.0),
                    Vec2::new(-5.0, -3.0),
                    Vec2::new(5.0, -3.0),
                    Vec2::ZERO,
                ],
                minion_spawn_points: vec![Vec2::new(-3.0, 0.0), Vec2::new(3.0, 0.0)],
                ..RoomTemplate::quiet()
            },
            item: RoomTemplate {
                chest_loot: vec![
                    prefabs::ELEMENT_FIRE.to_string(),
                    prefabs::ELEMENT_WATER.to_string(),
                    prefabs::ELEMENT_EARTH.to_string(),
                    prefabs::ELEMENT_AIR.to_string(),
                ],
                loot_point: Some(Vec2::new(0.0, 0.5)),
                ..RoomTemplate::quiet()
            },
            empty: RoomTemplate::quiet(),
        }
    }
}

/// Per-room-type content. Points are offsets from the room centre.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomTemplate {
    pub enemy_prefabs: Vec<PrefabId>,
    pub enemy_spawn_points: Vec<Vec2>,
    pub spawn_enemies_on_enter: bool,
    pub min_enemies: u32,
    pub max_enemies: u32,
    pub loot_prefabs: Vec<PrefabId>,
    pub loot_point: Option<Vec2>,
    pub spawn_loot_on_clear: bool,
    pub chest_loot: Vec<PrefabId>,
    pub boss_teleport_points: Vec<Vec2>,
    pub minion_spawn_points: Vec<Vec2>,
}

impl RoomTemplate {
    /// A room that never spawns anything.
    pub fn quiet() -> Self {
        Self {
            enemy_prefabs: Vec::new(),
            enemy_spawn_points: Vec::new(),
            spawn_enemies_on_enter: false,
            min_enemies: 0,
            max_enemies: 0,
            loot_prefabs: Vec::new(),
            loot_point: None,
            spawn_loot_on_clear: false,
            chest_loot: Vec::new(),
            boss_teleport_points: Vec::new(),
            minion_spawn_points: Vec::new(),
        }
    }
}

impl Default for RoomTemplate {
    fn default() -> Self {
        Self::quiet()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PrefabSpec {
    Enemy { max_health: i32, contact_damage: i32, attack_cooldown: f32, speed: f32, score: u32 },
    Boss { score: u32 },
    Projectile { speed: f32, lifetime: f32, damage: i32 },
    /// Loot with neither an element nor healing cannot be picked up.
    Loot {
        #[serde(default)]
        element: Option<Element>,
        #[serde(default)]
        heal: i32,
    },
}

pub fn standard_prefabs() -> BTreeMap<PrefabId, PrefabSpec> {
    let mut catalog = BTreeMap::new();
    catalog.insert(
        prefabs::SHADE.to_string(),
        PrefabSpec::Enemy {
            max_health: 3,
            contact_damage: 1,
            attack_cooldown: 1.0,
            speed: 2.5,
            score: 10,
        },
    );
    catalog.insert(
        prefabs::SHADOWLING.to_string(),
        PrefabSpec::Enemy {
            max_health: 2,
            contact_damage: 1,
            attack_cooldown: 1.0,
            speed: 3.0,
            score: 5,
        },
    );
    catalog.insert(prefabs::VOID_WEAVER.to_string(), PrefabSpec::Boss { score: 500 });
    catalog.insert(
        prefabs::SHADOW_BOLT.to_string(),
        PrefabSpec::Projectile { speed: 5.0, lifetime: 4.0, damage: 1 },
    );
    catalog.insert(prefabs::HEALTH_ORB.to_string(), PrefabSpec::Loot { element: None, heal: 2 });
    catalog.insert(prefabs::VOID_CORE.to_string(), PrefabSpec::Loot { element: None, heal: 0 });
    for (name, element) in [
        (prefabs::ELEMENT_FIRE, Element::Fire),
        (prefabs::ELEMENT_WATER, Element::Water),
        (prefabs::ELEMENT_EARTH, Element::Earth),
        (prefabs::ELEMENT_AIR, Element::Air),
    ] {
        catalog.insert(name.to_string(), PrefabSpec::Loot { element: Some(element), heal: 0 });
    }
    catalog
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    pub max_health: i32,
    pub phase2_threshold: f32,
    pub projectile_prefab: Option<PrefabId>,
    pub projectiles_per_volley: u32,
    pub time_between_projectiles: f32,
    pub minion_prefab: Option<PrefabId>,
    pub minions_to_spawn: u32,
    pub attack_cycle_cooldown: f32,
    pub phase2_volley_probability: f32,
    pub teleport_pause: f32,
    pub summon_recovery: f32,
    pub death_despawn_delay: f32,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            max_health: 500,
            phase2_threshold: 0.5,
            projectile_prefab: Some(prefabs::SHADOW_BOLT.to_string()),
            projectiles_per_volley: 5,
            time_between_projectiles: 0.2,
            minion_prefab: Some(prefabs::SHADOWLING.to_string()),
            minions_to_spawn: 2,
            attack_cycle_cooldown: 3.0,
            phase2_volley_probability: 0.6,
            teleport_pause: 0.2,
            summon_recovery: 1.0,
            death_despawn_delay: 5.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_health: i32,
    pub invincibility_duration: f32,
    pub contact_radius: f32,
    pub pickup_radius: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { max_health: 10, invincibility_duration: 1.0, contact_radius: 0.6, pickup_radius: 1.0 }
    }
}
