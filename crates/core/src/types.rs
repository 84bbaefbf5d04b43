use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EntityId;
}

pub type PrefabId = String;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self { x: self.x + dx, y: self.y + dy }
    }

    pub fn neighbors(self) -> [Self; 4] {
        Direction::ALL.map(|direction| self.step(direction))
    }

    /// Squared Euclidean distance; ordering-equivalent to the true distance.
    pub fn distance_squared(self, other: Self) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::South => (0, -1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoomType {
    Start,
    Normal,
    Boss,
    Item,
    Empty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Fire,
    Water,
    Earth,
    Air,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BossPhase {
    Phase1,
    Phase2,
    Defeated,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }

    pub fn normalized(self) -> Self {
        let length = self.length();
        if length <= f32::EPSILON { Self::ZERO } else { Self { x: self.x / length, y: self.y / length } }
    }

    /// Heading in degrees, counter-clockwise from +x.
    pub fn angle_degrees(self) -> f32 {
        self.y.atan2(self.x).to_degrees()
    }

    pub fn from_angle_degrees(degrees: f32) -> Self {
        let radians = degrees.to_radians();
        Self { x: radians.cos(), y: radians.sin() }
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Victory,
    Defeat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageResult {
    Ignored,
    Wounded { remaining: i32 },
    Killed,
}

/// Missing or empty content references. Each one skips a single spawn or
/// attack step; play continues.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigGap {
    UnknownPrefab { prefab: PrefabId },
    NoTeleportPoints { room: GridCoord },
    NoMinionSpawnPoints { boss: EntityId },
    NoMinionPrefab { boss: EntityId },
    NoProjectilePrefab { boss: EntityId },
    NoLootPool { room: GridCoord },
    NoLootPoint { room: GridCoord },
}

#[derive(Clone, Debug, PartialEq)]
pub enum LogEvent {
    MapGenerated { seed: u64, rooms: usize },
    GenerationShortfall { built: usize, target: usize, attempts: usize },
    ConfigGap(ConfigGap),
    PlayerEnteredRoom { room: GridCoord },
    EnemiesSpawned { room: GridCoord, count: usize },
    DoorsLocked { room: GridCoord },
    DoorsUnlocked { room: GridCoord },
    RoomCleared { room: GridCoord },
    LootSpawned { room: GridCoord, prefab: PrefabId },
    ChestOpened { room: GridCoord, prefab: PrefabId },
    EnemyDefeated { enemy: EntityId, room: Option<GridCoord> },
    BossPhaseChanged { boss: EntityId, phase: BossPhase },
    BossTeleported { boss: EntityId, to: Vec2 },
    ProjectileFired { boss: EntityId, projectile: EntityId, rotation_deg: f32 },
    MinionsSummoned { boss: EntityId, count: usize },
    PlayerDamaged { amount: i32, remaining: i32 },
    PlayerDied,
    PointsAwarded { points: u32, total: u32 },
    LootCollected { loot: EntityId, prefab: PrefabId },
    ElementPickedUp { element: Element, dropped: Option<Element> },
    ElementDiscarded { element: Element },
}
