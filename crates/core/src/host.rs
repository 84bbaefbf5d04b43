//! Narrow interfaces through which rooms reach the outside world.
//! The world's arena implements all of them; tests substitute recorders.

use crate::types::{Direction, EntityId, GridCoord, LogEvent, Vec2};

pub trait Spawner {
    /// Creates an entity from a prefab. Unknown prefabs yield `None` and are
    /// reported by the implementation.
    fn spawn(&mut self, prefab: &str, pos: Vec2, rotation_deg: f32) -> Option<EntityId>;

    fn despawn(&mut self, entity: EntityId, delay_secs: f32);
}

pub trait DoorColliders {
    fn set_blocking(&mut self, room: GridCoord, direction: Direction, blocking: bool);
}

/// Back-reference a room hands to each enemy it spawns.
#[derive(Clone, Copy, Debug)]
pub struct RoomLink<'a> {
    pub room: GridCoord,
    pub teleport_points: &'a [Vec2],
    pub minion_spawn_points: &'a [Vec2],
}

pub trait Combatants {
    fn bind_room(&mut self, entity: EntityId, link: RoomLink<'_>);
}

pub trait Diagnostics {
    fn report(&mut self, event: LogEvent);
}

pub trait RoomHost: Spawner + DoorColliders + Combatants + Diagnostics {}

impl<T: Spawner + DoorColliders + Combatants + Diagnostics> RoomHost for T {}
