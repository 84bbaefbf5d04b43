//! Regression test module wiring for world behaviors.

mod loot_pickup;
mod player_combat;

/// Shared imports and fixtures for world regression tests.
mod support {
    pub(super) use super::super::*;
    pub(super) use crate::config::prefabs;

    pub(super) fn world(seed: u64) -> World {
        World::new(seed, DungeonConfig::default())
    }

    pub(super) fn first_room_of(world: &World, room_type: RoomType) -> Option<GridCoord> {
        world.map().graph.first_of(room_type)
    }

    /// First seed whose floor contains a room of `room_type`.
    pub(super) fn world_with(room_type: RoomType) -> (World, GridCoord) {
        (0..200)
            .map(world)
            .find_map(|world| first_room_of(&world, room_type).map(|coord| (world, coord)))
            .expect("some seed in range produces the room type")
    }

    pub(super) fn kill_all(world: &mut World, room: GridCoord) {
        for enemy in world.hostiles_in_room(room) {
            world.handle(WorldEvent::DamageEntity { entity: enemy, amount: 10_000 });
        }
    }

    pub(super) fn tick_for(world: &mut World, seconds: f32, dt: f32) {
        let steps = (seconds / dt).round() as usize;
        for _ in 0..steps {
            world.handle(WorldEvent::Tick { dt });
        }
    }

    pub(super) fn count_log(world: &World, predicate: impl Fn(&LogEvent) -> bool) -> usize {
        world.log().iter().filter(|event| predicate(event)).count()
    }
}
