//! Tests for player health, invincibility, contact attacks, and defeat.

use super::support::*;

#[test]
fn hits_inside_the_invincibility_window_are_ignored() {
    let mut world = world(21);
    world.handle(WorldEvent::DamagePlayer { amount: 3 });
    world.handle(WorldEvent::DamagePlayer { amount: 3 });
    assert_eq!(world.player().health.health().current(), 7);

    tick_for(&mut world, 1.1, 0.1);
    world.handle(WorldEvent::DamagePlayer { amount: 3 });
    assert_eq!(world.player().health.health().current(), 4);
    assert_eq!(count_log(&world, |event| matches!(event, LogEvent::PlayerDamaged { .. })), 2);
}

#[test]
fn healing_clamps_to_max() {
    let mut world = world(21);
    world.handle(WorldEvent::DamagePlayer { amount: 4 });
    world.handle(WorldEvent::HealPlayer { amount: 100 });
    assert_eq!(world.player().health.health().current(), 10);
}

#[test]
fn lethal_damage_ends_the_run_in_defeat() {
    let mut world = world(21);
    world.handle(WorldEvent::DamagePlayer { amount: 50 });

    assert_eq!(world.outcome(), Some(RunOutcome::Defeat));
    assert_eq!(world.player().health.health().current(), 0);
    assert_eq!(count_log(&world, |event| matches!(event, LogEvent::PlayerDied)), 1);

    let tick = world.current_tick();
    world.handle(WorldEvent::Tick { dt: 0.1 });
    world.handle(WorldEvent::HealPlayer { amount: 5 });
    assert_eq!(world.current_tick(), tick);
    assert_eq!(world.player().health.health().current(), 0);
}

#[test]
fn shades_close_in_and_strike_on_contact() {
    let (mut world, room) = world_with(RoomType::Normal);
    world.handle(WorldEvent::PlayerEnteredRoom { room });
    let center = world.room_center(room);
    let reach = world.config().player.contact_radius;

    tick_for(&mut world, 5.0, 0.1);

    let health = world.player().health.health().current();
    assert!(health < 10, "player should have been hit, still at {health}");
    assert!(health > 0);
    for enemy in world.hostiles_in_room(room) {
        let pos = world.arena().entity(enemy).map(|entity| entity.pos).expect("enemy exists");
        assert!(pos.distance(center) <= reach + 0.01);
    }
}

#[test]
fn dead_enemies_stop_attacking() {
    let (mut world, room) = world_with(RoomType::Normal);
    world.handle(WorldEvent::PlayerEnteredRoom { room });
    kill_all(&mut world, room);
    tick_for(&mut world, 5.0, 0.1);
    assert_eq!(world.player().health.health().current(), 10);
}
