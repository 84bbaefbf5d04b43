//! Tests for collecting loot: element slots, healing orbs, and reach.

use super::support::*;

fn loot_of(world: &World, prefab: &str) -> Option<EntityId> {
    world.arena().entities().find(|(_, entity)| entity.prefab == prefab).map(|(id, _)| id)
}

fn drop_at_player(world: &mut World, prefab: &str) -> EntityId {
    let pos = world.player.pos;
    world.arena.spawn(prefab, pos, 0.0).expect("prefab is in the catalog")
}

#[test]
fn chest_element_goes_into_the_first_slot() {
    let (mut world, room) = world_with(RoomType::Item);
    world.handle(WorldEvent::PlayerEnteredRoom { room });
    let (loot, element) = world
        .arena()
        .entities()
        .find_map(|(id, entity)| match entity.kind {
            EntityKind::Loot { element: Some(element), .. } => Some((id, element)),
            _ => None,
        })
        .expect("the chest drops an element");

    world.handle(WorldEvent::PickUp { entity: loot });

    assert_eq!(world.player().elements.elements(), &[element]);
    assert!(world.arena().entity(loot).is_none());
    assert_eq!(count_log(&world, |event| matches!(event, LogEvent::LootCollected { loot: l, .. } if *l == loot)), 1);
    assert_eq!(
        count_log(&world, |event| matches!(event, LogEvent::ElementPickedUp { dropped: None, .. })),
        1
    );
}

#[test]
fn health_orb_heals_and_disappears() {
    let (mut world, room) = world_with(RoomType::Normal);
    world.handle(WorldEvent::PlayerEnteredRoom { room });
    world.handle(WorldEvent::DamagePlayer { amount: 5 });
    kill_all(&mut world, room);
    let orb = loot_of(&world, prefabs::HEALTH_ORB).expect("clearing drops an orb");

    world.handle(WorldEvent::PickUp { entity: orb });

    assert_eq!(world.player().health.health().current(), 7);
    assert!(world.arena().entity(orb).is_none());
    assert!(world.player().elements.elements().is_empty());
}

#[test]
fn loot_out_of_reach_stays_on_the_floor() {
    let (mut world, room) = world_with(RoomType::Normal);
    world.handle(WorldEvent::PlayerEnteredRoom { room });
    world.handle(WorldEvent::DamagePlayer { amount: 5 });
    kill_all(&mut world, room);
    let orb = loot_of(&world, prefabs::HEALTH_ORB).expect("clearing drops an orb");
    let aside = world.player().pos + Vec2::new(3.0, 0.0);
    world.handle(WorldEvent::PlayerMoved { to: aside });

    world.handle(WorldEvent::PickUp { entity: orb });

    assert!(world.arena().entity(orb).is_some());
    assert_eq!(world.player().health.health().current(), 5);
}

#[test]
fn held_elements_are_refused_and_a_third_replaces_the_oldest() {
    let mut world = world(4);
    let fire = drop_at_player(&mut world, prefabs::ELEMENT_FIRE);
    let second_fire = drop_at_player(&mut world, prefabs::ELEMENT_FIRE);
    let water = drop_at_player(&mut world, prefabs::ELEMENT_WATER);
    let air = drop_at_player(&mut world, prefabs::ELEMENT_AIR);

    world.handle(WorldEvent::PickUp { entity: fire });
    world.handle(WorldEvent::PickUp { entity: second_fire });
    assert_eq!(world.player().elements.elements(), &[Element::Fire]);
    assert!(world.arena().entity(second_fire).is_some());

    world.handle(WorldEvent::PickUp { entity: water });
    world.handle(WorldEvent::PickUp { entity: air });
    assert_eq!(world.player().elements.elements(), &[Element::Water, Element::Air]);
    assert_eq!(
        count_log(&world, |event| {
            matches!(event, LogEvent::ElementPickedUp { element: Element::Air, dropped: Some(Element::Fire) })
        }),
        1
    );

    world.handle(WorldEvent::DiscardElement);
    assert_eq!(world.player().elements.elements(), &[Element::Water]);
    assert_eq!(count_log(&world, |event| matches!(event, LogEvent::ElementDiscarded { element: Element::Air })), 1);
}

#[test]
fn inert_loot_and_non_loot_entities_cannot_be_picked_up() {
    let mut world = world(4);
    let core = drop_at_player(&mut world, prefabs::VOID_CORE);
    let shade = drop_at_player(&mut world, prefabs::SHADE);

    world.handle(WorldEvent::PickUp { entity: core });
    world.handle(WorldEvent::PickUp { entity: shade });

    assert!(world.arena().entity(core).is_some());
    assert!(world.arena().entity(shade).is_some());
    assert_eq!(count_log(&world, |event| matches!(event, LogEvent::LootCollected { .. })), 0);
}

#[test]
fn discarding_with_empty_slots_does_nothing() {
    let mut world = world(4);
    world.handle(WorldEvent::DiscardElement);
    assert!(world.player().elements.elements().is_empty());
    assert_eq!(count_log(&world, |event| matches!(event, LogEvent::ElementDiscarded { .. })), 0);
}
