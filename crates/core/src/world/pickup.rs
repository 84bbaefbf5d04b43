//! Loot pickup and the player's element slots.

use super::*;
use crate::elements::Pickup;

impl World {
    /// Loot that is out of reach, already held, or has no effect stays put.
    pub(super) fn pick_up(&mut self, id: EntityId) {
        let Some(entity) = self.arena.entities.get(id) else {
            return;
        };
        let EntityKind::Loot { element, heal } = entity.kind else {
            return;
        };
        if entity.pos.distance(self.player.pos) > self.config.player.pickup_radius {
            return;
        }
        let prefab = entity.prefab.clone();

        let collected = match element {
            Some(element) => match self.player.elements.try_pick_up(element) {
                Pickup::AlreadyHeld => false,
                Pickup::Added => {
                    self.arena.report(LogEvent::ElementPickedUp { element, dropped: None });
                    true
                }
                Pickup::Replaced { dropped } => {
                    self.arena.report(LogEvent::ElementPickedUp { element, dropped: Some(dropped) });
                    true
                }
            },
            None => heal > 0,
        };
        if !collected {
            return;
        }
        if heal > 0 {
            self.player.health.heal(heal);
        }
        self.arena.entities.remove(id);
        self.arena.report(LogEvent::LootCollected { loot: id, prefab });
    }

    pub(super) fn discard_element(&mut self) {
        if let Some(element) = self.player.elements.discard_last() {
            self.arena.report(LogEvent::ElementDiscarded { element });
        }
    }
}
