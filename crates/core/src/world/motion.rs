//! Enemy chase with contact attacks, and straight-line projectiles.
//! Movement is plain kinematics; collision beyond the player's contact
//! radius is left to the host.

use super::*;

/// Tolerance added to the contact radius after an enemy closes in.
const CONTACT_SLACK: f32 = 1e-3;

impl World {
    /// Enemies in the player's room (and unbound minions) close in and strike
    /// whenever their cooldown allows.
    pub(super) fn advance_enemies(&mut self, dt: f32) {
        let now = self.arena.now;
        let player_pos = self.player.pos;
        let reach = self.config.player.contact_radius;
        let current_room = self.current_room;
        let mut strikes = Vec::new();

        for (_, entity) in self.arena.entities.iter_mut() {
            if entity.room.is_some() && entity.room != current_room {
                continue;
            }
            let EntityKind::Enemy { health, contact_damage, attack_cooldown, speed, last_attack_at, .. } =
                &mut entity.kind
            else {
                continue;
            };
            if !health.is_alive() {
                continue;
            }

            let offset = player_pos - entity.pos;
            let distance = offset.length();
            if distance > reach {
                let travel = (*speed * dt).min(distance - reach);
                entity.pos = entity.pos + offset.normalized() * travel;
            }

            let in_contact = entity.pos.distance(player_pos) <= reach + CONTACT_SLACK;
            let ready = last_attack_at.is_none_or(|at| now - at >= f64::from(*attack_cooldown));
            if in_contact && ready {
                *last_attack_at = Some(now);
                strikes.push(*contact_damage);
            }
        }

        for damage in strikes {
            if self.outcome.is_some() {
                break;
            }
            self.damage_player(damage);
        }
    }

    /// Expired projectiles vanish; the rest move and burst on the player.
    pub(super) fn advance_projectiles(&mut self, dt: f32) {
        let now = self.arena.now;
        let player_pos = self.player.pos;
        let reach = self.config.player.contact_radius;
        let mut expired = Vec::new();
        let mut hits = Vec::new();

        for (id, entity) in self.arena.entities.iter_mut() {
            let EntityKind::Projectile { velocity, expires_at, damage } = entity.kind else {
                continue;
            };
            if now >= expires_at {
                expired.push(id);
                continue;
            }
            entity.pos = entity.pos + velocity * dt;
            if entity.pos.distance(player_pos) <= reach {
                hits.push((id, damage));
            }
        }

        for id in expired {
            self.arena.despawn(id, 0.0);
        }
        for (id, damage) in hits {
            self.arena.despawn(id, 0.0);
            if self.outcome.is_none() {
                self.damage_player(damage);
            }
        }
    }
}
