//! Health pools shared by the player, enemies, and bosses.

use crate::types::DamageResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Health {
    current: i32,
    max: i32,
    alive: bool,
}

impl Health {
    pub fn new(max: i32) -> Self {
        let max = max.max(1);
        Self { current: max, max, alive: true }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn fraction(&self) -> f32 {
        self.current as f32 / self.max as f32
    }

    /// Damage to a dead pool is ignored; negative amounts count as zero.
    pub fn take_damage(&mut self, amount: i32) -> DamageResult {
        if !self.alive {
            return DamageResult::Ignored;
        }
        self.current = (self.current - amount.max(0)).clamp(0, self.max);
        if self.current == 0 {
            self.alive = false;
            DamageResult::Killed
        } else {
            DamageResult::Wounded { remaining: self.current }
        }
    }

    pub fn heal(&mut self, amount: i32) -> i32 {
        if self.alive {
            self.current = (self.current + amount.max(0)).clamp(0, self.max);
        }
        self.current
    }
}

/// Player health with a post-hit invincibility window measured on the world clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerHealth {
    health: Health,
    invincibility: f64,
    last_hit_at: Option<f64>,
}

impl PlayerHealth {
    pub fn new(max: i32, invincibility_secs: f32) -> Self {
        Self {
            health: Health::new(max),
            invincibility: f64::from(invincibility_secs.max(0.0)),
            last_hit_at: None,
        }
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn is_invincible(&self, now: f64) -> bool {
        self.last_hit_at.is_some_and(|hit| now - hit < self.invincibility)
    }

    pub fn take_damage(&mut self, amount: i32, now: f64) -> DamageResult {
        if self.is_invincible(now) {
            return DamageResult::Ignored;
        }
        let result = self.health.take_damage(amount);
        if let DamageResult::Wounded { .. } = result {
            self.last_hit_at = Some(now);
        }
        result
    }

    pub fn heal(&mut self, amount: i32) -> i32 {
        self.health.heal(amount)
    }
}
