//! Boss health with monotonic phase transitions.

use crate::health::Health;
use crate::types::{BossPhase, DamageResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BossDamageReport {
    pub result: DamageResult,
    pub entered_phase2: bool,
    pub defeated: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BossHealth {
    health: Health,
    phase: BossPhase,
    phase2_threshold: f32,
}

impl BossHealth {
    pub fn new(max_health: i32, phase2_threshold: f32) -> Self {
        Self {
            health: Health::new(max_health),
            phase: BossPhase::Phase1,
            phase2_threshold: phase2_threshold.clamp(0.0, 1.0),
        }
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn phase(&self) -> BossPhase {
        self.phase
    }

    pub fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    /// A killing blow from Phase1 goes straight to `Defeated`.
    pub fn take_damage(&mut self, amount: i32) -> BossDamageReport {
        let result = self.health.take_damage(amount);
        let mut report = BossDamageReport { result, entered_phase2: false, defeated: false };
        match result {
            DamageResult::Ignored => {}
            DamageResult::Killed => {
                self.phase = BossPhase::Defeated;
                report.defeated = true;
            }
            DamageResult::Wounded { remaining } => {
                let threshold = self.phase2_threshold * self.health.max() as f32;
                if self.phase == BossPhase::Phase1 && remaining as f32 <= threshold {
                    self.phase = BossPhase::Phase2;
                    report.entered_phase2 = true;
                }
            }
        }
        report
    }
}
