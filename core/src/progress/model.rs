use rand::Rng;

use crate::config::ProgressConfig;

pub const COMPLETE: f64 = 100.0;

/// Simulated progress value. Carries no information about the server side.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressModel {
    value: f64,
    ceiling: f64,
    max_increment: f64,
    finished: bool,
}

impl ProgressModel {
    pub fn new(ceiling: f64, max_increment: f64) -> Self {
        Self {
            value: 0.0,
            ceiling: ceiling.clamp(0.0, COMPLETE),
            max_increment: max_increment.max(0.0),
            finished: false,
        }
    }

    pub fn from_config(cfg: &ProgressConfig) -> Self {
        Self::new(cfg.ceiling, cfg.max_increment)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Advance by a random amount in `[0, max_increment)`, capped at the ceiling.
    /// No-op once the ceiling is reached or after `finish`.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        if self.finished || self.value >= self.ceiling {
            return self.value;
        }
        let step = rng.random::<f64>() * self.max_increment;
        self.value = (self.value + step).min(self.ceiling);
        self.value
    }

    /// Jump to completion. Only a settled request may call this.
    pub fn finish(&mut self) -> f64 {
        self.finished = true;
        self.value = COMPLETE;
        self.value
    }
}
