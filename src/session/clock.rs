//! Session clock

use serde::{Deserialize, Serialize};

use crate::core::types::Tick;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clock {
    tick: Tick,
    elapsed_days: f64,
    /// Host-facing speed multiplier, the core never reads it
    pub speed: f64,
    /// Host-facing pause flag, the core never reads it
    pub running: bool,
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            tick: 0,
            elapsed_days: 0.0,
            speed: 1.0,
            running: false,
        }
    }
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, days_per_tick: f64) {
        self.tick += 1;
        self.elapsed_days += days_per_tick;
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn elapsed_days(&self) -> f64 {
        self.elapsed_days
    }
}
