//! Core type definitions used throughout the codebase

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Game tick counter (simulation time unit)
pub type Tick = u64;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            Display, From,
        )]
        #[display("{}#{}", $prefix, _0)]
        pub struct $name(pub u32);

        impl $name {
            pub fn new(id: u32) -> Self {
                Self(id)
            }
        }
    };
}

arena_id!(
    /// Unique identifier for star systems (assigned by the galaxy generator)
    SystemId,
    "system"
);
arena_id!(
    /// Unique identifier for empires (player and AI)
    EmpireId,
    "empire"
);
arena_id!(
    /// Unique identifier for colonised planets
    PlanetId,
    "planet"
);
arena_id!(
    /// Unique identifier for fleets
    FleetId,
    "fleet"
);
arena_id!(
    /// Unique identifier for science ships
    ScienceShipId,
    "science"
);
arena_id!(
    /// Unique identifier for queued construction tasks of every kind
    TaskId,
    "task"
);
arena_id!(
    /// Unique identifier for a spawned game event instance
    EventInstanceId,
    "event"
);

/// Dense index into the district catalog of a [`crate::core::config::SimConfig`]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[display("district[{}]", _0)]
pub struct DistrictKind(pub u16);

impl DistrictKind {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// 2D galactic position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

/// Monotonic per-kind id counters carried by the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next_planet: u32,
    next_fleet: u32,
    next_science_ship: u32,
    next_task: u32,
    next_event: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self {
            next_planet: 1,
            next_fleet: 1,
            next_science_ship: 1,
            next_task: 1,
            next_event: 1,
        }
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_planet(&mut self) -> PlanetId {
        let id = PlanetId(self.next_planet);
        self.next_planet += 1;
        id
    }

    pub fn next_fleet(&mut self) -> FleetId {
        let id = FleetId(self.next_fleet);
        self.next_fleet += 1;
        id
    }

    pub fn next_science_ship(&mut self) -> ScienceShipId {
        let id = ScienceShipId(self.next_science_ship);
        self.next_science_ship += 1;
        id
    }

    pub fn next_task(&mut self) -> TaskId {
        let id = TaskId(self.next_task);
        self.next_task += 1;
        id
    }

    pub fn next_event(&mut self) -> EventInstanceId {
        let id = EventInstanceId(self.next_event);
        self.next_event += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_id_equality() {
        let a = SystemId(1);
        let b = SystemId(1);
        let c = SystemId(2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(SystemId(4).to_string(), "system#4");
        assert_eq!(FleetId(9).to_string(), "fleet#9");
    }

    #[test]
    fn test_allocator_is_monotonic_per_kind() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.next_fleet(), FleetId(1));
        assert_eq!(ids.next_fleet(), FleetId(2));
        // Other kinds keep their own counters
        assert_eq!(ids.next_planet(), PlanetId(1));
        assert_eq!(ids.next_task(), TaskId(1));
        assert_eq!(ids.next_task(), TaskId(2));
    }

    #[test]
    fn test_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-9);
    }
}
