//! Galaxy - star systems as produced by the external galaxy generator

use serde::{Deserialize, Serialize};

use crate::core::types::{EmpireId, SystemId, Vec2};
use crate::session::planet::PlanetTemplate;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarClass {
    O,
    B,
    A,
    F,
    G,
    K,
    M,
    Neutron,
    BlackHole,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Unknown,
    Revealed,
    Surveyed,
}

/// Shipyard structure on a system
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ShipyardState {
    #[default]
    None,
    UnderConstruction { ticks_remaining: u32, total_ticks: u32 },
    Built,
}

impl ShipyardState {
    pub fn is_built(&self) -> bool {
        matches!(self, ShipyardState::Built)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarSystem {
    pub id: SystemId,
    pub name: String,
    pub position: Vec2,
    pub star_class: StarClass,
    pub visibility: Visibility,
    pub habitable_world: Option<PlanetTemplate>,
    /// Always >= 0
    pub hostile_power: f64,
    pub owner_id: Option<EmpireId>,
    #[serde(default)]
    pub shipyard: ShipyardState,
}

impl StarSystem {
    pub fn new(id: SystemId, name: impl Into<String>, position: Vec2, star_class: StarClass) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            star_class,
            visibility: Visibility::Unknown,
            habitable_world: None,
            hostile_power: 0.0,
            owner_id: None,
            shipyard: ShipyardState::None,
        }
    }

    pub fn is_hostile(&self) -> bool {
        self.hostile_power > 0.0
    }

    /// Raise visibility, never lowers it
    pub fn reveal_to(&mut self, visibility: Visibility) {
        if visibility > self.visibility {
            self.visibility = visibility;
        }
    }

    pub fn add_hostile_power(&mut self, amount: f64) {
        self.hostile_power = (self.hostile_power + amount).max(0.0);
    }
}

/// All systems of a session plus the systems cleared of hostiles so far
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Galaxy {
    pub systems: Vec<StarSystem>,
    pub cleared_hostiles: Vec<SystemId>,
}

impl Galaxy {
    pub fn new(systems: Vec<StarSystem>) -> Self {
        Self {
            systems,
            cleared_hostiles: Vec::new(),
        }
    }

    pub fn system(&self, id: SystemId) -> Option<&StarSystem> {
        self.systems.iter().find(|s| s.id == id)
    }

    pub fn system_mut(&mut self, id: SystemId) -> Option<&mut StarSystem> {
        self.systems.iter_mut().find(|s| s.id == id)
    }

    pub fn hostile_systems(&self) -> impl Iterator<Item = &StarSystem> {
        self.systems.iter().filter(|s| s.is_hostile())
    }

    /// Sum of hostile power across the galaxy
    pub fn total_threat(&self) -> f64 {
        self.hostile_systems().map(|s| s.hostile_power).sum()
    }

    pub fn mark_cleared(&mut self, id: SystemId) {
        if !self.cleared_hostiles.contains(&id) {
            self.cleared_hostiles.push(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_never_decreases() {
        let mut system = StarSystem::new(SystemId(1), "Sol", Vec2::default(), StarClass::G);
        system.reveal_to(Visibility::Surveyed);
        system.reveal_to(Visibility::Revealed);
        assert_eq!(system.visibility, Visibility::Surveyed);
    }

    #[test]
    fn test_hostile_power_floor() {
        let mut system = StarSystem::new(SystemId(1), "Sol", Vec2::default(), StarClass::G);
        system.add_hostile_power(5.0);
        system.add_hostile_power(-10.0);
        assert_eq!(system.hostile_power, 0.0);
        assert!(!system.is_hostile());
    }

    #[test]
    fn test_cleared_list_is_unique() {
        let mut galaxy = Galaxy::default();
        galaxy.mark_cleared(SystemId(2));
        galaxy.mark_cleared(SystemId(2));
        assert_eq!(galaxy.cleared_hostiles, vec![SystemId(2)]);
    }
}
