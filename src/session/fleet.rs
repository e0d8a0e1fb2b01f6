//! Fleets and science ships

use serde::{Deserialize, Serialize};

use crate::core::config::SimConfig;
use crate::core::types::{EmpireId, FleetId, ScienceShipId, SystemId};
use crate::military::design::ComposedDesign;

/// One ship in a fleet roster
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FleetShip {
    pub design_id: String,
    /// Never exceeds `max_hull_points`, never below 0
    pub hull_points: f64,
    pub max_hull_points: f64,
    #[serde(default)]
    pub attack_bonus: Option<f64>,
    #[serde(default)]
    pub defense_bonus: Option<f64>,
}

impl FleetShip {
    pub fn from_composed(composed: &ComposedDesign) -> Self {
        Self {
            design_id: composed.design_id.clone(),
            hull_points: composed.hull,
            max_hull_points: composed.hull,
            attack_bonus: (composed.attack_bonus != 0.0).then_some(composed.attack_bonus),
            defense_bonus: (composed.defense_bonus != 0.0).then_some(composed.defense_bonus),
        }
    }

    /// Attack contribution: design attack plus per-ship bonus
    ///
    /// Ships with an unknown design contribute only their bonus.
    pub fn attack(&self, config: &SimConfig) -> f64 {
        let base = config.design(&self.design_id).map(|d| d.attack).unwrap_or(0.0);
        base + self.attack_bonus.unwrap_or(0.0)
    }

    pub fn defense(&self, config: &SimConfig) -> f64 {
        let base = config.design(&self.design_id).map(|d| d.defense).unwrap_or(0.0);
        base + self.defense_bonus.unwrap_or(0.0)
    }

    pub fn is_destroyed(&self) -> bool {
        self.hull_points <= 0.0
    }
}

/// A fleet of ships owned by one empire
///
/// A fleet whose ships are all lost stays in the session with an empty roster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fleet {
    pub id: FleetId,
    pub owner_id: EmpireId,
    pub name: String,
    pub system_id: SystemId,
    pub target_system_id: Option<SystemId>,
    pub ticks_to_arrival: u32,
    pub ships: Vec<FleetShip>,
    /// System the fleet is anchored to (home guard), if any
    #[serde(default)]
    pub anchor_system_id: Option<SystemId>,
    /// Target of the previous order, excluded from the next AI pick
    #[serde(default)]
    pub last_target_id: Option<SystemId>,
}

impl Fleet {
    pub fn new(id: FleetId, owner_id: EmpireId, name: impl Into<String>, system_id: SystemId) -> Self {
        Self {
            id,
            owner_id,
            name: name.into(),
            system_id,
            target_system_id: None,
            ticks_to_arrival: 0,
            ships: Vec::new(),
            anchor_system_id: None,
            last_target_id: None,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.target_system_id.is_some()
    }

    pub fn attack_power(&self, config: &SimConfig) -> f64 {
        self.ships.iter().map(|s| s.attack(config)).sum()
    }

    pub fn defense_power(&self, config: &SimConfig) -> f64 {
        self.ships.iter().map(|s| s.defense(config)).sum()
    }

    /// Send the fleet to `target`, zero travel time means arrival next movement step
    pub fn order_move(&mut self, target: SystemId, ticks: u32) {
        self.target_system_id = Some(target);
        self.ticks_to_arrival = ticks;
        self.last_target_id = Some(target);
    }
}

/// A survey mission in progress
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurveyMission {
    pub target_system_id: SystemId,
    pub ticks_remaining: u32,
    pub total_ticks: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScienceShip {
    pub id: ScienceShipId,
    pub name: String,
    pub system_id: SystemId,
    pub mission: Option<SurveyMission>,
}
