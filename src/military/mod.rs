//! Military - ship designs, fleet travel and combat

pub mod combat;
pub mod design;
pub mod movement;

pub use combat::{resolve_combat, resolve_system_combat, CombatResult};
pub use design::{compose_design, ComposedDesign, ShipCustomization, ShipDesign, ShipTemplate};
pub use movement::{advance_fleet_movement, estimate_travel, order_fleet_move, travel_ticks};

use thiserror::Error;

use crate::core::types::{FleetId, SystemId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FleetOrderError {
    #[error("Unknown fleet {0}")]
    UnknownFleet(FleetId),
    #[error("Unknown system {0}")]
    UnknownSystem(SystemId),
    #[error("Fleet {0} is not owned by the player")]
    NotOwned(FleetId),
    #[error("Fleet {0} has no ships")]
    EmptyFleet(FleetId),
}

impl FleetOrderError {
    pub fn code(&self) -> &'static str {
        match self {
            FleetOrderError::UnknownFleet(_) => "UNKNOWN_FLEET",
            FleetOrderError::UnknownSystem(_) => "UNKNOWN_SYSTEM",
            FleetOrderError::NotOwned(_) => "NOT_OWNED",
            FleetOrderError::EmptyFleet(_) => "EMPTY_FLEET",
        }
    }
}
