//! Construction - district, colonization and ship-build queues plus shipyard structures
//!
//! Every task shares the countdown contract in [`queue`]. Costs are paid when
//! a task is queued; completion only applies the effect.

pub mod colonization;
pub mod district;
pub mod queue;
pub mod shipyard;
pub mod structure;

pub use colonization::{advance_colonization, claim_colonized_systems, queue_colonization};
pub use district::{advance_districts, queue_district};
pub use queue::{advance_queue, remove_task, Countdown, QueueAdvance};
pub use shipyard::{advance_ship_builds, queue_ship};
pub use structure::{advance_shipyard_structures, build_shipyard};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::{DistrictKind, PlanetId, SystemId, TaskId};
use crate::military::design::ShipCustomization;
use crate::session::planet::PlanetTemplate;
use crate::session::Session;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("Unknown planet {0}")]
    UnknownPlanet(PlanetId),
    #[error("Unknown system {0}")]
    UnknownSystem(SystemId),
    #[error("Unknown district '{0}'")]
    UnknownDistrict(String),
    #[error("Unknown ship design or template '{0}'")]
    UnknownDesign(String),
    #[error("Unknown task {0}")]
    UnknownTask(TaskId),
    #[error("System {0} has no shipyard")]
    NoShipyard(SystemId),
    #[error("System {0} already has a shipyard")]
    ShipyardExists(SystemId),
    #[error("Build queue at system {0} is full")]
    QueueFull(SystemId),
    #[error("Insufficient resources")]
    InsufficientResources,
    #[error("System {0} has no habitable world")]
    NotHabitable(SystemId),
    #[error("System {0} is already colonized or targeted")]
    AlreadyColonized(SystemId),
    #[error("System {0} is not owned by the player")]
    NotOwned(SystemId),
}

impl ConstructionError {
    pub fn code(&self) -> &'static str {
        match self {
            ConstructionError::UnknownPlanet(_) => "UNKNOWN_PLANET",
            ConstructionError::UnknownSystem(_) => "UNKNOWN_SYSTEM",
            ConstructionError::UnknownDistrict(_) => "UNKNOWN_DISTRICT",
            ConstructionError::UnknownDesign(_) => "UNKNOWN_DESIGN",
            ConstructionError::UnknownTask(_) => "UNKNOWN_TASK",
            ConstructionError::NoShipyard(_) => "NO_SHIPYARD",
            ConstructionError::ShipyardExists(_) => "SHIPYARD_EXISTS",
            ConstructionError::QueueFull(_) => "QUEUE_FULL",
            ConstructionError::InsufficientResources => "INSUFFICIENT_RESOURCES",
            ConstructionError::NotHabitable(_) => "NOT_HABITABLE",
            ConstructionError::AlreadyColonized(_) => "ALREADY_COLONIZED",
            ConstructionError::NotOwned(_) => "NOT_OWNED",
        }
    }
}

macro_rules! countdown_task {
    ($task:ty) => {
        impl Countdown for $task {
            fn id(&self) -> TaskId {
                self.id
            }
            fn ticks_remaining(&self) -> u32 {
                self.ticks_remaining
            }
            fn ticks_remaining_mut(&mut self) -> &mut u32 {
                &mut self.ticks_remaining
            }
            fn total_ticks(&self) -> u32 {
                self.total_ticks
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictTask {
    pub id: TaskId,
    pub planet_id: PlanetId,
    pub district: DistrictKind,
    pub ticks_remaining: u32,
    pub total_ticks: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColonizationTask {
    pub id: TaskId,
    pub system_id: SystemId,
    pub template: PlanetTemplate,
    pub ticks_remaining: u32,
    pub total_ticks: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipBuildTask {
    pub id: TaskId,
    pub system_id: SystemId,
    pub design_id: String,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub customization: Option<ShipCustomization>,
    pub ticks_remaining: u32,
    pub total_ticks: u32,
}

countdown_task!(DistrictTask);
countdown_task!(ColonizationTask);
countdown_task!(ShipBuildTask);

/// The player's construction queues
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstructionQueues {
    pub districts: Vec<DistrictTask>,
    pub colonization: Vec<ColonizationTask>,
    pub ships: Vec<ShipBuildTask>,
}

impl ConstructionQueues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_colonization_target(&self, system_id: SystemId) -> bool {
        self.colonization.iter().any(|t| t.system_id == system_id)
    }

    pub fn ship_builds_at(&self, system_id: SystemId) -> usize {
        self.ships.iter().filter(|t| t.system_id == system_id).count()
    }

    pub fn len(&self) -> usize {
        self.districts.len() + self.colonization.len() + self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Remove a queued task from whichever queue holds it, without refund
pub fn cancel_task(session: &Session, task_id: TaskId) -> Result<Session, ConstructionError> {
    let mut next = session.clone();
    let queues = &mut next.construction;
    let removed = remove_task(&mut queues.districts, task_id).is_some()
        || remove_task(&mut queues.colonization, task_id).is_some()
        || remove_task(&mut queues.ships, task_id).is_some();

    if !removed {
        return Err(ConstructionError::UnknownTask(task_id));
    }
    tracing::debug!(task = %task_id, "Construction task cancelled");
    Ok(next)
}
