//! Science ships and survey missions (tick step 11)

use thiserror::Error;

use crate::core::config::SimConfig;
use crate::core::types::{ScienceShipId, SystemId};
use crate::military::movement::estimate_travel;
use crate::session::fleet::{ScienceShip, SurveyMission};
use crate::session::galaxy::{Galaxy, Visibility};
use crate::session::history::{NotificationKind, PassLog};
use crate::session::Session;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExplorationError {
    #[error("Unknown science ship {0}")]
    UnknownShip(ScienceShipId),
    #[error("Unknown system {0}")]
    UnknownSystem(SystemId),
    #[error("System {0} is already surveyed")]
    AlreadySurveyed(SystemId),
    #[error("Science ship {0} is already on a mission")]
    Busy(ScienceShipId),
}

impl ExplorationError {
    pub fn code(&self) -> &'static str {
        match self {
            ExplorationError::UnknownShip(_) => "UNKNOWN_SHIP",
            ExplorationError::UnknownSystem(_) => "UNKNOWN_SYSTEM",
            ExplorationError::AlreadySurveyed(_) => "ALREADY_SURVEYED",
            ExplorationError::Busy(_) => "BUSY",
        }
    }
}

/// Send a science ship to survey a system
///
/// The target is revealed at once; the mission lasts the travel estimate
/// plus the configured survey time.
pub fn order_survey(
    session: &Session,
    config: &SimConfig,
    ship_id: ScienceShipId,
    target: SystemId,
) -> Result<Session, ExplorationError> {
    let ship = session
        .science_ship(ship_id)
        .ok_or(ExplorationError::UnknownShip(ship_id))?;
    let system = session
        .galaxy
        .system(target)
        .ok_or(ExplorationError::UnknownSystem(target))?;
    if system.visibility == Visibility::Surveyed {
        return Err(ExplorationError::AlreadySurveyed(target));
    }
    if ship.mission.is_some() {
        return Err(ExplorationError::Busy(ship_id));
    }
    let travel = estimate_travel(&session.galaxy, ship.system_id, target, &config.military)
        .ok_or(ExplorationError::UnknownSystem(target))?;
    let total_ticks = travel + config.exploration.survey_ticks;

    let mut next = session.clone();
    if let Some(system) = next.galaxy.system_mut(target) {
        system.reveal_to(Visibility::Revealed);
    }
    if let Some(ship) = next.science_ship_mut(ship_id) {
        ship.mission = Some(SurveyMission {
            target_system_id: target,
            ticks_remaining: total_ticks,
            total_ticks,
        });
    }
    tracing::debug!(ship = %ship_id, target = %target, total_ticks, "Survey ordered");
    Ok(next)
}

pub fn advance_exploration(ships: &mut [ScienceShip], galaxy: &mut Galaxy, log: &mut PassLog) {
    for ship in ships.iter_mut() {
        let Some(mission) = ship.mission.as_mut() else {
            continue;
        };
        mission.ticks_remaining = mission.ticks_remaining.saturating_sub(1);
        if mission.ticks_remaining > 0 {
            continue;
        }

        let target = mission.target_system_id;
        ship.mission = None;
        let Some(system) = galaxy.system_mut(target) else {
            tracing::warn!(ship = %ship.id, system = %target, "Survey target vanished");
            continue;
        };
        ship.system_id = target;
        system.reveal_to(Visibility::Surveyed);
        log.notify(
            NotificationKind::SurveyCompleted,
            format!("{} completed the survey of {}", ship.name, system.name),
        );
    }
}
