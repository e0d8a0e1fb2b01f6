//! Diplomacy - the peace/war state machine, war zones and the AI planner
//!
//! War status changes either by command ([`declare_war`], [`propose_peace`])
//! or by the periodic opinion check in [`relations`]. Every war declaration
//! boosts hostile power in a handful of war-zone systems, which then
//! intensify each tick until peace releases them.

pub mod ai;
pub mod relations;
pub mod war_zones;

pub use ai::{ai_expansion, ensure_ai_fleets, route_ai_fleets, AiFleetPlan};
pub use relations::{advance_relations, deterrence};
pub use war_zones::{apply_war_pressure, boost_war_zones, release_war_zones};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::config::SimConfig;
use crate::core::types::{EmpireId, SystemId};
use crate::session::empire::WarStatus;
use crate::session::history::{PassLog, WarEventKind};
use crate::session::Session;

/// Fixed opinion change of an explicit war declaration
pub const DECLARE_WAR_OPINION: f64 = -15.0;
/// Fixed opinion change of an accepted peace proposal
pub const PROPOSE_PEACE_OPINION: f64 = 10.0;

/// A system under hostile pressure because of a war
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarZone {
    pub empire_id: EmpireId,
    pub system_id: SystemId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiplomacyState {
    pub war_zones: Vec<WarZone>,
    /// Empires that declared war this pass, boosted in the pressure step
    pub pending_pressure: Vec<EmpireId>,
}

impl DiplomacyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zones_of(&self, empire_id: EmpireId) -> impl Iterator<Item = &WarZone> {
        self.war_zones.iter().filter(move |z| z.empire_id == empire_id)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiplomacyError {
    #[error("Unknown empire {0}")]
    UnknownEmpire(EmpireId),
    #[error("Empire {0} is the player")]
    PlayerEmpire(EmpireId),
    #[error("Already at war with {0}")]
    AlreadyAtWar(EmpireId),
    #[error("Not at war with {0}")]
    NotAtWar(EmpireId),
}

impl DiplomacyError {
    pub fn code(&self) -> &'static str {
        match self {
            DiplomacyError::UnknownEmpire(_) => "UNKNOWN_EMPIRE",
            DiplomacyError::PlayerEmpire(_) => "PLAYER_EMPIRE",
            DiplomacyError::AlreadyAtWar(_) => "ALREADY_AT_WAR",
            DiplomacyError::NotAtWar(_) => "NOT_AT_WAR",
        }
    }
}

fn validate_target(session: &Session, empire_id: EmpireId) -> Result<WarStatus, DiplomacyError> {
    let empire = session
        .empire(empire_id)
        .ok_or(DiplomacyError::UnknownEmpire(empire_id))?;
    if !empire.is_ai() {
        return Err(DiplomacyError::PlayerEmpire(empire_id));
    }
    Ok(empire.war_status)
}

/// Declare war on an AI empire and apply its war-zone pressure at once
pub fn declare_war(session: &Session, config: &SimConfig, empire_id: EmpireId) -> Result<Session, DiplomacyError> {
    if validate_target(session, empire_id)? == WarStatus::War {
        return Err(DiplomacyError::AlreadyAtWar(empire_id));
    }

    let mut next = session.clone();
    let mut log = PassLog::new(next.clock.current_tick());
    let Some(empire) = next.empire_mut(empire_id) else {
        return Err(DiplomacyError::UnknownEmpire(empire_id));
    };
    empire.opinion += DECLARE_WAR_OPINION;
    empire.war_status = WarStatus::War;
    let name = empire.name.clone();
    log.war_event(empire_id, WarEventKind::WarStart, format!("War declared on {}", name));

    let player_id = next.player_id;
    boost_war_zones(
        &mut next.galaxy,
        &mut next.diplomacy,
        empire_id,
        player_id,
        &mut next.rng,
        &config.diplomacy.war_zones,
        &mut log,
    );
    next.history.absorb(log, config.diplomacy.war_event_limit);

    tracing::info!(empire = %empire_id, "War declared");
    Ok(next)
}

/// Make peace with an AI empire at war; always accepted
pub fn propose_peace(session: &Session, config: &SimConfig, empire_id: EmpireId) -> Result<Session, DiplomacyError> {
    if validate_target(session, empire_id)? == WarStatus::Peace {
        return Err(DiplomacyError::NotAtWar(empire_id));
    }

    let mut next = session.clone();
    let mut log = PassLog::new(next.clock.current_tick());
    let Some(empire) = next.empire_mut(empire_id) else {
        return Err(DiplomacyError::UnknownEmpire(empire_id));
    };
    empire.opinion += PROPOSE_PEACE_OPINION;
    empire.war_status = WarStatus::Peace;
    let name = empire.name.clone();
    log.war_event(empire_id, WarEventKind::PeaceSigned, format!("Peace signed with {}", name));

    release_war_zones(&mut next.diplomacy, empire_id);
    next.history.absorb(log, config.diplomacy.war_event_limit);

    tracing::info!(empire = %empire_id, "Peace signed");
    Ok(next)
}
