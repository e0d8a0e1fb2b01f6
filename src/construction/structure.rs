//! Shipyard structures on systems (tick step 10)

use crate::construction::ConstructionError;
use crate::core::config::SimConfig;
use crate::core::types::SystemId;
use crate::session::galaxy::{Galaxy, ShipyardState};
use crate::session::history::{NotificationKind, PassLog};
use crate::session::Session;

/// Pay for and start a shipyard in a player system
pub fn build_shipyard(session: &Session, config: &SimConfig, system_id: SystemId) -> Result<Session, ConstructionError> {
    let system = session
        .galaxy
        .system(system_id)
        .ok_or(ConstructionError::UnknownSystem(system_id))?;
    if system.owner_id != Some(session.player_id) {
        return Err(ConstructionError::NotOwned(system_id));
    }
    if system.shipyard != ShipyardState::None {
        return Err(ConstructionError::ShipyardExists(system_id));
    }

    let mut next = session.clone();
    if !next.ledger.spend(&config.military.shipyard.build_cost) {
        return Err(ConstructionError::InsufficientResources);
    }
    let ticks = config.military.shipyard.build_ticks;
    if let Some(system) = next.galaxy.system_mut(system_id) {
        system.shipyard = ShipyardState::UnderConstruction {
            ticks_remaining: ticks,
            total_ticks: ticks,
        };
    }
    Ok(next)
}

/// Count every shipyard under construction down by one tick
pub fn advance_shipyard_structures(galaxy: &mut Galaxy, log: &mut PassLog) {
    for system in &mut galaxy.systems {
        let ShipyardState::UnderConstruction { ticks_remaining, .. } = &mut system.shipyard else {
            continue;
        };
        *ticks_remaining = ticks_remaining.saturating_sub(1);
        if *ticks_remaining == 0 {
            system.shipyard = ShipyardState::Built;
            log.notify(
                NotificationKind::ShipyardCompleted,
                format!("Shipyard completed at {}", system.name),
            );
        }
    }
}
