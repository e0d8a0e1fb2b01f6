//! Fleet travel (first half of tick step 6) and move orders

use crate::core::config::{MilitaryConfig, SimConfig};
use crate::core::types::{FleetId, SystemId};
use crate::military::FleetOrderError;
use crate::session::fleet::Fleet;
use crate::session::galaxy::{Galaxy, StarSystem};
use crate::session::Session;

/// Ticks to travel between two systems
///
/// Zero for the same system, otherwise `round(distance / scale + base)`
/// floored at one tick.
pub fn travel_ticks(from: &StarSystem, to: &StarSystem, config: &MilitaryConfig) -> u32 {
    if from.id == to.id {
        return 0;
    }
    let distance = from.position.distance(&to.position);
    let estimate = (distance / config.travel_distance_scale + config.base_travel_ticks).round();
    estimate.max(1.0) as u32
}

/// Travel estimate by id, `None` if either system is unknown
pub fn estimate_travel(galaxy: &Galaxy, from: SystemId, to: SystemId, config: &MilitaryConfig) -> Option<u32> {
    let from = galaxy.system(from)?;
    let to = galaxy.system(to)?;
    Some(travel_ticks(from, to, config))
}

/// Move every travelling fleet one tick closer to its target
///
/// Returns the fleets that arrived this tick.
pub fn advance_fleet_movement(fleets: &mut [Fleet]) -> Vec<FleetId> {
    let mut arrived = Vec::new();
    for fleet in fleets.iter_mut() {
        let Some(target) = fleet.target_system_id else {
            continue;
        };
        fleet.ticks_to_arrival = fleet.ticks_to_arrival.saturating_sub(1);
        if fleet.ticks_to_arrival == 0 {
            fleet.system_id = target;
            fleet.target_system_id = None;
            arrived.push(fleet.id);
        }
    }
    arrived
}

/// Order a player fleet to another system
pub fn order_fleet_move(
    session: &Session,
    config: &SimConfig,
    fleet_id: FleetId,
    target: SystemId,
) -> Result<Session, FleetOrderError> {
    let fleet = session.fleet(fleet_id).ok_or(FleetOrderError::UnknownFleet(fleet_id))?;
    if fleet.owner_id != session.player_id {
        return Err(FleetOrderError::NotOwned(fleet_id));
    }
    if fleet.ships.is_empty() {
        return Err(FleetOrderError::EmptyFleet(fleet_id));
    }
    let ticks = estimate_travel(&session.galaxy, fleet.system_id, target, &config.military)
        .ok_or(FleetOrderError::UnknownSystem(target))?;

    let mut next = session.clone();
    if let Some(fleet) = next.fleet_mut(fleet_id) {
        fleet.order_move(target, ticks);
    }
    tracing::debug!(fleet = %fleet_id, target = %target, ticks, "Fleet ordered to move");
    Ok(next)
}
