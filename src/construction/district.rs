//! District construction (tick step 4)

use crate::construction::queue::{advance_queue, QueueAdvance};
use crate::construction::{ConstructionError, DistrictTask};
use crate::core::config::SimConfig;
use crate::core::types::PlanetId;
use crate::session::history::{NotificationKind, PassLog};
use crate::session::planet::Planet;
use crate::session::Session;

/// Pay for and queue one district on a player planet
pub fn queue_district(
    session: &Session,
    config: &SimConfig,
    planet_id: PlanetId,
    district_id: &str,
) -> Result<Session, ConstructionError> {
    if session.planet(planet_id).is_none() {
        return Err(ConstructionError::UnknownPlanet(planet_id));
    }
    let kind = config
        .district_kind(district_id)
        .ok_or_else(|| ConstructionError::UnknownDistrict(district_id.to_string()))?;
    let definition = config
        .district(kind)
        .ok_or_else(|| ConstructionError::UnknownDistrict(district_id.to_string()))?;

    let mut next = session.clone();
    if !next.ledger.spend(&definition.cost) {
        return Err(ConstructionError::InsufficientResources);
    }
    let id = next.ids.next_task();
    next.construction.districts.push(DistrictTask {
        id,
        planet_id,
        district: kind,
        ticks_remaining: definition.build_ticks,
        total_ticks: definition.build_ticks,
    });
    Ok(next)
}

/// Count district tasks down and build the finished ones
///
/// A finished district whose colonist requirement is no longer met, or whose
/// planet is gone, is removed without effect and without refund.
pub fn advance_districts(
    queue: &mut Vec<DistrictTask>,
    planets: &mut [Planet],
    config: &SimConfig,
    log: &mut PassLog,
) {
    let QueueAdvance { pending, completed } = advance_queue(std::mem::take(queue));
    *queue = pending;

    for task in completed {
        let Some(definition) = config.district(task.district) else {
            tracing::warn!(district = %task.district.0, "Completed district has no definition");
            continue;
        };
        let Some(planet) = planets.iter_mut().find(|p| p.id == task.planet_id) else {
            tracing::debug!(planet = %task.planet_id, "District planet no longer exists");
            continue;
        };
        if let Some(required) = definition.requires_colonists {
            if planet.population.total() < required {
                tracing::debug!(
                    planet = %planet.id,
                    district = %definition.id,
                    required,
                    colonists = planet.population.total(),
                    "District requirement unmet, dropping"
                );
                continue;
            }
        }

        planet.districts.add(task.district, 1);
        log.notify(
            NotificationKind::DistrictCompleted,
            format!("{} completed on {}", definition.name, planet.id),
        );
    }
}
