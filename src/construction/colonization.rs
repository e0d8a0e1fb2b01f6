//! Colonization (tick steps 2 and 3)

use crate::construction::queue::{advance_queue, QueueAdvance};
use crate::construction::{ColonizationTask, ConstructionError};
use crate::core::config::SimConfig;
use crate::core::types::{EmpireId, IdAllocator, SystemId};
use crate::session::galaxy::{Galaxy, Visibility};
use crate::session::history::{NotificationKind, PassLog};
use crate::session::planet::{Planet, Population};
use crate::session::Session;

/// Pay for and queue a colony ship to an uncolonized habitable system
pub fn queue_colonization(
    session: &Session,
    config: &SimConfig,
    system_id: SystemId,
) -> Result<Session, ConstructionError> {
    let system = session
        .galaxy
        .system(system_id)
        .ok_or(ConstructionError::UnknownSystem(system_id))?;
    let template = system
        .habitable_world
        .clone()
        .ok_or(ConstructionError::NotHabitable(system_id))?;

    let taken = system.owner_id.is_some()
        || session.planets.iter().any(|p| p.system_id == system_id)
        || session.construction.is_colonization_target(system_id);
    if taken {
        return Err(ConstructionError::AlreadyColonized(system_id));
    }

    let mut next = session.clone();
    if !next.ledger.spend(&config.colonization.cost) {
        return Err(ConstructionError::InsufficientResources);
    }
    let id = next.ids.next_task();
    next.construction.colonization.push(ColonizationTask {
        id,
        system_id,
        template,
        ticks_remaining: config.colonization.build_ticks,
        total_ticks: config.colonization.build_ticks,
    });
    Ok(next)
}

/// Count colonization tasks down and found the finished colonies
///
/// Returns the systems that gained a colony this tick.
pub fn advance_colonization(
    queue: &mut Vec<ColonizationTask>,
    planets: &mut Vec<Planet>,
    ids: &mut IdAllocator,
    config: &SimConfig,
    log: &mut PassLog,
) -> Vec<SystemId> {
    let QueueAdvance { pending, completed } = advance_queue(std::mem::take(queue));
    *queue = pending;

    let mut colonized = Vec::new();
    for task in completed {
        if planets.iter().any(|p| p.system_id == task.system_id) {
            tracing::debug!(system = %task.system_id, "System already holds a colony");
            continue;
        }
        let planet = Planet::from_template(
            ids.next_planet(),
            task.system_id,
            &task.template,
            Population::workers_only(config.colonization.starting_population),
            config.colonization.starting_stability,
        );
        log.notify(
            NotificationKind::ColonyEstablished,
            format!("Colony {} established at {}", planet.id, task.system_id),
        );
        planets.push(planet);
        colonized.push(task.system_id);
    }
    colonized
}

/// Hand newly colonized systems to the player
pub fn claim_colonized_systems(galaxy: &mut Galaxy, colonized: &[SystemId], player_id: EmpireId) {
    for &system_id in colonized {
        if let Some(system) = galaxy.system_mut(system_id) {
            system.owner_id = Some(player_id);
            system.reveal_to(Visibility::Surveyed);
        }
    }
}
