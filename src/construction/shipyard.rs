//! Ship builds at shipyards (tick step 5)

use crate::construction::queue::{advance_queue, QueueAdvance};
use crate::construction::{ConstructionError, ShipBuildTask};
use crate::core::config::SimConfig;
use crate::core::types::{EmpireId, IdAllocator, SystemId};
use crate::military::design::{compose_design, ComposedDesign, ShipCustomization};
use crate::session::fleet::{Fleet, FleetShip};
use crate::session::history::{NotificationKind, PassLog};
use crate::session::Session;

/// Compose the design a build task produces, `None` for an unknown design
pub fn compose_task(task: &ShipBuildTask, config: &SimConfig) -> Option<ComposedDesign> {
    let design = config.design(&task.design_id)?;
    let template = task.template_id.as_deref().and_then(|id| config.template(id));
    Some(compose_design(design, template, task.customization.as_ref()))
}

/// Pay for and queue one ship at a player shipyard
pub fn queue_ship(
    session: &Session,
    config: &SimConfig,
    system_id: SystemId,
    design_id: &str,
    template_id: Option<&str>,
    customization: Option<ShipCustomization>,
) -> Result<Session, ConstructionError> {
    let system = session
        .galaxy
        .system(system_id)
        .ok_or(ConstructionError::UnknownSystem(system_id))?;
    if system.owner_id != Some(session.player_id) {
        return Err(ConstructionError::NotOwned(system_id));
    }
    if !system.shipyard.is_built() {
        return Err(ConstructionError::NoShipyard(system_id));
    }
    let design = config
        .design(design_id)
        .ok_or_else(|| ConstructionError::UnknownDesign(design_id.to_string()))?;
    let template = match template_id {
        Some(id) => Some(
            config
                .template(id)
                .ok_or_else(|| ConstructionError::UnknownDesign(id.to_string()))?,
        ),
        None => None,
    };
    if session.construction.ship_builds_at(system_id) >= config.military.shipyard.queue_size {
        return Err(ConstructionError::QueueFull(system_id));
    }

    let composed = compose_design(design, template, customization.as_ref());
    let mut next = session.clone();
    if !next.ledger.spend(&composed.cost) {
        return Err(ConstructionError::InsufficientResources);
    }
    let id = next.ids.next_task();
    next.construction.ships.push(ShipBuildTask {
        id,
        system_id,
        design_id: design.id.clone(),
        template_id: template.map(|t| t.id.clone()),
        customization,
        ticks_remaining: composed.build_ticks,
        total_ticks: composed.build_ticks,
    });
    Ok(next)
}

/// Count ship builds down and deliver the finished ships
///
/// A finished ship joins the first idle player fleet in its system, or a new
/// placeholder fleet when there is none.
pub fn advance_ship_builds(
    queue: &mut Vec<ShipBuildTask>,
    fleets: &mut Vec<Fleet>,
    ids: &mut IdAllocator,
    config: &SimConfig,
    player_id: EmpireId,
    log: &mut PassLog,
) {
    let QueueAdvance { pending, completed } = advance_queue(std::mem::take(queue));
    *queue = pending;

    for task in completed {
        let Some(composed) = compose_task(&task, config) else {
            tracing::warn!(design = %task.design_id, "Completed ship has unknown design");
            continue;
        };
        let ship = FleetShip::from_composed(&composed);

        let existing = fleets
            .iter()
            .position(|f| f.owner_id == player_id && f.system_id == task.system_id && !f.is_moving());
        let idx = match existing {
            Some(idx) => idx,
            None => {
                let id = ids.next_fleet();
                fleets.push(Fleet::new(id, player_id, format!("Task Force {}", id.0), task.system_id));
                fleets.len() - 1
            }
        };

        let fleet = &mut fleets[idx];
        fleet.ships.push(ship);
        log.notify(
            NotificationKind::ShipCompleted,
            format!("{} joined {}", task.design_id, fleet.name),
        );
    }
}
