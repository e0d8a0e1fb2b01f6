//! Event resolution - applies the chosen option's effects to the session

use thiserror::Error;

use crate::core::config::SimConfig;
use crate::core::types::{EventInstanceId, SystemId};
use crate::economy::Resource;
use crate::events::EventEffect;
use crate::session::history::{NotificationKind, PassLog};
use crate::session::Session;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("No event is awaiting a decision")]
    NoActiveEvent,
    #[error("Event {0} is not the active event")]
    EventMismatch(EventInstanceId),
    #[error("Option {0} does not exist")]
    InvalidOption(usize),
}

impl EventError {
    pub fn code(&self) -> &'static str {
        match self {
            EventError::NoActiveEvent => "NO_ACTIVE_EVENT",
            EventError::EventMismatch(_) => "EVENT_MISMATCH",
            EventError::InvalidOption(_) => "INVALID_OPTION",
        }
    }
}

/// Resolve the active event with the option at `option_index`
pub fn resolve_event(
    session: &Session,
    config: &SimConfig,
    event_id: EventInstanceId,
    option_index: usize,
) -> Result<Session, EventError> {
    let active = session.events.active.as_ref().ok_or(EventError::NoActiveEvent)?;
    if active.id != event_id {
        return Err(EventError::EventMismatch(event_id));
    }
    let option = active
        .options
        .get(option_index)
        .ok_or(EventError::InvalidOption(option_index))?;

    let mut next = session.clone();
    for effect in &option.effects {
        apply_effect(&mut next, config, effect, active.target_system_id);
    }
    next.events.active = None;

    let mut log = PassLog::new(next.clock.current_tick());
    log.notify(
        NotificationKind::EventResolved,
        format!("{}: {}", active.title, option.label),
    );
    next.history.absorb(log, config.diplomacy.war_event_limit);

    tracing::debug!(event = %event_id, option = option_index, "Event resolved");
    Ok(next)
}

/// Apply one effect, `event_target` is the resolving event's own system
pub fn apply_effect(
    session: &mut Session,
    config: &SimConfig,
    effect: &EventEffect,
    event_target: Option<SystemId>,
) {
    match effect {
        EventEffect::Resource { resource, amount } => session.ledger.credit(*resource, *amount),
        EventEffect::Influence { amount } => session.ledger.credit(Resource::Influence, *amount),
        EventEffect::Stability { amount } => {
            // One-off shift: the next netting pass recomputes stability from morale
            let (min, max) = (config.morale.min, config.morale.max);
            for planet in &mut session.planets {
                planet.stability = (planet.stability + amount).clamp(min, max);
            }
        }
        EventEffect::SpawnHostiles { system_id, power } => {
            let target = system_id.or(event_target);
            match target.and_then(|id| session.galaxy.system_mut(id)) {
                Some(system) => system.add_hostile_power(*power),
                None => tracing::debug!(?target, "Hostile spawn has no valid system"),
            }
        }
        EventEffect::Insight { note } => {
            tracing::debug!(note = %note, "Insight effect has no resolved behavior");
        }
        EventEffect::Nothing => {}
    }
}
