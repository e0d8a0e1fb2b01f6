//! Event spawning (tick step 15)

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::EventConfig;
use crate::core::types::{IdAllocator, SystemId, Tick};
use crate::events::{EventKind, EventState, GameEvent};
use crate::session::galaxy::{Galaxy, Visibility};
use crate::session::history::{HistoryLog, NotificationKind, PassLog};

/// No new event while one started this recently
pub const RECENT_EVENT_WINDOW: u64 = 4;
/// Chance a spawn is skipped while any war event is on record
pub const WAR_SUPPRESSION_CHANCE: f64 = 0.2;

const NARRATIVE_MIN_TICK: Tick = 10;
const ANOMALY_MIN_TICK: Tick = 15;
const CRISIS_MIN_TICK: Tick = 40;

/// Promote a queued event if the slot is free, otherwise try to spawn one
#[allow(clippy::too_many_arguments)]
pub fn advance_events(
    events: &mut EventState,
    galaxy: &Galaxy,
    history: &HistoryLog,
    ids: &mut IdAllocator,
    rng: &mut ChaCha8Rng,
    config: &EventConfig,
    tick: Tick,
    log: &mut PassLog,
) {
    if events.active.is_none() && !events.queue.is_empty() {
        let next = events.queue.remove(0);
        log.notify(NotificationKind::EventStarted, next.title.clone());
        events.active = Some(next);
        return;
    }

    if history.event_started_within(tick, RECENT_EVENT_WINDOW) {
        return;
    }
    let war_on_record = !history.war_events.is_empty() || !log.war_events.is_empty();
    if war_on_record && rng.gen_bool(WAR_SUPPRESSION_CHANCE) {
        tracing::debug!(tick, "Event spawn suppressed by war");
        return;
    }

    let Some(kind) = eligible_kind(tick, config) else {
        return;
    };

    let target = match kind {
        EventKind::Narrative => None,
        EventKind::Anomaly | EventKind::Crisis => match pick_target(galaxy, kind, rng) {
            Some(id) => Some(id),
            None => {
                tracing::debug!(?kind, tick, "No eligible system for event");
                return;
            }
        },
    };

    let Some(template) = config.catalog(kind).choose(rng) else {
        return;
    };
    let event = GameEvent::from_template(ids.next_event(), kind, template, target, tick);

    if events.active.is_none() {
        log.notify(NotificationKind::EventStarted, event.title.clone());
        events.active = Some(event);
    } else if events.queue.len() < config.max_queued {
        events.queue.push(event);
    } else {
        tracing::debug!(template = %template.id, "Event queue full, dropping spawn");
    }
}

/// Crisis wins over anomaly, anomaly over narrative
fn eligible_kind(tick: Tick, config: &EventConfig) -> Option<EventKind> {
    let on_interval = |interval: u64| interval > 0 && tick % interval == 0;

    if tick > CRISIS_MIN_TICK && on_interval(config.crisis_interval) {
        Some(EventKind::Crisis)
    } else if tick > ANOMALY_MIN_TICK && on_interval(config.anomaly_interval) {
        Some(EventKind::Anomaly)
    } else if tick > NARRATIVE_MIN_TICK && on_interval(config.narrative_interval) {
        Some(EventKind::Narrative)
    } else {
        None
    }
}

fn pick_target(galaxy: &Galaxy, kind: EventKind, rng: &mut ChaCha8Rng) -> Option<SystemId> {
    let candidates: Vec<SystemId> = galaxy
        .systems
        .iter()
        .filter(|s| s.visibility == Visibility::Surveyed)
        .filter(|s| kind == EventKind::Crisis || !s.is_hostile())
        .map(|s| s.id)
        .collect();
    candidates.choose(rng).copied()
}
