//! Event spawning through the tick engine and player resolution

mod common;

use common::*;
use stellar_dominion::core::types::{EventInstanceId, SystemId};
use stellar_dominion::economy::Resource;
use stellar_dominion::events::{resolve_event, EventKind, GameEvent};
use stellar_dominion::session::history::NotificationKind;
use stellar_dominion::session::Session;
use stellar_dominion::{advance, SimConfig};

fn with_event(mut session: Session, config: &SimConfig, kind: EventKind, template: &str, target: Option<u32>) -> Session {
    let template = config
        .events
        .catalog(kind)
        .iter()
        .find(|t| t.id == template)
        .unwrap();
    let event = GameEvent::from_template(EventInstanceId(40), kind, template, target.map(SystemId), 0);
    session.events.active = Some(event);
    session
}

#[test]
fn test_narrative_event_starts_on_schedule() {
    let config = SimConfig::default();
    let session = advance(&new_session(&config), 14, &config);
    assert!(session.events.active.is_none());

    let session = advance(&session, 1, &config);
    let active = session.events.active.as_ref().unwrap();
    assert_eq!(active.kind, EventKind::Narrative);
    assert_eq!(active.spawned_at, 15);
    assert!(session
        .history
        .notifications
        .iter()
        .any(|n| n.kind == NotificationKind::EventStarted && n.tick == 15));
}

#[test]
fn test_second_event_waits_in_queue() {
    let config = SimConfig::default();
    let session = advance(&new_session(&config), 20, &config);

    assert_eq!(session.events.active.as_ref().unwrap().kind, EventKind::Narrative);
    assert_eq!(session.events.queue.len(), 1);
    let queued = &session.events.queue[0];
    assert_eq!(queued.kind, EventKind::Anomaly);
    assert!(queued.target_system_id.is_some());
}

#[test]
fn test_resolving_applies_effects_and_frees_slot() {
    let config = quiet_config();
    let session = with_event(new_session(&config), &config, EventKind::Anomaly, "derelict_station", Some(1));
    let minerals = session.ledger.amount(Resource::Minerals);

    let session = resolve_event(&session, &config, EventInstanceId(40), 0).unwrap();

    assert_eq!(session.ledger.amount(Resource::Minerals), minerals + 60.0);
    assert!(session.events.active.is_none());
    assert_eq!(
        session.history.notifications.last().unwrap().kind,
        NotificationKind::EventResolved
    );
}

#[test]
fn test_hostile_spawn_lands_on_event_system() {
    let config = quiet_config();
    let session = with_event(new_session(&config), &config, EventKind::Anomaly, "dormant_drones", Some(2));

    let session = resolve_event(&session, &config, EventInstanceId(40), 1).unwrap();
    assert_eq!(session.galaxy.system(SystemId(2)).unwrap().hostile_power, 12.0);
}

#[test]
fn test_stability_effect_is_clamped() {
    let config = quiet_config();
    let mut session = with_event(new_session(&config), &config, EventKind::Crisis, "void_swarm", Some(1));
    session.planets[0].stability = 10.0;

    let session = resolve_event(&session, &config, EventInstanceId(40), 1).unwrap();
    assert_eq!(session.planets[0].stability, config.morale.min);
}

#[test]
fn test_stability_shift_lasts_until_next_netting() {
    let config = quiet_config();
    let session = with_event(new_session(&config), &config, EventKind::Crisis, "void_swarm", Some(1));
    let untouched = advance(&session, 1, &config);

    let resolved = resolve_event(&session, &config, EventInstanceId(40), 1).unwrap();
    let expected = (session.planets[0].stability - 15.0).clamp(config.morale.min, config.morale.max);
    assert_eq!(resolved.planets[0].stability, expected);

    // Morale is recomputed from crowding, deficits and habitability
    let later = advance(&resolved, 1, &config);
    assert_eq!(later.planets[0].stability, untouched.planets[0].stability);
    assert_eq!(
        later.ledger.entry(Resource::Energy).income,
        untouched.ledger.entry(Resource::Energy).income
    );
}

#[test]
fn test_queued_event_promoted_after_resolution() {
    let config = SimConfig::default();
    let session = advance(&new_session(&config), 20, &config);
    let active = session.events.active.as_ref().unwrap().id;
    let queued = session.events.queue[0].id;

    let session = resolve_event(&session, &config, active, 0).unwrap();
    let session = advance(&session, 1, &config);
    assert_eq!(session.events.active.as_ref().unwrap().id, queued);
    assert!(session.events.queue.is_empty());
}

#[test]
fn test_resolution_rejections() {
    let config = quiet_config();
    let session = new_session(&config);
    assert_eq!(
        resolve_event(&session, &config, EventInstanceId(1), 0).unwrap_err().code(),
        "NO_ACTIVE_EVENT"
    );

    let session = with_event(session, &config, EventKind::Narrative, "founding_festival", None);
    assert_eq!(
        resolve_event(&session, &config, EventInstanceId(2), 0).unwrap_err().code(),
        "EVENT_MISMATCH"
    );
    assert_eq!(
        resolve_event(&session, &config, EventInstanceId(40), 7).unwrap_err().code(),
        "INVALID_OPTION"
    );
}
