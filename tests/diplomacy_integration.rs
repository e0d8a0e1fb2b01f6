//! War and peace between the player and AI empires

mod common;

use common::*;
use stellar_dominion::core::types::{EmpireId, SystemId};
use stellar_dominion::diplomacy::{declare_war, propose_peace};
use stellar_dominion::session::history::{NotificationKind, WarEventKind};
use stellar_dominion::{advance, SimConfig};

#[test]
fn test_declare_war_applies_zone_pressure() {
    let config = quiet_config();
    let session = new_session(&config);

    let session = declare_war(&session, &config, VORN).unwrap();
    let vorn = session.empire(VORN).unwrap();
    assert!(vorn.at_war());
    assert_eq!(vorn.opinion, -15.0);

    let last = session.history.war_events.first().unwrap();
    assert_eq!(last.kind, WarEventKind::WarStart);
    assert_eq!(last.empire_id, VORN);

    let zones: Vec<_> = session.diplomacy.zones_of(VORN).collect();
    assert_eq!(zones.len(), config.diplomacy.war_zones.count);
    for zone in zones {
        let system = session.galaxy.system(zone.system_id).unwrap();
        assert_ne!(system.owner_id, Some(PLAYER));
        assert!(system.hostile_power >= config.diplomacy.war_zones.power_min);
        assert!(system.hostile_power <= config.diplomacy.war_zones.power_max);
    }
}

#[test]
fn test_war_raises_ai_fleets_and_intensifies_zones() {
    let config = quiet_config();
    let session = declare_war(&new_session(&config), &config, VORN).unwrap();
    let zone = session.diplomacy.war_zones[0].system_id;
    let before = session.galaxy.system(zone).unwrap().hostile_power;

    let session = advance(&session, 1, &config);

    let raised: Vec<_> = session.fleets.iter().filter(|f| f.owner_id == VORN).collect();
    assert!(!raised.is_empty());
    assert!(raised.iter().all(|f| f.name.starts_with("Vorn Hegemony Warfleet")));

    let after = session.galaxy.system(zone).unwrap().hostile_power;
    // Combat may have hit the zone, otherwise it grew by the intensify step
    if session.history.combat_reports.iter().all(|r| r.system_id != zone) {
        assert_eq!(after, before + config.diplomacy.war_zones.intensify_per_tick);
    }
}

#[test]
fn test_peace_releases_zones() {
    let config = quiet_config();
    let session = declare_war(&new_session(&config), &config, VORN).unwrap();
    let session = propose_peace(&session, &config, VORN).unwrap();

    let vorn = session.empire(VORN).unwrap();
    assert!(!vorn.at_war());
    assert_eq!(vorn.opinion, -5.0);
    assert!(session.diplomacy.war_zones.is_empty());
    assert_eq!(session.history.war_events.last().unwrap().kind, WarEventKind::PeaceSigned);

    // Released zones stop intensifying
    let snapshot: Vec<f64> = session.galaxy.systems.iter().map(|s| s.hostile_power).collect();
    let later = advance(&session, 3, &config);
    let now: Vec<f64> = later.galaxy.systems.iter().map(|s| s.hostile_power).collect();
    assert_eq!(snapshot, now);
}

#[test]
fn test_diplomacy_rejections() {
    let config = quiet_config();
    let session = new_session(&config);

    assert_eq!(declare_war(&session, &config, PLAYER).unwrap_err().code(), "PLAYER_EMPIRE");
    assert_eq!(declare_war(&session, &config, EmpireId(9)).unwrap_err().code(), "UNKNOWN_EMPIRE");
    assert_eq!(propose_peace(&session, &config, VORN).unwrap_err().code(), "NOT_AT_WAR");

    let at_war = declare_war(&session, &config, VORN).unwrap();
    assert_eq!(declare_war(&at_war, &config, VORN).unwrap_err().code(), "ALREADY_AT_WAR");
}

#[test]
fn test_weak_player_provokes_war() {
    let mut config = quiet_config();
    config.diplomacy.check_interval = 5;
    config.diplomacy.opinion_drift = 20.0;
    config.diplomacy.war_threshold = -30.0;
    config.diplomacy.deterrence_power = 1_000_000.0;
    let session = new_session(&config);

    let session = advance(&session, 5, &config);
    assert!(!session.empire(VORN).unwrap().at_war());

    let session = advance(&session, 5, &config);
    assert!(session.empire(VORN).unwrap().at_war());
    assert!(session
        .history
        .war_events
        .iter()
        .any(|e| e.kind == WarEventKind::WarStart && e.tick == 10));
    assert_eq!(session.diplomacy.zones_of(VORN).count(), config.diplomacy.war_zones.count);
}

#[test]
fn test_war_event_history_is_bounded() {
    let mut config = quiet_config();
    config.diplomacy.war_event_limit = 4;
    let mut session = new_session(&config);
    for _ in 0..5 {
        session = declare_war(&session, &config, VORN).unwrap();
        session = propose_peace(&session, &config, VORN).unwrap();
    }
    assert_eq!(session.history.war_events.len(), 4);
}

#[test]
fn test_ai_claims_habitable_system_on_first_pass() {
    let config = SimConfig::default();
    let session = new_session(&config);
    assert_eq!(session.galaxy.system(SystemId(3)).unwrap().owner_id, None);

    let session = advance(&session, 1, &config);

    // System 3 is the only uncontested habitable system
    assert_eq!(session.galaxy.system(SystemId(3)).unwrap().owner_id, Some(VORN));
    assert!(session
        .history
        .notifications
        .iter()
        .any(|n| n.kind == NotificationKind::SystemClaimed && n.tick == 1));
}
