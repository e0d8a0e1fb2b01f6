//! Research and traditions fed by the economy pass

mod common;

use common::*;
use stellar_dominion::economy::Resource;
use stellar_dominion::progression::{adopt_tradition, start_research, ResearchBranch, TraditionTree};
use stellar_dominion::session::history::NotificationKind;
use stellar_dominion::{advance, SimConfig};

fn cheap_techs(config: &mut SimConfig, ids: &[&str]) {
    for tech in config.research.techs.iter_mut().filter(|t| ids.contains(&t.id.as_str())) {
        tech.cost = 1.0;
    }
}

#[test]
fn test_research_completes_from_research_income() {
    let mut config = quiet_config();
    cheap_techs(&mut config, &["physics_basics"]);
    let mut session = new_session(&config);
    session.research = start_research(&session.research, &config, ResearchBranch::Physics, "physics_basics").unwrap();

    let session = advance(&session, 1, &config);

    assert!(session.ledger.entry(Resource::Research).income > 0.0);
    assert!(session.research.physics.has_completed("physics_basics"));
    assert!(session.research.physics.current_id.is_none());
    assert!(session
        .history
        .notifications
        .iter()
        .any(|n| n.kind == NotificationKind::ResearchCompleted));
}

#[test]
fn test_slow_research_accumulates() {
    let config = quiet_config();
    let mut session = new_session(&config);
    session.research = start_research(&session.research, &config, ResearchBranch::Society, "xenobiology").unwrap();

    let session = advance(&session, 2, &config);
    let progress = session.research.society.progress;
    assert!(progress > 0.0);
    assert!(progress < 30.0);
    assert_eq!(session.research.society.current_id.as_deref(), Some("xenobiology"));
}

#[test]
fn test_gateways_unlock_next_era() {
    let mut config = quiet_config();
    cheap_techs(&mut config, &["physics_basics", "xenobiology", "industrial_basics"]);
    let mut session = new_session(&config);

    let err = start_research(&session.research, &config, ResearchBranch::Physics, "deflectors").unwrap_err();
    assert_eq!(err.code(), "PREREQ_NOT_MET");

    let mut research = session.research.clone();
    research = start_research(&research, &config, ResearchBranch::Physics, "physics_basics").unwrap();
    research = start_research(&research, &config, ResearchBranch::Society, "xenobiology").unwrap();
    research = start_research(&research, &config, ResearchBranch::Engineering, "industrial_basics").unwrap();
    session.research = research;

    let session = advance(&session, 1, &config);

    // 3 of 5 gateways is the 60% mark
    assert_eq!(session.research.current_era, 2);
    assert!(session.research.unlocked_eras.contains(&2));
    let unlocks = session
        .history
        .notifications
        .iter()
        .filter(|n| n.kind == NotificationKind::EraUnlocked)
        .count();
    assert_eq!(unlocks, 1);
}

#[test]
fn test_exclusive_tech_locks_out_rival() {
    let mut config = quiet_config();
    cheap_techs(&mut config, &["fusion_power"]);
    let mut session = new_session(&config);
    session.research = start_research(&session.research, &config, ResearchBranch::Physics, "fusion_power").unwrap();

    let session = advance(&session, 1, &config);
    assert_eq!(
        session.research.exclusive_picks.get("energy_doctrine").map(String::as_str),
        Some("fusion_power")
    );
    let err = start_research(&session.research, &config, ResearchBranch::Physics, "antimatter_power").unwrap_err();
    assert_eq!(err.code(), "PREREQ_NOT_MET");
}

#[test]
fn test_research_command_rejections() {
    let config = quiet_config();
    let session = new_session(&config);
    let research = &session.research;

    assert_eq!(
        start_research(research, &config, ResearchBranch::Physics, "warp_gates").unwrap_err().code(),
        "INVALID_TECH"
    );
    assert_eq!(
        start_research(research, &config, ResearchBranch::Society, "lasers").unwrap_err().code(),
        "BRANCH_MISMATCH"
    );
    assert_eq!(
        start_research(research, &config, ResearchBranch::Physics, "lasers").unwrap_err().code(),
        "PREREQ_NOT_MET"
    );
}

#[test]
fn test_adopted_perk_boosts_influence_income() {
    let mut config = quiet_config();
    for perk in config.traditions.perks.iter_mut().filter(|p| p.id == "frontier_spirit") {
        perk.cost = 1.0;
    }
    let mut session = new_session(&config);
    session.traditions =
        adopt_tradition(&session.traditions, &config, TraditionTree::Expansion, "frontier_spirit").unwrap();

    let session = advance(&session, 1, &config);
    assert_eq!(session.ledger.entry(Resource::Influence).income, config.economy.influence_modifier);
    assert!(session.traditions.expansion.has_completed("frontier_spirit"));
    assert!(session
        .history
        .notifications
        .iter()
        .any(|n| n.kind == NotificationKind::TraditionAdopted));

    let session = advance(&session, 1, &config);
    assert_eq!(
        session.ledger.entry(Resource::Influence).income,
        config.economy.influence_modifier + 0.5
    );
}

#[test]
fn test_tradition_command_rejections() {
    let config = quiet_config();
    let session = new_session(&config);
    let traditions = &session.traditions;

    assert_eq!(
        adopt_tradition(traditions, &config, TraditionTree::Expansion, "nope").unwrap_err().code(),
        "INVALID_PERK"
    );
    assert_eq!(
        adopt_tradition(traditions, &config, TraditionTree::Expansion, "trade_guilds").unwrap_err().code(),
        "TREE_MISMATCH"
    );
    assert_eq!(
        adopt_tradition(traditions, &config, TraditionTree::Prosperity, "trade_guilds").unwrap_err().code(),
        "PREREQ_NOT_MET"
    );
}
