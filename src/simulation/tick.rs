//! Tick orchestrator - one fixed-order pass over every subsystem
//!
//! The step order is load-bearing:
//! economy netting runs after construction and population rebalancing so a
//! finished district or a promoted specialist pays out in the same tick, and
//! war pressure runs after combat so a fresh war never reaches back into
//! that tick's battles.
//!
//! Missing optional data (an empire without fleets, a task pointing at a
//! vanished planet) is skipped by the subsystem concerned; a pass never fails.

use crate::construction::{
    advance_colonization, advance_districts, advance_ship_builds, advance_shipyard_structures,
    claim_colonized_systems,
};
use crate::core::config::SimConfig;
use crate::diplomacy::{advance_relations, ai_expansion, apply_war_pressure, ensure_ai_fleets, route_ai_fleets};
use crate::economy::{auto_balance, net_economy, Resource};
use crate::events::advance_events;
use crate::exploration::advance_exploration;
use crate::military::{advance_fleet_movement, resolve_system_combat};
use crate::progression::{advance_research, advance_traditions};
use crate::session::history::{NotificationKind, PassLog};
use crate::session::{player_fleet_power, Session};

/// Advance a session by `ticks` passes, returning the new session
///
/// The input is never mutated; zero ticks returns an identical copy.
pub fn advance(session: &Session, ticks: u32, config: &SimConfig) -> Session {
    let mut next = session.clone();
    for _ in 0..ticks {
        run_tick(&mut next, config);
    }
    next
}

/// Run a single tick pass in place
pub fn run_tick(session: &mut Session, config: &SimConfig) {
    session.clock.advance(config.clock.days_per_tick);
    let tick = session.clock.current_tick();
    let span = tracing::debug_span!("tick", tick);
    let _enter = span.enter();

    let mut log = PassLog::new(tick);
    let player_id = session.player_id;

    // 1. AI war fleets
    ensure_ai_fleets(&mut session.fleets, &session.empires, &session.galaxy, &mut session.ids, config);

    // 2. Colonization
    let colonized = advance_colonization(
        &mut session.construction.colonization,
        &mut session.planets,
        &mut session.ids,
        config,
        &mut log,
    );

    // 3. Ownership: new colonies, then AI expansion
    claim_colonized_systems(&mut session.galaxy, &colonized, player_id);
    ai_expansion(
        &mut session.galaxy,
        &session.empires,
        &session.planets,
        &session.construction,
        &mut session.rng,
        config,
        tick,
        &mut log,
    );

    // 4. Districts
    advance_districts(&mut session.construction.districts, &mut session.planets, config, &mut log);

    // 5. Ship builds
    advance_ship_builds(
        &mut session.construction.ships,
        &mut session.fleets,
        &mut session.ids,
        config,
        player_id,
        &mut log,
    );

    // 6. Movement and combat
    let arrived = advance_fleet_movement(&mut session.fleets);
    if !arrived.is_empty() {
        tracing::debug!(count = arrived.len(), "Fleets arrived");
    }
    resolve_system_combat(&mut session.galaxy, &mut session.fleets, config, &mut log);

    // 7. Diplomacy
    let player_power = player_fleet_power(&session.fleets, player_id, config);
    advance_relations(
        &mut session.empires,
        &mut session.diplomacy,
        player_power,
        &config.diplomacy,
        tick,
        &mut log,
    );

    // 8. War pressure
    apply_war_pressure(
        &mut session.galaxy,
        &mut session.diplomacy,
        &session.empires,
        player_id,
        &mut session.rng,
        &config.diplomacy.war_zones,
        &mut log,
    );

    // 9. AI fleet routing
    route_ai_fleets(&mut session.fleets, &session.empires, &session.galaxy, &mut session.rng, config);

    // 10. Shipyard structures
    advance_shipyard_structures(&mut session.galaxy, &mut log);

    // 11. Exploration
    advance_exploration(&mut session.science_ships, &mut session.galaxy, &mut log);

    // 12. Population automation
    let balance = auto_balance(&mut session.planets, &session.ledger, config);
    if balance.promotions + balance.demotions > 0 {
        tracing::debug!(promotions = balance.promotions, demotions = balance.demotions, "Jobs rebalanced");
    }

    // 13. Economy
    let influence_bonus = session.traditions.influence_bonus(config);
    net_economy(&mut session.planets, &mut session.ledger, config, influence_bonus);

    // 14. Research and traditions
    let research_income = session.ledger.entry(Resource::Research).income;
    let outcome = advance_research(&mut session.research, config, research_income);
    for tech_id in &outcome.completed {
        let name = config.tech(tech_id).map_or(tech_id.as_str(), |t| t.name.as_str());
        log.notify(NotificationKind::ResearchCompleted, format!("Research completed: {}", name));
    }
    for era in &outcome.eras_unlocked {
        log.notify(NotificationKind::EraUnlocked, format!("Era {} unlocked", era));
    }

    let influence_income = session.ledger.entry(Resource::Influence).income;
    for perk_id in advance_traditions(&mut session.traditions, config, influence_income) {
        let name = config.perk(&perk_id).map_or(perk_id.as_str(), |p| p.name.as_str());
        log.notify(NotificationKind::TraditionAdopted, format!("Tradition adopted: {}", name));
    }

    // 15. Events
    advance_events(
        &mut session.events,
        &session.galaxy,
        &session.history,
        &mut session.ids,
        &mut session.rng,
        &config.events,
        tick,
        &mut log,
    );

    // 16. History
    session.history.absorb(log, config.diplomacy.war_event_limit);
}
