//! AI planner - war fleets, fleet routing and expansion
//!
//! Fleet sizing scales with the number of hostile systems (hc) and total
//! galaxy threat:
//! - fleets: 1, 2 from 4 hostile systems, 3 from 8
//! - ships per fleet: min(max, base + hc * per_hostile + threat / threat_per_ship)
//! - attack bonus: min(max, base + hc * per_hostile + threat * per_threat)

use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::construction::ConstructionQueues;
use crate::core::config::{AiFleetConfig, SimConfig};
use crate::core::types::{IdAllocator, SystemId, Tick};
use crate::military::design::compose_design;
use crate::military::movement::travel_ticks;
use crate::session::empire::Empire;
use crate::session::fleet::{Fleet, FleetShip};
use crate::session::galaxy::{Galaxy, StarSystem};
use crate::session::history::{NotificationKind, PassLog};
use crate::session::planet::Planet;

/// Threat above this multiple of own power sends a fleet home
const RETREAT_RATIO: f64 = 1.25;
/// Highest target threat a fleet engages, as a multiple of own power
const ENGAGE_RATIO: f64 = 1.6;

/// Desired AI war-fleet strength for the current galaxy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiFleetPlan {
    pub fleets: usize,
    pub ships_per_fleet: u32,
    pub attack_bonus: f64,
}

impl AiFleetPlan {
    pub fn for_galaxy(galaxy: &Galaxy, config: &AiFleetConfig) -> Self {
        let hostile_count = galaxy.hostile_systems().count();
        let threat = galaxy.total_threat();
        let hc = hostile_count as f64;

        let fleets = match hostile_count {
            0..=3 => 1,
            4..=7 => 2,
            _ => 3,
        };
        let threat_ships = if config.threat_per_ship > 0.0 {
            threat / config.threat_per_ship
        } else {
            0.0
        };
        let ships = (config.base_ships + hc * config.ships_per_hostile + threat_ships).floor();
        let ships_per_fleet = (ships.max(1.0) as u32).min(config.max_ships);
        let attack_bonus = (config.base_attack_bonus + hc * config.bonus_per_hostile + threat * config.bonus_per_threat)
            .min(config.max_attack_bonus)
            .max(0.0);

        Self {
            fleets,
            ships_per_fleet,
            attack_bonus,
        }
    }
}

/// Spawn and reinforce war fleets for every AI empire at war (tick step 1)
///
/// New fleets appear empty at the empire's home system; every understrength
/// fleet then gains up to `reinforce_per_tick` ships.
pub fn ensure_ai_fleets(
    fleets: &mut Vec<Fleet>,
    empires: &[Empire],
    galaxy: &Galaxy,
    ids: &mut IdAllocator,
    config: &SimConfig,
) {
    let ai_config = &config.diplomacy.ai_fleet;
    let Some(design) = config.design(&ai_config.design_id) else {
        return;
    };
    let plan = AiFleetPlan::for_galaxy(galaxy, ai_config);
    let mut ship = FleetShip::from_composed(&compose_design(design, None, None));
    ship.attack_bonus = (plan.attack_bonus > 0.0).then_some(plan.attack_bonus);

    for empire in empires.iter().filter(|e| e.is_ai() && e.at_war()) {
        let Some(home) = empire.home_system_id else {
            continue;
        };

        let mut owned = fleets.iter().filter(|f| f.owner_id == empire.id).count();
        while owned < plan.fleets {
            let id = ids.next_fleet();
            owned += 1;
            let mut fleet = Fleet::new(id, empire.id, format!("{} Warfleet {}", empire.name, owned), home);
            fleet.anchor_system_id = Some(home);
            fleets.push(fleet);
            tracing::debug!(empire = %empire.id, fleet = %id, "AI war fleet raised");
        }

        for fleet in fleets.iter_mut().filter(|f| f.owner_id == empire.id) {
            let missing = plan.ships_per_fleet.saturating_sub(fleet.ships.len() as u32);
            let added = missing.min(ai_config.reinforce_per_tick);
            fleet.ships.extend(std::iter::repeat(ship.clone()).take(added as usize));
        }
    }
}

/// Pick where an idle AI fleet should go next
///
/// Retreats home when the current system is too strong, otherwise prefers the
/// strongest beatable hostile system, then the weakest hostile system, then a
/// random unclaimed peaceful one. The current system and the previous target
/// are never picked.
pub fn choose_ai_target(
    fleet: &Fleet,
    home: Option<SystemId>,
    galaxy: &Galaxy,
    config: &SimConfig,
    rng: &mut ChaCha8Rng,
) -> Option<SystemId> {
    let own = fleet.attack_power(config);
    let current_threat = galaxy.system(fleet.system_id).map_or(0.0, |s| s.hostile_power);

    if current_threat > RETREAT_RATIO * own {
        return home.filter(|h| *h != fleet.system_id);
    }

    let eligible = |s: &&StarSystem| s.id != fleet.system_id && Some(s.id) != fleet.last_target_id;

    let beatable = galaxy
        .hostile_systems()
        .filter(eligible)
        .filter(|s| s.hostile_power <= ENGAGE_RATIO * own)
        .max_by_key(|s| (OrderedFloat(s.hostile_power), Reverse(s.id)));
    if let Some(target) = beatable {
        return Some(target.id);
    }

    let weakest = galaxy
        .hostile_systems()
        .filter(eligible)
        .min_by_key(|s| (OrderedFloat(s.hostile_power), s.id));
    if let Some(target) = weakest {
        return Some(target.id);
    }

    let peaceful: Vec<SystemId> = galaxy
        .systems
        .iter()
        .filter(eligible)
        .filter(|s| s.owner_id.is_none() && !s.is_hostile())
        .map(|s| s.id)
        .collect();
    peaceful.choose(rng).copied()
}

/// Each AI empire at war orders its first idle fleet (tick step 9)
pub fn route_ai_fleets(
    fleets: &mut [Fleet],
    empires: &[Empire],
    galaxy: &Galaxy,
    rng: &mut ChaCha8Rng,
    config: &SimConfig,
) {
    for empire in empires.iter().filter(|e| e.is_ai() && e.at_war()) {
        let idle = fleets
            .iter()
            .enumerate()
            .filter(|(_, f)| f.owner_id == empire.id && !f.is_moving() && !f.ships.is_empty())
            .min_by_key(|(_, f)| f.id)
            .map(|(idx, _)| idx);
        let Some(idx) = idle else {
            continue;
        };

        let fleet = &mut fleets[idx];
        let Some(target) = choose_ai_target(fleet, empire.home_system_id, galaxy, config, rng) else {
            continue;
        };
        let (Some(from), Some(to)) = (galaxy.system(fleet.system_id), galaxy.system(target)) else {
            continue;
        };
        let ticks = travel_ticks(from, to, &config.military);
        fleet.order_move(target, ticks);
        tracing::debug!(empire = %empire.id, fleet = %fleet.id, target = %target, ticks, "AI fleet ordered");
    }
}

/// One AI empire claims an uncontested habitable system (tick step 3)
///
/// With the default interval of 1 this claims on every pass; the claiming
/// empire rotates through the AI empires in order.
#[allow(clippy::too_many_arguments)]
pub fn ai_expansion(
    galaxy: &mut Galaxy,
    empires: &[Empire],
    planets: &[Planet],
    construction: &ConstructionQueues,
    rng: &mut ChaCha8Rng,
    config: &SimConfig,
    tick: Tick,
    log: &mut PassLog,
) {
    let interval = config.diplomacy.ai_expansion_interval;
    if interval == 0 || tick % interval != 0 {
        return;
    }
    let ai: Vec<&Empire> = empires.iter().filter(|e| e.is_ai()).collect();
    if ai.is_empty() {
        return;
    }
    let claimant = ai[((tick / interval) % ai.len() as u64) as usize];

    let candidates: Vec<SystemId> = galaxy
        .systems
        .iter()
        .filter(|s| s.owner_id.is_none() && s.habitable_world.is_some() && !s.is_hostile())
        .filter(|s| !planets.iter().any(|p| p.system_id == s.id))
        .filter(|s| !construction.is_colonization_target(s.id))
        .map(|s| s.id)
        .collect();
    let Some(&target) = candidates.choose(rng) else {
        return;
    };

    if let Some(system) = galaxy.system_mut(target) {
        system.owner_id = Some(claimant.id);
        log.notify(
            NotificationKind::SystemClaimed,
            format!("{} claimed {}", claimant.name, system.name),
        );
        tracing::debug!(empire = %claimant.id, system = %target, "AI expansion");
    }
}
