//! War-zone pressure (tick step 8)

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::WarZoneConfig;
use crate::core::types::{EmpireId, SystemId};
use crate::diplomacy::{DiplomacyState, WarZone};
use crate::session::empire::Empire;
use crate::session::galaxy::Galaxy;
use crate::session::history::{PassLog, WarEventKind};

/// Pick `count` non-player systems for a war and boost their hostile power
/// by a random amount within `[power_min, power_max]`
pub fn boost_war_zones(
    galaxy: &mut Galaxy,
    state: &mut DiplomacyState,
    empire_id: EmpireId,
    player_id: EmpireId,
    rng: &mut ChaCha8Rng,
    config: &WarZoneConfig,
    log: &mut PassLog,
) {
    let candidates: Vec<SystemId> = galaxy
        .systems
        .iter()
        .filter(|s| s.owner_id != Some(player_id))
        .filter(|s| !state.zones_of(empire_id).any(|z| z.system_id == s.id))
        .map(|s| s.id)
        .collect();

    let picked: Vec<SystemId> = candidates.choose_multiple(rng, config.count).copied().collect();
    for system_id in picked {
        let power = if config.power_max > config.power_min {
            rng.gen_range(config.power_min..=config.power_max)
        } else {
            config.power_min
        };
        let Some(system) = galaxy.system_mut(system_id) else {
            continue;
        };
        system.add_hostile_power(power);
        state.war_zones.push(WarZone { empire_id, system_id });
        log.war_event(
            empire_id,
            WarEventKind::ZonePressure,
            format!("Hostile activity surges at {} (+{:.1})", system.name, power),
        );
    }
}

/// Drop every war zone tied to an empire
pub fn release_war_zones(state: &mut DiplomacyState, empire_id: EmpireId) {
    state.war_zones.retain(|z| z.empire_id != empire_id);
}

/// Boost zones for wars declared this pass, then intensify every zone of an
/// ongoing war up to the configured ceiling
pub fn apply_war_pressure(
    galaxy: &mut Galaxy,
    state: &mut DiplomacyState,
    empires: &[Empire],
    player_id: EmpireId,
    rng: &mut ChaCha8Rng,
    config: &WarZoneConfig,
    log: &mut PassLog,
) {
    for empire_id in std::mem::take(&mut state.pending_pressure) {
        boost_war_zones(galaxy, state, empire_id, player_id, rng, config, log);
    }

    for zone in &state.war_zones {
        let at_war = empires.iter().any(|e| e.id == zone.empire_id && e.at_war());
        if !at_war {
            continue;
        }
        let Some(system) = galaxy.system_mut(zone.system_id) else {
            continue;
        };
        if system.hostile_power < config.max_zone_power {
            system.hostile_power = (system.hostile_power + config.intensify_per_tick).min(config.max_zone_power);
        }
    }
}
