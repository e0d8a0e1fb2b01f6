//! Opinion drift and threshold wars (tick step 7)
//!
//! Every `check_interval` ticks each AI empire re-evaluates the player:
//! - deterrence = min(1, player fleet power / deterrence_power)
//! - at peace: opinion += drift * (2 * deterrence - 1), war at or below war_threshold
//! - at war: opinion += drift, peace at or above peace_threshold

use crate::core::config::DiplomacyConfig;
use crate::core::types::Tick;
use crate::diplomacy::{release_war_zones, DiplomacyState};
use crate::session::empire::{Empire, WarStatus};
use crate::session::history::{PassLog, WarEventKind};

/// How strongly the player's fleets deter AI aggression, 0.0 to 1.0
pub fn deterrence(player_power: f64, config: &DiplomacyConfig) -> f64 {
    if config.deterrence_power <= 0.0 {
        return 1.0;
    }
    (player_power / config.deterrence_power).clamp(0.0, 1.0)
}

pub fn advance_relations(
    empires: &mut [Empire],
    state: &mut DiplomacyState,
    player_power: f64,
    config: &DiplomacyConfig,
    tick: Tick,
    log: &mut PassLog,
) {
    if config.check_interval == 0 || tick % config.check_interval != 0 {
        return;
    }
    let deterrence = deterrence(player_power, config);

    for empire in empires.iter_mut().filter(|e| e.is_ai()) {
        match empire.war_status {
            WarStatus::Peace => {
                empire.opinion += config.opinion_drift * (2.0 * deterrence - 1.0);
                if empire.opinion <= config.war_threshold {
                    empire.war_status = WarStatus::War;
                    state.pending_pressure.push(empire.id);
                    log.war_event(empire.id, WarEventKind::WarStart, format!("{} declares war", empire.name));
                    tracing::info!(empire = %empire.id, opinion = empire.opinion, "AI empire declared war");
                }
            }
            WarStatus::War => {
                empire.opinion += config.opinion_drift;
                if empire.opinion >= config.peace_threshold {
                    empire.war_status = WarStatus::Peace;
                    release_war_zones(state, empire.id);
                    log.war_event(empire.id, WarEventKind::PeaceSigned, format!("{} agrees to peace", empire.name));
                    tracing::info!(empire = %empire.id, opinion = empire.opinion, "AI empire made peace");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{EmpireId, SystemId};
    use crate::diplomacy::WarZone;

    fn config() -> DiplomacyConfig {
        DiplomacyConfig {
            check_interval: 5,
            opinion_drift: 4.0,
            war_threshold: -10.0,
            peace_threshold: 10.0,
            deterrence_power: 100.0,
            ..DiplomacyConfig::default()
        }
    }

    #[test]
    fn test_deterrence_saturates() {
        let config = config();
        assert_eq!(deterrence(0.0, &config), 0.0);
        assert_eq!(deterrence(50.0, &config), 0.5);
        assert_eq!(deterrence(400.0, &config), 1.0);
    }

    #[test]
    fn test_weak_player_drives_ai_to_war() {
        let config = config();
        let mut empires = vec![Empire::player(EmpireId(1), "Terra", SystemId(1)), Empire::ai(EmpireId(2), "Vorn", None)];
        empires[1].opinion = -8.0;
        let mut state = DiplomacyState::new();
        let mut log = PassLog::new(5);

        advance_relations(&mut empires, &mut state, 0.0, &config, 5, &mut log);

        assert_eq!(empires[1].opinion, -12.0);
        assert!(empires[1].at_war());
        assert_eq!(state.pending_pressure, vec![EmpireId(2)]);
        assert_eq!(log.war_events[0].kind, WarEventKind::WarStart);
        // Player opinion untouched
        assert_eq!(empires[0].opinion, 0.0);
    }

    #[test]
    fn test_off_interval_is_inert() {
        let config = config();
        let mut empires = vec![Empire::ai(EmpireId(2), "Vorn", None)];
        let mut state = DiplomacyState::new();
        let mut log = PassLog::new(6);
        advance_relations(&mut empires, &mut state, 0.0, &config, 6, &mut log);
        assert_eq!(empires[0].opinion, 0.0);
    }

    #[test]
    fn test_war_drifts_to_peace_and_releases_zones() {
        let config = config();
        let mut enemy = Empire::ai(EmpireId(2), "Vorn", None);
        enemy.war_status = WarStatus::War;
        enemy.opinion = 7.0;
        let mut empires = vec![enemy];
        let mut state = DiplomacyState::new();
        state.war_zones.push(WarZone { empire_id: EmpireId(2), system_id: SystemId(4) });
        let mut log = PassLog::new(10);

        advance_relations(&mut empires, &mut state, 0.0, &config, 10, &mut log);

        assert!(!empires[0].at_war());
        assert!(state.war_zones.is_empty());
        assert_eq!(log.war_events[0].kind, WarEventKind::PeaceSigned);
    }
}
