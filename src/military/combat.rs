//! Combat against system hostile power (second half of tick step 6)
//!
//! Formula:
//! - outgoing = sum over ships of (design attack + ship bonus)
//! - incoming = max(0, hostile - round(0.5 * sum of design defense))
//! - incoming damage fills ships in roster order, one hull at a time
//! - hostile after = max(0, hostile - outgoing)

use crate::core::config::SimConfig;
use crate::session::fleet::Fleet;
use crate::session::galaxy::Galaxy;
use crate::session::history::{CombatOutcome, CombatReport, NotificationKind, PassLog};

/// Share of fleet defense that absorbs incoming hostile power
const DEFENSE_ABSORPTION: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatResult {
    pub outcome: CombatOutcome,
    pub damage_dealt: f64,
    pub damage_taken: f64,
    pub ships_lost: u32,
    pub hostile_after: f64,
}

/// Damage a roster ship by ship, returns damage actually absorbed
///
/// A ship absorbs at most its remaining hull; destroyed ships are removed.
pub fn apply_damage(fleet: &mut Fleet, damage: f64) -> (f64, u32) {
    let mut remaining = damage.max(0.0);
    for ship in fleet.ships.iter_mut() {
        if remaining <= 0.0 {
            break;
        }
        let absorbed = ship.hull_points.min(remaining);
        ship.hull_points = (ship.hull_points - absorbed).max(0.0);
        remaining -= absorbed;
    }

    let before = fleet.ships.len();
    fleet.ships.retain(|s| !s.is_destroyed());
    let lost = (before - fleet.ships.len()) as u32;
    (damage.max(0.0) - remaining, lost)
}

/// One exchange between a fleet and a system's hostile power
pub fn resolve_combat(fleet: &mut Fleet, hostile_power: f64, config: &SimConfig) -> CombatResult {
    let outgoing = fleet.attack_power(config);
    let absorbed = (DEFENSE_ABSORPTION * fleet.defense_power(config)).round();
    let incoming = (hostile_power - absorbed).max(0.0);

    let (damage_taken, ships_lost) = apply_damage(fleet, incoming);
    let hostile_after = (hostile_power - outgoing).max(0.0);

    let fleet_wiped = fleet.ships.is_empty();
    let hostile_cleared = hostile_after <= 0.0;
    let outcome = match (fleet_wiped, hostile_cleared) {
        (true, true) => CombatOutcome::MutualDestruction,
        (true, false) => CombatOutcome::PlayerDefeat,
        (false, false) => CombatOutcome::Stalemate,
        (false, true) => CombatOutcome::PlayerVictory,
    };

    CombatResult {
        outcome,
        damage_dealt: hostile_power - hostile_after,
        damage_taken,
        ships_lost,
        hostile_after,
    }
}

/// Every stationary fleet with ships fights its system's hostile power
///
/// Fleets fight in ascending id order, so a later fleet meets whatever an
/// earlier one left behind.
pub fn resolve_system_combat(galaxy: &mut Galaxy, fleets: &mut [Fleet], config: &SimConfig, log: &mut PassLog) {
    let mut order: Vec<usize> = (0..fleets.len()).collect();
    order.sort_by_key(|&i| fleets[i].id);

    for idx in order {
        let fleet = &mut fleets[idx];
        if fleet.ships.is_empty() || fleet.is_moving() {
            continue;
        }
        let Some(system) = galaxy.system_mut(fleet.system_id) else {
            continue;
        };
        if !system.is_hostile() {
            continue;
        }

        let hostile_before = system.hostile_power;
        let result = resolve_combat(fleet, hostile_before, config);
        system.hostile_power = result.hostile_after;
        let system_id = system.id;
        let system_name = system.name.clone();

        tracing::debug!(
            fleet = %fleet.id,
            system = %system_id,
            outcome = ?result.outcome,
            dealt = result.damage_dealt,
            taken = result.damage_taken,
            "Combat resolved"
        );

        log.combat_reports.push(CombatReport {
            tick: log.tick,
            system_id,
            fleet_id: fleet.id,
            owner_id: fleet.owner_id,
            outcome: result.outcome,
            damage_dealt: result.damage_dealt,
            damage_taken: result.damage_taken,
            ships_lost: result.ships_lost,
            hostile_before,
            hostile_after: result.hostile_after,
        });

        if result.hostile_after <= 0.0 {
            galaxy.mark_cleared(system_id);
            log.notify(NotificationKind::SystemCleared, format!("{} cleared of hostiles", system_name));
        }
        if fleet.ships.is_empty() {
            log.notify(NotificationKind::FleetDestroyed, format!("{} was destroyed at {}", fleet.name, system_name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{EmpireId, FleetId, SystemId, Vec2};
    use crate::military::design::compose_design;
    use crate::session::fleet::FleetShip;
    use crate::session::galaxy::{StarClass, StarSystem};

    fn corvettes(config: &SimConfig, count: usize) -> Fleet {
        let design = config.design("corvette").unwrap();
        let mut fleet = Fleet::new(FleetId(1), EmpireId(1), "Alpha", SystemId(1));
        fleet.ships = (0..count)
            .map(|_| FleetShip::from_composed(&compose_design(design, None, None)))
            .collect();
        fleet
    }

    #[test]
    fn test_overwhelming_fleet_wins_unharmed() {
        let config = SimConfig::default();
        // 3 corvettes: attack 24, defense 12 -> absorbs 6
        let mut fleet = corvettes(&config, 3);
        let result = resolve_combat(&mut fleet, 5.0, &config);

        assert_eq!(result.outcome, CombatOutcome::PlayerVictory);
        assert_eq!(result.hostile_after, 0.0);
        assert_eq!(result.damage_taken, 0.0);
        assert_eq!(fleet.ships.len(), 3);
    }

    #[test]
    fn test_damage_spills_ship_by_ship() {
        let config = SimConfig::default();
        let mut fleet = corvettes(&config, 3);
        // Hull 30 each: 45 damage destroys one and halves the next
        let (taken, lost) = apply_damage(&mut fleet, 45.0);

        assert_eq!(taken, 45.0);
        assert_eq!(lost, 1);
        assert_eq!(fleet.ships.len(), 2);
        assert_eq!(fleet.ships[0].hull_points, 15.0);
        assert_eq!(fleet.ships[1].hull_points, 30.0);
    }

    #[test]
    fn test_outcome_classification() {
        let config = SimConfig::default();

        // 1 corvette (attack 8, absorbs 2) vs 10: both survive
        let mut fleet = corvettes(&config, 1);
        assert_eq!(resolve_combat(&mut fleet, 10.0, &config).outcome, CombatOutcome::Stalemate);

        // vs 100: 98 incoming wipes the corvette, hostile keeps 92
        let mut fleet = corvettes(&config, 1);
        let result = resolve_combat(&mut fleet, 100.0, &config);
        assert_eq!(result.outcome, CombatOutcome::PlayerDefeat);
        assert!(fleet.ships.is_empty());

        // vs 8: corvette deals 8, takes 6
        let mut fleet = corvettes(&config, 1);
        fleet.ships[0].hull_points = 4.0;
        let result = resolve_combat(&mut fleet, 8.0, &config);
        assert_eq!(result.outcome, CombatOutcome::MutualDestruction);
        assert_eq!(result.damage_taken, 4.0);
    }

    #[test]
    fn test_system_combat_clears_and_reports() {
        let config = SimConfig::default();
        let mut system = StarSystem::new(SystemId(1), "Nest", Vec2::new(0.0, 0.0), StarClass::M);
        system.hostile_power = 10.0;
        let mut galaxy = Galaxy::new(vec![system]);
        let mut fleets = vec![corvettes(&config, 3)];
        let mut log = PassLog::new(4);

        resolve_system_combat(&mut galaxy, &mut fleets, &config, &mut log);

        assert_eq!(galaxy.systems[0].hostile_power, 0.0);
        assert_eq!(galaxy.cleared_hostiles, vec![SystemId(1)]);
        assert_eq!(log.combat_reports.len(), 1);
        assert_eq!(log.combat_reports[0].outcome, CombatOutcome::PlayerVictory);
        assert_eq!(log.combat_reports[0].hostile_before, 10.0);
    }

    #[test]
    fn test_empty_and_moving_fleets_do_not_fight() {
        let config = SimConfig::default();
        let mut system = StarSystem::new(SystemId(1), "Nest", Vec2::new(0.0, 0.0), StarClass::M);
        system.hostile_power = 10.0;
        let mut galaxy = Galaxy::new(vec![system]);
        let empty = Fleet::new(FleetId(2), EmpireId(1), "Empty", SystemId(1));
        let mut leaving = corvettes(&config, 2);
        leaving.order_move(SystemId(5), 3);
        let mut fleets = vec![empty, leaving];
        let mut log = PassLog::new(4);

        resolve_system_combat(&mut galaxy, &mut fleets, &config, &mut log);
        assert!(log.combat_reports.is_empty());
        assert_eq!(galaxy.systems[0].hostile_power, 10.0);
    }
}
