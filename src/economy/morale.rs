//! Morale - planet stability and happiness
//!
//! stability = clamp(base - crowding - deficit - habitability, min, max)
//! happiness = clamp(stability + specialists * bonus - workers * penalty, min, max)
//!
//! Stability / 100 scales planet production (never upkeep).

use crate::core::config::MoraleConfig;
use crate::economy::ledger::{Resource, ResourceLedger};
use crate::session::planet::Planet;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Morale {
    pub stability: f64,
    pub happiness: f64,
}

impl Morale {
    pub fn production_modifier(&self) -> f64 {
        production_modifier(self.stability)
    }
}

pub fn production_modifier(stability: f64) -> f64 {
    stability / 100.0
}

/// Penalty for population above `size / overcrowding_threshold`
pub fn crowding_penalty(planet: &Planet, config: &MoraleConfig) -> f64 {
    if config.overcrowding_threshold <= 0.0 {
        return 0.0;
    }
    let capacity = planet.size as f64 / config.overcrowding_threshold;
    let excess = (planet.population.total() as f64 - capacity).max(0.0);
    excess * config.crowding_penalty
}

/// Penalty per resource whose stored amount sits below the floor
pub fn deficit_penalty(ledger: &ResourceLedger, config: &MoraleConfig) -> f64 {
    let short = Resource::ALL
        .iter()
        .filter(|r| ledger.amount(**r) < config.deficit_floor)
        .count();
    short as f64 * config.deficit_penalty
}

pub fn habitability_penalty(planet: &Planet, config: &MoraleConfig) -> f64 {
    (1.0 - planet.habitability) * config.habitability_penalty
}

pub fn compute_morale(planet: &Planet, ledger: &ResourceLedger, config: &MoraleConfig) -> Morale {
    let raw = config.base_stability
        - crowding_penalty(planet, config)
        - deficit_penalty(ledger, config)
        - habitability_penalty(planet, config);
    let stability = raw.clamp(config.min, config.max);

    let happiness = (stability
        + planet.population.specialists() as f64 * config.specialist_bonus
        - planet.population.workers() as f64 * config.worker_penalty)
        .clamp(config.min, config.max);

    Morale { stability, happiness }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{PlanetId, SystemId};
    use crate::economy::ledger::ResourceAmounts;
    use crate::session::planet::{PlanetKind, PlanetTemplate, Population};

    fn config() -> MoraleConfig {
        MoraleConfig {
            base_stability: 80.0,
            min: 0.0,
            max: 100.0,
            overcrowding_threshold: 0.5,
            crowding_penalty: 2.0,
            deficit_floor: 10.0,
            deficit_penalty: 5.0,
            habitability_penalty: 20.0,
            specialist_bonus: 1.0,
            worker_penalty: 0.5,
        }
    }

    fn planet(size: u32, habitability: f64, pop: Population) -> Planet {
        let template = PlanetTemplate {
            kind: PlanetKind::Arid,
            size,
            habitability,
            base_production: ResourceAmounts::zero(),
            base_upkeep: ResourceAmounts::zero(),
        };
        Planet::from_template(PlanetId(1), SystemId(1), &template, pop, 50.0)
    }

    fn rich_ledger() -> ResourceLedger {
        ResourceLedger::new(&ResourceAmounts::from_pairs(&[
            (Resource::Energy, 100.0),
            (Resource::Minerals, 100.0),
            (Resource::Food, 100.0),
            (Resource::Research, 100.0),
            (Resource::Influence, 100.0),
        ]))
    }

    #[test]
    fn test_uncrowded_habitable_planet_keeps_base() {
        let p = planet(10, 1.0, Population::new(4, 0, 0));
        let morale = compute_morale(&p, &rich_ledger(), &config());
        assert_eq!(morale.stability, 80.0);
        // 80 - 4 * 0.5
        assert_eq!(morale.happiness, 78.0);
    }

    #[test]
    fn test_crowding_uses_size_over_threshold() {
        // capacity = 5 / 0.5 = 10, population 13 -> 3 over
        let p = planet(5, 1.0, Population::new(13, 0, 0));
        assert_eq!(crowding_penalty(&p, &config()), 6.0);
    }

    #[test]
    fn test_deficits_and_habitability_stack() {
        let p = planet(10, 0.5, Population::new(0, 2, 0));
        // Empty ledger: all five resources below the floor
        let morale = compute_morale(&p, &ResourceLedger::default(), &config());
        // 80 - 25 - 10
        assert_eq!(morale.stability, 45.0);
        assert_eq!(morale.happiness, 47.0);
        assert!((morale.production_modifier() - 0.45).abs() < 1e-9);
    }

    #[test]
    fn test_stability_is_clamped() {
        let mut cfg = config();
        cfg.deficit_penalty = 100.0;
        let p = planet(10, 1.0, Population::new(1, 0, 0));
        let morale = compute_morale(&p, &ResourceLedger::default(), &cfg);
        assert_eq!(morale.stability, 0.0);
        assert_eq!(morale.happiness, 0.0);
    }
}
