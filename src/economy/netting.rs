//! Economy netting - folds every planet's output into the ledger once per tick

use crate::core::config::SimConfig;
use crate::economy::ledger::{Resource, ResourceAmounts, ResourceLedger};
use crate::economy::morale::compute_morale;
use crate::economy::production::summarize_planet;
use crate::session::planet::Planet;

/// Empire-wide flows computed by one netting pass
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EconomyTotals {
    pub income: ResourceAmounts,
    pub upkeep: ResourceAmounts,
}

impl EconomyTotals {
    pub fn net(&self) -> ResourceAmounts {
        self.income - self.upkeep
    }
}

/// Refresh planet morale, sum modified production and raw upkeep, and write
/// the clamped result into the ledger
///
/// `influence_bonus` stacks on top of the configured flat influence modifier.
pub fn net_economy(
    planets: &mut [Planet],
    ledger: &mut ResourceLedger,
    config: &SimConfig,
    influence_bonus: f64,
) -> EconomyTotals {
    let mut totals = EconomyTotals::default();

    for planet in planets.iter_mut() {
        // Deficit penalties read the ledger as it stood before this pass
        let morale = compute_morale(planet, ledger, &config.morale);
        planet.stability = morale.stability;
        planet.happiness = morale.happiness;

        let summary = summarize_planet(planet, config);
        totals.income += summary.production * morale.production_modifier();
        totals.upkeep += summary.upkeep;
    }

    totals.income.influence += config.economy.influence_modifier + influence_bonus;

    let net = totals.net();
    for resource in Resource::ALL {
        ledger.credit(resource, net.get(resource));
        ledger.record_flows(resource, totals.income.get(resource), totals.upkeep.get(resource));
    }

    totals
}
