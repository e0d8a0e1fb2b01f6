//! Economy layer - resource ledger, planet production, morale and population jobs

pub mod ledger;
pub mod morale;
pub mod netting;
pub mod population;
pub mod production;

pub use ledger::{LedgerEntry, Resource, ResourceAmounts, ResourceLedger};
pub use morale::{compute_morale, Morale};
pub use netting::{net_economy, EconomyTotals};
pub use population::{auto_balance, BalanceReport};
pub use production::{summarize_planet, DistrictDefinition, JobCatalog, JobYield, PlanetSummary};
