//! Production - per-planet yield from base output, districts and jobs
//!
//! A planet's summary is computed independently per resource:
//! - base production plus every built district's production times its count
//! - plus every job's production times the colonists assigned to it
//! - upkeep accumulated the same way from base, district and job upkeep

use serde::{Deserialize, Serialize};

use crate::core::config::SimConfig;
use crate::economy::ledger::{Resource, ResourceAmounts};
use crate::session::planet::{Job, Planet};

/// A buildable district type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictDefinition {
    /// Unique identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    #[serde(default)]
    pub production: ResourceAmounts,
    #[serde(default)]
    pub upkeep: ResourceAmounts,
    /// Paid when the task is queued, never refunded
    #[serde(default)]
    pub cost: ResourceAmounts,
    pub build_ticks: u32,
    /// Minimum planet population at completion time
    #[serde(default)]
    pub requires_colonists: Option<u32>,
}

/// Output and upkeep of one colonist in a job
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobYield {
    #[serde(default)]
    pub production: ResourceAmounts,
    #[serde(default)]
    pub upkeep: ResourceAmounts,
}

impl JobYield {
    /// Net contribution of one colonist to a resource
    pub fn net(&self, resource: Resource) -> f64 {
        self.production.get(resource) - self.upkeep.get(resource)
    }
}

/// Yields for every population job
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobCatalog {
    pub worker: JobYield,
    pub specialist: JobYield,
    pub researcher: JobYield,
}

impl JobCatalog {
    pub fn get(&self, job: Job) -> &JobYield {
        match job {
            Job::Worker => &self.worker,
            Job::Specialist => &self.specialist,
            Job::Researcher => &self.researcher,
        }
    }

    /// Net gain in `resource` from moving one colonist out of the worker job
    pub fn marginal_over_worker(&self, job: Job, resource: Resource) -> f64 {
        self.get(job).net(resource) - self.worker.net(resource)
    }
}

/// Raw production and upkeep of one planet, before morale
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlanetSummary {
    pub production: ResourceAmounts,
    pub upkeep: ResourceAmounts,
}

impl PlanetSummary {
    pub fn net(&self) -> ResourceAmounts {
        self.production - self.upkeep
    }
}

const JOBS: [Job; 3] = [Job::Worker, Job::Specialist, Job::Researcher];

/// Summarize a planet's production and upkeep
///
/// Districts missing from the catalog contribute nothing.
pub fn summarize_planet(planet: &Planet, config: &SimConfig) -> PlanetSummary {
    let mut production = planet.base_production;
    let mut upkeep = planet.base_upkeep;

    for (kind, count) in planet.districts.iter() {
        if let Some(district) = config.district(kind) {
            production += district.production * count as f64;
            upkeep += district.upkeep * count as f64;
        }
    }

    for job in JOBS {
        let assigned = planet.population.count(job) as f64;
        if assigned > 0.0 {
            let yields = config.jobs.get(job);
            production += yields.production * assigned;
            upkeep += yields.upkeep * assigned;
        }
    }

    PlanetSummary { production, upkeep }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{PlanetId, SystemId};
    use crate::session::planet::{PlanetKind, PlanetTemplate, Population};

    fn test_planet(config: &SimConfig) -> Planet {
        let template = PlanetTemplate {
            kind: PlanetKind::Continental,
            size: 10,
            habitability: 1.0,
            base_production: ResourceAmounts::from_pairs(&[(Resource::Energy, 2.0)]),
            base_upkeep: ResourceAmounts::from_pairs(&[(Resource::Energy, 1.0)]),
        };
        let mut planet = Planet::from_template(
            PlanetId(1),
            SystemId(0),
            &template,
            Population::new(2, 1, 0),
            50.0,
        );
        let mining = config.district_kind("mining").unwrap();
        planet.districts.add(mining, 2);
        planet
    }

    #[test]
    fn test_summary_combines_base_districts_and_jobs() {
        let config = SimConfig::default();
        let planet = test_planet(&config);
        let summary = summarize_planet(&planet, &config);

        let mining = config.district(config.district_kind("mining").unwrap()).unwrap();
        let expected_minerals = mining.production.minerals * 2.0
            + config.jobs.worker.production.minerals * 2.0
            + config.jobs.specialist.production.minerals;
        assert!((summary.production.minerals - expected_minerals).abs() < 1e-9);

        let expected_energy = 2.0
            + mining.production.energy * 2.0
            + config.jobs.worker.production.energy * 2.0
            + config.jobs.specialist.production.energy;
        assert!((summary.production.energy - expected_energy).abs() < 1e-9);
        assert!(summary.upkeep.energy >= 1.0);
    }

    #[test]
    fn test_marginal_over_worker() {
        let config = SimConfig::default();
        let delta = config
            .jobs
            .marginal_over_worker(Job::Researcher, Resource::Research);
        assert!(delta > 0.0);
        assert_eq!(config.jobs.marginal_over_worker(Job::Worker, Resource::Food), 0.0);
    }
}
