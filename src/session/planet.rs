//! Planets - colonised worlds with population, districts and morale

use serde::{Deserialize, Serialize};

use crate::core::types::{DistrictKind, PlanetId, SystemId};
use crate::economy::ledger::ResourceAmounts;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanetKind {
    Continental,
    Ocean,
    Tropical,
    Arid,
    Desert,
    Arctic,
    Tundra,
    Gaia,
    Barren,
}

/// Template for a habitable world, as rolled by the galaxy generator or
/// supplied by config for the homeworld and new colonies
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanetTemplate {
    pub kind: PlanetKind,
    pub size: u32,
    /// 0.0 to 1.0
    pub habitability: f64,
    #[serde(default)]
    pub base_production: ResourceAmounts,
    #[serde(default)]
    pub base_upkeep: ResourceAmounts,
}

/// Population split across jobs
///
/// `workers + specialists + researchers == total` holds after every mutator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Population {
    total: u32,
    workers: u32,
    specialists: u32,
    researchers: u32,
}

/// Non-worker jobs a worker can be promoted into
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Job {
    Worker,
    Specialist,
    Researcher,
}

impl Population {
    pub fn new(workers: u32, specialists: u32, researchers: u32) -> Self {
        Self {
            total: workers + specialists + researchers,
            workers,
            specialists,
            researchers,
        }
    }

    /// All colonists start as workers
    pub fn workers_only(total: u32) -> Self {
        Self::new(total, 0, 0)
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn workers(&self) -> u32 {
        self.workers
    }

    pub fn specialists(&self) -> u32 {
        self.specialists
    }

    pub fn researchers(&self) -> u32 {
        self.researchers
    }

    pub fn count(&self, job: Job) -> u32 {
        match job {
            Job::Worker => self.workers,
            Job::Specialist => self.specialists,
            Job::Researcher => self.researchers,
        }
    }

    fn slot_mut(&mut self, job: Job) -> &mut u32 {
        match job {
            Job::Worker => &mut self.workers,
            Job::Specialist => &mut self.specialists,
            Job::Researcher => &mut self.researchers,
        }
    }

    /// Move one colonist between jobs, returns false if `from` is empty
    pub fn reassign(&mut self, from: Job, to: Job) -> bool {
        if from == to || self.count(from) == 0 {
            return false;
        }
        *self.slot_mut(from) -= 1;
        *self.slot_mut(to) += 1;
        true
    }

    /// Add colonists as workers
    pub fn grow(&mut self, amount: u32) {
        self.total += amount;
        self.workers += amount;
    }

    pub fn is_consistent(&self) -> bool {
        self.workers + self.specialists + self.researchers == self.total
    }
}

/// Dense per-district build counts, indexed by catalog position
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictTable {
    counts: Vec<u32>,
}

impl DistrictTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: DistrictKind) -> u32 {
        self.counts.get(kind.index()).copied().unwrap_or(0)
    }

    pub fn add(&mut self, kind: DistrictKind, amount: u32) {
        let idx = kind.index();
        if self.counts.len() <= idx {
            self.counts.resize(idx + 1, 0);
        }
        self.counts[idx] += amount;
    }

    /// Iterate built districts as `(kind, count)`, skipping zero entries
    pub fn iter(&self) -> impl Iterator<Item = (DistrictKind, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(idx, &count)| (DistrictKind(idx as u16), count))
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}

/// A colonised planet
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub id: PlanetId,
    pub system_id: SystemId,
    pub kind: PlanetKind,
    pub size: u32,
    pub habitability: f64,
    pub population: Population,
    pub base_production: ResourceAmounts,
    pub base_upkeep: ResourceAmounts,
    pub districts: DistrictTable,
    pub stability: f64,
    pub happiness: f64,
}

impl Planet {
    pub fn from_template(
        id: PlanetId,
        system_id: SystemId,
        template: &PlanetTemplate,
        population: Population,
        stability: f64,
    ) -> Self {
        Self {
            id,
            system_id,
            kind: template.kind,
            size: template.size,
            habitability: template.habitability.clamp(0.0, 1.0),
            population,
            base_production: template.base_production,
            base_upkeep: template.base_upkeep,
            districts: DistrictTable::new(),
            stability,
            happiness: stability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_reassign_conserves_total() {
        let mut pop = Population::new(5, 1, 0);
        assert!(pop.reassign(Job::Worker, Job::Researcher));
        assert_eq!(pop.workers(), 4);
        assert_eq!(pop.researchers(), 1);
        assert_eq!(pop.total(), 6);
        assert!(pop.is_consistent());
    }

    #[test]
    fn test_population_reassign_from_empty_job() {
        let mut pop = Population::new(3, 0, 0);
        assert!(!pop.reassign(Job::Specialist, Job::Worker));
        assert_eq!(pop, Population::new(3, 0, 0));
    }

    #[test]
    fn test_district_table_grows_on_demand() {
        let mut table = DistrictTable::new();
        assert_eq!(table.get(DistrictKind(3)), 0);
        table.add(DistrictKind(3), 2);
        table.add(DistrictKind(0), 1);
        assert_eq!(table.get(DistrictKind(3)), 2);
        assert_eq!(table.total(), 3);

        let built: Vec<_> = table.iter().collect();
        assert_eq!(built, vec![(DistrictKind(0), 1), (DistrictKind(3), 2)]);
    }
}
