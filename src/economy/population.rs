//! Population automation - greedy job rebalancing against trailing flows
//!
//! Resources are visited in the configured priority order. A resource whose
//! trailing net sits below `-deficit_threshold` promotes workers, one at a
//! time, into the non-worker job with the largest marginal gain for that
//! resource until the deficit is covered. A resource above
//! `surplus_threshold` demotes the job with the largest marginal gain back to
//! workers while the surplus buffer can absorb the loss. Each move updates
//! the running nets seen by resources later in the list.

use crate::core::config::SimConfig;
use crate::economy::ledger::{Resource, ResourceAmounts, ResourceLedger};
use crate::economy::production::JobCatalog;
use crate::session::planet::{Job, Planet};

const NON_WORKER_JOBS: [Job; 2] = [Job::Specialist, Job::Researcher];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BalanceReport {
    pub promotions: u32,
    pub demotions: u32,
}

/// Trailing per-resource net (income - upkeep) from the last economy pass
pub fn trailing_net(ledger: &ResourceLedger) -> ResourceAmounts {
    ResourceAmounts::zero().map(|r, _| ledger.entry(r).net())
}

fn job_delta(jobs: &JobCatalog, job: Job) -> ResourceAmounts {
    ResourceAmounts::zero().map(|r, _| jobs.marginal_over_worker(job, r))
}

/// Pick the job with the largest positive marginal for `resource`
///
/// Ties keep the earlier job in `NON_WORKER_JOBS`.
fn best_job(jobs: &JobCatalog, resource: Resource, eligible: impl Fn(Job) -> bool) -> Option<(Job, f64)> {
    let mut best: Option<(Job, f64)> = None;
    for job in NON_WORKER_JOBS {
        if !eligible(job) {
            continue;
        }
        let delta = jobs.marginal_over_worker(job, resource);
        if delta <= 0.0 {
            continue;
        }
        match best {
            Some((_, current)) if current >= delta => {}
            _ => best = Some((job, delta)),
        }
    }
    best
}

fn first_planet_with(planets: &mut [Planet], job: Job) -> Option<&mut Planet> {
    planets.iter_mut().find(|p| p.population.count(job) > 0)
}

fn any_planet_has(planets: &[Planet], job: Job) -> bool {
    planets.iter().any(|p| p.population.count(job) > 0)
}

pub fn auto_balance(planets: &mut [Planet], ledger: &ResourceLedger, config: &SimConfig) -> BalanceReport {
    let mut report = BalanceReport::default();
    let automation = &config.automation;
    if !automation.enabled {
        return report;
    }

    let jobs = &config.jobs;
    let mut running = trailing_net(ledger);

    for &resource in &automation.priorities {
        let net = running.get(resource);

        if net < -automation.deficit_threshold {
            let mut remaining = -net;
            while remaining > 0.0 {
                let Some((job, delta)) = best_job(jobs, resource, |_| true) else {
                    break;
                };
                let Some(planet) = first_planet_with(planets, Job::Worker) else {
                    break;
                };
                planet.population.reassign(Job::Worker, job);
                running += job_delta(jobs, job);
                remaining -= delta;
                report.promotions += 1;
            }
        } else if net > automation.surplus_threshold {
            let mut buffer = net - automation.surplus_threshold;
            loop {
                let snapshot: &[Planet] = &*planets;
                let Some((job, delta)) = best_job(jobs, resource, |job| any_planet_has(snapshot, job)) else {
                    break;
                };
                // A move that would eat into the threshold itself stays put
                if delta > buffer {
                    break;
                }
                let Some(planet) = first_planet_with(planets, job) else {
                    break;
                };
                planet.population.reassign(job, Job::Worker);
                running = running - job_delta(jobs, job);
                buffer -= delta;
                report.demotions += 1;
            }
        }
    }

    if report.promotions > 0 || report.demotions > 0 {
        tracing::debug!(
            promotions = report.promotions,
            demotions = report.demotions,
            "Population rebalanced"
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{PlanetId, SystemId};
    use crate::session::planet::{PlanetKind, PlanetTemplate, Population};

    fn planet(id: u32, pop: Population) -> Planet {
        let template = PlanetTemplate {
            kind: PlanetKind::Continental,
            size: 20,
            habitability: 1.0,
            base_production: ResourceAmounts::zero(),
            base_upkeep: ResourceAmounts::zero(),
        };
        Planet::from_template(PlanetId(id), SystemId(1), &template, pop, 50.0)
    }

    fn config() -> SimConfig {
        let mut config = SimConfig::default();
        config.jobs = JobCatalog {
            worker: crate::economy::production::JobYield {
                production: ResourceAmounts::from_pairs(&[(Resource::Energy, 1.0)]),
                upkeep: ResourceAmounts::zero(),
            },
            specialist: crate::economy::production::JobYield {
                production: ResourceAmounts::from_pairs(&[(Resource::Minerals, 2.0)]),
                upkeep: ResourceAmounts::zero(),
            },
            researcher: crate::economy::production::JobYield {
                production: ResourceAmounts::from_pairs(&[(Resource::Research, 3.0)]),
                upkeep: ResourceAmounts::zero(),
            },
        };
        config.automation.enabled = true;
        config.automation.priorities = vec![Resource::Minerals, Resource::Research, Resource::Energy];
        config.automation.deficit_threshold = 0.5;
        config.automation.surplus_threshold = 10.0;
        config
    }

    fn ledger_with_net(resource: Resource, net: f64) -> ResourceLedger {
        let mut ledger = ResourceLedger::default();
        if net >= 0.0 {
            ledger.record_flows(resource, net, 0.0);
        } else {
            ledger.record_flows(resource, 0.0, -net);
        }
        ledger
    }

    #[test]
    fn test_deficit_promotes_until_covered() {
        let config = config();
        let mut planets = vec![planet(1, Population::new(6, 0, 0))];
        // Minerals short by 5: each specialist adds 2 -> three promotions
        let ledger = ledger_with_net(Resource::Minerals, -5.0);

        let report = auto_balance(&mut planets, &ledger, &config);

        assert_eq!(report.promotions, 3);
        assert_eq!(planets[0].population.specialists(), 3);
        assert_eq!(planets[0].population.workers(), 3);
        assert!(planets[0].population.is_consistent());
    }

    #[test]
    fn test_deficit_stops_when_workers_run_out() {
        let config = config();
        let mut planets = vec![planet(1, Population::new(1, 0, 0)), planet(2, Population::new(1, 0, 0))];
        let ledger = ledger_with_net(Resource::Research, -100.0);

        let report = auto_balance(&mut planets, &ledger, &config);

        assert_eq!(report.promotions, 2);
        assert_eq!(planets[0].population.researchers(), 1);
        assert_eq!(planets[1].population.researchers(), 1);
    }

    #[test]
    fn test_surplus_demotes_within_buffer() {
        let config = config();
        let mut planets = vec![planet(1, Population::new(0, 0, 4))];
        // Research net 17, threshold 10 -> buffer 7, each researcher worth 3
        let ledger = ledger_with_net(Resource::Research, 17.0);

        let report = auto_balance(&mut planets, &ledger, &config);

        assert_eq!(report.demotions, 2);
        assert_eq!(planets[0].population.researchers(), 2);
        assert_eq!(planets[0].population.workers(), 2);
    }

    #[test]
    fn test_surplus_demotion_spends_buffer_exactly() {
        let config = config();
        let mut planets = vec![planet(1, Population::new(0, 0, 4))];
        // Buffer 6 covers exactly two researchers at 3 each
        let ledger = ledger_with_net(Resource::Research, 16.0);

        let report = auto_balance(&mut planets, &ledger, &config);

        assert_eq!(report.demotions, 2);
        assert_eq!(planets[0].population.researchers(), 2);
    }

    #[test]
    fn test_surplus_smaller_than_one_job_keeps_everyone() {
        let config = config();
        let mut planets = vec![planet(1, Population::new(0, 0, 4))];
        // Buffer 2 is below a researcher's marginal of 3
        let ledger = ledger_with_net(Resource::Research, 12.0);

        let report = auto_balance(&mut planets, &ledger, &config);

        assert_eq!(report.demotions, 0);
        assert_eq!(planets[0].population.researchers(), 4);
    }

    #[test]
    fn test_disabled_automation_is_inert() {
        let mut config = config();
        config.automation.enabled = false;
        let mut planets = vec![planet(1, Population::new(6, 0, 0))];
        let ledger = ledger_with_net(Resource::Minerals, -5.0);

        assert_eq!(auto_balance(&mut planets, &ledger, &config), BalanceReport::default());
        assert_eq!(planets[0].population.workers(), 6);
    }

    #[test]
    fn test_no_positive_marginal_means_no_promotion() {
        let config = config();
        let mut planets = vec![planet(1, Population::new(6, 0, 0))];
        // Workers are already the best energy producers
        let ledger = ledger_with_net(Resource::Energy, -5.0);

        let report = auto_balance(&mut planets, &ledger, &config);
        assert_eq!(report.promotions, 0);
    }
}
