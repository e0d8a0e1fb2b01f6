//! Research - three branches, era gating and mutually-exclusive techs
//!
//! Income is split evenly across the branches. An era unlocks once at least
//! 60% (minimum one) of its gateway techs are completed on any branch, and
//! only after the era before it has unlocked. Unlocked eras are never lost.

use std::collections::BTreeMap;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::config::SimConfig;
use crate::progression::{TrackProgress, PROGRESS_EPSILON};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResearchBranch {
    Physics,
    Society,
    Engineering,
}

impl ResearchBranch {
    pub const ALL: [ResearchBranch; 3] = [
        ResearchBranch::Physics,
        ResearchBranch::Society,
        ResearchBranch::Engineering,
    ];
}

/// Offer weighting class of a tech
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechTier {
    Foundation,
    Feature,
    #[default]
    Standard,
    Rare,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechDefinition {
    pub id: String,
    pub name: String,
    pub branch: ResearchBranch,
    pub era: u32,
    pub cost: f64,
    /// Must be completed on the same branch
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub exclusive_group: Option<String>,
    #[serde(default)]
    pub tier: TechTier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EraDefinition {
    pub id: u32,
    pub name: String,
    /// Techs that count toward unlocking this era
    #[serde(default)]
    pub gateway_techs: Vec<String>,
}

impl EraDefinition {
    /// Gateway completions needed: ceil(60%), at least one
    pub fn required_gateways(&self) -> usize {
        ((self.gateway_techs.len() * 3 + 4) / 5).max(1)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResearchError {
    #[error("Unknown tech: {0}")]
    InvalidTech(String),
    #[error("Tech {0} does not belong to this branch")]
    BranchMismatch(String),
    #[error("Prerequisites for {0} are not met")]
    PrereqNotMet(String),
    #[error("Tech {0} is already completed")]
    AlreadyCompleted(String),
}

impl ResearchError {
    pub fn code(&self) -> &'static str {
        match self {
            ResearchError::InvalidTech(_) => "INVALID_TECH",
            ResearchError::BranchMismatch(_) => "BRANCH_MISMATCH",
            ResearchError::PrereqNotMet(_) => "PREREQ_NOT_MET",
            ResearchError::AlreadyCompleted(_) => "ALREADY_COMPLETED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchState {
    pub physics: TrackProgress,
    pub society: TrackProgress,
    pub engineering: TrackProgress,
    pub current_era: u32,
    pub unlocked_eras: Vec<u32>,
    /// Exclusive group -> claiming tech, written once per group
    pub exclusive_picks: BTreeMap<String, String>,
}

/// What one research advance produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResearchOutcome {
    pub completed: Vec<String>,
    pub eras_unlocked: Vec<u32>,
}

impl ResearchState {
    /// Fresh state with the first configured era unlocked
    pub fn new(config: &SimConfig) -> Self {
        let first_era = config.research.eras.iter().map(|e| e.id).min().unwrap_or(1);
        Self {
            physics: TrackProgress::default(),
            society: TrackProgress::default(),
            engineering: TrackProgress::default(),
            current_era: first_era,
            unlocked_eras: vec![first_era],
            exclusive_picks: BTreeMap::new(),
        }
    }

    pub fn branch(&self, branch: ResearchBranch) -> &TrackProgress {
        match branch {
            ResearchBranch::Physics => &self.physics,
            ResearchBranch::Society => &self.society,
            ResearchBranch::Engineering => &self.engineering,
        }
    }

    pub fn branch_mut(&mut self, branch: ResearchBranch) -> &mut TrackProgress {
        match branch {
            ResearchBranch::Physics => &mut self.physics,
            ResearchBranch::Society => &mut self.society,
            ResearchBranch::Engineering => &mut self.engineering,
        }
    }

    /// Completed techs across all branches
    pub fn all_completed(&self) -> AHashSet<&str> {
        ResearchBranch::ALL
            .iter()
            .flat_map(|b| self.branch(*b).completed.iter().map(String::as_str))
            .collect()
    }

    /// True if the tech's exclusive group is already claimed by another tech
    pub fn is_locked_out(&self, tech: &TechDefinition) -> bool {
        tech.exclusive_group
            .as_ref()
            .and_then(|group| self.exclusive_picks.get(group))
            .is_some_and(|claimed| claimed != &tech.id)
    }

    fn is_startable(&self, tech: &TechDefinition) -> bool {
        let track = self.branch(tech.branch);
        tech.era <= self.current_era
            && !track.has_completed(&tech.id)
            && tech.prerequisites.iter().all(|p| track.has_completed(p))
            && !self.is_locked_out(tech)
    }
}

/// Validate and begin researching `tech_id` on `branch`
///
/// Checks run in a fixed order and the first failure wins. An era above the
/// current one and an exclusive group claimed by a different tech both count
/// as unmet prerequisites. Progress on the branch resets to zero.
pub fn start_research(
    state: &ResearchState,
    config: &SimConfig,
    branch: ResearchBranch,
    tech_id: &str,
) -> Result<ResearchState, ResearchError> {
    let tech = config
        .tech(tech_id)
        .ok_or_else(|| ResearchError::InvalidTech(tech_id.to_string()))?;

    if tech.branch != branch {
        return Err(ResearchError::BranchMismatch(tech.id.clone()));
    }
    if tech.era > state.current_era {
        return Err(ResearchError::PrereqNotMet(tech.id.clone()));
    }

    let track = state.branch(branch);
    if track.has_completed(&tech.id) {
        return Err(ResearchError::AlreadyCompleted(tech.id.clone()));
    }
    if !tech.prerequisites.iter().all(|p| track.has_completed(p)) {
        return Err(ResearchError::PrereqNotMet(tech.id.clone()));
    }
    if state.is_locked_out(tech) {
        return Err(ResearchError::PrereqNotMet(tech.id.clone()));
    }

    let mut next = state.clone();
    next.branch_mut(branch).begin(&tech.id);
    Ok(next)
}

/// Add one tick of research income to every active branch
pub fn advance_research(state: &mut ResearchState, config: &SimConfig, income: f64) -> ResearchOutcome {
    let mut outcome = ResearchOutcome::default();
    let share = income.max(0.0) * config.research.points_per_income / ResearchBranch::ALL.len() as f64;

    for branch in ResearchBranch::ALL {
        let Some(current) = state.branch(branch).current_id.clone() else {
            continue;
        };
        let Some(tech) = config.tech(&current) else {
            tracing::warn!(tech = %current, "Dropping unknown tech from research branch");
            let track = state.branch_mut(branch);
            track.current_id = None;
            track.progress = 0.0;
            continue;
        };

        let progress = state.branch(branch).progress + share;
        if progress + PROGRESS_EPSILON < tech.cost {
            state.branch_mut(branch).progress = progress;
            continue;
        }

        if state.is_locked_out(tech) {
            // Another tech of the group finished first while both were running
            tracing::debug!(tech = %tech.id, "Exclusive group already claimed, research discarded");
        } else {
            if let Some(group) = &tech.exclusive_group {
                state
                    .exclusive_picks
                    .entry(group.clone())
                    .or_insert_with(|| tech.id.clone());
            }
            state.branch_mut(branch).completed.push(tech.id.clone());
            outcome.completed.push(tech.id.clone());
        }

        let track = state.branch_mut(branch);
        track.current_id = None;
        track.progress = 0.0;
    }

    outcome.eras_unlocked = unlock_eras(state, config);
    outcome
}

/// Recompute era unlocks, returns eras unlocked by this call
pub fn unlock_eras(state: &mut ResearchState, config: &SimConfig) -> Vec<u32> {
    let mut eras: Vec<&EraDefinition> = config.research.eras.iter().collect();
    eras.sort_by_key(|e| e.id);

    let mut newly = Vec::new();
    {
        let completed = state.all_completed();
        let mut unlocked = state.unlocked_eras.clone();

        for pair in eras.windows(2) {
            let (previous, era) = (pair[0], pair[1]);
            if unlocked.contains(&era.id) {
                continue;
            }
            if !unlocked.contains(&previous.id) {
                break;
            }
            let done = era
                .gateway_techs
                .iter()
                .filter(|t| completed.contains(t.as_str()))
                .count();
            if done >= era.required_gateways() {
                unlocked.push(era.id);
                newly.push(era.id);
            }
        }

        state.unlocked_eras = unlocked;
    }

    if let Some(max) = state.unlocked_eras.iter().copied().max() {
        state.current_era = state.current_era.max(max);
    }
    for era in &newly {
        tracing::info!(era, "Research era unlocked");
    }
    newly
}

/// Pick up to `count` techs to offer on a branch
///
/// Features first (at most half the slots, rounded up), then foundations,
/// then the remaining standard and feature techs, then rares. If slots are
/// still open, gateway techs of the branch are appended even when they are
/// not yet startable so the path to the next era stays visible.
pub fn research_offers(
    state: &ResearchState,
    config: &SimConfig,
    branch: ResearchBranch,
    count: usize,
) -> Vec<String> {
    let track = state.branch(branch);
    let candidates: Vec<&TechDefinition> = config
        .research
        .techs
        .iter()
        .filter(|t| t.branch == branch)
        .filter(|t| track.current_id.as_deref() != Some(t.id.as_str()))
        .filter(|t| state.is_startable(t))
        .collect();

    let mut offers: Vec<String> = Vec::with_capacity(count);
    let take = |tier: Option<TechTier>, limit: usize, offers: &mut Vec<String>| {
        for tech in &candidates {
            if offers.len() >= limit {
                break;
            }
            if tier.map_or(true, |t| t == tech.tier) && !offers.contains(&tech.id) {
                offers.push(tech.id.clone());
            }
        }
    };

    let feature_cap = count.div_ceil(2);
    take(Some(TechTier::Feature), feature_cap, &mut offers);
    take(Some(TechTier::Foundation), count, &mut offers);
    take(Some(TechTier::Standard), count, &mut offers);
    take(Some(TechTier::Feature), count, &mut offers);
    take(Some(TechTier::Rare), count, &mut offers);

    if offers.len() < count {
        for era in &config.research.eras {
            for gateway in &era.gateway_techs {
                if offers.len() >= count {
                    break;
                }
                let Some(tech) = config.tech(gateway) else {
                    continue;
                };
                if tech.branch == branch
                    && !track.has_completed(&tech.id)
                    && !state.is_locked_out(tech)
                    && !offers.contains(&tech.id)
                {
                    offers.push(tech.id.clone());
                }
            }
        }
    }

    offers
}
