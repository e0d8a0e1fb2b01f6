//! Traditions - three perk trees fed by influence income

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::config::SimConfig;
use crate::progression::{TrackProgress, PROGRESS_EPSILON};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraditionTree {
    Expansion,
    Prosperity,
    Supremacy,
}

impl TraditionTree {
    pub const ALL: [TraditionTree; 3] = [
        TraditionTree::Expansion,
        TraditionTree::Prosperity,
        TraditionTree::Supremacy,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerkDefinition {
    pub id: String,
    pub name: String,
    pub tree: TraditionTree,
    pub cost: f64,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub exclusive_group: Option<String>,
    /// Flat influence income added once the perk is adopted
    #[serde(default)]
    pub influence_bonus: f64,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraditionError {
    #[error("Unknown perk: {0}")]
    InvalidPerk(String),
    #[error("Perk {0} does not belong to this tree")]
    TreeMismatch(String),
    #[error("Prerequisites for {0} are not met")]
    PrereqNotMet(String),
    #[error("Perk {0} is already adopted")]
    AlreadyCompleted(String),
}

impl TraditionError {
    pub fn code(&self) -> &'static str {
        match self {
            TraditionError::InvalidPerk(_) => "INVALID_PERK",
            TraditionError::TreeMismatch(_) => "TREE_MISMATCH",
            TraditionError::PrereqNotMet(_) => "PREREQ_NOT_MET",
            TraditionError::AlreadyCompleted(_) => "ALREADY_COMPLETED",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraditionState {
    pub expansion: TrackProgress,
    pub prosperity: TrackProgress,
    pub supremacy: TrackProgress,
    pub exclusive_picks: BTreeMap<String, String>,
}

impl TraditionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self, tree: TraditionTree) -> &TrackProgress {
        match tree {
            TraditionTree::Expansion => &self.expansion,
            TraditionTree::Prosperity => &self.prosperity,
            TraditionTree::Supremacy => &self.supremacy,
        }
    }

    pub fn tree_mut(&mut self, tree: TraditionTree) -> &mut TrackProgress {
        match tree {
            TraditionTree::Expansion => &mut self.expansion,
            TraditionTree::Prosperity => &mut self.prosperity,
            TraditionTree::Supremacy => &mut self.supremacy,
        }
    }

    pub fn is_locked_out(&self, perk: &PerkDefinition) -> bool {
        perk.exclusive_group
            .as_ref()
            .and_then(|group| self.exclusive_picks.get(group))
            .is_some_and(|claimed| claimed != &perk.id)
    }

    /// Sum of influence bonuses over every adopted perk
    pub fn influence_bonus(&self, config: &SimConfig) -> f64 {
        TraditionTree::ALL
            .iter()
            .flat_map(|t| self.tree(*t).completed.iter())
            .filter_map(|id| config.perk(id))
            .map(|p| p.influence_bonus)
            .sum()
    }
}

/// Validate and begin adopting `perk_id` on `tree`
pub fn adopt_tradition(
    state: &TraditionState,
    config: &SimConfig,
    tree: TraditionTree,
    perk_id: &str,
) -> Result<TraditionState, TraditionError> {
    let perk = config
        .perk(perk_id)
        .ok_or_else(|| TraditionError::InvalidPerk(perk_id.to_string()))?;

    if perk.tree != tree {
        return Err(TraditionError::TreeMismatch(perk.id.clone()));
    }
    let track = state.tree(tree);
    if track.has_completed(&perk.id) {
        return Err(TraditionError::AlreadyCompleted(perk.id.clone()));
    }
    if !perk.prerequisites.iter().all(|p| track.has_completed(p)) || state.is_locked_out(perk) {
        return Err(TraditionError::PrereqNotMet(perk.id.clone()));
    }

    let mut next = state.clone();
    next.tree_mut(tree).begin(&perk.id);
    Ok(next)
}

/// Add one tick of influence income to every tree, returns adopted perk ids
pub fn advance_traditions(state: &mut TraditionState, config: &SimConfig, income: f64) -> Vec<String> {
    let share = income.max(0.0) * config.traditions.points_per_income / TraditionTree::ALL.len() as f64;
    let mut adopted = Vec::new();

    for tree in TraditionTree::ALL {
        let Some(current) = state.tree(tree).current_id.clone() else {
            continue;
        };
        let Some(perk) = config.perk(&current) else {
            tracing::warn!(perk = %current, "Dropping unknown perk from tradition tree");
            let track = state.tree_mut(tree);
            track.current_id = None;
            track.progress = 0.0;
            continue;
        };

        let progress = state.tree(tree).progress + share;
        if progress + PROGRESS_EPSILON < perk.cost {
            state.tree_mut(tree).progress = progress;
            continue;
        }

        if !state.is_locked_out(perk) {
            if let Some(group) = &perk.exclusive_group {
                state
                    .exclusive_picks
                    .entry(group.clone())
                    .or_insert_with(|| perk.id.clone());
            }
            state.tree_mut(tree).completed.push(perk.id.clone());
            adopted.push(perk.id.clone());
        }

        let track = state.tree_mut(tree);
        track.current_id = None;
        track.progress = 0.0;
    }

    adopted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perk(id: &str, tree: TraditionTree, cost: f64) -> PerkDefinition {
        PerkDefinition {
            id: id.into(),
            name: id.into(),
            tree,
            cost,
            prerequisites: vec![],
            exclusive_group: None,
            influence_bonus: 0.0,
        }
    }

    fn config() -> SimConfig {
        let mut config = SimConfig::default();
        let mut envoys = perk("envoys", TraditionTree::Prosperity, 6.0);
        envoys.influence_bonus = 1.5;
        let mut charter = perk("charter", TraditionTree::Prosperity, 6.0);
        charter.prerequisites = vec!["envoys".into()];
        let mut iron = perk("iron_rule", TraditionTree::Supremacy, 3.0);
        iron.exclusive_group = Some("rule".into());
        let mut open = perk("open_rule", TraditionTree::Supremacy, 3.0);
        open.exclusive_group = Some("rule".into());
        config.traditions.points_per_income = 1.0;
        config.traditions.perks = vec![envoys, charter, iron, open];
        config
    }

    #[test]
    fn test_adopt_validation() {
        let config = config();
        let state = TraditionState::new();

        assert_eq!(
            adopt_tradition(&state, &config, TraditionTree::Expansion, "nope").unwrap_err().code(),
            "INVALID_PERK"
        );
        assert_eq!(
            adopt_tradition(&state, &config, TraditionTree::Expansion, "envoys").unwrap_err().code(),
            "TREE_MISMATCH"
        );
        assert_eq!(
            adopt_tradition(&state, &config, TraditionTree::Prosperity, "charter").unwrap_err().code(),
            "PREREQ_NOT_MET"
        );
    }

    #[test]
    fn test_advance_adopts_and_grants_influence() {
        let config = config();
        let state = TraditionState::new();
        let mut state = adopt_tradition(&state, &config, TraditionTree::Prosperity, "envoys").unwrap();

        // 9 influence / 3 trees = 3 per tick, cost 6
        assert!(advance_traditions(&mut state, &config, 9.0).is_empty());
        assert_eq!(advance_traditions(&mut state, &config, 9.0), vec!["envoys".to_string()]);
        assert!((state.influence_bonus(&config) - 1.5).abs() < 1e-9);

        let err = adopt_tradition(&state, &config, TraditionTree::Prosperity, "envoys").unwrap_err();
        assert_eq!(err.code(), "ALREADY_COMPLETED");
    }

    #[test]
    fn test_exclusive_perks_lock_each_other() {
        let config = config();
        let state = TraditionState::new();
        let mut state = adopt_tradition(&state, &config, TraditionTree::Supremacy, "iron_rule").unwrap();
        advance_traditions(&mut state, &config, 9.0);

        let err = adopt_tradition(&state, &config, TraditionTree::Supremacy, "open_rule").unwrap_err();
        assert_eq!(err.code(), "PREREQ_NOT_MET");
        assert_eq!(state.exclusive_picks["rule"], "iron_rule");
    }
}
