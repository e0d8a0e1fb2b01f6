//! Progression - research branches with eras, and tradition trees

pub mod research;
pub mod traditions;

pub use research::{
    advance_research, research_offers, start_research, unlock_eras, EraDefinition, ResearchBranch,
    ResearchError, ResearchOutcome, ResearchState, TechDefinition, TechTier,
};
pub use traditions::{
    adopt_tradition, advance_traditions, PerkDefinition, TraditionError, TraditionState, TraditionTree,
};

use serde::{Deserialize, Serialize};

/// Progress on one research branch or tradition tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackProgress {
    pub current_id: Option<String>,
    pub progress: f64,
    pub completed: Vec<String>,
}

impl TrackProgress {
    pub fn has_completed(&self, id: &str) -> bool {
        self.completed.iter().any(|c| c == id)
    }

    pub fn begin(&mut self, id: &str) {
        self.current_id = Some(id.to_string());
        self.progress = 0.0;
    }
}

/// Completion tolerance so that fractional shares (e.g. 10/3 three times)
/// reach a whole-number cost
pub(crate) const PROGRESS_EPSILON: f64 = 1e-9;
