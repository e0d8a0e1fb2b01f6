//! Narrative, anomaly and crisis events
//!
//! At most one event is active at a time; spawned events wait in a bounded
//! queue behind it. Resolving the active event applies the chosen option's
//! effects in order.

pub mod resolver;
pub mod spawner;

pub use resolver::{apply_effect, resolve_event, EventError};
pub use spawner::advance_events;

use serde::{Deserialize, Serialize};

use crate::core::types::{EventInstanceId, SystemId, Tick};
use crate::economy::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Narrative,
    Anomaly,
    Crisis,
}

impl EventKind {
    /// Anomalies and crises are anchored to a system
    pub fn is_targeted(self) -> bool {
        !matches!(self, EventKind::Narrative)
    }
}

/// One typed effect of an event option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventEffect {
    /// Adds to a stockpile, the result never drops below zero
    Resource { resource: Resource, amount: f64 },
    Influence { amount: f64 },
    /// Shifts stability on every planet within the morale bounds
    Stability { amount: f64 },
    /// Raises hostile power on the given system, or the event's own system
    SpawnHostiles {
        #[serde(default)]
        system_id: Option<SystemId>,
        power: f64,
    },
    /// Currently inert
    Insight { note: String },
    Nothing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventOption {
    pub label: String,
    #[serde(default)]
    pub effects: Vec<EventEffect>,
}

/// Catalog entry an event instance is stamped from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTemplate {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub options: Vec<EventOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: EventInstanceId,
    pub template_id: String,
    pub kind: EventKind,
    pub title: String,
    pub target_system_id: Option<SystemId>,
    pub options: Vec<EventOption>,
    pub spawned_at: Tick,
}

impl GameEvent {
    pub fn from_template(
        id: EventInstanceId,
        kind: EventKind,
        template: &EventTemplate,
        target_system_id: Option<SystemId>,
        tick: Tick,
    ) -> Self {
        Self {
            id,
            template_id: template.id.clone(),
            kind,
            title: template.title.clone(),
            target_system_id,
            options: template.options.clone(),
            spawned_at: tick,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventState {
    pub active: Option<GameEvent>,
    pub queue: Vec<GameEvent>,
}

impl EventState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_active(&self) -> bool {
        self.active.is_some()
    }
}
