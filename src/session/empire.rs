//! Empires - the player and the AI factions

use serde::{Deserialize, Serialize};

use crate::core::types::{EmpireId, SystemId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmpireKind {
    Player,
    Ai,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarStatus {
    Peace,
    War,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Empire {
    pub id: EmpireId,
    pub name: String,
    pub kind: EmpireKind,
    /// Opinion of the player, roughly -100 to +100 but not clamped
    pub opinion: f64,
    pub war_status: WarStatus,
    /// Whether the player's ships may pass through this empire's space
    pub access: bool,
    pub home_system_id: Option<SystemId>,
}

impl Empire {
    pub fn player(id: EmpireId, name: impl Into<String>, home: SystemId) -> Self {
        Self {
            id,
            name: name.into(),
            kind: EmpireKind::Player,
            opinion: 0.0,
            war_status: WarStatus::Peace,
            access: true,
            home_system_id: Some(home),
        }
    }

    pub fn ai(id: EmpireId, name: impl Into<String>, home: Option<SystemId>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: EmpireKind::Ai,
            opinion: 0.0,
            war_status: WarStatus::Peace,
            access: false,
            home_system_id: home,
        }
    }

    pub fn is_ai(&self) -> bool {
        self.kind == EmpireKind::Ai
    }

    pub fn at_war(&self) -> bool {
        self.war_status == WarStatus::War
    }
}
