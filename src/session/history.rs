//! Bounded history - notifications, combat reports and war events

use serde::{Deserialize, Serialize};

use crate::core::types::{EmpireId, FleetId, SystemId, Tick};

/// Combat reports kept after each tick
pub const COMBAT_REPORT_LIMIT: usize = 8;

/// Notifications kept after each tick
pub const NOTIFICATION_LIMIT: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    EventStarted,
    EventResolved,
    ColonyEstablished,
    SystemClaimed,
    DistrictCompleted,
    ShipCompleted,
    ShipyardCompleted,
    SurveyCompleted,
    ResearchCompleted,
    EraUnlocked,
    TraditionAdopted,
    SystemCleared,
    FleetDestroyed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub tick: Tick,
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CombatOutcome {
    PlayerVictory,
    PlayerDefeat,
    Stalemate,
    MutualDestruction,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatReport {
    pub tick: Tick,
    pub system_id: SystemId,
    pub fleet_id: FleetId,
    pub owner_id: EmpireId,
    pub outcome: CombatOutcome,
    pub damage_dealt: f64,
    pub damage_taken: f64,
    pub ships_lost: u32,
    pub hostile_before: f64,
    pub hostile_after: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WarEventKind {
    WarStart,
    PeaceSigned,
    ZonePressure,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WarEvent {
    pub tick: Tick,
    pub empire_id: EmpireId,
    pub kind: WarEventKind,
    pub message: String,
}

/// Records produced during one tick pass, folded into the history at the end
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PassLog {
    pub tick: Tick,
    pub notifications: Vec<Notification>,
    pub combat_reports: Vec<CombatReport>,
    pub war_events: Vec<WarEvent>,
}

impl PassLog {
    pub fn new(tick: Tick) -> Self {
        Self {
            tick,
            ..Self::default()
        }
    }

    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.notifications.push(Notification {
            tick: self.tick,
            kind,
            message: message.into(),
        });
    }

    pub fn war_event(&mut self, empire_id: EmpireId, kind: WarEventKind, message: impl Into<String>) {
        self.war_events.push(WarEvent {
            tick: self.tick,
            empire_id,
            kind,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty() && self.combat_reports.is_empty() && self.war_events.is_empty()
    }
}

/// The session's externally visible log surface
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryLog {
    pub notifications: Vec<Notification>,
    pub combat_reports: Vec<CombatReport>,
    pub war_events: Vec<WarEvent>,
}

fn keep_last<T>(items: &mut Vec<T>, limit: usize) {
    if items.len() > limit {
        items.drain(..items.len() - limit);
    }
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pass's records and trim every list to its window
    pub fn absorb(&mut self, pass: PassLog, war_event_limit: usize) {
        self.notifications.extend(pass.notifications);
        self.combat_reports.extend(pass.combat_reports);
        self.war_events.extend(pass.war_events);
        self.trim(war_event_limit);
    }

    pub fn trim(&mut self, war_event_limit: usize) {
        keep_last(&mut self.notifications, NOTIFICATION_LIMIT);
        keep_last(&mut self.combat_reports, COMBAT_REPORT_LIMIT);
        keep_last(&mut self.war_events, war_event_limit);
    }

    /// True if an event started at most `window` ticks before `now`
    pub fn event_started_within(&self, now: Tick, window: u64) -> bool {
        self.notifications
            .iter()
            .any(|n| n.kind == NotificationKind::EventStarted && now.saturating_sub(n.tick) <= window)
    }
}
