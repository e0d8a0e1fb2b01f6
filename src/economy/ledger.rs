//! Resource ledger - empire-wide stockpile with per-resource flows

use serde::{Deserialize, Serialize};

/// Upper bound for any stored resource amount
pub const AMOUNT_MAX: f64 = 999_999.0;

/// Absolute bound for displayed income and upkeep
pub const FLOW_LIMIT: f64 = 99_999.0;

/// The five economy resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Energy,
    Minerals,
    Food,
    Research,
    Influence,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Energy,
        Resource::Minerals,
        Resource::Food,
        Resource::Research,
        Resource::Influence,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Resource::Energy => "energy",
            Resource::Minerals => "minerals",
            Resource::Food => "food",
            Resource::Research => "research",
            Resource::Influence => "influence",
        }
    }
}

/// A value per resource type
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceAmounts {
    pub energy: f64,
    pub minerals: f64,
    pub food: f64,
    pub research: f64,
    pub influence: f64,
}

impl ResourceAmounts {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Build from `(resource, value)` pairs, unspecified resources are zero
    pub fn from_pairs(pairs: &[(Resource, f64)]) -> Self {
        let mut amounts = Self::zero();
        for &(resource, value) in pairs {
            *amounts.get_mut(resource) += value;
        }
        amounts
    }

    pub fn get(&self, resource: Resource) -> f64 {
        match resource {
            Resource::Energy => self.energy,
            Resource::Minerals => self.minerals,
            Resource::Food => self.food,
            Resource::Research => self.research,
            Resource::Influence => self.influence,
        }
    }

    pub fn get_mut(&mut self, resource: Resource) -> &mut f64 {
        match resource {
            Resource::Energy => &mut self.energy,
            Resource::Minerals => &mut self.minerals,
            Resource::Food => &mut self.food,
            Resource::Research => &mut self.research,
            Resource::Influence => &mut self.influence,
        }
    }

    pub fn map(&self, f: impl Fn(Resource, f64) -> f64) -> Self {
        let mut out = Self::zero();
        for resource in Resource::ALL {
            *out.get_mut(resource) = f(resource, self.get(resource));
        }
        out
    }

    pub fn scaled(&self, factor: f64) -> Self {
        self.map(|_, v| v * factor)
    }

    pub fn is_zero(&self) -> bool {
        Resource::ALL.iter().all(|r| self.get(*r) == 0.0)
    }
}

impl std::ops::Add for ResourceAmounts {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.map(|r, v| v + rhs.get(r))
    }
}

impl std::ops::AddAssign for ResourceAmounts {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::ops::Sub for ResourceAmounts {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.map(|r, v| v - rhs.get(r))
    }
}

impl std::ops::Mul<f64> for ResourceAmounts {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        self.scaled(rhs)
    }
}

/// Amount plus last-computed flows for one resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub amount: f64,
    pub income: f64,
    pub upkeep: f64,
}

impl LedgerEntry {
    /// Trailing net flow from the last economy pass
    pub fn net(&self) -> f64 {
        self.income - self.upkeep
    }
}

/// Empire-wide resource ledger
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceLedger {
    pub energy: LedgerEntry,
    pub minerals: LedgerEntry,
    pub food: LedgerEntry,
    pub research: LedgerEntry,
    pub influence: LedgerEntry,
}

pub fn clamp_amount(value: f64) -> f64 {
    value.clamp(0.0, AMOUNT_MAX)
}

pub fn clamp_flow(value: f64) -> f64 {
    value.clamp(-FLOW_LIMIT, FLOW_LIMIT)
}

impl ResourceLedger {
    pub fn new(starting: &ResourceAmounts) -> Self {
        let mut ledger = Self::default();
        for resource in Resource::ALL {
            ledger.entry_mut(resource).amount = clamp_amount(starting.get(resource));
        }
        ledger
    }

    pub fn entry(&self, resource: Resource) -> &LedgerEntry {
        match resource {
            Resource::Energy => &self.energy,
            Resource::Minerals => &self.minerals,
            Resource::Food => &self.food,
            Resource::Research => &self.research,
            Resource::Influence => &self.influence,
        }
    }

    pub fn entry_mut(&mut self, resource: Resource) -> &mut LedgerEntry {
        match resource {
            Resource::Energy => &mut self.energy,
            Resource::Minerals => &mut self.minerals,
            Resource::Food => &mut self.food,
            Resource::Research => &mut self.research,
            Resource::Influence => &mut self.influence,
        }
    }

    pub fn amount(&self, resource: Resource) -> f64 {
        self.entry(resource).amount
    }

    pub fn amounts(&self) -> ResourceAmounts {
        ResourceAmounts::zero().map(|r, _| self.amount(r))
    }

    /// Add a signed delta to a stored amount, clamped to the ledger bounds
    pub fn credit(&mut self, resource: Resource, delta: f64) {
        let entry = self.entry_mut(resource);
        entry.amount = clamp_amount(entry.amount + delta);
    }

    /// Check if the ledger covers every component of a cost
    pub fn can_afford(&self, cost: &ResourceAmounts) -> bool {
        Resource::ALL
            .iter()
            .all(|r| self.amount(*r) >= cost.get(*r))
    }

    /// Deduct a cost, returns false (and changes nothing) if unaffordable
    pub fn spend(&mut self, cost: &ResourceAmounts) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        for resource in Resource::ALL {
            self.credit(resource, -cost.get(resource));
        }
        true
    }

    /// Write clamped display flows for one resource
    pub fn record_flows(&mut self, resource: Resource, income: f64, upkeep: f64) {
        let entry = self.entry_mut(resource);
        entry.income = clamp_flow(income);
        entry.upkeep = clamp_flow(upkeep);
    }
}
