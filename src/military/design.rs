//! Ship designs, templates and per-order customization

use serde::{Deserialize, Serialize};

use crate::economy::ledger::ResourceAmounts;

/// A base hull from the military catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipDesign {
    pub id: String,
    pub name: String,
    pub attack: f64,
    pub defense: f64,
    pub hull: f64,
    #[serde(default)]
    pub cost: ResourceAmounts,
    pub build_ticks: u32,
}

/// A saved refit that applies to exactly one base design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipTemplate {
    pub id: String,
    pub base_design: String,
    #[serde(default)]
    pub attack_bonus: f64,
    #[serde(default)]
    pub defense_bonus: f64,
    #[serde(default)]
    pub hull_bonus: f64,
    #[serde(default = "one")]
    pub cost_multiplier: f64,
}

/// One-off adjustments attached to a single build order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipCustomization {
    #[serde(default)]
    pub attack_bonus: f64,
    #[serde(default)]
    pub defense_bonus: f64,
    #[serde(default)]
    pub hull_bonus: f64,
    #[serde(default = "one")]
    pub cost_multiplier: f64,
}

impl Default for ShipCustomization {
    fn default() -> Self {
        Self {
            attack_bonus: 0.0,
            defense_bonus: 0.0,
            hull_bonus: 0.0,
            cost_multiplier: 1.0,
        }
    }
}

fn one() -> f64 {
    1.0
}

/// Final stats of a ship build after template and customization
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedDesign {
    pub design_id: String,
    pub attack_bonus: f64,
    pub defense_bonus: f64,
    pub hull: f64,
    pub cost: ResourceAmounts,
    pub build_ticks: u32,
}

/// Compose base design + template (only when its base matches) + customization
///
/// Stat bonuses are additive, cost multipliers compound.
pub fn compose_design(
    design: &ShipDesign,
    template: Option<&ShipTemplate>,
    customization: Option<&ShipCustomization>,
) -> ComposedDesign {
    let mut composed = ComposedDesign {
        design_id: design.id.clone(),
        attack_bonus: 0.0,
        defense_bonus: 0.0,
        hull: design.hull,
        cost: design.cost,
        build_ticks: design.build_ticks,
    };

    if let Some(template) = template.filter(|t| t.base_design == design.id) {
        composed.attack_bonus += template.attack_bonus;
        composed.defense_bonus += template.defense_bonus;
        composed.hull += template.hull_bonus;
        composed.cost = composed.cost * template.cost_multiplier;
    }

    if let Some(custom) = customization {
        composed.attack_bonus += custom.attack_bonus;
        composed.defense_bonus += custom.defense_bonus;
        composed.hull += custom.hull_bonus;
        composed.cost = composed.cost * custom.cost_multiplier;
    }

    composed.hull = composed.hull.max(1.0);
    composed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economy::ledger::Resource;

    fn corvette() -> ShipDesign {
        ShipDesign {
            id: "corvette".into(),
            name: "Corvette".into(),
            attack: 6.0,
            defense: 4.0,
            hull: 30.0,
            cost: ResourceAmounts::from_pairs(&[(Resource::Minerals, 40.0)]),
            build_ticks: 6,
        }
    }

    #[test]
    fn test_template_applies_only_to_matching_base() {
        let template = ShipTemplate {
            id: "bulwark".into(),
            base_design: "destroyer".into(),
            attack_bonus: 5.0,
            defense_bonus: 5.0,
            hull_bonus: 5.0,
            cost_multiplier: 2.0,
        };
        let composed = compose_design(&corvette(), Some(&template), None);
        assert_eq!(composed.attack_bonus, 0.0);
        assert_eq!(composed.hull, 30.0);
        assert_eq!(composed.cost.minerals, 40.0);
    }

    #[test]
    fn test_template_and_customization_stack() {
        let template = ShipTemplate {
            id: "raider".into(),
            base_design: "corvette".into(),
            attack_bonus: 3.0,
            defense_bonus: 0.0,
            hull_bonus: -5.0,
            cost_multiplier: 1.5,
        };
        let custom = ShipCustomization {
            attack_bonus: 1.0,
            defense_bonus: 2.0,
            hull_bonus: 10.0,
            cost_multiplier: 2.0,
        };
        let composed = compose_design(&corvette(), Some(&template), Some(&custom));
        assert_eq!(composed.attack_bonus, 4.0);
        assert_eq!(composed.defense_bonus, 2.0);
        assert_eq!(composed.hull, 35.0);
        assert_eq!(composed.cost.minerals, 120.0);
    }
}
