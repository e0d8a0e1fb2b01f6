//! Simulation configuration with built-in catalogs
//!
//! Every tuning constant and catalog the tick engine reads lives here. The
//! defaults describe a small but complete ruleset; hosts may override any
//! part from TOML or JSON. Call [`SimConfig::validate`] once before creating
//! a session.

use std::fs;
use std::path::Path;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::error::{ConfigError, Result};
use crate::core::types::DistrictKind;
use crate::economy::ledger::{Resource, ResourceAmounts};
use crate::economy::production::{DistrictDefinition, JobCatalog, JobYield};
use crate::events::{EventEffect, EventKind, EventOption, EventTemplate};
use crate::military::design::{ShipDesign, ShipTemplate};
use crate::progression::research::{EraDefinition, ResearchBranch, TechDefinition, TechTier};
use crate::progression::traditions::{PerkDefinition, TraditionTree};
use crate::session::planet::{PlanetKind, PlanetTemplate};

fn amounts(pairs: &[(Resource, f64)]) -> ResourceAmounts {
    ResourceAmounts::from_pairs(pairs)
}

/// Root configuration handed to every tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub economy: EconomyConfig,
    pub homeworld: HomeworldConfig,
    /// District catalog, a district's position is its [`DistrictKind`]
    pub districts: Vec<DistrictDefinition>,
    pub jobs: JobCatalog,
    pub morale: MoraleConfig,
    pub automation: AutomationConfig,
    pub colonization: ColonizationConfig,
    pub research: ResearchConfig,
    pub traditions: TraditionConfig,
    pub diplomacy: DiplomacyConfig,
    pub military: MilitaryConfig,
    pub exploration: ExplorationConfig,
    pub events: EventConfig,
    pub clock: ClockConfig,
}

// === ECONOMY ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Ledger amounts at session start
    pub starting: ResourceAmounts,
    /// Flat influence income added every netting pass
    pub influence_modifier: f64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting: amounts(&[
                (Resource::Energy, 100.0),
                (Resource::Minerals, 150.0),
                (Resource::Food, 80.0),
                (Resource::Research, 20.0),
                (Resource::Influence, 50.0),
            ]),
            influence_modifier: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartingDistrict {
    pub id: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeworldConfig {
    pub template: PlanetTemplate,
    pub workers: u32,
    pub specialists: u32,
    pub researchers: u32,
    pub stability: f64,
    pub districts: Vec<StartingDistrict>,
}

impl Default for HomeworldConfig {
    fn default() -> Self {
        Self {
            template: PlanetTemplate {
                kind: PlanetKind::Continental,
                size: 16,
                habitability: 0.8,
                base_production: amounts(&[
                    (Resource::Energy, 4.0),
                    (Resource::Minerals, 4.0),
                    (Resource::Food, 6.0),
                    (Resource::Research, 2.0),
                ]),
                base_upkeep: ResourceAmounts::zero(),
            },
            workers: 8,
            specialists: 2,
            researchers: 2,
            stability: 70.0,
            districts: vec![
                StartingDistrict { id: "generator".into(), count: 1 },
                StartingDistrict { id: "mining".into(), count: 1 },
                StartingDistrict { id: "agriculture".into(), count: 1 },
            ],
        }
    }
}

fn default_districts() -> Vec<DistrictDefinition> {
    let district = |id: &str, name: &str, production, upkeep, cost, build_ticks, requires_colonists| {
        DistrictDefinition {
            id: id.into(),
            name: name.into(),
            production,
            upkeep,
            cost,
            build_ticks,
            requires_colonists,
        }
    };
    vec![
        district(
            "generator",
            "Generator District",
            amounts(&[(Resource::Energy, 6.0)]),
            ResourceAmounts::zero(),
            amounts(&[(Resource::Minerals, 50.0)]),
            4,
            None,
        ),
        district(
            "mining",
            "Mining District",
            amounts(&[(Resource::Minerals, 6.0)]),
            amounts(&[(Resource::Energy, 1.0)]),
            amounts(&[(Resource::Minerals, 50.0)]),
            4,
            None,
        ),
        district(
            "agriculture",
            "Agriculture District",
            amounts(&[(Resource::Food, 6.0)]),
            amounts(&[(Resource::Energy, 1.0)]),
            amounts(&[(Resource::Minerals, 40.0)]),
            4,
            None,
        ),
        district(
            "research_lab",
            "Research Laboratory",
            amounts(&[(Resource::Research, 5.0)]),
            amounts(&[(Resource::Energy, 2.0)]),
            amounts(&[(Resource::Minerals, 80.0), (Resource::Energy, 20.0)]),
            6,
            Some(5),
        ),
        district(
            "administrative",
            "Administrative Complex",
            amounts(&[(Resource::Influence, 2.0)]),
            amounts(&[(Resource::Energy, 2.0)]),
            amounts(&[(Resource::Minerals, 100.0)]),
            8,
            Some(8),
        ),
    ]
}

fn default_jobs() -> JobCatalog {
    JobCatalog {
        worker: JobYield {
            production: amounts(&[
                (Resource::Energy, 1.0),
                (Resource::Minerals, 1.0),
                (Resource::Food, 2.0),
            ]),
            upkeep: amounts(&[(Resource::Food, 1.0)]),
        },
        specialist: JobYield {
            production: amounts(&[(Resource::Energy, 2.0), (Resource::Minerals, 2.0)]),
            upkeep: amounts(&[(Resource::Food, 1.0), (Resource::Energy, 0.5)]),
        },
        researcher: JobYield {
            production: amounts(&[(Resource::Research, 3.0)]),
            upkeep: amounts(&[(Resource::Food, 1.0), (Resource::Energy, 1.0)]),
        },
    }
}

/// Stability and happiness tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoraleConfig {
    /// Stability before penalties
    pub base_stability: f64,
    /// Lower bound for stability and happiness
    pub min: f64,
    /// Upper bound for stability and happiness
    pub max: f64,
    /// Comfortable population is `size / overcrowding_threshold`
    pub overcrowding_threshold: f64,
    /// Stability lost per colonist above the comfortable population
    pub crowding_penalty: f64,
    /// A resource below this stockpile counts as a deficit
    pub deficit_floor: f64,
    /// Stability lost per resource in deficit
    pub deficit_penalty: f64,
    /// Scaled by `1 - habitability`
    pub habitability_penalty: f64,
    pub specialist_bonus: f64,
    pub worker_penalty: f64,
}

impl Default for MoraleConfig {
    fn default() -> Self {
        Self {
            base_stability: 75.0,
            min: 0.0,
            max: 100.0,
            overcrowding_threshold: 2.0,
            crowding_penalty: 2.0,
            deficit_floor: 5.0,
            deficit_penalty: 10.0,
            habitability_penalty: 20.0,
            specialist_bonus: 1.0,
            worker_penalty: 0.5,
        }
    }
}

/// Population job automation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomationConfig {
    pub enabled: bool,
    /// Resources are balanced in this order
    pub priorities: Vec<Resource>,
    /// Net below `-deficit_threshold` triggers promotions
    pub deficit_threshold: f64,
    /// Net above this triggers demotions
    pub surplus_threshold: f64,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            priorities: vec![
                Resource::Food,
                Resource::Energy,
                Resource::Minerals,
                Resource::Research,
                Resource::Influence,
            ],
            deficit_threshold: 1.0,
            surplus_threshold: 25.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColonizationConfig {
    pub cost: ResourceAmounts,
    pub build_ticks: u32,
    pub starting_population: u32,
    pub starting_stability: f64,
}

impl Default for ColonizationConfig {
    fn default() -> Self {
        Self {
            cost: amounts(&[
                (Resource::Minerals, 100.0),
                (Resource::Food, 30.0),
                (Resource::Influence, 20.0),
            ]),
            build_ticks: 6,
            starting_population: 2,
            starting_stability: 50.0,
        }
    }
}

// === PROGRESSION ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchConfig {
    /// Research points per unit of research income, before the branch split
    pub points_per_income: f64,
    pub eras: Vec<EraDefinition>,
    pub techs: Vec<TechDefinition>,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        use ResearchBranch::*;
        use TechTier::*;

        let tech = |id: &str, name: &str, branch, era, cost, tier, prereqs: &[&str], group: Option<&str>| {
            TechDefinition {
                id: id.into(),
                name: name.into(),
                branch,
                era,
                cost,
                prerequisites: prereqs.iter().map(|p| p.to_string()).collect(),
                exclusive_group: group.map(str::to_string),
                tier,
            }
        };

        Self {
            points_per_income: 1.0,
            eras: vec![
                EraDefinition { id: 1, name: "Foundations".into(), gateway_techs: vec![] },
                EraDefinition {
                    id: 2,
                    name: "Expansion".into(),
                    gateway_techs: vec![
                        "physics_basics".into(),
                        "lasers".into(),
                        "xenobiology".into(),
                        "industrial_basics".into(),
                        "ship_frames".into(),
                    ],
                },
                EraDefinition {
                    id: 3,
                    name: "Ascendancy".into(),
                    gateway_techs: vec![
                        "deflectors".into(),
                        "planetary_unification".into(),
                        "battleship_hulls".into(),
                    ],
                },
            ],
            techs: vec![
                tech("physics_basics", "Applied Physics", Physics, 1, 30.0, Foundation, &[], None),
                tech("lasers", "Focused Lasers", Physics, 1, 45.0, Feature, &["physics_basics"], None),
                tech("fusion_power", "Fusion Power", Physics, 1, 60.0, Standard, &[], Some("energy_doctrine")),
                tech("antimatter_power", "Antimatter Power", Physics, 1, 60.0, Standard, &[], Some("energy_doctrine")),
                tech("deflectors", "Deflector Screens", Physics, 2, 120.0, Feature, &["lasers"], None),
                tech("zero_point", "Zero-Point Energy", Physics, 3, 300.0, Rare, &["deflectors"], None),
                tech("xenobiology", "Xenobiology", Society, 1, 30.0, Foundation, &[], None),
                tech("colonial_charter", "Colonial Charter", Society, 1, 45.0, Feature, &[], None),
                tech("planetary_unification", "Planetary Unification", Society, 2, 100.0, Standard, &["colonial_charter"], None),
                tech("galactic_senate", "Galactic Senate", Society, 3, 250.0, Rare, &[], None),
                tech("industrial_basics", "Industrial Basics", Engineering, 1, 30.0, Foundation, &[], None),
                tech("ship_frames", "Reinforced Ship Frames", Engineering, 1, 45.0, Feature, &[], None),
                tech("automated_mining", "Automated Mining", Engineering, 1, 60.0, Standard, &["industrial_basics"], None),
                tech("battleship_hulls", "Battleship Hulls", Engineering, 2, 150.0, Feature, &["ship_frames"], None),
                tech("megastructures", "Megastructures", Engineering, 3, 300.0, Rare, &["battleship_hulls"], None),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraditionConfig {
    /// Tradition points per unit of influence income, before the tree split
    pub points_per_income: f64,
    pub perks: Vec<PerkDefinition>,
}

impl Default for TraditionConfig {
    fn default() -> Self {
        use TraditionTree::*;

        let perk = |id: &str, name: &str, tree, cost, prereqs: &[&str], group: Option<&str>, influence_bonus| {
            PerkDefinition {
                id: id.into(),
                name: name.into(),
                tree,
                cost,
                prerequisites: prereqs.iter().map(|p| p.to_string()).collect(),
                exclusive_group: group.map(str::to_string),
                influence_bonus,
            }
        };

        Self {
            points_per_income: 1.0,
            perks: vec![
                perk("frontier_spirit", "Frontier Spirit", Expansion, 40.0, &[], None, 0.5),
                perk("pioneer_logistics", "Pioneer Logistics", Expansion, 60.0, &["frontier_spirit"], None, 0.0),
                perk("diplomatic_corps", "Diplomatic Corps", Prosperity, 40.0, &[], None, 1.0),
                perk("trade_guilds", "Trade Guilds", Prosperity, 60.0, &["diplomatic_corps"], None, 0.5),
                perk("open_council", "Open Council", Prosperity, 40.0, &[], Some("governance"), 1.0),
                perk("martial_code", "Martial Code", Supremacy, 40.0, &[], Some("governance"), 0.0),
                perk("war_doctrine", "War Doctrine", Supremacy, 80.0, &["martial_code"], None, 0.0),
            ],
        }
    }
}

// === DIPLOMACY ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarZoneConfig {
    /// Systems boosted per war declaration
    pub count: usize,
    pub power_min: f64,
    pub power_max: f64,
    /// Added to every zone of an ongoing war each tick
    pub intensify_per_tick: f64,
    /// Intensification never pushes a zone above this
    pub max_zone_power: f64,
}

impl Default for WarZoneConfig {
    fn default() -> Self {
        Self {
            count: 2,
            power_min: 5.0,
            power_max: 15.0,
            intensify_per_tick: 0.5,
            max_zone_power: 60.0,
        }
    }
}

/// AI war-fleet sizing, scaled by hostile system count and galaxy threat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiFleetConfig {
    pub design_id: String,
    pub base_ships: f64,
    pub ships_per_hostile: f64,
    /// Galaxy threat worth one extra ship
    pub threat_per_ship: f64,
    pub max_ships: u32,
    pub base_attack_bonus: f64,
    pub bonus_per_hostile: f64,
    pub bonus_per_threat: f64,
    pub max_attack_bonus: f64,
    /// Ships added to an understrength fleet per tick
    pub reinforce_per_tick: u32,
}

impl Default for AiFleetConfig {
    fn default() -> Self {
        Self {
            design_id: "corvette".into(),
            base_ships: 2.0,
            ships_per_hostile: 0.5,
            threat_per_ship: 40.0,
            max_ships: 8,
            base_attack_bonus: 1.0,
            bonus_per_hostile: 0.25,
            bonus_per_threat: 0.02,
            max_attack_bonus: 6.0,
            reinforce_per_tick: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiplomacyConfig {
    /// Ticks between opinion checks
    pub check_interval: u64,
    pub opinion_drift: f64,
    /// AI at peace declares war at or below this opinion
    pub war_threshold: f64,
    /// AI at war signs peace at or above this opinion
    pub peace_threshold: f64,
    /// Player fleet power that fully deters AI hostility
    pub deterrence_power: f64,
    /// Passes between AI expansion claims, 1 claims on every pass
    pub ai_expansion_interval: u64,
    pub war_event_limit: usize,
    pub war_zones: WarZoneConfig,
    pub ai_fleet: AiFleetConfig,
}

impl Default for DiplomacyConfig {
    fn default() -> Self {
        Self {
            check_interval: 5,
            opinion_drift: 2.0,
            war_threshold: -50.0,
            peace_threshold: 20.0,
            deterrence_power: 60.0,
            ai_expansion_interval: 1,
            war_event_limit: 12,
            war_zones: WarZoneConfig::default(),
            ai_fleet: AiFleetConfig::default(),
        }
    }
}

// === MILITARY ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipyardConfig {
    /// Cost of the shipyard structure itself
    pub build_cost: ResourceAmounts,
    pub build_ticks: u32,
    /// Maximum queued ship builds per system
    pub queue_size: usize,
}

impl Default for ShipyardConfig {
    fn default() -> Self {
        Self {
            build_cost: amounts(&[(Resource::Minerals, 120.0), (Resource::Energy, 30.0)]),
            build_ticks: 10,
            queue_size: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MilitaryConfig {
    pub designs: Vec<ShipDesign>,
    pub templates: Vec<ShipTemplate>,
    pub shipyard: ShipyardConfig,
    /// Added to every non-zero travel estimate
    pub base_travel_ticks: f64,
    /// Distance covered per tick
    pub travel_distance_scale: f64,
    /// Design ids of the player's first fleet
    pub starting_fleet: Vec<String>,
}

impl Default for MilitaryConfig {
    fn default() -> Self {
        let design = |id: &str, name: &str, attack, defense, hull, cost, build_ticks| ShipDesign {
            id: id.into(),
            name: name.into(),
            attack,
            defense,
            hull,
            cost,
            build_ticks,
        };
        Self {
            designs: vec![
                design(
                    "corvette",
                    "Corvette",
                    8.0,
                    4.0,
                    30.0,
                    amounts(&[(Resource::Minerals, 40.0), (Resource::Energy, 10.0)]),
                    3,
                ),
                design(
                    "destroyer",
                    "Destroyer",
                    14.0,
                    8.0,
                    60.0,
                    amounts(&[(Resource::Minerals, 80.0), (Resource::Energy, 20.0)]),
                    5,
                ),
                design(
                    "cruiser",
                    "Cruiser",
                    24.0,
                    14.0,
                    110.0,
                    amounts(&[(Resource::Minerals, 150.0), (Resource::Energy, 40.0)]),
                    8,
                ),
            ],
            templates: vec![
                ShipTemplate {
                    id: "raider".into(),
                    base_design: "corvette".into(),
                    attack_bonus: 3.0,
                    defense_bonus: 0.0,
                    hull_bonus: -5.0,
                    cost_multiplier: 1.1,
                },
                ShipTemplate {
                    id: "bulwark".into(),
                    base_design: "destroyer".into(),
                    attack_bonus: 0.0,
                    defense_bonus: 4.0,
                    hull_bonus: 20.0,
                    cost_multiplier: 1.25,
                },
            ],
            shipyard: ShipyardConfig::default(),
            base_travel_ticks: 1.0,
            travel_distance_scale: 10.0,
            starting_fleet: vec!["corvette".into(), "corvette".into(), "corvette".into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorationConfig {
    /// Ticks spent surveying after arrival
    pub survey_ticks: u32,
}

impl Default for ExplorationConfig {
    fn default() -> Self {
        Self { survey_ticks: 3 }
    }
}

// === EVENTS ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    pub narrative_interval: u64,
    pub anomaly_interval: u64,
    pub crisis_interval: u64,
    /// Spawned events beyond this many waiting are discarded
    pub max_queued: usize,
    pub narrative: Vec<EventTemplate>,
    pub anomaly: Vec<EventTemplate>,
    pub crisis: Vec<EventTemplate>,
}

impl EventConfig {
    pub fn catalog(&self, kind: EventKind) -> &[EventTemplate] {
        match kind {
            EventKind::Narrative => &self.narrative,
            EventKind::Anomaly => &self.anomaly,
            EventKind::Crisis => &self.crisis,
        }
    }
}

impl Default for EventConfig {
    fn default() -> Self {
        let option = |label: &str, effects: Vec<EventEffect>| EventOption {
            label: label.into(),
            effects,
        };
        let template = |id: &str, title: &str, description: &str, options| EventTemplate {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            options,
        };

        Self {
            narrative_interval: 15,
            anomaly_interval: 20,
            crisis_interval: 60,
            max_queued: 3,
            narrative: vec![
                template(
                    "founding_festival",
                    "Founding Festival",
                    "Citizens celebrate the anniversary of the first colony.",
                    vec![
                        option("Fund the celebrations", vec![
                            EventEffect::Resource { resource: Resource::Energy, amount: -20.0 },
                            EventEffect::Stability { amount: 5.0 },
                        ]),
                        option("Keep it modest", vec![EventEffect::Nothing]),
                    ],
                ),
                template(
                    "envoy_arrival",
                    "A Curious Envoy",
                    "A lone envoy requests an audience with the council.",
                    vec![
                        option("Receive the envoy", vec![EventEffect::Influence { amount: 15.0 }]),
                        option("Study their vessel", vec![EventEffect::Insight {
                            note: "envoy_vessel".into(),
                        }]),
                    ],
                ),
            ],
            anomaly: vec![
                template(
                    "derelict_station",
                    "Derelict Station",
                    "Scans reveal an abandoned station drifting in orbit.",
                    vec![
                        option("Salvage it", vec![
                            EventEffect::Resource { resource: Resource::Minerals, amount: 60.0 },
                        ]),
                        option("Download its archives", vec![
                            EventEffect::Resource { resource: Resource::Research, amount: 40.0 },
                        ]),
                    ],
                ),
                template(
                    "dormant_drones",
                    "Dormant Drones",
                    "Old defense drones stir as our survey team approaches.",
                    vec![
                        option("Withdraw", vec![EventEffect::Nothing]),
                        option("Harvest their cores", vec![
                            EventEffect::Resource { resource: Resource::Energy, amount: 50.0 },
                            EventEffect::SpawnHostiles { system_id: None, power: 12.0 },
                        ]),
                    ],
                ),
            ],
            crisis: vec![template(
                "void_swarm",
                "Void Swarm",
                "A swarm of void creatures descends on the region.",
                vec![
                    option("Rally the fleet", vec![
                        EventEffect::SpawnHostiles { system_id: None, power: 30.0 },
                        EventEffect::Stability { amount: -5.0 },
                    ]),
                    option("Evacuate", vec![
                        EventEffect::Stability { amount: -15.0 },
                        EventEffect::Resource { resource: Resource::Food, amount: -30.0 },
                    ]),
                ],
            )],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub days_per_tick: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { days_per_tick: 1.0 }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            economy: EconomyConfig::default(),
            homeworld: HomeworldConfig::default(),
            districts: default_districts(),
            jobs: default_jobs(),
            morale: MoraleConfig::default(),
            automation: AutomationConfig::default(),
            colonization: ColonizationConfig::default(),
            research: ResearchConfig::default(),
            traditions: TraditionConfig::default(),
            diplomacy: DiplomacyConfig::default(),
            military: MilitaryConfig::default(),
            exploration: ExplorationConfig::default(),
            events: EventConfig::default(),
            clock: ClockConfig::default(),
        }
    }
}

fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::Invalid(message()))
    }
}

fn ensure_unique<'a>(label: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = AHashSet::new();
    for id in ids {
        ensure(seen.insert(id), || format!("duplicate {} id '{}'", label, id))?;
    }
    Ok(())
}

impl SimConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Load from a `.toml` or `.json` file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&contents),
            Some("json") => Self::from_json_str(&contents),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn district(&self, kind: DistrictKind) -> Option<&DistrictDefinition> {
        self.districts.get(kind.index())
    }

    pub fn district_kind(&self, id: &str) -> Option<DistrictKind> {
        self.districts
            .iter()
            .position(|d| d.id == id)
            .and_then(|idx| u16::try_from(idx).ok())
            .map(DistrictKind)
    }

    pub fn design(&self, id: &str) -> Option<&ShipDesign> {
        self.military.designs.iter().find(|d| d.id == id)
    }

    pub fn template(&self, id: &str) -> Option<&ShipTemplate> {
        self.military.templates.iter().find(|t| t.id == id)
    }

    pub fn tech(&self, id: &str) -> Option<&TechDefinition> {
        self.research.techs.iter().find(|t| t.id == id)
    }

    pub fn perk(&self, id: &str) -> Option<&PerkDefinition> {
        self.traditions.perks.iter().find(|p| p.id == id)
    }

    /// Check internal consistency of the catalogs and thresholds
    pub fn validate(&self) -> Result<()> {
        ensure(self.morale.min <= self.morale.max, || {
            format!("morale.min ({}) > morale.max ({})", self.morale.min, self.morale.max)
        })?;
        ensure(self.morale.overcrowding_threshold > 0.0, || {
            "morale.overcrowding_threshold must be positive".to_string()
        })?;
        ensure(self.districts.len() <= u16::MAX as usize, || {
            "too many districts".to_string()
        })?;

        ensure_unique("district", self.districts.iter().map(|d| d.id.as_str()))?;
        ensure_unique("tech", self.research.techs.iter().map(|t| t.id.as_str()))?;
        ensure_unique("perk", self.traditions.perks.iter().map(|p| p.id.as_str()))?;
        ensure_unique("design", self.military.designs.iter().map(|d| d.id.as_str()))?;
        ensure_unique("template", self.military.templates.iter().map(|t| t.id.as_str()))?;

        let mut era_ids = AHashSet::new();
        for era in &self.research.eras {
            ensure(era_ids.insert(era.id), || format!("duplicate era id {}", era.id))?;
            for gateway in &era.gateway_techs {
                ensure(self.tech(gateway).is_some(), || {
                    format!("era {} gateway '{}' is not a known tech", era.id, gateway)
                })?;
            }
        }

        for tech in &self.research.techs {
            ensure(era_ids.contains(&tech.era), || {
                format!("tech '{}' references unknown era {}", tech.id, tech.era)
            })?;
            for prereq in &tech.prerequisites {
                let same_branch = self.tech(prereq).is_some_and(|p| p.branch == tech.branch);
                ensure(same_branch, || {
                    format!("tech '{}' prerequisite '{}' is unknown or on another branch", tech.id, prereq)
                })?;
            }
        }

        for perk in &self.traditions.perks {
            for prereq in &perk.prerequisites {
                let same_tree = self.perk(prereq).is_some_and(|p| p.tree == perk.tree);
                ensure(same_tree, || {
                    format!("perk '{}' prerequisite '{}' is unknown or on another tree", perk.id, prereq)
                })?;
            }
        }

        for template in &self.military.templates {
            ensure(self.design(&template.base_design).is_some(), || {
                format!("template '{}' base design '{}' is unknown", template.id, template.base_design)
            })?;
        }
        for id in &self.military.starting_fleet {
            ensure(self.design(id).is_some(), || format!("starting fleet design '{}' is unknown", id))?;
        }
        ensure(self.design(&self.diplomacy.ai_fleet.design_id).is_some(), || {
            format!("AI fleet design '{}' is unknown", self.diplomacy.ai_fleet.design_id)
        })?;
        ensure(self.military.travel_distance_scale > 0.0, || {
            "military.travel_distance_scale must be positive".to_string()
        })?;

        for district in &self.homeworld.districts {
            ensure(self.district_kind(&district.id).is_some(), || {
                format!("homeworld district '{}' is unknown", district.id)
            })?;
        }

        let zones = &self.diplomacy.war_zones;
        ensure(zones.power_min <= zones.power_max, || {
            format!("war_zones.power_min ({}) > power_max ({})", zones.power_min, zones.power_max)
        })?;
        ensure(self.diplomacy.ai_fleet.threat_per_ship > 0.0, || {
            "ai_fleet.threat_per_ship must be positive".to_string()
        })?;

        for (name, interval) in [
            ("diplomacy.check_interval", self.diplomacy.check_interval),
            ("diplomacy.ai_expansion_interval", self.diplomacy.ai_expansion_interval),
            ("events.narrative_interval", self.events.narrative_interval),
            ("events.anomaly_interval", self.events.anomaly_interval),
            ("events.crisis_interval", self.events.crisis_interval),
        ] {
            ensure(interval > 0, || format!("{} must be positive", name))?;
        }

        Ok(())
    }
}
