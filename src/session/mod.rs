//! Session - the complete state of one running game
//!
//! A session is a plain value: the tick transform and every command take a
//! `&Session` and hand back a new one. The random generator lives inside the
//! session so replaying the same inputs always yields the same output.

pub mod clock;
pub mod demo;
pub mod empire;
pub mod fleet;
pub mod galaxy;
pub mod history;
pub mod planet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::construction::ConstructionQueues;
use crate::core::config::SimConfig;
use crate::core::error::{ConfigError, Result};
use crate::core::types::{EmpireId, FleetId, IdAllocator, PlanetId, ScienceShipId, SystemId};
use crate::diplomacy::DiplomacyState;
use crate::economy::ResourceLedger;
use crate::events::EventState;
use crate::military::design::compose_design;
use crate::progression::{ResearchState, TraditionState};

use clock::Clock;
use empire::Empire;
use fleet::{Fleet, FleetShip, ScienceShip};
use galaxy::{Galaxy, ShipyardState, StarSystem, Visibility};
use history::HistoryLog;
use planet::{Planet, Population};

/// The player empire always takes the first id
pub const PLAYER_EMPIRE_ID: EmpireId = EmpireId(1);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiEmpireSetup {
    pub name: String,
    pub home: Option<SystemId>,
}

/// Everything needed to start a session besides the config and the galaxy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSetup {
    pub seed: u64,
    pub player_name: String,
    pub player_home: SystemId,
    pub ai_empires: Vec<AiEmpireSetup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub clock: Clock,
    pub galaxy: Galaxy,
    pub player_id: EmpireId,
    pub empires: Vec<Empire>,
    pub ledger: ResourceLedger,
    pub planets: Vec<Planet>,
    pub research: ResearchState,
    pub traditions: TraditionState,
    pub fleets: Vec<Fleet>,
    pub science_ships: Vec<ScienceShip>,
    pub construction: ConstructionQueues,
    pub diplomacy: DiplomacyState,
    pub events: EventState,
    pub history: HistoryLog,
    pub ids: IdAllocator,
    pub rng: ChaCha8Rng,
}

impl Session {
    /// Build a fresh session around an externally generated galaxy
    pub fn new(config: &SimConfig, systems: Vec<StarSystem>, setup: SessionSetup) -> Result<Self> {
        config.validate()?;

        let mut galaxy = Galaxy::new(systems);
        let home = setup.player_home;
        if galaxy.system(home).is_none() {
            return Err(ConfigError::Invalid(format!("player home {} is not in the galaxy", home)));
        }
        for ai in &setup.ai_empires {
            match ai.home {
                Some(id) if id == home => {
                    return Err(ConfigError::Invalid(format!("{} shares the player home system", ai.name)));
                }
                Some(id) if galaxy.system(id).is_none() => {
                    return Err(ConfigError::Invalid(format!("{} home {} is not in the galaxy", ai.name, id)));
                }
                _ => {}
            }
        }

        let player_id = PLAYER_EMPIRE_ID;
        let mut empires = vec![Empire::player(player_id, setup.player_name.as_str(), home)];
        for (offset, ai) in setup.ai_empires.iter().enumerate() {
            let id = EmpireId(player_id.0 + 1 + offset as u32);
            empires.push(Empire::ai(id, ai.name.as_str(), ai.home));
            if let Some(system) = ai.home.and_then(|h| galaxy.system_mut(h)) {
                system.owner_id = Some(id);
            }
        }

        if let Some(system) = galaxy.system_mut(home) {
            system.owner_id = Some(player_id);
            system.reveal_to(Visibility::Surveyed);
            system.shipyard = ShipyardState::Built;
            system.hostile_power = 0.0;
        }

        let mut ids = IdAllocator::new();
        let homeworld = &config.homeworld;
        let mut planet = Planet::from_template(
            ids.next_planet(),
            home,
            &homeworld.template,
            Population::new(homeworld.workers, homeworld.specialists, homeworld.researchers),
            homeworld.stability,
        );
        for starting in &homeworld.districts {
            let kind = config
                .district_kind(&starting.id)
                .ok_or_else(|| ConfigError::Invalid(format!("unknown homeworld district {}", starting.id)))?;
            planet.districts.add(kind, starting.count);
        }

        let mut guard = Fleet::new(ids.next_fleet(), player_id, "Home Guard", home);
        guard.anchor_system_id = Some(home);
        for design_id in &config.military.starting_fleet {
            let design = config
                .design(design_id)
                .ok_or_else(|| ConfigError::Invalid(format!("unknown starting design {}", design_id)))?;
            guard.ships.push(FleetShip::from_composed(&compose_design(design, None, None)));
        }

        let surveyor = ScienceShip {
            id: ids.next_science_ship(),
            name: "Surveyor".to_string(),
            system_id: home,
            mission: None,
        };

        tracing::info!(
            seed = setup.seed,
            systems = galaxy.systems.len(),
            ai_empires = setup.ai_empires.len(),
            "Session created"
        );

        Ok(Self {
            clock: Clock::new(),
            galaxy,
            player_id,
            empires,
            ledger: ResourceLedger::new(&config.economy.starting),
            planets: vec![planet],
            research: ResearchState::new(config),
            traditions: TraditionState::new(),
            fleets: vec![guard],
            science_ships: vec![surveyor],
            construction: ConstructionQueues::new(),
            diplomacy: DiplomacyState::new(),
            events: EventState::new(),
            history: HistoryLog::new(),
            ids,
            rng: ChaCha8Rng::seed_from_u64(setup.seed),
        })
    }

    pub fn player(&self) -> Option<&Empire> {
        self.empire(self.player_id)
    }

    pub fn empire(&self, id: EmpireId) -> Option<&Empire> {
        self.empires.iter().find(|e| e.id == id)
    }

    pub fn empire_mut(&mut self, id: EmpireId) -> Option<&mut Empire> {
        self.empires.iter_mut().find(|e| e.id == id)
    }

    pub fn planet(&self, id: PlanetId) -> Option<&Planet> {
        self.planets.iter().find(|p| p.id == id)
    }

    pub fn planet_mut(&mut self, id: PlanetId) -> Option<&mut Planet> {
        self.planets.iter_mut().find(|p| p.id == id)
    }

    pub fn fleet(&self, id: FleetId) -> Option<&Fleet> {
        self.fleets.iter().find(|f| f.id == id)
    }

    pub fn fleet_mut(&mut self, id: FleetId) -> Option<&mut Fleet> {
        self.fleets.iter_mut().find(|f| f.id == id)
    }

    pub fn science_ship(&self, id: ScienceShipId) -> Option<&ScienceShip> {
        self.science_ships.iter().find(|s| s.id == id)
    }

    pub fn science_ship_mut(&mut self, id: ScienceShipId) -> Option<&mut ScienceShip> {
        self.science_ships.iter_mut().find(|s| s.id == id)
    }

    /// Combined attack power of every player fleet, the deterrence input
    pub fn player_fleet_power(&self, config: &SimConfig) -> f64 {
        player_fleet_power(&self.fleets, self.player_id, config)
    }
}

pub(crate) fn player_fleet_power(fleets: &[Fleet], player_id: EmpireId, config: &SimConfig) -> f64 {
    fleets
        .iter()
        .filter(|f| f.owner_id == player_id)
        .map(|f| f.attack_power(config))
        .sum()
}
