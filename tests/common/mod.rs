#![allow(dead_code)]

use std::path::PathBuf;

use stellar_dominion::core::types::{EmpireId, SystemId, Vec2};
use stellar_dominion::session::galaxy::{StarClass, StarSystem};
use stellar_dominion::session::{AiEmpireSetup, Session, SessionSetup};
use stellar_dominion::SimConfig;

pub const PLAYER: EmpireId = EmpireId(1);
pub const VORN: EmpireId = EmpireId(2);

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

/// Default config with automation, AI initiative and events switched off
pub fn quiet_config() -> SimConfig {
    SimConfig::from_file(&fixture_path("quiet.toml")).expect("quiet fixture loads")
}

/// Five systems on a line, 10 units apart
///
/// 1 is the player home, 5 the Vorn home, 3 carries a habitable world.
pub fn line_systems(config: &SimConfig) -> Vec<StarSystem> {
    (1..=5)
        .map(|i| {
            let mut system = StarSystem::new(
                SystemId(i),
                format!("System {}", i),
                Vec2::new((i - 1) as f64 * 10.0, 0.0),
                StarClass::K,
            );
            if i == 3 {
                system.habitable_world = Some(config.homeworld.template.clone());
            }
            system
        })
        .collect()
}

pub fn setup(seed: u64) -> SessionSetup {
    SessionSetup {
        seed,
        player_name: "Terran Union".to_string(),
        player_home: SystemId(1),
        ai_empires: vec![AiEmpireSetup {
            name: "Vorn Hegemony".to_string(),
            home: Some(SystemId(5)),
        }],
    }
}

pub fn new_session(config: &SimConfig) -> Session {
    Session::new(config, line_systems(config), setup(11)).expect("session builds")
}

pub fn with_hostiles(mut session: Session, system: u32, power: f64) -> Session {
    if let Some(s) = session.galaxy.system_mut(SystemId(system)) {
        s.hostile_power = power;
    }
    session
}
