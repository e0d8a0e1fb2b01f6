//! Fixed demonstration galaxy for headless runs and benchmarks
//!
//! Twelve systems on a loose spiral with two AI neighbours. Real hosts feed
//! the session from their own galaxy generator instead.

use crate::core::config::SimConfig;
use crate::core::types::{SystemId, Vec2};
use crate::session::galaxy::{StarClass, StarSystem};
use crate::session::planet::{PlanetKind, PlanetTemplate};
use crate::session::{AiEmpireSetup, SessionSetup};

const NAMES: [&str; 12] = [
    "Sol", "Vega", "Altair", "Deneb", "Rigel", "Tarsis", "Kepler", "Mira", "Castor", "Lyra", "Orin", "Thule",
];

const CLASSES: [StarClass; 6] = [StarClass::G, StarClass::K, StarClass::M, StarClass::F, StarClass::A, StarClass::M];

pub fn demo_systems(config: &SimConfig) -> Vec<StarSystem> {
    NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let angle = i as f64 * 0.9;
            let radius = 12.0 + i as f64 * 6.0;
            let mut system = StarSystem::new(
                SystemId(i as u32 + 1),
                *name,
                Vec2::new(radius * angle.cos(), radius * angle.sin()),
                CLASSES[i % CLASSES.len()],
            );
            if i % 3 == 2 {
                system.habitable_world = Some(PlanetTemplate {
                    kind: if i % 2 == 0 { PlanetKind::Ocean } else { PlanetKind::Arid },
                    size: 10 + i as u32,
                    habitability: 0.5 + (i % 4) as f64 * 0.1,
                    ..config.homeworld.template.clone()
                });
            }
            if i % 4 == 3 {
                system.hostile_power = 6.0 + i as f64;
            }
            system
        })
        .collect()
}

pub fn demo_setup(seed: u64) -> SessionSetup {
    SessionSetup {
        seed,
        player_name: "Terran Union".to_string(),
        player_home: SystemId(1),
        ai_empires: vec![
            AiEmpireSetup {
                name: "Vorn Hegemony".to_string(),
                home: Some(SystemId(7)),
            },
            AiEmpireSetup {
                name: "Lyran Compact".to_string(),
                home: Some(SystemId(10)),
            },
        ],
    }
}
