//! Stellar Dominion - deterministic tick engine for a space-empire strategy game

pub mod construction;
pub mod core;
pub mod diplomacy;
pub mod economy;
pub mod events;
pub mod exploration;
pub mod military;
pub mod progression;
pub mod session;
pub mod simulation;

pub use crate::core::config::SimConfig;
pub use crate::session::{Session, SessionSetup};
pub use crate::simulation::advance;
