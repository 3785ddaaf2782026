// octane_sim/src/simulation/core/mod.rs

pub mod app_state;
pub mod events;
pub mod simulation_setup;
pub mod transforms;
