// octane_sim/src/simulation/plugins/mod.rs

pub mod debugging;
pub mod input;
pub mod vehicles;
pub mod world;
