// octane_sim/src/simulation/plugins/vehicles/mod.rs

pub mod avian_body;
pub mod octane;
