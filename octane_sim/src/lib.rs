// octane_sim/src/lib.rs

use bevy::prelude::*;

// Import the plugins defined within the simulation crate.
use crate::simulation::config::ConfigPlugin;
use crate::simulation::core::simulation_setup::SimulationSetupPlugin;
use crate::simulation::plugins::debugging::DebuggingPlugin;
use crate::simulation::plugins::input::DriveInputPlugin;
use crate::simulation::plugins::vehicles::octane::OctaneCarPlugin;
use crate::simulation::plugins::world::spawner::WorldSpawnerPlugin;

// This prelude is for convenience for other files WITHIN the octane_sim crate.
pub mod prelude;

// This module contains all the simulation-specific logic.
pub mod cli;
pub mod simulation;

/// The main plugin that brings together all the simulation parts.
/// `main.rs` adds this one plugin to the Bevy App, after the physics plugins.
pub struct OctaneSimulationPlugin {
    /// Leaves out everything that needs a window or a GPU.
    pub headless: bool,
}

impl Plugin for OctaneSimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            // States, schedules and the drive input event.
            SimulationSetupPlugin,
            // Reads the scenario file and applies it to the app.
            ConfigPlugin,
            // Spawns the arena floor, lighting, camera.
            WorldSpawnerPlugin,
            // Spawns the car and runs its controller every fixed tick.
            OctaneCarPlugin,
            DriveInputPlugin,
        ));

        if !self.headless {
            app.add_plugins(DebuggingPlugin);
        }
    }
}
