// octane_sim/src/main.rs

//! Runs one Octane scenario.
//!
//! ```text
//! cargo run -p octane_sim -- --scenario assets/scenarios/octane_arena.toml
//! cargo run -p octane_sim -- --headless
//! ```

use std::time::Duration;

use avian3d::prelude::*;
use bevy::{
    app::ScheduleRunnerPlugin, log::LogPlugin, render::mesh::MeshPlugin, scene::ScenePlugin,
    state::app::StatesPlugin,
};
use clap::Parser;
use octane_sim::{cli::Cli, prelude::*, OctaneSimulationPlugin};

// A good filter for focusing on our crates' logs during development.
const LOG_FILTER: &str = "info,wgpu_core=error,wgpu_hal=error,octane_sim=debug,octane_core=debug";

fn main() -> AppExit {
    let cli = Cli::parse();
    let headless = cli.headless;

    let mut app = App::new();
    let log = LogPlugin {
        level: bevy::log::Level::INFO,
        filter: LOG_FILTER.to_string(),
        ..default()
    };

    if headless {
        app.add_plugins((
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / 60.0,
            ))),
            log,
            TransformPlugin,
            AssetPlugin::default(),
            MeshPlugin,
            ScenePlugin,
            StatesPlugin,
        ));
    } else {
        app.add_plugins(DefaultPlugins.set(log));
    }

    app.add_plugins(PhysicsPlugins::default())
        // The scenario path is read by the config plugin on startup.
        .insert_resource(cli)
        .add_plugins(OctaneSimulationPlugin { headless });

    app.run()
}
