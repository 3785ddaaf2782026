// octane_sim/src/simulation/config/mod.rs

//! This module handles loading and validating the scenario configuration
//! from disk, with `OCTANE_`-prefixed environment overrides on top.

pub mod structs;

use std::path::Path;

use avian3d::prelude::Gravity;
use bevy::prelude::*;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use nalgebra::Vector3;

use crate::cli::Cli;
use crate::prelude::AppState;
use crate::simulation::core::transforms::enu_vector_to_bevy_vector;
pub use structs::ScenarioConfig;

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(AppState::Loading),
            (load_scenario, transition_to_scene_building)
                .chain()
                .run_if(resource_exists::<Cli>),
        );
    }
}

/// Layers the scenario file under environment overrides.
/// `OCTANE_VEHICLE__MAX_THROTTLE_SPEED=30` overrides `[vehicle] max_throttle_speed`.
pub fn scenario_figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("OCTANE_").split("__"))
}

impl ScenarioConfig {
    pub fn extract(figment: &Figment) -> Result<Self, figment::Error> {
        figment.extract()
    }
}

fn load_scenario(
    mut commands: Commands,
    cli: Res<Cli>,
    mut fixed_time: ResMut<Time<Fixed>>,
    mut gravity: ResMut<Gravity>,
    mut exit: EventWriter<AppExit>,
) {
    info!("Loading scenario from: {}", cli.scenario.display());

    let config = match ScenarioConfig::extract(&scenario_figment(&cli.scenario)) {
        Ok(config) => config,
        Err(e) => {
            error!(
                "Failed to load or parse scenario file at {}: {}",
                cli.scenario.display(),
                e
            );
            exit.write(AppExit::error());
            return;
        }
    };

    if config.simulation.fixed_hz.is_finite() && config.simulation.fixed_hz > 0.0 {
        fixed_time.set_timestep_hz(config.simulation.fixed_hz);
    } else {
        warn!(
            "Ignoring non-positive fixed_hz {}; keeping {:.1} Hz.",
            config.simulation.fixed_hz,
            1.0 / fixed_time.timestep().as_secs_f64()
        );
    }

    gravity.0 = enu_vector_to_bevy_vector(&Vector3::from(config.world.gravity));

    debug!("Resolved scenario: {:?}", config);
    commands.insert_resource(config);
}

fn transition_to_scene_building(mut next_state: ResMut<NextState<AppState>>) {
    info!("Configuration loading complete. Transitioning to SceneBuilding state.");
    next_state.set(AppState::SceneBuilding);
}
