// octane_sim/src/simulation/core/simulation_setup.rs

use crate::prelude::*;
use crate::simulation::core::events::DriveInput;

pub struct SimulationSetupPlugin;

impl Plugin for SimulationSetupPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            // Input actions reach the controller in FixedUpdate. Held controls are
        // sampled there too; one-shot presses may arrive from Update.
            .add_event::<DriveInput>();

        // --- CONFIGURE THE SPAWNING PIPELINE ---
        // This chain of SystemSets guarantees the correct spawning order.
        app.configure_sets(
            OnEnter(AppState::SceneBuilding),
            (
                SceneBuildSet::World,
                SceneBuildSet::Vehicle,
                SceneBuildSet::Finalize,
            )
                .chain(),
        );

        app.add_systems(
            OnEnter(AppState::SceneBuilding),
            transition_to_running.in_set(SceneBuildSet::Finalize),
        );

        // Configure the runtime schedule graph. Avian steps in FixedPostUpdate,
        // so every drive set has finished before the physics step consumes the
        // forces it produced.
        app.configure_sets(
            FixedUpdate,
            (
                DriveSet::Sample,
                DriveSet::Input,
                DriveSet::Control,
                DriveSet::Telemetry,
            )
                .chain()
                .run_if(in_state(AppState::Running)),
        );

        app.add_systems(
            Update,
            exit_after_duration
                .run_if(in_state(AppState::Running))
                .run_if(resource_exists::<ScenarioConfig>),
        );
    }
}

/// This simple system runs once at the end of the `OnEnter(SceneBuilding)` chain.
/// Its only job is to move the app into the main `Running` state.
fn transition_to_running(mut next_state: ResMut<NextState<AppState>>) {
    info!("Scene building complete. Transitioning to Running state.");
    next_state.set(AppState::Running);
}

fn exit_after_duration(
    time: Res<Time>,
    config: Res<ScenarioConfig>,
    mut exit: EventWriter<AppExit>,
    mut requested: Local<bool>,
) {
    let Some(duration) = config.simulation.duration_seconds else {
        return;
    };
    if !*requested && time.elapsed_secs() >= duration {
        info!("Scenario duration of {duration:.1}s elapsed. Exiting.");
        exit.write(AppExit::Success);
        *requested = true;
    }
}
