use bevy::prelude::*;

// --- Sub-modules for organization ---
mod components;
mod systems;

// Re-exported for the vehicle spawner, which attaches both.
pub use components::{ProbeTrace, ShowDebugGizmos};

use crate::prelude::AppState;

/// Ground probe gizmos and their hotkey. Needs a window and the gizmo
/// pipeline, so it is left out of headless runs.
pub struct DebuggingPlugin;

impl Plugin for DebuggingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (systems::toggle_probe_visuals, systems::draw_probe_traces)
                .chain()
                .run_if(in_state(AppState::Running)),
        );
    }
}
