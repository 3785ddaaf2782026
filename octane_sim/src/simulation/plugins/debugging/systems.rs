use bevy::color::palettes::css::{LIME, RED};
use bevy::prelude::*;

use super::components::{ProbeTrace, ShowDebugGizmos};

// =========================================================================
// == Toggle Systems (Hotkeys) ==
// =========================================================================

/// Toggles the `ShowDebugGizmos` component on every probing entity with the F3 key.
pub fn toggle_probe_visuals(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    query: Query<(Entity, Option<&ShowDebugGizmos>), With<ProbeTrace>>,
) {
    if !keyboard.just_pressed(KeyCode::F3) {
        return;
    }

    // Any visible probe means the next press hides all of them.
    let are_any_on = query.iter().any(|(_, gizmo_opt)| gizmo_opt.is_some());
    for (entity, gizmo_opt) in &query {
        if are_any_on {
            if gizmo_opt.is_some() {
                commands.entity(entity).remove::<ShowDebugGizmos>();
            }
        } else if gizmo_opt.is_none() {
            commands.entity(entity).insert(ShowDebugGizmos);
        }
    }
    info!(
        "[Debug] Toggled ground probe visuals {}",
        if are_any_on { "OFF" } else { "ON" }
    );
}

// =========================================================================
// == Drawing Systems ==
// =========================================================================

/// Draws the last ground probe of each flagged entity: green on a hit, red on a miss.
pub fn draw_probe_traces(
    mut gizmos: Gizmos,
    query: Query<&ProbeTrace, With<ShowDebugGizmos>>,
) {
    for probe in &query {
        let color = if probe.hit { LIME } else { RED };
        gizmos.line(probe.start, probe.end, color);
        gizmos.sphere(Isometry3d::from_translation(probe.end), 0.05, color);
    }
}
