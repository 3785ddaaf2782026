// octane_sim/src/prelude.rs

// Re-export the entire Bevy prelude for convenience.
pub use bevy::prelude::*;

// Re-export the entire octane_core prelude so the controller, its config
// and the collaborator traits are in scope everywhere.
pub use octane_core::prelude::*;

// Re-export common simulation-specific types for easy access in other plugins.
pub use crate::simulation::config::structs::*;
pub use crate::simulation::core::app_state::{AppState, DriveSet, SceneBuildSet};
pub use crate::simulation::core::events::DriveInput;

pub use crate::simulation::plugins::vehicles::octane::{OctaneCar, OctaneCarPlugin};
