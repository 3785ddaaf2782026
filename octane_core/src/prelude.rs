// octane_core/src/prelude.rs

// --- Core Abstractions (The collaborator contracts of the library) ---
pub use crate::abstractions::{CollisionQuery, PhysicsBody};

// --- Core Data Structures ---
pub use crate::config::{RotationPolicy, VehicleConfig};
pub use crate::controller::{TickReport, VehicleController, VehicleState};
pub use crate::input::InputLatch;
pub use crate::math::Rotator;
pub use crate::probe::{GroundProbe, ProbeResult};

// --- Errors ---
pub use crate::error::{ConfigError, ProbeError};
