use crate::prelude::*;
use avian3d::prelude::*;

/// Floor slab thickness in meters. Its top face sits at height zero.
const FLOOR_THICKNESS: f32 = 0.2;

pub struct WorldSpawnerPlugin;

impl Plugin for WorldSpawnerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(AppState::SceneBuilding),
            (
                spawn_arena_floor
                    .in_set(SceneBuildSet::World)
                    .run_if(resource_exists::<ScenarioConfig>),
                // Only meaningful when something renders the scene.
                spawn_lighting_and_camera
                    .in_set(SceneBuildSet::World)
                    .run_if(resource_exists::<Assets<StandardMaterial>>),
            ),
        );
    }
}

/// Spawns the flat arena floor the cars drive and probe against.
fn spawn_arena_floor(
    mut commands: Commands,
    config: Res<ScenarioConfig>,
    meshes: Option<ResMut<Assets<Mesh>>>,
    materials: Option<ResMut<Assets<StandardMaterial>>>,
) {
    let size = config.world.floor_size;
    if !(size.is_finite() && size > 0.0) {
        error!("[SCENE] floor_size must be positive, got {size}; the arena has no floor.");
        return;
    }
    info!("[SCENE] Spawning {size} x {size} m arena floor.");

    let mut floor = commands.spawn((
        Name::new("Arena_Floor"),
        RigidBody::Static,
        Collider::cuboid(size, FLOOR_THICKNESS, size),
        Friction::new(0.7),
        Transform::from_xyz(0.0, -FLOOR_THICKNESS / 2.0, 0.0),
    ));

    if let (Some(mut meshes), Some(mut materials)) = (meshes, materials) {
        floor.insert((
            Mesh3d(meshes.add(Cuboid::new(size, FLOOR_THICKNESS, size))),
            MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
        ));
    }
}

fn spawn_lighting_and_camera(mut commands: Commands) {
    // --- Spawn Lighting ---
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            illuminance: 15_000.0,
            ..default()
        },
        Transform::from_xyz(10.0, 30.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // --- Spawn Camera ---
    // A static overview of the arena centre.
    let camera_transform = Transform::from_xyz(-30.0, 25.0, 30.0).looking_at(Vec3::ZERO, Vec3::Y);
    commands.spawn((Camera3d::default(), camera_transform));
}
