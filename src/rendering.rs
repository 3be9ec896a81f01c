//! Rendering: camera, lights, per-part visuals, and the ground grid.
//!
//! Each [`PartKind`] gets one root entity carrying a [`PartVisual`] and its own
//! [`PartMaterial`].  The root always requests the part's glTF scene; if that
//! load fails, or the scene spawns without a mesh, the root is switched to a
//! placeholder cylinder of the part's nominal length.  Both rings use the same
//! model but never share a material, so they can be coloured independently.
//!
//! ## System Responsibilities
//!
//! | System                           | Schedule          | Purpose                                   |
//! |----------------------------------|-------------------|-------------------------------------------|
//! | `setup_scene`                    | Startup           | Spawn camera and lights                   |
//! | `spawn_part_visuals`             | Startup           | Spawn one root per part                   |
//! | `fallback_to_placeholder_system` | Update / Render   | Swap failed or empty models for cylinders |
//! | `recolor_scene_meshes_system`    | Update / Render   | Adopt scene material into the part's own  |
//! | `sync_part_visuals_system`       | Update / Render   | Apply the `AssemblyPlan` on change        |
//! | `draw_ground_grid_system`        | Update / Render   | Gizmo grid at the base of the stack       |

use crate::assembly::AssemblyPlan;
use crate::config::{load_configurator_config, ConfiguratorConfig};
use crate::part::PartKind;
use crate::plugin::ConfiguratorSet;
use bevy::asset::LoadState;
use bevy::gltf::GltfAssetLabel;
use bevy::prelude::*;
use std::f32::consts::PI;

// ── Components ────────────────────────────────────────────────────────────────

/// Root entity of one part.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartVisual {
    pub part: PartKind,
}

/// The material owned by one part; every mesh under the root uses it.
#[derive(Component, Debug, Clone)]
pub struct PartMaterial(pub Handle<StandardMaterial>);

/// The part's glTF scene, kept so its load state can be checked.
#[derive(Component, Debug, Clone)]
pub struct PartModel(pub Handle<Scene>);

/// Marks a part drawn with placeholder geometry.
#[derive(Component, Debug, Clone, Copy)]
pub struct PlaceholderPart;

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (setup_scene, spawn_part_visuals).after(load_configurator_config),
        )
        .add_systems(
            Update,
            (
                fallback_to_placeholder_system,
                recolor_scene_meshes_system,
                sync_part_visuals_system,
                draw_ground_grid_system,
            )
                .chain()
                .in_set(ConfiguratorSet::Render),
        );
    }
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// Spawn the perspective camera and two directional lights.
pub fn setup_scene(mut commands: Commands, config: Res<ConfiguratorConfig>) {
    let d = config.camera_distance;
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: config.camera_fov_degrees.to_radians(),
            ..default()
        }),
        Transform::from_xyz(d, d, d)
            .looking_at(Vec3::new(0.0, config.camera_target_height, 0.0), Vec3::Y),
    ));

    // Key light with shadows, plus a weaker fill from the opposite side.
    commands.spawn((
        DirectionalLight {
            illuminance: 9_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(200.0, 400.0, 150.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 2_500.0,
            ..default()
        },
        Transform::from_xyz(-250.0, 150.0, -200.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn part_material() -> StandardMaterial {
    StandardMaterial {
        base_color: Color::WHITE,
        perceptual_roughness: 0.3,
        ..default()
    }
}

/// Cylinder sitting on its root's origin, extending along local +Y.
fn placeholder_bundle(
    part: PartKind,
    config: &ConfiguratorConfig,
    meshes: &mut Assets<Mesh>,
    material: Handle<StandardMaterial>,
) -> impl Bundle {
    let length = part.length();
    let mesh = meshes.add(Cylinder::new(config.placeholder_radius(part), length));
    (
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::from_xyz(0.0, length / 2.0, 0.0),
    )
}

/// Spawn one root per part.  Positions are applied later from the plan.
pub fn spawn_part_visuals(
    mut commands: Commands,
    config: Res<ConfiguratorConfig>,
    asset_server: Res<AssetServer>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for part in PartKind::ALL {
        let material = materials.add(part_material());
        let model = config.model_for(part);
        let scene = asset_server.load(GltfAssetLabel::Scene(0).from_asset(model.to_string()));
        debug!("Requested model {model} for {part}");
        commands.spawn((
            Name::new(part.label()),
            PartVisual { part },
            PartMaterial(material),
            SceneRoot(scene.clone()),
            PartModel(scene),
            Transform::default(),
            Visibility::default(),
        ));
    }
}

// ── Update ────────────────────────────────────────────────────────────────────

/// Replace a part's model with placeholder geometry when the model failed to
/// load (missing file included), or loaded and spawned without a single mesh.
#[allow(clippy::type_complexity, clippy::too_many_arguments)]
pub fn fallback_to_placeholder_system(
    mut commands: Commands,
    config: Res<ConfiguratorConfig>,
    asset_server: Res<AssetServer>,
    scenes: Res<Assets<Scene>>,
    mut meshes: ResMut<Assets<Mesh>>,
    q_parts: Query<(Entity, &PartVisual, &PartMaterial, &PartModel), Without<PlaceholderPart>>,
    q_children: Query<&Children>,
    q_meshes: Query<(), With<Mesh3d>>,
) {
    for (entity, visual, material, model) in q_parts.iter() {
        let failed = matches!(
            asset_server.get_load_state(&model.0),
            Some(LoadState::Failed(_))
        );
        let empty = scenes.contains(&model.0)
            && q_children.get(entity).is_ok()
            && !q_children
                .iter_descendants(entity)
                .any(|child| q_meshes.contains(child));

        if !failed && !empty {
            continue;
        }

        warn!(
            "Model for {} {}; using placeholder geometry",
            visual.part,
            if failed { "failed to load" } else { "has no meshes" }
        );
        commands
            .entity(entity)
            .remove::<(SceneRoot, PartModel)>()
            .despawn_related::<Children>()
            .insert(PlaceholderPart)
            .with_child(placeholder_bundle(
                visual.part,
                &config,
                &mut meshes,
                material.0.clone(),
            ));
    }
}

/// Give every mesh spawned from a part's scene that part's own material.
///
/// Scene instances of the same model share material handles.  The first
/// foreign material found under a root is copied into the part's material, so
/// the model's textures and surface settings survive, and the copy is tinted
/// with the part's current colour.  Every mesh is then pointed at the copy.
pub fn recolor_scene_meshes_system(
    mut commands: Commands,
    plan: Res<AssemblyPlan>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    q_parts: Query<(Entity, &PartVisual, &PartMaterial), With<PartModel>>,
    q_children: Query<&Children>,
    q_materials: Query<&MeshMaterial3d<StandardMaterial>>,
) {
    for (entity, visual, material) in q_parts.iter() {
        let mut adopted = false;
        for child in q_children.iter_descendants(entity) {
            let Ok(current) = q_materials.get(child) else {
                continue;
            };
            if current.0 == material.0 {
                continue;
            }

            if !adopted {
                if let Some(mut source) = materials.get(&current.0).cloned() {
                    source.base_color = plan
                        .entry(visual.part)
                        .color
                        .to_color()
                        .unwrap_or(Color::WHITE);
                    if let Some(own) = materials.get_mut(&material.0) {
                        *own = source;
                    }
                    adopted = true;
                }
            }
            commands
                .entity(child)
                .insert(MeshMaterial3d(material.0.clone()));
        }
    }
}

/// Apply position, orientation, visibility, and colour from the plan.
///
/// Only re-runs when [`AssemblyPlan`] is replaced.
pub fn sync_part_visuals_system(
    plan: Res<AssemblyPlan>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut q_parts: Query<(&PartVisual, &PartMaterial, &mut Transform, &mut Visibility)>,
) {
    if !plan.is_changed() {
        return;
    }

    for (visual, material, mut transform, mut visibility) in q_parts.iter_mut() {
        let entry = plan.entry(visual.part);
        transform.translation = Vec3::new(0.0, entry.position, 0.0);
        transform.rotation = if entry.flipped {
            Quat::from_rotation_x(PI)
        } else {
            Quat::IDENTITY
        };
        *visibility = if entry.visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };

        let color = entry.color.to_color().unwrap_or_else(|| {
            warn!("Unparseable colour '{}' for {}; drawing white", entry.color, visual.part);
            Color::WHITE
        });
        if let Some(mat) = materials.get_mut(&material.0) {
            mat.base_color = color;
        }
    }
}

/// Square grid on the ground plane, centred under the stack.
pub fn draw_ground_grid_system(mut gizmos: Gizmos, config: Res<ConfiguratorConfig>) {
    let divisions = config.grid_divisions.max(1);
    let half = config.grid_size / 2.0;
    let step = config.grid_size / divisions as f32;
    let color = Color::srgb(0.35, 0.35, 0.4);

    for i in 0..=divisions {
        let offset = -half + step * i as f32;
        gizmos.line(Vec3::new(offset, 0.0, -half), Vec3::new(offset, 0.0, half), color);
        gizmos.line(Vec3::new(-half, 0.0, offset), Vec3::new(half, 0.0, offset), color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::resolve;
    use crate::part::{ColorSlot, RingSlot};
    use crate::state::ConfigurationState;

    fn world_with_parts() -> (World, Vec<Handle<StandardMaterial>>) {
        let mut world = World::new();
        world.init_resource::<Assets<StandardMaterial>>();

        let mut handles = Vec::new();
        for part in PartKind::ALL {
            let handle = world
                .resource_mut::<Assets<StandardMaterial>>()
                .add(part_material());
            world.spawn((
                PartVisual { part },
                PartMaterial(handle.clone()),
                Transform::default(),
                Visibility::default(),
            ));
            handles.push(handle);
        }
        (world, handles)
    }

    #[test]
    fn sync_applies_positions_visibility_and_colour() {
        let (mut world, handles) = world_with_parts();
        let config = ConfigurationState::default()
            .with_ring_toggled(RingSlot::Top)
            .with_color(ColorSlot::Body, "#00ff00".into());
        world.insert_resource(resolve(&config));

        let mut schedule = Schedule::default();
        schedule.add_systems(sync_part_visuals_system);
        schedule.run(&mut world);

        let mut q = world.query::<(&PartVisual, &Transform, &Visibility)>();
        for (visual, transform, visibility) in q.iter(&world) {
            let expected = match visual.part {
                PartKind::Pommel => 34.0,
                PartKind::RingBottom => 34.0,
                PartKind::Body => 44.0,
                PartKind::RingTop => 224.0,
                PartKind::Emitter => 224.0,
            };
            assert_eq!(transform.translation.y, expected, "{} position", visual.part);
            let hidden = *visibility == Visibility::Hidden;
            assert_eq!(hidden, visual.part == PartKind::RingTop);
        }

        let materials = world.resource::<Assets<StandardMaterial>>();
        let body = materials
            .get(&handles[PartKind::Body as usize])
            .expect("body material");
        assert_eq!(body.base_color, Color::srgb(0.0, 1.0, 0.0));
    }

    #[test]
    fn pommel_is_rotated_half_a_turn() {
        let (mut world, _) = world_with_parts();
        world.insert_resource(AssemblyPlan::default());

        let mut schedule = Schedule::default();
        schedule.add_systems(sync_part_visuals_system);
        schedule.run(&mut world);

        let mut q = world.query::<(&PartVisual, &Transform)>();
        for (visual, transform) in q.iter(&world) {
            let flipped = transform.rotation != Quat::IDENTITY;
            assert_eq!(flipped, visual.part == PartKind::Pommel);
        }
    }

    fn fallback_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Scene>()
            .init_asset::<Mesh>()
            .init_asset::<StandardMaterial>()
            .init_resource::<ConfiguratorConfig>()
            .add_systems(Update, fallback_to_placeholder_system);
        app
    }

    fn spawn_model_root(app: &mut App, part: PartKind, scene: Handle<Scene>) -> Entity {
        let material = app
            .world_mut()
            .resource_mut::<Assets<StandardMaterial>>()
            .add(part_material());
        app.world_mut()
            .spawn((
                PartVisual { part },
                PartMaterial(material),
                PartModel(scene),
                Transform::default(),
                Visibility::default(),
            ))
            .with_child(Transform::default())
            .id()
    }

    #[test]
    fn scene_without_meshes_becomes_a_placeholder() {
        let mut app = fallback_app();
        let scene = app
            .world_mut()
            .resource_mut::<Assets<Scene>>()
            .add(Scene::new(World::new()));
        let root = spawn_model_root(&mut app, PartKind::Body, scene);

        app.update();

        let world = app.world();
        assert!(world.get::<PlaceholderPart>(root).is_some());
        assert!(world.get::<PartModel>(root).is_none());
        let children = world.get::<Children>(root).expect("placeholder child");
        assert_eq!(children.len(), 1);
        let cylinder = children[0];
        assert!(world.get::<Mesh3d>(cylinder).is_some());
        let transform = world.get::<Transform>(cylinder).expect("cylinder transform");
        assert_eq!(transform.translation.y, PartKind::Body.length() / 2.0);
    }

    #[test]
    fn scene_still_loading_is_left_alone() {
        let mut app = fallback_app();
        let scene = app.world().resource::<Assets<Scene>>().reserve_handle();
        let root = spawn_model_root(&mut app, PartKind::Emitter, scene);

        app.update();

        assert!(app.world().get::<PlaceholderPart>(root).is_none());
        assert!(app.world().get::<PartModel>(root).is_some());
    }

    #[test]
    fn rings_sharing_a_scene_material_get_their_own() {
        let mut world = World::new();
        world.init_resource::<Assets<StandardMaterial>>();
        world.init_resource::<Assets<Scene>>();
        let config = ConfigurationState::default()
            .with_color(ColorSlot::RingTop, "#0000ff".into());
        world.insert_resource(resolve(&config));

        let shared = world
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial {
                perceptual_roughness: 0.8,
                metallic: 0.6,
                ..default()
            });
        let scene = world.resource::<Assets<Scene>>().reserve_handle();

        let mut rings = Vec::new();
        for part in [PartKind::RingBottom, PartKind::RingTop] {
            let own = world
                .resource_mut::<Assets<StandardMaterial>>()
                .add(part_material());
            let mesh = world.spawn(MeshMaterial3d(shared.clone())).id();
            let root = world
                .spawn((PartVisual { part }, PartMaterial(own.clone()), PartModel(scene.clone())))
                .add_child(mesh)
                .id();
            rings.push((part, root, mesh, own));
        }

        let mut schedule = Schedule::default();
        schedule.add_systems(recolor_scene_meshes_system);
        schedule.run(&mut world);

        let (_, _, bottom_mesh, bottom_own) = &rings[0];
        let (_, _, top_mesh, top_own) = &rings[1];
        assert_ne!(bottom_own, top_own);
        assert_eq!(&world.get::<MeshMaterial3d<StandardMaterial>>(*bottom_mesh).unwrap().0, bottom_own);
        assert_eq!(&world.get::<MeshMaterial3d<StandardMaterial>>(*top_mesh).unwrap().0, top_own);

        let materials = world.resource::<Assets<StandardMaterial>>();
        let bottom = materials.get(bottom_own).expect("bottom ring material");
        let top = materials.get(top_own).expect("top ring material");
        assert_eq!(top.perceptual_roughness, 0.8, "scene surface settings are kept");
        assert_eq!(top.metallic, 0.6);
        assert_eq!(top.base_color, Color::srgb(0.0, 0.0, 1.0));
        assert_eq!(bottom.base_color, Color::srgb(1.0, 0.0, 0.0));
        let untouched = materials.get(&shared).expect("shared scene material");
        assert_eq!(untouched.base_color, Color::WHITE);
    }
}
