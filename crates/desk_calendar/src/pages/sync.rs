//! Mirrors widget render commands into the ECS world every frame.

use super::spawn::{refresh_shading, PageFace, PagePivot};
use super::{CalendarWidgetResource, NavigationStatus};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use calendar_logic::{run_frame, FrameSink, PageStack, RenderCommand, RenderPriority};

/// Depth bias of the flipping page so it draws over its neighbours.
const ON_TOP_DEPTH_BIAS: f32 = 2.0;

fn depth_bias(priority: RenderPriority) -> f32 {
    match priority {
        RenderPriority::Normal => 0.0,
        RenderPriority::OnTop => ON_TOP_DEPTH_BIAS,
    }
}

/// Scene side of a frame. Camera damping and drawing are handled by the
/// orbit camera plugin and the renderer after this system.
#[derive(SystemParam)]
pub(super) struct SceneSink<'w, 's> {
    pivots: Query<'w, 's, (&'static PagePivot, &'static mut Transform)>,
    faces: Query<
        'w,
        's,
        (
            &'static PageFace,
            &'static Mesh3d,
            &'static MeshMaterial3d<StandardMaterial>,
        ),
    >,
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    navigation: ResMut<'w, NavigationStatus>,
}

impl FrameSink for SceneSink<'_, '_> {
    fn apply(&mut self, stack: &PageStack, command: &RenderCommand) {
        match *command {
            RenderCommand::Pivot {
                page,
                rotation,
                depth,
            } => {
                for (pivot, mut transform) in &mut self.pivots {
                    if pivot.0 == page {
                        transform.translation.z = depth;
                        transform.rotation = Quat::from_rotation_x(rotation);
                    }
                }
            }
            RenderCommand::Geometry { page } => {
                let Some(geometry) = stack.page(page).map(|page| page.geometry()) else {
                    return;
                };
                for (face, mesh, _) in &self.faces {
                    if face.page != page {
                        continue;
                    }
                    let (Some(source), Some(mesh)) =
                        (geometry.face(face.kind), self.meshes.get_mut(&mesh.0))
                    else {
                        continue;
                    };
                    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, source.positions().to_vec());
                    refresh_shading(mesh);
                }
            }
            RenderCommand::Priority { page, priority } => {
                for (face, _, material) in &self.faces {
                    if face.page != page {
                        continue;
                    }
                    if let Some(material) = self.materials.get_mut(&material.0) {
                        material.depth_bias = depth_bias(priority);
                    }
                }
            }
            RenderCommand::Navigation(state) => {
                self.navigation.set_if_neq(NavigationStatus(state));
            }
        }
    }
}

/// Runs one calendar frame against the scene.
pub(super) fn drive_calendar(
    time: Res<Time>,
    mut widget: ResMut<CalendarWidgetResource>,
    mut sink: SceneSink,
) {
    run_frame(&mut widget.0, &mut sink, time.elapsed());
}

#[cfg(test)]
mod tests {
    use super::super::spawn::face_mesh;
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use bevy::mesh::VertexAttributeValues;
    use calendar_logic::{CalendarWidget, FaceKind, NavigationState};
    use std::time::Duration;
    use test_log::test;

    struct Fixture {
        app: App,
        pivot: Entity,
        face: Entity,
    }

    fn fixture() -> Fixture {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<NavigationStatus>();

        let widget = CalendarWidget::default();
        let front = widget
            .stack()
            .page(0)
            .and_then(|page| page.geometry().face(FaceKind::Front))
            .map(face_mesh)
            .unwrap();

        let world = app.world_mut();
        let mesh = world.resource_mut::<Assets<Mesh>>().add(front);
        let material = world
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial::default());
        let pivot = world.spawn((PagePivot(0), Transform::default())).id();
        let face = world
            .spawn((
                PageFace {
                    page: 0,
                    kind: FaceKind::Front,
                },
                Mesh3d(mesh),
                MeshMaterial3d(material),
            ))
            .id();
        world.insert_resource(CalendarWidgetResource(widget));

        Fixture { app, pivot, face }
    }

    fn frame(app: &mut App, millis: u64) {
        let now = Duration::from_millis(millis);
        app.world_mut()
            .run_system_once(
                move |mut widget: ResMut<CalendarWidgetResource>, mut sink: SceneSink| {
                    run_frame(&mut widget.0, &mut sink, now);
                },
            )
            .unwrap();
    }

    fn face_state(app: &mut App, face: Entity) -> (Vec<[f32; 3]>, f32) {
        let world = app.world();
        let mesh_handle = world.get::<Mesh3d>(face).unwrap().0.clone();
        let material_handle = world
            .get::<MeshMaterial3d<StandardMaterial>>(face)
            .unwrap()
            .0
            .clone();
        let positions = match world
            .resource::<Assets<Mesh>>()
            .get(&mesh_handle)
            .and_then(|mesh| mesh.attribute(Mesh::ATTRIBUTE_POSITION))
        {
            Some(VertexAttributeValues::Float32x3(positions)) => positions.clone(),
            other => panic!("unexpected positions: {other:?}"),
        };
        let bias = world
            .resource::<Assets<StandardMaterial>>()
            .get(&material_handle)
            .unwrap()
            .depth_bias;
        (positions, bias)
    }

    #[test]
    fn flip_is_mirrored_into_the_scene() {
        let Fixture {
            mut app,
            pivot,
            face,
        } = fixture();
        frame(&mut app, 0);
        let (rest, _) = face_state(&mut app, face);
        let rest_z = app.world().get::<Transform>(pivot).unwrap().translation.z;

        app.world_mut()
            .resource_mut::<CalendarWidgetResource>()
            .request_next(Duration::ZERO);
        frame(&mut app, 450);

        let (bent, bias) = face_state(&mut app, face);
        assert_ne!(bent, rest, "page curls while flipping");
        assert_eq!(bias, ON_TOP_DEPTH_BIAS);
        let transform = *app.world().get::<Transform>(pivot).unwrap();
        assert!(transform.translation.z > rest_z);
        assert_ne!(transform.rotation, Quat::IDENTITY);
        assert_eq!(
            app.world().resource::<NavigationStatus>().0,
            NavigationState {
                previous_enabled: false,
                next_enabled: false
            }
        );

        frame(&mut app, 900);

        let (settled, bias) = face_state(&mut app, face);
        assert_eq!(settled, rest);
        assert_eq!(bias, 0.0);
        let transform = *app.world().get::<Transform>(pivot).unwrap();
        assert_eq!(transform.rotation, Quat::from_rotation_x(-5.75));
        assert_eq!(
            app.world().resource::<NavigationStatus>().0,
            NavigationState {
                previous_enabled: true,
                next_enabled: true
            }
        );
    }
}
