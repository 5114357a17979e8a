use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use ultimatefire_simulation::{CameraZoom, FollowCamera, Player, Viewport};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_follow_camera, grab_cursor))
            .add_systems(
                Update,
                (sync_viewport, toggle_cursor_grab, follow_player_camera).chain(),
            );
    }
}

/// Render camera driven by the player's simulated follow camera
#[derive(Component)]
pub struct FollowCameraRig;

fn spawn_follow_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.5, 1.6, 1.8),
        FollowCameraRig,
    ));
}

fn grab_cursor(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = windows.single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    }
}

/// Escape releases the mouse, any click grabs it again
fn toggle_cursor_grab(
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };

    if keyboard.just_pressed(KeyCode::Escape) {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    } else if mouse_buttons.get_just_pressed().next().is_some() {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    }
}

/// Window size → simulation viewport (crosshair deprojection)
fn sync_viewport(windows: Query<&Window, With<PrimaryWindow>>, mut viewport: ResMut<Viewport>) {
    let Ok(window) = windows.single() else {
        return;
    };

    let size = Vec2::new(window.width(), window.height());
    if size.x > 0.0 && size.y > 0.0 && (viewport.width, viewport.height) != (size.x, size.y) {
        viewport.width = size.x;
        viewport.height = size.y;
    }
}

/// Copy pose + zoom of the player's follow camera
///
/// The simulation zooms a horizontal FOV; Bevy projections take a vertical one.
fn follow_player_camera(
    player: Query<(&FollowCamera, &CameraZoom), With<Player>>,
    mut cameras: Query<(&mut Transform, &mut Projection), With<FollowCameraRig>>,
    viewport: Res<Viewport>,
) {
    let Ok((follow, zoom)) = player.single() else {
        return;
    };
    let Ok((mut transform, mut projection)) = cameras.single_mut() else {
        return;
    };

    *transform = follow.transform();

    if let Projection::Perspective(perspective) = projection.as_mut() {
        let half_horizontal = zoom.current_fov.to_radians() / 2.0;
        let aspect = viewport.width / viewport.height;
        perspective.fov = 2.0 * (half_horizontal.tan() / aspect).atan();
    }
}
