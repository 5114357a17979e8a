//! Shared ECS components
//!
//! - movement: body velocity, kinematic controller, control rotation
//! - input: per-tick axis/button state (ShooterInput)
//! - camera: spring arm + follow camera pose + zoom
//! - player: player control marker (Player)

pub mod camera;
pub mod input;
pub mod movement;
pub mod player;

pub use camera::*;
pub use input::*;
pub use movement::*;
pub use player::*;
