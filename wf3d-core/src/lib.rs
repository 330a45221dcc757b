//! wf3d core: a small wireframe 3D renderer.
//!
//! Vertices travel model space -> world space -> camera space -> screen
//! space and are stroked as closed polygon outlines onto any [`Surface`].
//! Hosts own the window, event delivery and frame scheduling; they feed
//! [`SceneController`] with input and call [`SceneController::tick`] once per
//! frame.

pub mod camera;
pub mod config;
pub mod controller;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod input;
pub mod math;
pub mod projection;
pub mod render;
pub mod scene;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use camera::{Camera, MovementPolicy};
pub use config::ControllerConfig;
pub use controller::{instantaneous_fps, FrameStats, SceneController};
pub use entity::{Entity, LineStyle, Rgb};
pub use error::GeometryError;
pub use geometry::{Mesh, Polygon};
pub use input::{InputState, Key};
pub use math::VectorOps;
pub use projection::{Viewport, NEAR_PLANE_EPSILON};
pub use scene::Scene;
pub use surface::Surface;
pub use transform::{Pose, RotationState};
