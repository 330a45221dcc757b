//! Euler rotation state and the model-to-world transform.
use nalgebra::Vector3;

use crate::math::VectorOps;

/// Rotation about the three cardinal axes, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in degrees)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    /// Advance by an angular rate (degrees per second) over `dt` seconds.
    pub fn advance(&mut self, rate: &RotationState, dt: f32) {
        self.rotate(rate.x * dt, rate.y * dt, rate.z * dt);
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Placement of an entity in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vector3<f32>,
    pub rotation: RotationState,
    pub scale: Vector3<f32>,
}

impl Pose {
    pub fn new(position: Vector3<f32>, rotation: RotationState, scale: Vector3<f32>) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    pub fn at(position: Vector3<f32>) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, scale: Vector3<f32>) -> Self {
        self.scale = scale;
        self
    }

    /// Model space to world space: rotate, then scale, then translate.
    pub fn to_world(&self, vertex: &Vector3<f32>) -> Vector3<f32> {
        let mut local = *vertex;
        local
            .rotate_euler(&self.rotation)
            .scale_components(&self.scale)
            .add_vec(&self.position);
        local
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: RotationState::zero(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}
