//! First-person camera: pose, mouse look and keyboard movement.
use nalgebra::Vector3;

use crate::math::VectorOps;
use crate::transform::RotationState;

/// How a desired movement vector turns into a world displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementPolicy {
    /// Forward/strafe follow the camera's yaw; the combined direction is
    /// normalized and moved by a fixed step.
    #[default]
    YawRelative,
    /// Move straight along the world X/Z axes by the desired vector.
    WorldAxes,
}

/// Camera pose. Rotation is in degrees; `rotation.x` is pitch, `rotation.y`
/// is yaw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vector3<f32>,
    pub rotation: RotationState,
}

impl Camera {
    pub const PITCH_LIMIT: f32 = 90.0;

    pub fn new(position: Vector3<f32>) -> Self {
        Self {
            position,
            rotation: RotationState::zero(),
        }
    }

    pub fn with_rotation(mut self, rotation: RotationState) -> Self {
        self.rotation = rotation;
        self.rotation.x = self.rotation.x.clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
        self
    }

    pub fn yaw(&self) -> f32 {
        self.rotation.y
    }

    pub fn pitch(&self) -> f32 {
        self.rotation.x
    }

    /// Turn by the given deltas. Yaw is unbounded, pitch stays within
    /// [-90, 90].
    pub fn look(&mut self, yaw_delta: f32, pitch_delta: f32) {
        if yaw_delta != 0.0 {
            self.rotation.y += yaw_delta;
        }
        if pitch_delta != 0.0 {
            self.rotation.x =
                (self.rotation.x + pitch_delta).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
        }
    }

    /// Move relative to the current yaw. `desired.z` is forward, `desired.x`
    /// is strafe to the right. Only the direction of `desired` matters; the
    /// distance covered is always `step` (or nothing for a zero vector).
    pub fn move_relative(&mut self, desired: &Vector3<f32>, step: f32) {
        let mut change = Vector3::zeros();

        if desired.z != 0.0 {
            let (sin, cos) = self.rotation.y.to_radians().sin_cos();
            change.x += desired.z * sin;
            change.z += desired.z * cos;
        }

        if desired.x != 0.0 {
            let (sin, cos) = (self.rotation.y + 90.0).to_radians().sin_cos();
            change.x += desired.x * sin;
            change.z += desired.x * cos;
        }

        change.normalize_in_place().scale_uniform(step);
        self.position.add_vec(&change);
    }

    /// Move along world axes, ignoring orientation.
    pub fn move_world(&mut self, desired: &Vector3<f32>) {
        self.position.add_vec(desired);
    }

    pub fn apply_movement(&mut self, desired: &Vector3<f32>, policy: MovementPolicy, step: f32) {
        match policy {
            MovementPolicy::YawRelative => self.move_relative(desired, step),
            MovementPolicy::WorldAxes => self.move_world(desired),
        }
    }

    /// World space to camera space: translate, then undo yaw, pitch and
    /// roll in that order. Zero angles are skipped.
    pub fn to_camera_space(&self, world: &Vector3<f32>) -> Vector3<f32> {
        let mut v = *world;
        v.subtract_vec(&self.position);
        if self.rotation.y != 0.0 {
            v.rotate_y(-self.rotation.y);
        }
        if self.rotation.x != 0.0 {
            v.rotate_x(-self.rotation.x);
        }
        if self.rotation.z != 0.0 {
            v.rotate_z(-self.rotation.z);
        }
        v
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vector3::zeros())
    }
}
