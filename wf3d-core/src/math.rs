//! In-place vector operations used by the projection pipeline.
//!
//! Angles are always in degrees. Every mutator returns the receiver so calls
//! can be chained, e.g. `v.rotate_euler(&rot).scale_components(&s).add_vec(&p)`.
use nalgebra::Vector3;

use crate::transform::RotationState;

/// Chainable in-place operations on a 3D vector.
pub trait VectorOps {
    /// Euclidean norm.
    fn length(&self) -> f32;

    /// Scale to unit length. A zero-length vector is left untouched.
    fn normalize_in_place(&mut self) -> &mut Self;

    /// Per-axis multiply by `factors`.
    fn scale_components(&mut self, factors: &Vector3<f32>) -> &mut Self;

    fn scale_uniform(&mut self, factor: f32) -> &mut Self;

    fn add_vec(&mut self, other: &Vector3<f32>) -> &mut Self;

    fn subtract_vec(&mut self, other: &Vector3<f32>) -> &mut Self;

    /// Rotate the y/z components about the X axis.
    fn rotate_x(&mut self, degrees: f32) -> &mut Self;

    /// Rotate the x/z components about the Y axis.
    fn rotate_y(&mut self, degrees: f32) -> &mut Self;

    /// Rotate the x/y components about the Z axis.
    fn rotate_z(&mut self, degrees: f32) -> &mut Self;

    /// Apply X, then Y, then Z. Zero angles are skipped.
    fn rotate_euler(&mut self, rotation: &RotationState) -> &mut Self;
}

impl VectorOps for Vector3<f32> {
    fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    fn normalize_in_place(&mut self) -> &mut Self {
        let len = self.length();
        if len != 0.0 {
            self.x /= len;
            self.y /= len;
            self.z /= len;
        }
        self
    }

    fn scale_components(&mut self, factors: &Vector3<f32>) -> &mut Self {
        self.component_mul_assign(factors);
        self
    }

    fn scale_uniform(&mut self, factor: f32) -> &mut Self {
        *self *= factor;
        self
    }

    fn add_vec(&mut self, other: &Vector3<f32>) -> &mut Self {
        *self += other;
        self
    }

    fn subtract_vec(&mut self, other: &Vector3<f32>) -> &mut Self {
        *self -= other;
        self
    }

    fn rotate_x(&mut self, degrees: f32) -> &mut Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (y, z) = (self.y, self.z);
        self.y = y * cos - z * sin;
        self.z = y * sin + z * cos;
        self
    }

    fn rotate_y(&mut self, degrees: f32) -> &mut Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (x, z) = (self.x, self.z);
        self.x = x * cos + z * sin;
        self.z = -x * sin + z * cos;
        self
    }

    fn rotate_z(&mut self, degrees: f32) -> &mut Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (x, y) = (self.x, self.y);
        self.x = x * cos - y * sin;
        self.y = x * sin + y * cos;
        self
    }

    fn rotate_euler(&mut self, rotation: &RotationState) -> &mut Self {
        if rotation.x != 0.0 {
            self.rotate_x(rotation.x);
        }
        if rotation.y != 0.0 {
            self.rotate_y(rotation.y);
        }
        if rotation.z != 0.0 {
            self.rotate_z(rotation.z);
        }
        self
    }
}
