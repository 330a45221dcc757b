//! Perspective projection from camera space to screen space.
use nalgebra::{Point2, Vector3};

use crate::camera::Camera;
use crate::geometry::Polygon;
use crate::transform::Pose;

/// Depth substituted for points on or behind the camera plane.
pub const NEAR_PLANE_EPSILON: f32 = 0.001;

/// Drawable area in pixels (or terminal cells).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }

    pub fn center(&self) -> Point2<f32> {
        Point2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Map a camera-space point to screen space: clamp depth, divide by it,
    /// then scale into the viewport with Y pointing down.
    pub fn project(&self, camera_space: &Vector3<f32>) -> Point2<f32> {
        let z = if camera_space.z <= 0.0 {
            NEAR_PLANE_EPSILON
        } else {
            camera_space.z
        };

        let ndc_x = camera_space.x / z;
        let ndc_y = camera_space.y / z;

        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        Point2::new(ndc_x * half_w + half_w, -ndc_y * half_h + half_h)
    }

    /// Full chain for one model-space vertex.
    pub fn project_vertex(&self, vertex: &Vector3<f32>, pose: &Pose, camera: &Camera) -> Point2<f32> {
        let world = pose.to_world(vertex);
        self.project(&camera.to_camera_space(&world))
    }

    /// Project every vertex of `polygon`, keeping loop order.
    pub fn project_polygon(&self, polygon: &Polygon, pose: &Pose, camera: &Camera) -> Vec<Point2<f32>> {
        polygon
            .vertices()
            .iter()
            .map(|v| self.project_vertex(v, pose, camera))
            .collect()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 600)
    }
}
