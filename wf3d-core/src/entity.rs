//! Scene entities: shared meshes plus an owned pose and line style.
use std::rc::Rc;

use crate::error::GeometryError;
use crate::geometry::Mesh;
use crate::transform::{Pose, RotationState};

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const SKY_BLUE: Rgb = Rgb::new(135, 206, 235);
    pub const GOLD: Rgb = Rgb::new(255, 215, 0);
    pub const HOT_PINK: Rgb = Rgb::new(255, 105, 180);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS colour string, e.g. `rgb(255, 215, 0)`.
    pub fn to_css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Stroke settings for every edge of an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Rgb,
    pub width: f32,
}

impl LineStyle {
    pub fn new(color: Rgb, width: f32) -> Self {
        Self { color, width }
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Rgb::BLACK,
            width: 1.0,
        }
    }
}

/// A drawable object. Meshes are shared, everything else is owned.
#[derive(Debug, Clone)]
pub struct Entity {
    meshes: Vec<Rc<Mesh>>,
    pub pose: Pose,
    pub style: LineStyle,
    /// Degrees per second about each axis. Zero for static entities.
    pub spin: RotationState,
}

impl Entity {
    pub fn new(mesh: Rc<Mesh>, pose: Pose) -> Self {
        Self {
            meshes: vec![mesh],
            pose,
            style: LineStyle::default(),
            spin: RotationState::zero(),
        }
    }

    pub fn with_meshes(meshes: Vec<Rc<Mesh>>, pose: Pose) -> Result<Self, GeometryError> {
        if meshes.is_empty() {
            return Err(GeometryError::NoMeshes);
        }
        Ok(Self {
            meshes,
            pose,
            style: LineStyle::default(),
            spin: RotationState::zero(),
        })
    }

    pub fn with_style(mut self, color: Rgb, width: f32) -> Self {
        self.style = LineStyle::new(color, width);
        self
    }

    pub fn with_spin(mut self, spin: RotationState) -> Self {
        self.spin = spin;
        self
    }

    pub fn meshes(&self) -> &[Rc<Mesh>] {
        &self.meshes
    }

    /// Advance rotation by the spin rate over `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if !self.spin.is_zero() {
            self.pose.rotation.advance(&self.spin, dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_defaults() {
        let entity = Entity::new(Rc::new(Mesh::cube(2.0)), Pose::default());
        assert_eq!(entity.style.color, Rgb::BLACK);
        assert_eq!(entity.style.width, 1.0);
        assert_eq!(entity.pose.scale, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(entity.meshes().len(), 1);
    }

    #[test]
    fn test_entities_share_mesh() {
        let mesh = Rc::new(Mesh::cube(2.0));
        let a = Entity::new(Rc::clone(&mesh), Pose::at(Vector3::new(0.0, 1.0, 5.0)));
        let b = Entity::new(Rc::clone(&mesh), Pose::at(Vector3::new(-10.0, 1.0, 10.0)));
        assert!(Rc::ptr_eq(&a.meshes()[0], &b.meshes()[0]));
        assert_eq!(Rc::strong_count(&mesh), 3);
    }

    #[test]
    fn test_empty_mesh_list_rejected() {
        let result = Entity::with_meshes(Vec::new(), Pose::default());
        assert!(matches!(result, Err(GeometryError::NoMeshes)));
    }

    #[test]
    fn test_update_spins_about_own_axis() {
        let mut entity = Entity::new(Rc::new(Mesh::cube(2.0)), Pose::default())
            .with_spin(RotationState::new(0.0, -65.0, 0.0));
        entity.update(2.0);
        assert_eq!(entity.pose.rotation, RotationState::new(0.0, -130.0, 0.0));
    }

    #[test]
    fn test_css_color() {
        assert_eq!(Rgb::GOLD.to_css(), "rgb(255, 215, 0)");
    }
}
