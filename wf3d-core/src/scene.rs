//! The set of entities drawn each frame, in registration order.
use std::rc::Rc;

use nalgebra::Vector3;

use crate::camera::Camera;
use crate::entity::{Entity, Rgb};
use crate::geometry::Mesh;
use crate::transform::{Pose, RotationState};

#[derive(Debug, Default)]
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity; it is drawn after everything added before it.
    pub fn add(&mut self, entity: Entity) -> usize {
        self.entities.push(entity);
        self.entities.len() - 1
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Advance every spinning entity by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        for entity in &mut self.entities {
            entity.update(dt);
        }
    }

    /// A floor grid and three spinning boxes, viewed from two units up.
    pub fn demo() -> (Self, Camera) {
        let box_mesh = Rc::new(Mesh::cube(2.0));
        let floor_mesh = Rc::new(Mesh::floor_grid(20, 20));
        let box_scale = Vector3::new(2.0, 2.0, 2.0);

        let mut scene = Self::new();
        scene.add(
            Entity::new(
                floor_mesh,
                Pose::at(Vector3::new(-20.0, 0.0, -20.0)).with_scale(Vector3::new(4.0, 1.0, 4.0)),
            )
            .with_style(Rgb::WHITE, 1.0),
        );
        scene.add(
            Entity::new(Rc::clone(&box_mesh), Pose::at(Vector3::new(0.0, 1.0, 5.0)).with_scale(box_scale))
                .with_style(Rgb::SKY_BLUE, 3.0)
                .with_spin(RotationState::new(65.0, 0.0, 0.0)),
        );
        scene.add(
            Entity::new(Rc::clone(&box_mesh), Pose::at(Vector3::new(-10.0, 1.0, 10.0)).with_scale(box_scale))
                .with_style(Rgb::GOLD, 3.0)
                .with_spin(RotationState::new(0.0, 0.0, -65.0)),
        );
        scene.add(
            Entity::new(box_mesh, Pose::at(Vector3::new(10.0, 1.0, 15.0)).with_scale(box_scale))
                .with_style(Rgb::HOT_PINK, 3.0)
                .with_spin(RotationState::new(0.0, -65.0, 0.0)),
        );

        log::debug!("demo scene built with {} entities", scene.len());
        (scene, Camera::new(Vector3::new(0.0, 2.0, 0.0)))
    }
}
