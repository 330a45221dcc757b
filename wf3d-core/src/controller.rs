//! Per-frame update and redraw.
use nalgebra::Vector3;

use crate::camera::Camera;
use crate::config::ControllerConfig;
use crate::input::{InputState, Key};
use crate::projection::Viewport;
use crate::render::draw_entity;
use crate::scene::Scene;
use crate::surface::Surface;

const FORWARD: [Key; 2] = [Key::ArrowUp, Key::Char('w')];
const BACKWARD: [Key; 2] = [Key::ArrowDown, Key::Char('s')];
const LEFT: [Key; 2] = [Key::ArrowLeft, Key::Char('a')];
const RIGHT: [Key; 2] = [Key::ArrowRight, Key::Char('d')];

/// What one tick measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// Seconds since the previous tick.
    pub dt: f32,
    /// Instantaneous frames per second, `None` if no time passed.
    pub fps: Option<u32>,
}

/// `1000 / (now - previous)` rounded, for millisecond timestamps.
pub fn instantaneous_fps(previous_ms: f64, now_ms: f64) -> Option<u32> {
    let elapsed = now_ms - previous_ms;
    if elapsed > 0.0 {
        Some((1000.0 / elapsed).round() as u32)
    } else {
        None
    }
}

/// Owns the scene, camera and input, and drives them one tick at a time.
pub struct SceneController {
    scene: Scene,
    camera: Camera,
    input: InputState,
    viewport: Viewport,
    config: ControllerConfig,
    last_timestamp: f64,
}

impl SceneController {
    pub fn new(
        scene: Scene,
        camera: Camera,
        viewport: Viewport,
        config: ControllerConfig,
        start_ms: f64,
    ) -> Self {
        Self {
            scene,
            camera,
            input: InputState::new(),
            viewport,
            config,
            last_timestamp: start_ms,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        log::debug!("viewport resized to {}x{}", width, height);
        self.viewport = Viewport::new(width, height);
    }

    /// Desired camera movement from held keys: `z` forward, `x` right.
    pub fn movement_vector(&self, dt: f32) -> Vector3<f32> {
        let step = self.config.move_speed * dt;
        let mut movement = Vector3::zeros();
        if self.input.any_held(&FORWARD) {
            movement.z += step;
        }
        if self.input.any_held(&BACKWARD) {
            movement.z -= step;
        }
        if self.input.any_held(&LEFT) {
            movement.x -= step;
        }
        if self.input.any_held(&RIGHT) {
            movement.x += step;
        }
        movement
    }

    /// Run one frame: update entities and camera, then redraw everything.
    pub fn tick<S: Surface + ?Sized>(&mut self, timestamp_ms: f64, surface: &mut S) -> FrameStats {
        let dt = ((timestamp_ms - self.last_timestamp) / 1000.0) as f32;

        self.scene.update(dt);

        let movement = self.movement_vector(dt);
        self.camera
            .apply_movement(&movement, self.config.movement, self.config.move_step);

        let (dx, dy) = self.input.take_pointer_delta();
        let sensitivity = self.config.look_sensitivity;
        self.camera.look(dx * sensitivity, dy * sensitivity);

        surface.clear(self.viewport.width, self.viewport.height);
        for entity in self.scene.entities() {
            draw_entity(surface, entity, &self.camera, &self.viewport);
        }

        let fps = instantaneous_fps(self.last_timestamp, timestamp_ms);
        log::trace!("frame dt={:.4}s fps={:?}", dt, fps);
        self.last_timestamp = timestamp_ms;

        FrameStats { dt, fps }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::MovementPolicy;
    use crate::surface::recording::RecordingSurface;
    use crate::transform::RotationState;
    use approx::assert_abs_diff_eq;

    fn demo_controller(start_ms: f64) -> SceneController {
        let (scene, camera) = Scene::demo();
        SceneController::new(
            scene,
            camera,
            Viewport::new(800, 600),
            ControllerConfig::default(),
            start_ms,
        )
    }

    #[test]
    fn test_fps() {
        assert_eq!(instantaneous_fps(1000.0, 1016.0), Some(63));
        assert_eq!(instantaneous_fps(0.0, 20.0), Some(50));
        assert_eq!(instantaneous_fps(1000.0, 1000.0), None);
    }

    #[test]
    fn test_tick_redraws_whole_scene() {
        let mut controller = demo_controller(1000.0);
        let mut surface = RecordingSurface::default();

        let stats = controller.tick(1016.0, &mut surface);

        assert_eq!(stats.fps, Some(63));
        assert_abs_diff_eq!(stats.dt, 0.016, epsilon = 1e-6);
        assert_eq!(surface.clears, vec![(800.0, 600.0)]);
        // 400 floor cells plus three boxes of six quads each.
        assert_eq!(surface.segments.len(), (400 + 3 * 6) * 4);
        // The floor is registered first, so it is drawn first.
        assert_eq!(surface.segments[0].color, crate::Rgb::WHITE);
        assert_eq!(surface.segments.last().map(|s| s.color), Some(crate::Rgb::HOT_PINK));

        controller.tick(1032.0, &mut surface);
        assert_eq!(surface.clears.len(), 2);
        assert_eq!(surface.segments.len(), (400 + 3 * 6) * 4);
    }

    #[test]
    fn test_tick_spins_entities() {
        let mut controller = demo_controller(0.0);
        let mut surface = RecordingSurface::default();
        controller.tick(500.0, &mut surface);
        let sky = &controller.scene().entities()[1];
        assert_abs_diff_eq!(sky.pose.rotation.x, 32.5, epsilon = 1e-4);
    }

    #[test]
    fn test_held_key_moves_camera_by_fixed_step() {
        let mut controller = demo_controller(0.0);
        let mut surface = RecordingSurface::default();
        controller.input_mut().key_down(Key::character('w'));

        controller.tick(16.0, &mut surface);
        assert_abs_diff_eq!(
            controller.camera().position,
            Vector3::new(0.0, 2.0, 0.5),
            epsilon = 1e-5
        );

        controller.input_mut().key_up(Key::Char('w'));
        controller.tick(32.0, &mut surface);
        assert_abs_diff_eq!(controller.camera().position.z, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut controller = demo_controller(0.0);
        let mut surface = RecordingSurface::default();
        controller.input_mut().key_down(Key::ArrowLeft);
        controller.input_mut().key_down(Key::Char('d'));
        controller.tick(16.0, &mut surface);
        assert_eq!(controller.camera().position, Vector3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_world_axes_policy_scales_with_dt() {
        let (scene, camera) = Scene::demo();
        let config = ControllerConfig {
            movement: MovementPolicy::WorldAxes,
            ..ControllerConfig::default()
        };
        let mut controller = SceneController::new(scene, camera, Viewport::new(800, 600), config, 0.0);
        let mut surface = RecordingSurface::default();
        controller.input_mut().key_down(Key::ArrowRight);
        controller.tick(100.0, &mut surface);
        assert_abs_diff_eq!(controller.camera().position.x, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_pointer_delta_turns_camera() {
        let mut controller = demo_controller(0.0);
        let mut surface = RecordingSurface::default();

        controller.input_mut().primary_click();
        controller.input_mut().pointer_moved(30.0, 0.0);
        controller.input_mut().pointer_moved(0.0, 500.0);
        controller.tick(16.0, &mut surface);
        assert_eq!(controller.camera().rotation, RotationState::new(90.0, 30.0, 0.0));

        controller.input_mut().pointer_moved(0.0, -200.0);
        controller.tick(32.0, &mut surface);
        controller.input_mut().pointer_moved(0.0, -200.0);
        controller.tick(48.0, &mut surface);
        assert_eq!(controller.camera().pitch(), -90.0);
    }

    #[test]
    fn test_resize_feeds_projection() {
        let mut controller = demo_controller(0.0);
        let mut surface = RecordingSurface::default();
        controller.resize(1024, 768);
        controller.tick(16.0, &mut surface);
        assert_eq!(surface.clears, vec![(1024.0, 768.0)]);
        assert_eq!(controller.viewport(), Viewport::new(1024, 768));
    }
}
