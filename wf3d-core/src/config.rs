//! Controller tunables.
use crate::camera::MovementPolicy;

/// Speeds and policies applied by [`crate::SceneController`] every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerConfig {
    /// Units per second contributed by each held movement key.
    pub move_speed: f32,
    /// Distance covered per tick under [`MovementPolicy::YawRelative`].
    pub move_step: f32,
    /// Degrees of yaw/pitch per unit of pointer motion.
    pub look_sensitivity: f32,
    pub movement: MovementPolicy,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            move_step: 0.5,
            look_sensitivity: 1.0,
            movement: MovementPolicy::YawRelative,
        }
    }
}
