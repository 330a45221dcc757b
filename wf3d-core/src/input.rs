//! Held-key and pointer state shared between event delivery and the frame
//! tick.
use std::collections::HashSet;

/// Key identifiers the controller understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Char(char),
}

impl Key {
    /// Character key, case folded so `W` and `w` are the same key.
    pub fn character(c: char) -> Self {
        Key::Char(c.to_ascii_lowercase())
    }

    /// Parse a DOM `KeyboardEvent.key` style name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "Escape" | "Esc" => Some(Key::Escape),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::character(c)),
                    _ => None,
                }
            }
        }
    }
}

/// Keys currently held plus pointer motion not yet consumed by a tick.
#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
    pointer_delta: (f32, f32),
    captured: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn any_held(&self, keys: &[Key]) -> bool {
        keys.iter().any(|k| self.held.contains(k))
    }

    pub fn held_count(&self) -> usize {
        self.held.len()
    }

    /// Accumulate relative pointer motion. Ignored unless captured.
    pub fn pointer_moved(&mut self, dx: f32, dy: f32) {
        if self.captured {
            self.pointer_delta.0 += dx;
            self.pointer_delta.1 += dy;
        }
    }

    /// Return the accumulated motion and reset it.
    pub fn take_pointer_delta(&mut self) -> (f32, f32) {
        std::mem::take(&mut self.pointer_delta)
    }

    /// A primary click captures the pointer if it is not already captured.
    /// Returns true when capture was engaged by this click.
    pub fn primary_click(&mut self) -> bool {
        if self.captured {
            return false;
        }
        self.captured = true;
        log::debug!("pointer captured");
        true
    }

    pub fn release_capture(&mut self) {
        if self.captured {
            log::debug!("pointer released");
        }
        self.captured = false;
        self.pointer_delta = (0.0, 0.0);
    }

    pub fn set_captured(&mut self, captured: bool) {
        if captured {
            self.primary_click();
        } else {
            self.release_capture();
        }
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }
}
