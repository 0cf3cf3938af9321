//! Keyboard input.

use macroquad::prelude::*;

/// One frame of input, sampled once at the top of the loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputFrame {
    /// Steering from the arrow keys or WASD, each axis in -1..=1, y down.
    pub steer: Vec2,
    /// F was pressed this frame.
    pub toggle_fire: bool,
    /// R was pressed this frame.
    pub toggle_rain: bool,
    /// Esc was pressed this frame.
    pub quit: bool,
}

pub fn poll() -> InputFrame {
    let mut steer = Vec2::ZERO;
    if is_key_down(KeyCode::Left) || is_key_down(KeyCode::A) {
        steer.x -= 1.0;
    }
    if is_key_down(KeyCode::Right) || is_key_down(KeyCode::D) {
        steer.x += 1.0;
    }
    if is_key_down(KeyCode::Up) || is_key_down(KeyCode::W) {
        steer.y -= 1.0;
    }
    if is_key_down(KeyCode::Down) || is_key_down(KeyCode::S) {
        steer.y += 1.0;
    }
    // Normalize diagonals so they are no faster than a single axis.
    if steer.length() > 1.0 {
        steer = steer.normalize();
    }

    InputFrame {
        steer,
        toggle_fire: is_key_pressed(KeyCode::F),
        toggle_rain: is_key_pressed(KeyCode::R),
        quit: is_key_pressed(KeyCode::Escape),
    }
}
