//! The helicopter.

use macroquad::prelude::*;

use crate::config::PlayerConfig;
use crate::textures::{HELI_FRAMES, HELI_FRAME_H, HELI_FRAME_W};

/// Rotor sheet frames per second.
const ROTOR_FPS: f32 = 18.0;
const ROTOR_PERIOD: f32 = HELI_FRAMES as f32 / ROTOR_FPS;

pub struct Player {
    /// World position, and the scroll target for the whole scene.
    pub position: Vec2,
    pub facing_left: bool,
    speed: f32,
    drift: f32,
    min_altitude: f32,
    max_altitude: f32,
    rotor_clock: f32,
}

impl Player {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            position: vec2(config.start_x, config.start_y),
            facing_left: false,
            speed: config.speed,
            drift: config.drift,
            min_altitude: config.min_altitude,
            max_altitude: config.max_altitude,
            rotor_clock: 0.0,
        }
    }

    /// Steering adds onto the constant forward drift. Altitude is clamped
    /// to the flight band; x runs on forever.
    pub fn update(&mut self, dt: f32, steer: Vec2) {
        let velocity = vec2(self.drift + steer.x * self.speed, steer.y * self.speed);
        self.position += velocity * dt;
        self.position.y = self.position.y.clamp(self.min_altitude, self.max_altitude);

        if steer.x < 0.0 {
            self.facing_left = true;
        } else if steer.x > 0.0 {
            self.facing_left = false;
        }

        self.rotor_clock = (self.rotor_clock + dt) % ROTOR_PERIOD;
    }

    /// Source rectangle of the current rotor frame in the sheet.
    pub fn frame_rect(&self) -> Rect {
        let frame = (self.rotor_clock * ROTOR_FPS) as usize % HELI_FRAMES;
        Rect::new(frame as f32 * HELI_FRAME_W, 0.0, HELI_FRAME_W, HELI_FRAME_H)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(&PlayerConfig::default())
    }

    #[test]
    fn test_drift_carries_the_player_forward() {
        let mut player = player();
        let start = player.position;
        player.update(1.0, Vec2::ZERO);
        assert_eq!(player.position.x, start.x + 90.0);
        assert_eq!(player.position.y, start.y);
    }

    #[test]
    fn test_steering_left_overcomes_drift() {
        let mut player = player();
        let start = player.position;
        player.update(1.0, vec2(-1.0, 0.0));
        assert_eq!(player.position.x, start.x + 90.0 - 260.0);
    }

    #[test]
    fn test_altitude_stays_inside_the_band() {
        let mut player = player();
        for _ in 0..100 {
            player.update(0.1, vec2(0.0, -1.0));
        }
        assert_eq!(player.position.y, 80.0);

        for _ in 0..100 {
            player.update(0.1, vec2(0.0, 1.0));
        }
        assert_eq!(player.position.y, 620.0);
    }

    #[test]
    fn test_facing_follows_steer_and_sticks_when_neutral() {
        let mut player = player();
        assert!(!player.facing_left);

        player.update(0.016, vec2(-1.0, 0.0));
        assert!(player.facing_left);

        player.update(0.016, Vec2::ZERO);
        assert!(player.facing_left);

        player.update(0.016, vec2(1.0, 0.0));
        assert!(!player.facing_left);
    }

    #[test]
    fn test_rotor_frames_cycle() {
        let mut player = player();
        assert_eq!(player.frame_rect().x, 0.0);

        player.update(0.06, Vec2::ZERO);
        assert_eq!(player.frame_rect().x, HELI_FRAME_W);

        player.update(0.06, Vec2::ZERO);
        assert_eq!(player.frame_rect().x, 0.0);
    }
}
