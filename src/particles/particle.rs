//! The particle record. Plain data; identity is the pool slot index.

use macroquad::prelude::*;

/// A single particle slot.
///
/// `life` doubles as the liveness flag: a slot at or below zero is dead and
/// waits in place for the spawn cursor to come back around. Dead slots keep
/// their stale fields; nothing zeroes them.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub color: Color,
    /// Uniform quad scale. Decays independently of life, so long-lived
    /// particles can reach zero or negative scale while still alive; the
    /// draw pass clamps, the simulation does not.
    pub scale: f32,
    /// Seconds remaining. `<= 0.0` means the slot is free.
    pub life: f32,
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            color: WHITE,
            scale: 1.0,
            life: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_slot_is_dead() {
        assert!(!Particle::default().is_alive());
    }

    #[test]
    fn test_liveness_threshold() {
        let mut p = Particle::default();
        p.life = 0.001;
        assert!(p.is_alive());
        p.life = 0.0;
        assert!(!p.is_alive());
        p.life = -0.5;
        assert!(!p.is_alive());
    }
}
