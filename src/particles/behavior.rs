//! Particle behaviors: what gets written into a slot when it spawns, and
//! how a live slot advances each tick.
//!
//! Spawning is a tagged strategy rather than a closure so nothing captures
//! game state: every gate and dimension a stock kind consults arrives
//! through the frame context or the system's emitter. Custom strategies
//! (tests, tooling) implement the same traits.

use macroquad::prelude::*;
use macroquad::rand::gen_range;

use crate::scene::FrameContext;

use super::Particle;

/// Writes a fresh particle into the slot under the spawn cursor, or leaves
/// it untouched when the strategy's gate is off this frame.
pub trait SpawnBehavior {
    fn spawn(&mut self, ctx: &FrameContext, emitter: Vec2, slot: &mut Particle);
}

/// Advances one live particle. The strategy owns the life decrement; the
/// system never ages a particle on its behalf.
pub trait UpdateBehavior {
    fn update(&mut self, dt: f32, slot: &mut Particle);
}

// ==================== Stock spawn strategies ====================

/// Spawn tuning for one particle kind. Velocity and lift are sampled
/// uniformly from their ranges at spawn time.
#[derive(Debug, Clone, Copy)]
pub struct SpawnParams {
    pub velocity_x: (f32, f32),
    pub velocity_y: (f32, f32),
    /// Vertical acceleration range (negative is lift).
    pub accel_y: (f32, f32),
    pub color: Color,
    pub scale: f32,
    pub life: f32,
}

/// The stock particle effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Engine exhaust streaming from the emitter.
    Fire,
    /// Debris kicked up at the emitter while flying low; the scene gates
    /// this one on altitude.
    Grass,
    /// Falls from the top edge anywhere across the view.
    Rain,
}

impl ParticleKind {
    pub fn params(self) -> SpawnParams {
        match self {
            ParticleKind::Fire => SpawnParams {
                velocity_x: (-50.0, 50.0),
                velocity_y: (0.0, 100.0),
                accel_y: (-0.1, 0.0),
                color: GOLD,
                scale: 1.0,
                life: 1.0,
            },
            ParticleKind::Grass => SpawnParams {
                velocity_x: (-50.0, 50.0),
                velocity_y: (0.0, 100.0),
                accel_y: (-0.1, 0.0),
                color: GREEN,
                scale: 1.0,
                life: 1.0,
            },
            ParticleKind::Rain => SpawnParams {
                velocity_x: (0.0, 0.0),
                velocity_y: (1000.0, 1000.0),
                accel_y: (-0.1, -0.1),
                color: SKYBLUE,
                scale: 0.5,
                life: 2.0,
            },
        }
    }

    /// Whether this kind's toggle is on for the current frame.
    pub fn enabled(self, ctx: &FrameContext) -> bool {
        match self {
            ParticleKind::Fire => ctx.toggles.fire,
            ParticleKind::Grass => ctx.toggles.grass,
            ParticleKind::Rain => ctx.toggles.rain,
        }
    }

    fn origin(self, ctx: &FrameContext, emitter: Vec2) -> Vec2 {
        match self {
            ParticleKind::Fire | ParticleKind::Grass => emitter,
            ParticleKind::Rain => vec2(gen_range(0.0, ctx.view.x), 0.0),
        }
    }
}

impl SpawnBehavior for ParticleKind {
    fn spawn(&mut self, ctx: &FrameContext, emitter: Vec2, slot: &mut Particle) {
        if !self.enabled(ctx) {
            // Gate off: the slot stays exactly as it was.
            return;
        }
        let p = self.params();
        slot.position = self.origin(ctx, emitter);
        slot.velocity = vec2(
            gen_range(p.velocity_x.0, p.velocity_x.1),
            gen_range(p.velocity_y.0, p.velocity_y.1),
        );
        slot.acceleration = vec2(0.0, gen_range(p.accel_y.0, p.accel_y.1));
        slot.color = p.color;
        slot.scale = p.scale;
        slot.life = p.life;
    }
}

// ==================== Stock update strategy ====================

/// Velocity absorbs acceleration, position absorbs velocity, and scale and
/// life both lose one unit per second.
#[derive(Debug, Clone, Copy, Default)]
pub struct Kinematics;

impl UpdateBehavior for Kinematics {
    fn update(&mut self, dt: f32, slot: &mut Particle) {
        slot.velocity += slot.acceleration * dt;
        slot.position += slot.velocity * dt;
        slot.scale -= dt;
        slot.life -= dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::EffectToggles;

    fn ctx_with(toggles: EffectToggles) -> FrameContext {
        FrameContext {
            target: vec2(300.0, 400.0),
            view: vec2(1280.0, 720.0),
            toggles,
        }
    }

    fn all_on() -> EffectToggles {
        EffectToggles {
            fire: true,
            grass: true,
            rain: true,
        }
    }

    #[test]
    fn test_fire_spawns_at_emitter_with_params() {
        let ctx = ctx_with(all_on());
        let emitter = vec2(42.0, 17.0);
        for _ in 0..50 {
            let mut slot = Particle::default();
            ParticleKind::Fire.spawn(&ctx, emitter, &mut slot);
            let p = ParticleKind::Fire.params();
            assert_eq!(slot.position, emitter);
            assert!(slot.velocity.x >= p.velocity_x.0 && slot.velocity.x <= p.velocity_x.1);
            assert!(slot.velocity.y >= p.velocity_y.0 && slot.velocity.y <= p.velocity_y.1);
            assert_eq!(slot.acceleration.x, 0.0);
            assert!(slot.acceleration.y >= p.accel_y.0 && slot.acceleration.y <= p.accel_y.1);
            assert_eq!(slot.color, GOLD);
            assert_eq!(slot.scale, 1.0);
            assert_eq!(slot.life, 1.0);
        }
    }

    #[test]
    fn test_gate_off_writes_nothing() {
        let ctx = ctx_with(EffectToggles::default());
        let mut slot = Particle {
            position: vec2(9.0, 9.0),
            life: -3.0,
            ..Particle::default()
        };
        ParticleKind::Fire.spawn(&ctx, vec2(1.0, 2.0), &mut slot);
        assert_eq!(slot.position, vec2(9.0, 9.0));
        assert_eq!(slot.life, -3.0);
        assert!(!slot.is_alive());
    }

    #[test]
    fn test_rain_spawns_across_the_top() {
        let ctx = ctx_with(all_on());
        for _ in 0..50 {
            let mut slot = Particle::default();
            ParticleKind::Rain.spawn(&ctx, vec2(500.0, 500.0), &mut slot);
            assert!(slot.position.x >= 0.0 && slot.position.x <= ctx.view.x);
            assert_eq!(slot.position.y, 0.0);
            assert_eq!(slot.velocity, vec2(0.0, 1000.0));
            assert_eq!(slot.acceleration, vec2(0.0, -0.1));
            assert_eq!(slot.scale, 0.5);
            assert_eq!(slot.life, 2.0);
        }
    }

    #[test]
    fn test_grass_uses_emitter_and_its_own_gate() {
        let mut toggles = all_on();
        toggles.grass = false;
        let ctx = ctx_with(toggles);
        let mut slot = Particle::default();
        ParticleKind::Grass.spawn(&ctx, vec2(5.0, 6.0), &mut slot);
        assert!(!slot.is_alive());

        let ctx = ctx_with(all_on());
        ParticleKind::Grass.spawn(&ctx, vec2(5.0, 6.0), &mut slot);
        assert!(slot.is_alive());
        assert_eq!(slot.position, vec2(5.0, 6.0));
        assert_eq!(slot.color, GREEN);
    }

    #[test]
    fn test_kinematics_integration_order() {
        let mut slot = Particle {
            position: vec2(10.0, 20.0),
            velocity: vec2(10.0, 0.0),
            acceleration: vec2(0.0, 100.0),
            scale: 1.0,
            life: 1.0,
            ..Particle::default()
        };
        Kinematics.update(0.5, &mut slot);
        // Acceleration lands in velocity before position integrates.
        assert_eq!(slot.velocity, vec2(10.0, 50.0));
        assert_eq!(slot.position, vec2(15.0, 45.0));
        assert_eq!(slot.scale, 0.5);
        assert_eq!(slot.life, 0.5);
    }

    #[test]
    fn test_kinematics_decays_scale_past_zero() {
        let mut slot = Particle {
            scale: 0.5,
            life: 2.0,
            ..Particle::default()
        };
        Kinematics.update(1.0, &mut slot);
        assert!(slot.is_alive());
        assert!(slot.scale < 0.0);
    }
}
