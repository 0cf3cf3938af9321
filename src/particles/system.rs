//! Fixed-pool particle system with a ring spawn cursor.
//!
//! The pool never grows. Each tick the spawn strategy is offered the slot
//! under the cursor, and the cursor advances whether or not the strategy
//! wrote anything, so a gated-off effect still consumes its turn. Dead
//! slots are skipped by the advance and draw passes and are revived in
//! place whenever the cursor returns to them.

use macroquad::prelude::*;

use crate::render::{Blend, QuadCmd, RenderQueue, TextureId};
use crate::scene::FrameContext;

use super::{Particle, SpawnBehavior, UpdateBehavior};

pub struct ParticleSystem {
    pool: Box<[Particle]>,
    next_slot: usize,
    /// Slots offered to the spawn strategy per update tick.
    pub spawn_rate: usize,
    /// Advisory origin handed to the spawn strategy each invocation; set by
    /// whoever owns the system. Strategies may ignore it.
    pub emitter: Vec2,
    texture: TextureId,
    spawner: Option<Box<dyn SpawnBehavior>>,
    updater: Option<Box<dyn UpdateBehavior>>,
}

impl ParticleSystem {
    /// All slots start dead. An empty pool could never render anything, so
    /// zero capacity is rejected here rather than discovered frame by frame.
    pub fn new(capacity: usize, texture: TextureId) -> Result<Self, &'static str> {
        if capacity == 0 {
            return Err("particle pool capacity must be at least 1");
        }
        Ok(Self {
            pool: vec![Particle::default(); capacity].into_boxed_slice(),
            next_slot: 0,
            spawn_rate: 1,
            emitter: Vec2::ZERO,
            texture,
            spawner: None,
            updater: None,
        })
    }

    pub fn set_spawn_behavior(&mut self, behavior: impl SpawnBehavior + 'static) {
        self.spawner = Some(Box::new(behavior));
    }

    pub fn set_update_behavior(&mut self, behavior: impl UpdateBehavior + 'static) {
        self.updater = Some(Box::new(behavior));
    }

    pub fn capacity(&self) -> usize {
        self.pool.len()
    }

    /// Pool index the next spawn will be offered.
    pub fn next_slot(&self) -> usize {
        self.next_slot
    }

    pub fn particles(&self) -> &[Particle] {
        &self.pool
    }

    pub fn alive_count(&self) -> usize {
        self.pool.iter().filter(|p| p.is_alive()).count()
    }

    /// One simulation tick: spawn phase, then advance phase.
    ///
    /// Does nothing until both behaviors are assigned. The spawn strategy
    /// gets each offered slot mutably and may revive it or leave it
    /// untouched; the cursor advances either way. Only live slots reach the
    /// update strategy, and the strategy owns the life decrement.
    pub fn update(&mut self, dt: f32, ctx: &FrameContext) {
        let (spawner, updater) = match (self.spawner.as_mut(), self.updater.as_mut()) {
            (Some(spawner), Some(updater)) => (spawner, updater),
            _ => return,
        };

        for _ in 0..self.spawn_rate {
            spawner.spawn(ctx, self.emitter, &mut self.pool[self.next_slot]);
            self.next_slot = (self.next_slot + 1) % self.pool.len();
        }

        for slot in self.pool.iter_mut() {
            if slot.is_alive() {
                updater.update(dt, slot);
            }
        }
    }

    /// Queue one additive quad per live slot, in pool order. Scale that
    /// decayed past zero is clamped; the quad is still issued.
    pub fn draw(&self, queue: &mut RenderQueue) {
        for slot in self.pool.iter() {
            if !slot.is_alive() {
                continue;
            }
            queue.push(QuadCmd {
                texture: self.texture,
                position: slot.position,
                source: None,
                color: slot.color,
                rotation: 0.0,
                scale: slot.scale.max(0.0),
                flip_x: false,
                blend: Blend::Additive,
            });
        }
    }
}
