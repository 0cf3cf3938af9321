//! Parallax layers and their scroll controllers.
//!
//! A layer is a list of sprites plus a controller that derives one
//! translation per frame. Distant layers use a small factor and crawl;
//! the play layer uses 1.0 and tracks the target exactly. The update
//! pass computes the translation, the draw pass applies it, so a draw
//! before the first update sees the origin.

use macroquad::prelude::*;

use crate::render::RenderQueue;
use crate::scene::FrameContext;
use crate::sprite::Sprite;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollMode {
    /// Pinned to the screen. The translation stays at zero.
    Stationary,
    /// Opposes the tracked target on both axes, scaled by the factor.
    Tracking { factor: f32 },
}

pub struct ScrollController {
    pub mode: ScrollMode,
    translation: Vec2,
}

impl ScrollController {
    pub fn stationary() -> Self {
        Self {
            mode: ScrollMode::Stationary,
            translation: Vec2::ZERO,
        }
    }

    pub fn tracking(factor: f32) -> Self {
        Self {
            mode: ScrollMode::Tracking { factor },
            translation: Vec2::ZERO,
        }
    }

    pub fn update(&mut self, ctx: &FrameContext) {
        self.translation = match self.mode {
            ScrollMode::Stationary => Vec2::ZERO,
            ScrollMode::Tracking { factor } => -ctx.target * factor,
        };
    }

    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    pub fn factor(&self) -> f32 {
        match self.mode {
            ScrollMode::Stationary => 0.0,
            ScrollMode::Tracking { factor } => factor,
        }
    }
}

pub struct ParallaxLayer {
    pub sprites: Vec<Sprite>,
    pub controller: ScrollController,
}

impl ParallaxLayer {
    pub fn new(controller: ScrollController) -> Self {
        Self {
            sprites: Vec::new(),
            controller,
        }
    }

    /// Appends to the back of the layer, so later sprites draw on top.
    pub fn add_sprite(&mut self, sprite: Sprite) {
        self.sprites.push(sprite);
    }

    pub fn update(&mut self, ctx: &FrameContext) {
        self.controller.update(ctx);
    }

    /// Sprites are queued in insertion order, all sharing the layer's
    /// current translation.
    pub fn draw(&self, queue: &mut RenderQueue) {
        for sprite in &self.sprites {
            sprite.draw(self.controller.translation(), queue);
        }
    }
}
