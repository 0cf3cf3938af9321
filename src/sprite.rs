//! Textured quads owned by parallax layers.

use macroquad::prelude::*;

use crate::render::{Blend, QuadCmd, RenderQueue, TextureId};

/// A static sprite. `position` is in the owning layer's coordinate space;
/// the layer supplies its scroll translation at draw time.
pub struct Sprite {
    pub texture: TextureId,
    pub position: Vec2,
    pub scale: f32,
    pub color: Color,
    pub flip_x: bool,
    /// Sub-rectangle for sprite sheets, full texture when `None`.
    pub source: Option<Rect>,
}

impl Sprite {
    pub fn new(texture: TextureId, position: Vec2) -> Self {
        Self {
            texture,
            position,
            scale: 1.0,
            color: WHITE,
            flip_x: false,
            source: None,
        }
    }

    pub fn draw(&self, translation: Vec2, queue: &mut RenderQueue) {
        queue.push(QuadCmd {
            texture: self.texture,
            position: self.position + translation,
            source: self.source,
            color: self.color,
            rotation: 0.0,
            scale: self.scale,
            flip_x: self.flip_x,
            blend: Blend::Alpha,
        });
    }
}
