//! Draw command queue and the screen renderer.
//!
//! Simulation code never touches the GPU. It pushes [`QuadCmd`]s into a
//! [`RenderQueue`], which the [`Renderer`] flushes once per frame. That
//! keeps every draw pass inspectable in tests and confines the GL state
//! (including the additive blend material) to one place.

use macroquad::miniquad::{BlendFactor, BlendState, BlendValue, Equation, PipelineParams};
use macroquad::prelude::*;

/// Handle into the texture set loaded at startup. The renderer indexes
/// with the raw value, so an id is only valid for the set it was built
/// against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blend {
    /// Standard alpha compositing, the default pipeline.
    Alpha,
    /// Source adds onto the destination. Used by particle quads.
    Additive,
}

/// One textured quad, in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadCmd {
    pub texture: TextureId,
    pub position: Vec2,
    /// Sub-rectangle of the texture, for sprite sheets.
    pub source: Option<Rect>,
    pub color: Color,
    /// Radians, clockwise around the quad center.
    pub rotation: f32,
    pub scale: f32,
    pub flip_x: bool,
    pub blend: Blend,
}

/// Frame-local list of quads, drawn in push order.
#[derive(Default)]
pub struct RenderQueue {
    cmds: Vec<QuadCmd>,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }

    pub fn push(&mut self, cmd: QuadCmd) {
        self.cmds.push(cmd);
    }

    pub fn cmds(&self) -> &[QuadCmd] {
        &self.cmds
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }
}

// ==================== gpu side ====================

// Macroquad's stock shader pair. The material exists only to carry the
// additive blend state; the shading itself is unchanged.
const VERTEX_SHADER: &str = "#version 100
attribute vec3 position;
attribute vec2 texcoord;
attribute vec4 color0;

varying lowp vec2 uv;
varying lowp vec4 color;

uniform mat4 Model;
uniform mat4 Projection;

void main() {
    gl_Position = Projection * Model * vec4(position, 1);
    color = color0 / 255.0;
    uv = texcoord;
}";

const FRAGMENT_SHADER: &str = "#version 100
varying lowp vec4 color;
varying lowp vec2 uv;

uniform sampler2D Texture;

void main() {
    gl_FragColor = color * texture2D(Texture, uv);
}";

/// Owns the loaded textures and the additive-blend material.
pub struct Renderer {
    textures: Vec<Texture2D>,
    additive: Material,
}

impl Renderer {
    pub fn new(textures: Vec<Texture2D>) -> Result<Self, macroquad::Error> {
        let additive = load_material(
            ShaderSource::Glsl {
                vertex: VERTEX_SHADER,
                fragment: FRAGMENT_SHADER,
            },
            MaterialParams {
                pipeline_params: PipelineParams {
                    color_blend: Some(BlendState::new(
                        Equation::Add,
                        BlendFactor::Value(BlendValue::SourceAlpha),
                        BlendFactor::One,
                    )),
                    alpha_blend: Some(BlendState::new(
                        Equation::Add,
                        BlendFactor::Zero,
                        BlendFactor::One,
                    )),
                    ..Default::default()
                },
                ..Default::default()
            },
        )?;
        Ok(Self { textures, additive })
    }

    /// Draw every queued quad in order and leave the queue empty with the
    /// default material bound.
    pub fn flush(&self, queue: &mut RenderQueue) {
        let mut blend = Blend::Alpha;
        for cmd in queue.cmds() {
            if cmd.blend != blend {
                blend = cmd.blend;
                match blend {
                    Blend::Additive => gl_use_material(&self.additive),
                    Blend::Alpha => gl_use_default_material(),
                }
            }
            debug_assert!(
                cmd.texture.0 < self.textures.len(),
                "texture id {} outside the loaded set of {}",
                cmd.texture.0,
                self.textures.len()
            );
            let texture = &self.textures[cmd.texture.0];
            let base = match cmd.source {
                Some(rect) => vec2(rect.w, rect.h),
                None => vec2(texture.width(), texture.height()),
            };
            draw_texture_ex(
                texture,
                cmd.position.x,
                cmd.position.y,
                cmd.color,
                DrawTextureParams {
                    dest_size: Some(base * cmd.scale),
                    source: cmd.source,
                    rotation: cmd.rotation,
                    flip_x: cmd.flip_x,
                    ..Default::default()
                },
            );
        }
        gl_use_default_material();
        queue.clear();
    }
}
