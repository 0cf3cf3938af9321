//! Scene driver: owns every layer and particle system, updates them in
//! registration order, and draws them by ascending draw key.
//!
//! Components never reach back into game state. Each frame the driver
//! snapshots what they are allowed to see into a [`FrameContext`] and
//! hands it down. Draw keys live in the driver's registration list, not
//! on the components, so the same layer type can sit anywhere in the
//! stack.
//!
//! The helicopter rides a factor-1.0 layer: its sprite sits at
//! `target + anchor` in layer space, so the layer's `-target`
//! translation pins it to the anchor on screen while everything else
//! slides past.

use macroquad::prelude::*;

use crate::config::Config;
use crate::input::InputFrame;
use crate::parallax::{ParallaxLayer, ScrollController};
use crate::particles::{Kinematics, ParticleKind, ParticleSystem};
use crate::player::Player;
use crate::render::{RenderQueue, TextureId};
use crate::sprite::Sprite;
use crate::textures::{
    FOREGROUND_HEIGHT, HELI_FRAME_H, HELI_FRAME_W, HILLS_FAR_HEIGHT, HILLS_NEAR_HEIGHT, SKY_SIZE,
    STRIP_WIDTH, TEX_FOREGROUND, TEX_HELI, TEX_HILLS_FAR, TEX_HILLS_NEAR, TEX_PARTICLE, TEX_SKY,
};

/// Draw keys for the stock scene, lowest first
pub mod draw_order {
    pub const SKY: i32 = 0;
    pub const HILLS_FAR: i32 = 10;
    pub const HILLS_NEAR: i32 = 20;
    pub const PLAYER: i32 = 30;
    pub const FIRE: i32 = 40;
    pub const GRASS: i32 = 41;
    pub const RAIN: i32 = 42;
    pub const FOREGROUND: i32 = 50;
}

/// Which stock effects may spawn this frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct EffectToggles {
    pub fire: bool,
    pub grass: bool,
    pub rain: bool,
}

/// Read-only snapshot handed to every component each frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    /// Position the scrolling opposes, in world units.
    pub target: Vec2,
    /// Viewport size in pixels.
    pub view: Vec2,
    pub toggles: EffectToggles,
}

pub enum Node {
    Layer(ParallaxLayer),
    Particles(ParticleSystem),
}

struct Registered {
    node: Node,
    draw_key: i32,
}

const HELI_SCALE: f32 = 2.0;
/// Where on screen the helicopter is pinned, as a fraction of the view.
const ANCHOR_FRACTION: Vec2 = vec2(0.32, 0.45);
/// Exhaust port on the tail boom, in sheet pixels.
const EXHAUST_PORT: Vec2 = vec2(8.0, 17.0);

pub struct Scene {
    nodes: Vec<Registered>,
    draw_sequence: Vec<usize>,
    /// Scenery strip layers that recycle their tiles.
    strips: Vec<usize>,
    player: Player,
    player_layer: usize,
    fire: Option<usize>,
    grass: Option<usize>,
    fire_on: bool,
    rain_on: bool,
    grass_line: f32,
    view: Vec2,
    anchor: Vec2,
}

impl Scene {
    pub fn new(config: &Config) -> Self {
        let view = vec2(config.window.width as f32, config.window.height as f32);
        let mut scene = Self {
            nodes: Vec::new(),
            draw_sequence: Vec::new(),
            strips: Vec::new(),
            player: Player::new(&config.player),
            player_layer: 0,
            fire: None,
            grass: None,
            fire_on: config.effects.fire,
            rain_on: config.effects.rain,
            grass_line: config.player.grass_line,
            view,
            anchor: view * ANCHOR_FRACTION,
        };
        scene.build(config);
        scene
    }

    /// Add a component. Updates run in registration order; draws follow
    /// the key, ties broken by registration order.
    pub fn register(&mut self, node: Node, draw_key: i32) -> usize {
        let index = self.nodes.len();
        self.nodes.push(Registered { node, draw_key });
        self.draw_sequence.push(index);
        let nodes = &self.nodes;
        self.draw_sequence.sort_by_key(|&i| (nodes[i].draw_key, i));
        index
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn fire_enabled(&self) -> bool {
        self.fire_on
    }

    pub fn rain_enabled(&self) -> bool {
        self.rain_on
    }

    /// Live slots summed over every particle system, for the HUD.
    pub fn alive_particles(&self) -> usize {
        self.nodes
            .iter()
            .map(|registered| match &registered.node {
                Node::Particles(system) => system.alive_count(),
                Node::Layer(_) => 0,
            })
            .sum()
    }

    pub fn update(&mut self, dt: f32, input: &InputFrame) {
        if input.toggle_fire {
            self.fire_on = !self.fire_on;
        }
        if input.toggle_rain {
            self.rain_on = !self.rain_on;
        }

        self.player.update(dt, input.steer);
        self.place_player();
        self.aim_emitters();

        let ctx = self.frame_context();
        for registered in &mut self.nodes {
            match &mut registered.node {
                Node::Layer(layer) => layer.update(&ctx),
                Node::Particles(system) => system.update(dt, &ctx),
            }
        }

        self.recycle_strips();
    }

    pub fn draw(&self, queue: &mut RenderQueue) {
        for &index in &self.draw_sequence {
            match &self.nodes[index].node {
                Node::Layer(layer) => layer.draw(queue),
                Node::Particles(system) => system.draw(queue),
            }
        }
    }

    fn frame_context(&self) -> FrameContext {
        FrameContext {
            target: self.player.position,
            view: self.view,
            toggles: EffectToggles {
                fire: self.fire_on,
                // Larger y is closer to the ground.
                grass: self.player.position.y >= self.grass_line,
                rain: self.rain_on,
            },
        }
    }

    // ==================== composition ====================

    fn build(&mut self, config: &Config) {
        let mut sky = ParallaxLayer::new(ScrollController::stationary());
        let mut backdrop = Sprite::new(TEX_SKY, Vec2::ZERO);
        backdrop.scale = (self.view.x / SKY_SIZE.0 as f32).max(self.view.y / SKY_SIZE.1 as f32);
        sky.add_sprite(backdrop);
        self.register(Node::Layer(sky), draw_order::SKY);

        let far = self.strip_layer(config, TEX_HILLS_FAR, HILLS_FAR_HEIGHT, config.scroll.far, 8.0);
        let index = self.register(Node::Layer(far), draw_order::HILLS_FAR);
        self.strips.push(index);

        let near =
            self.strip_layer(config, TEX_HILLS_NEAR, HILLS_NEAR_HEIGHT, config.scroll.near, 12.0);
        let index = self.register(Node::Layer(near), draw_order::HILLS_NEAR);
        self.strips.push(index);

        let ground = self.strip_layer(
            config,
            TEX_FOREGROUND,
            FOREGROUND_HEIGHT,
            config.scroll.foreground,
            80.0,
        );
        let index = self.register(Node::Layer(ground), draw_order::FOREGROUND);
        self.strips.push(index);

        let mut play = ParallaxLayer::new(ScrollController::tracking(1.0));
        let mut heli = Sprite::new(TEX_HELI, self.player.position + self.anchor);
        heli.scale = HELI_SCALE;
        heli.source = Some(self.player.frame_rect());
        play.add_sprite(heli);
        self.player_layer = self.register(Node::Layer(play), draw_order::PLAYER);

        self.fire = self.effect(config, ParticleKind::Fire, draw_order::FIRE);
        self.grass = self.effect(config, ParticleKind::Grass, draw_order::GRASS);
        self.effect(config, ParticleKind::Rain, draw_order::RAIN);
    }

    /// Enough tiles side by side to span the view plus a margin, based so
    /// the strip's bottom edge stays below the view across the whole
    /// flight band. `reveal` is how far the strip hangs past the bottom
    /// edge at the lowest flight; climbing sinks it further.
    fn strip_layer(
        &self,
        config: &Config,
        texture: TextureId,
        height: u16,
        factor: f32,
        reveal: f32,
    ) -> ParallaxLayer {
        let base = self.view.y - height as f32 + factor * config.player.max_altitude + reveal;
        let mut layer = ParallaxLayer::new(ScrollController::tracking(factor));
        let tiles = (self.view.x / STRIP_WIDTH as f32).ceil() as i32 + 2;
        for i in -1..tiles - 1 {
            layer.add_sprite(Sprite::new(texture, vec2(i as f32 * STRIP_WIDTH as f32, base)));
        }
        layer
    }

    fn effect(&mut self, config: &Config, kind: ParticleKind, draw_key: i32) -> Option<usize> {
        match ParticleSystem::new(config.particles.pool, TEX_PARTICLE) {
            Ok(mut system) => {
                system.spawn_rate = config.particles.spawn_rate;
                system.set_spawn_behavior(kind);
                system.set_update_behavior(Kinematics);
                Some(self.register(Node::Particles(system), draw_key))
            }
            Err(e) => {
                eprintln!("Skipping {:?} particles: {}", kind, e);
                None
            }
        }
    }

    // ==================== per-frame glue ====================

    fn place_player(&mut self) {
        let frame = self.player.frame_rect();
        let flip = self.player.facing_left;
        let position = self.player.position + self.anchor;
        if let Node::Layer(layer) = &mut self.nodes[self.player_layer].node {
            if let Some(heli) = layer.sprites.first_mut() {
                heli.position = position;
                heli.source = Some(frame);
                heli.flip_x = flip;
            }
        }
    }

    /// Particles live in screen space, so the emitters chase the pinned
    /// helicopter rather than its world position.
    fn aim_emitters(&mut self) {
        let port_x = if self.player.facing_left {
            (HELI_FRAME_W - EXHAUST_PORT.x) * HELI_SCALE
        } else {
            EXHAUST_PORT.x * HELI_SCALE
        };
        let exhaust = self.anchor + vec2(port_x, EXHAUST_PORT.y * HELI_SCALE);
        if let Some(index) = self.fire {
            if let Node::Particles(system) = &mut self.nodes[index].node {
                system.emitter = exhaust;
            }
        }

        let skids =
            self.anchor + vec2(HELI_FRAME_W * HELI_SCALE * 0.5, HELI_FRAME_H * HELI_SCALE + 6.0);
        if let Some(index) = self.grass {
            if let Node::Particles(system) = &mut self.nodes[index].node {
                system.emitter = skids;
            }
        }
    }

    /// Re-tile each strip around the window it is visible through. The
    /// window in layer space starts at `factor * target.x` and spans one
    /// view width; tiles snap to grid positions bracketing it, so flying
    /// either direction (or teleporting) can never open a gap.
    fn recycle_strips(&mut self) {
        let target_x = self.player.position.x;
        let width = STRIP_WIDTH as f32;
        for &index in &self.strips {
            let Node::Layer(layer) = &mut self.nodes[index].node else {
                continue;
            };
            let left = layer.controller.factor() * target_x;
            let first = (left / width).floor() - 1.0;
            for (i, sprite) in layer.sprites.iter_mut().enumerate() {
                sprite.position.x = (first + i as f32) * width;
            }
        }
    }
}
