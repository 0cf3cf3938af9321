//! ROTORDRIFT: an endless parallax valley flown by helicopter
//!
//! Everything on screen is procedural:
//! - Layered hill strips scrolling at their own factors
//! - Exhaust, grass and rain from fixed-pool particle systems
//! - A two-frame rotor sheet, no asset files anywhere

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod input;
mod parallax;
mod particles;
mod player;
mod render;
mod scene;
mod sprite;
mod textures;

use std::path::Path;

use macroquad::prelude::*;

use config::Config;
use render::{RenderQueue, Renderer};
use scene::Scene;

fn window_conf() -> Conf {
    // Read the config here as well: macroquad needs the window size
    // before main gets to run.
    let config = Config::load_or_default(Path::new(config::CONFIG_PATH));
    Conf {
        window_title: format!("Rotordrift v{}", VERSION),
        window_width: config.window.width,
        window_height: config.window.height,
        window_resizable: false,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    // macroquad's rng runs from a fixed seed until told otherwise
    rand::srand(miniquad::date::now() as u64);

    let config = Config::load_or_default(Path::new(config::CONFIG_PATH));

    let renderer = match Renderer::new(textures::upload()) {
        Ok(renderer) => renderer,
        Err(e) => {
            eprintln!("Failed to build the renderer: {}", e);
            return;
        }
    };

    let mut scene = Scene::new(&config);
    let mut queue = RenderQueue::new();

    println!("=== ROTORDRIFT ===");
    println!("Arrows/WASD steer, F exhaust, R rain, Esc quits");

    let frame_cap = config.window.fps_cap.map(|fps| 1.0 / fps as f64);

    loop {
        // Track frame start time for FPS limiting
        let frame_start = get_time();

        let input = input::poll();
        if input.quit {
            break;
        }

        scene.update(get_frame_time(), &input);

        clear_background(BLACK);
        scene.draw(&mut queue);
        renderer.flush(&mut queue);
        draw_hud(&scene);

        if let Some(target_frame_time) = frame_cap {
            let elapsed = get_time() - frame_start;
            if target_frame_time - elapsed > 0.0 {
                // Native: use sleep for bulk, then spin-wait for precision
                #[cfg(not(target_arch = "wasm32"))]
                {
                    let spin_margin = 0.002; // 2ms
                    while get_time() - frame_start + spin_margin < target_frame_time {
                        std::thread::sleep(std::time::Duration::from_millis(1));
                    }
                    while get_time() - frame_start < target_frame_time {
                        std::hint::spin_loop();
                    }
                }
                // WASM: just spin-wait (no thread::sleep available)
                #[cfg(target_arch = "wasm32")]
                while get_time() - frame_start < target_frame_time {
                    // Busy wait - browser handles frame pacing
                }
            }
        }

        next_frame().await;
    }
}

fn draw_hud(scene: &Scene) {
    let fire = if scene.fire_enabled() { "on" } else { "off" };
    let rain = if scene.rain_enabled() { "on" } else { "off" };
    let line = format!(
        "{} fps | {} particles | fire [F]: {} | rain [R]: {}",
        get_fps(),
        scene.alive_particles(),
        fire,
        rain
    );
    draw_text(&line, 12.0, 24.0, 24.0, WHITE);
    draw_text("arrows/WASD steer, Esc quits", 12.0, 46.0, 20.0, GRAY);
}
