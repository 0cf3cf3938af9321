//! Procedural textures.
//!
//! Everything is drawn into CPU images first and uploaded in one pass, so
//! the art can be unit tested without a GL context. Texture ids are fixed
//! constants; [`build_images`] returns the images in id order.

use macroquad::prelude::*;

use crate::render::TextureId;

pub const TEX_PARTICLE: TextureId = TextureId(0);
pub const TEX_SKY: TextureId = TextureId(1);
pub const TEX_HILLS_FAR: TextureId = TextureId(2);
pub const TEX_HILLS_NEAR: TextureId = TextureId(3);
pub const TEX_FOREGROUND: TextureId = TextureId(4);
pub const TEX_HELI: TextureId = TextureId(5);

const TEXTURE_COUNT: usize = 6;

/// Scrolling strips share one width so the tiling math lives in one place.
pub const STRIP_WIDTH: u16 = 1400;

pub const SKY_SIZE: (u16, u16) = (640, 360);
pub const HILLS_FAR_HEIGHT: u16 = 460;
pub const HILLS_NEAR_HEIGHT: u16 = 560;
pub const FOREGROUND_HEIGHT: u16 = 240;

/// One helicopter frame; the sheet holds two side by side.
pub const HELI_FRAME_W: f32 = 64.0;
pub const HELI_FRAME_H: f32 = 32.0;
pub const HELI_FRAMES: usize = 2;

pub fn build_images() -> Vec<Image> {
    let images = vec![
        particle_dot(16),
        sky(SKY_SIZE.0, SKY_SIZE.1),
        hill_strip(
            STRIP_WIDTH,
            HILLS_FAR_HEIGHT,
            90.0,
            0.0,
            Color::from_rgba(64, 84, 120, 255),
        ),
        hill_strip(
            STRIP_WIDTH,
            HILLS_NEAR_HEIGHT,
            130.0,
            2.4,
            Color::from_rgba(52, 96, 82, 255),
        ),
        hill_strip(
            STRIP_WIDTH,
            FOREGROUND_HEIGHT,
            28.0,
            4.1,
            Color::from_rgba(46, 70, 38, 255),
        ),
        heli_sheet(),
    ];
    debug_assert_eq!(images.len(), TEXTURE_COUNT);
    images
}

/// Upload the generated images. Nearest filtering keeps the pixel art crisp.
pub fn upload() -> Vec<Texture2D> {
    build_images()
        .iter()
        .map(|image| {
            let texture = Texture2D::from_image(image);
            texture.set_filter(FilterMode::Nearest);
            texture
        })
        .collect()
}

// ==================== image builders ====================

/// White dot with a soft radial falloff. Tinting happens per quad, so the
/// image itself stays white.
fn particle_dot(size: u16) -> Image {
    let mut image = Image::gen_image_color(size, size, BLANK);
    let center = (size as f32 - 1.0) / 2.0;
    let radius = size as f32 / 2.0;
    for y in 0..size as u32 {
        for x in 0..size as u32 {
            let d = vec2(x as f32 - center, y as f32 - center).length() / radius;
            let a = (1.0 - d).clamp(0.0, 1.0);
            image.set_pixel(x, y, Color::new(1.0, 1.0, 1.0, a * a));
        }
    }
    image
}

/// Vertical gradient, deep blue up top fading toward the horizon.
fn sky(width: u16, height: u16) -> Image {
    let top = Color::from_rgba(38, 58, 120, 255);
    let horizon = Color::from_rgba(150, 186, 222, 255);
    let mut image = Image::gen_image_color(width, height, BLANK);
    for y in 0..height as u32 {
        let t = y as f32 / (height - 1) as f32;
        let row = Color::new(
            top.r + (horizon.r - top.r) * t,
            top.g + (horizon.g - top.g) * t,
            top.b + (horizon.b - top.b) * t,
            1.0,
        );
        for x in 0..width as u32 {
            image.set_pixel(x, y, row);
        }
    }
    image
}

/// Silhouette strip, solid below a wavy crest line and transparent above.
/// The crest mixes integer multiples of one period across the width, so
/// copies of the strip tile without a seam.
fn hill_strip(width: u16, height: u16, amplitude: f32, phase: f32, color: Color) -> Image {
    let mut image = Image::gen_image_color(width, height, BLANK);
    for x in 0..width as u32 {
        let top = crest(x, width, height, amplitude, phase);
        for y in top..height as u32 {
            image.set_pixel(x, y, color);
        }
    }
    image
}

fn crest(x: u32, width: u16, height: u16, amplitude: f32, phase: f32) -> u32 {
    let t = x as f32 / width as f32 * std::f32::consts::TAU;
    let wave = 0.6 * (t * 2.0 + phase).sin() + 0.3 * (t * 5.0 + phase * 1.7).sin()
        + 0.1 * (t * 9.0).sin();
    let base = height as f32 * 0.35;
    (base - amplitude * wave).clamp(0.0, (height - 1) as f32) as u32
}

/// Two-frame helicopter sheet facing right. The frames differ only in the
/// rotor blur, which is what sells the spin.
fn heli_sheet() -> Image {
    let body = Color::from_rgba(168, 52, 44, 255);
    let shade = Color::from_rgba(120, 34, 30, 255);
    let glass = Color::from_rgba(158, 206, 232, 255);
    let skid = Color::from_rgba(60, 60, 66, 255);
    let blur = Color::new(0.85, 0.87, 0.9, 0.8);

    let frame_w = HELI_FRAME_W as u32;
    let mut image = Image::gen_image_color(
        (HELI_FRAME_W as u16) * HELI_FRAMES as u16,
        HELI_FRAME_H as u16,
        BLANK,
    );

    for frame in 0..HELI_FRAMES as u32 {
        let ox = frame * frame_w;

        // Tail boom and fin.
        fill_rect(&mut image, ox + 8, 16, 16, 3, shade);
        fill_rect(&mut image, ox + 6, 10, 3, 9, shade);

        // Fuselage with the cockpit glass at the nose.
        fill_rect(&mut image, ox + 22, 13, 20, 10, body);
        fill_rect(&mut image, ox + 24, 21, 16, 2, shade);
        fill_rect(&mut image, ox + 37, 15, 5, 4, glass);

        // Rotor mast and skids.
        fill_rect(&mut image, ox + 31, 9, 3, 4, shade);
        fill_rect(&mut image, ox + 26, 23, 2, 3, skid);
        fill_rect(&mut image, ox + 38, 23, 2, 3, skid);
        fill_rect(&mut image, ox + 20, 26, 24, 2, skid);

        // Main and tail rotor blur, alternating sweep per frame.
        if frame == 0 {
            fill_rect(&mut image, ox + 8, 7, 48, 2, blur);
            fill_rect(&mut image, ox + 4, 9, 2, 11, blur);
        } else {
            fill_rect(&mut image, ox + 20, 7, 24, 2, blur);
            fill_rect(&mut image, ox + 3, 13, 4, 3, blur);
        }
    }
    image
}

fn fill_rect(image: &mut Image, x: u32, y: u32, w: u32, h: u32, color: Color) {
    for py in y..y + h {
        for px in x..x + w {
            image.set_pixel(px, py, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top_of_column(image: &Image, x: u32, height: u16) -> u32 {
        for y in 0..height as u32 {
            if image.get_pixel(x, y).a > 0.0 {
                return y;
            }
        }
        height as u32
    }

    #[test]
    fn test_image_order_matches_texture_ids() {
        let images = build_images();
        assert_eq!(images.len(), TEXTURE_COUNT);
        assert_eq!(images[TEX_SKY.0].width, SKY_SIZE.0);
        assert_eq!(images[TEX_HILLS_FAR.0].height, HILLS_FAR_HEIGHT);
        assert_eq!(
            images[TEX_HELI.0].width as usize,
            HELI_FRAME_W as usize * HELI_FRAMES
        );
    }

    #[test]
    fn test_particle_dot_fades_from_center_to_corner() {
        let image = particle_dot(16);
        let center = image.get_pixel(8, 8);
        let corner = image.get_pixel(0, 0);
        assert!(center.a > 0.6, "center alpha too weak: {}", center.a);
        assert_eq!(corner.a, 0.0);
    }

    #[test]
    fn test_sky_darkens_toward_the_top() {
        let image = sky(64, 64);
        let top = image.get_pixel(32, 0);
        let bottom = image.get_pixel(32, 63);
        assert!(top.r + top.g + top.b < bottom.r + bottom.g + bottom.b);
    }

    #[test]
    fn test_hill_strip_edges_line_up_for_tiling() {
        let image = hill_strip(STRIP_WIDTH, HILLS_FAR_HEIGHT, 90.0, 0.0, GREEN);
        let first = top_of_column(&image, 0, HILLS_FAR_HEIGHT);
        let last = top_of_column(&image, STRIP_WIDTH as u32 - 1, HILLS_FAR_HEIGHT);
        assert!(
            (first as i32 - last as i32).abs() <= 3,
            "tile seam would jump from {last} to {first}"
        );
    }

    #[test]
    fn test_hill_strip_is_solid_below_the_crest() {
        let image = hill_strip(200, 100, 20.0, 1.0, GREEN);
        for x in [0, 77, 199] {
            let top = top_of_column(&image, x, 100);
            assert!(top < 100, "column {x} is fully transparent");
            for y in top..100 {
                assert!(image.get_pixel(x, y).a > 0.0, "hole at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_heli_frames_animate_the_rotor() {
        let image = heli_sheet();
        let frame_w = HELI_FRAME_W as u32;
        let mut differs = false;
        for y in 0..HELI_FRAME_H as u32 {
            for x in 0..frame_w {
                if image.get_pixel(x, y) != image.get_pixel(x + frame_w, y) {
                    differs = true;
                }
            }
        }
        assert!(differs, "both rotor frames are identical");
    }
}
