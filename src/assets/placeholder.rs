//! Generated stand-in sprites.
//!
//! Sizes match the standard Flappy Bird sprite pack so that a configuration
//! tuned for the real sprites plays the same with placeholders. Used by
//! `--placeholder` and by tests.

use super::{AssetError, AssetSource, SpriteImage};
use image::{Rgba, RgbaImage};

const SKY_DAY: Rgba<u8> = Rgba([78, 192, 202, 255]);
const SKY_NIGHT: Rgba<u8> = Rgba([0, 135, 147, 255]);
const GRASS: Rgba<u8> = Rgba([115, 191, 46, 255]);
const DIRT: Rgba<u8> = Rgba([222, 216, 149, 255]);
const PIPE_GREEN: Rgba<u8> = Rgba([100, 170, 40, 255]);
const PIPE_RED: Rgba<u8> = Rgba([200, 70, 50, 255]);
const PIPE_CAP: Rgba<u8> = Rgba([60, 100, 20, 255]);
const BIRD_YELLOW: Rgba<u8> = Rgba([245, 200, 66, 255]);
const BIRD_RED: Rgba<u8> = Rgba([230, 80, 60, 255]);
const BIRD_BLUE: Rgba<u8> = Rgba([80, 140, 230, 255]);
const WING: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BANNER: Rgba<u8> = Rgba([250, 160, 50, 255]);
const GLYPH: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// 3x5 bitmap font for the score digits, one row per entry, high bit left.
const DIGIT_FONT: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b010, 0b010, 0b010],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

/// Resolves every standard sprite name to a generated image.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderAssets;

impl AssetSource for PlaceholderAssets {
    fn load(&self, name: &str) -> Result<SpriteImage, AssetError> {
        let stem = name
            .strip_suffix(".png")
            .ok_or_else(|| AssetError::Unknown(name.to_string()))?;

        let pixels = match stem {
            "background-day" => RgbaImage::from_pixel(288, 512, SKY_DAY),
            "background-night" => RgbaImage::from_pixel(288, 512, SKY_NIGHT),
            "base" => ground(),
            "message" => RgbaImage::from_pixel(184, 267, BANNER),
            "gameover" => RgbaImage::from_pixel(192, 42, BANNER),
            "pipe-green" => pipe(PIPE_GREEN),
            "pipe-red" => pipe(PIPE_RED),
            _ => {
                if let Some(sprite) = bird(stem) {
                    sprite
                } else if let Some(sprite) = digit(stem) {
                    sprite
                } else {
                    return Err(AssetError::Unknown(name.to_string()));
                }
            }
        };

        Ok(SpriteImage::new(name, pixels))
    }
}

fn ground() -> RgbaImage {
    RgbaImage::from_fn(336, 112, |_, y| if y < 12 { GRASS } else { DIRT })
}

/// Cap at the top so a flipped pipe reads as pointing down.
fn pipe(body: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_fn(52, 320, |_, y| if y < 24 { PIPE_CAP } else { body })
}

fn bird(stem: &str) -> Option<RgbaImage> {
    let (color, flap) = stem.split_once("bird-")?;
    let body = match color {
        "yellow" => BIRD_YELLOW,
        "red" => BIRD_RED,
        "blue" => BIRD_BLUE,
        _ => return None,
    };
    let wing_row = match flap {
        "upflap" => 6,
        "midflap" => 11,
        "downflap" => 16,
        _ => return None,
    };

    Some(RgbaImage::from_fn(34, 24, |x, y| {
        if (4..14).contains(&x) && (wing_row..wing_row + 3).contains(&y) {
            WING
        } else {
            body
        }
    }))
}

/// 24x36 glyph: the 3x5 font scaled by 8x7, transparent elsewhere.
fn digit(stem: &str) -> Option<RgbaImage> {
    let value: usize = stem.parse().ok().filter(|d| *d < 10)?;
    let rows = DIGIT_FONT[value];

    Some(RgbaImage::from_fn(24, 36, |x, y| {
        let (col, row) = ((x / 8) as usize, (y / 7) as usize);
        let lit = row < rows.len() && rows[row] & (0b100 >> col) != 0;
        if lit {
            GLYPH
        } else {
            Rgba([0, 0, 0, 0])
        }
    }))
}
