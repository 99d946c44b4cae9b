//! Off-screen RGBA canvas the sprites are composited onto.
//!
//! The buffer is the game's logical resolution (`width x height` pixels).
//! It is never cleared between frames: every playfield frame starts with
//! the opaque background, and the game-over frame deliberately draws its
//! banner over whatever the last playfield frame left behind.

use crate::assets::SpriteImage;
use crate::entities::{Sprite, Surface};
use image::{Pixel, Rgba, RgbaImage};

const SNAP_EPSILON: f64 = 1e-9;

/// 2D affine map `p' = (a*x + b*y + c, d*x + e*y + f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Affine {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Affine {
    const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 0.0,
        e: 1.0,
        f: 0.0,
    };

    /// Clockwise (on a y-down screen) rotation about `(cx, cy)`.
    fn rotation(degrees: f64, cx: f64, cy: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Affine {
            a: cos,
            b: -sin,
            c: cx - cos * cx + sin * cy,
            d: sin,
            e: cos,
            f: cy - sin * cx - cos * cy,
        }
    }

    /// `self` after `inner`: `(self * inner)(p) = self(inner(p))`.
    fn then_inner(&self, inner: &Affine) -> Affine {
        Affine {
            a: self.a * inner.a + self.b * inner.d,
            b: self.a * inner.b + self.b * inner.e,
            c: self.a * inner.c + self.b * inner.f + self.c,
            d: self.d * inner.a + self.e * inner.d,
            e: self.d * inner.b + self.e * inner.e,
            f: self.d * inner.c + self.e * inner.f + self.f,
        }
    }

    fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.b * y + self.c,
            self.d * x + self.e * y + self.f,
        )
    }

    fn inverse(&self) -> Option<Affine> {
        let det = self.a * self.e - self.b * self.d;
        if det.abs() < SNAP_EPSILON {
            return None;
        }
        let (a, b, d, e) = (self.e / det, -self.b / det, -self.d / det, self.a / det);
        Some(Affine {
            a,
            b,
            c: -(a * self.c + b * self.f),
            d,
            e,
            f: -(d * self.c + e * self.f),
        })
    }

    fn is_identity(&self) -> bool {
        let close = |x: f64, y: f64| (x - y).abs() < SNAP_EPSILON;
        close(self.a, 1.0)
            && close(self.b, 0.0)
            && close(self.c, 0.0)
            && close(self.d, 0.0)
            && close(self.e, 1.0)
            && close(self.f, 0.0)
    }
}

pub struct FrameBuffer {
    image: RgbaImage,
    transform: Affine,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])),
            transform: Affine::IDENTITY,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    /// Composite `sprites` back to front.
    pub fn draw(&mut self, sprites: &[Sprite]) {
        for sprite in sprites {
            sprite.render(self);
        }
    }

    fn blend_at(&mut self, x: i64, y: i64, src: &Rgba<u8>) {
        if src[3] == 0
            || x < 0
            || y < 0
            || x >= i64::from(self.image.width())
            || y >= i64::from(self.image.height())
        {
            return;
        }
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        let opaque = dst[3] == u8::MAX;
        dst.blend(src);
        // Integer rounding in `blend` can leave an opaque pixel at 254.
        if opaque {
            dst[3] = u8::MAX;
        }
    }

    fn blit_straight(&mut self, pixels: &RgbaImage, x: i32, y: i32) {
        for (sx, sy, src) in pixels.enumerate_pixels() {
            self.blend_at(i64::from(x) + i64::from(sx), i64::from(y) + i64::from(sy), src);
        }
    }

    /// Nearest-neighbour blit through the current transform: walk the
    /// destination bounding box and map each pixel centre back into the
    /// source image.
    fn blit_transformed(&mut self, pixels: &RgbaImage, x: i32, y: i32) {
        let Some(inverse) = self.transform.inverse() else {
            return;
        };
        let (w, h) = (f64::from(pixels.width()), f64::from(pixels.height()));
        let (x0, y0) = (f64::from(x), f64::from(y));

        let corners = [
            self.transform.apply(x0, y0),
            self.transform.apply(x0 + w, y0),
            self.transform.apply(x0, y0 + h),
            self.transform.apply(x0 + w, y0 + h),
        ];
        let min_x = corners.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
        let max_x = corners.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
        let min_y = corners.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max_y = corners.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);

        let left = min_x.floor().max(0.0) as i64;
        let top = min_y.floor().max(0.0) as i64;
        let right = max_x.ceil().min(f64::from(self.image.width())) as i64;
        let bottom = max_y.ceil().min(f64::from(self.image.height())) as i64;

        for dy in top..bottom {
            for dx in left..right {
                let (lx, ly) = inverse.apply(dx as f64 + 0.5, dy as f64 + 0.5);
                let (sx, sy) = ((lx - x0).floor(), (ly - y0).floor());
                if sx < 0.0 || sy < 0.0 || sx >= w || sy >= h {
                    continue;
                }
                let src = *pixels.get_pixel(sx as u32, sy as u32);
                self.blend_at(dx, dy, &src);
            }
        }
    }
}

impl Surface for FrameBuffer {
    fn blit(&mut self, image: &SpriteImage, x: i32, y: i32) {
        if self.transform.is_identity() {
            self.blit_straight(image.pixels(), x, y);
        } else {
            self.blit_transformed(image.pixels(), x, y);
        }
    }

    fn rotate(&mut self, degrees: f64, cx: f64, cy: f64) {
        self.transform = self
            .transform
            .then_inner(&Affine::rotation(degrees, cx, cy));
        // Rotate-then-unrotate should land exactly back on the fast path.
        if self.transform.is_identity() {
            self.transform = Affine::IDENTITY;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    /// 2x4 image: top half red, bottom half blue.
    fn two_tone() -> SpriteImage {
        SpriteImage::new(
            "two-tone.png",
            RgbaImage::from_fn(2, 4, |_, y| if y < 2 { RED } else { BLUE }),
        )
    }

    #[test]
    fn test_straight_blit_and_clipping() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.blit(&two_tone(), -1, 1);
        assert_eq!(fb.pixel(0, 1), RED);
        assert_eq!(fb.pixel(0, 3), BLUE);
        assert_eq!(fb.pixel(1, 1), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_transparent_pixels_keep_destination() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.blit(&SpriteImage::new("red.png", RgbaImage::from_pixel(2, 2, RED)), 0, 0);
        fb.blit(&SpriteImage::new("clear.png", RgbaImage::from_pixel(2, 2, CLEAR)), 0, 0);
        assert_eq!(fb.pixel(1, 1), RED);
    }

    #[test]
    fn test_half_alpha_blends() {
        let mut fb = FrameBuffer::new(1, 1);
        fb.blit(
            &SpriteImage::new("white.png", RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]))),
            0,
            0,
        );
        fb.blit(
            &SpriteImage::new("dim.png", RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 128]))),
            0,
            0,
        );
        let px = fb.pixel(0, 0);
        assert!(px[0] > 100 && px[0] < 160, "{px:?}");
        assert_eq!(px[3], 255);
    }

    #[test]
    fn test_repeated_translucent_blits_stay_opaque() {
        let mut fb = FrameBuffer::new(1, 1);
        let dim = SpriteImage::new("dim.png", RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 1])));
        for _ in 0..50 {
            fb.blit(&dim, 0, 0);
        }
        assert_eq!(fb.pixel(0, 0)[3], 255);
    }

    #[test]
    fn test_flipped_sprite_renders_upside_down() {
        let mut fb = FrameBuffer::new(2, 4);
        let sprite = Sprite::new(two_tone(), 0, 0).with_rotation(180);
        fb.draw(&[sprite]);
        assert_eq!(fb.pixel(0, 0), BLUE);
        assert_eq!(fb.pixel(1, 1), BLUE);
        assert_eq!(fb.pixel(0, 2), RED);
        assert_eq!(fb.pixel(1, 3), RED);
        assert!(fb.transform.is_identity());
    }

    #[test]
    fn test_quarter_turn_swaps_axes() {
        let mut fb = FrameBuffer::new(6, 6);
        // 4x2 red bar centred at (3, 3); a quarter turn stands it upright.
        let bar = SpriteImage::new("bar.png", RgbaImage::from_pixel(4, 2, RED));
        fb.draw(&[Sprite::new(bar, 1, 2).with_rotation(90)]);
        assert_eq!(fb.pixel(2, 1), RED);
        assert_eq!(fb.pixel(3, 4), RED);
        assert_eq!(fb.pixel(1, 3), Rgba([0, 0, 0, 255]));
        assert_eq!(fb.pixel(4, 3), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_rotation_round_trip_snaps_to_identity() {
        let mut fb = FrameBuffer::new(1, 1);
        for degrees in [-15.0, 37.0, 90.0, 180.0] {
            fb.rotate(degrees, 17.0, 12.0);
            fb.rotate(-degrees, 17.0, 12.0);
            assert_eq!(fb.transform, Affine::IDENTITY);
        }
    }

    #[test]
    fn test_buffer_not_cleared_between_frames() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.draw(&[Sprite::new(two_tone(), 0, 0)]);
        fb.draw(&[]);
        assert_eq!(fb.pixel(0, 0), RED);
    }
}
