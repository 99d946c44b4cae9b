//! Two-tile horizontal treadmill used for the background and the ground.

use super::sprite::{DrawQueue, Drawable, Sprite};
use crate::assets::SpriteImage;
use crate::core::geometry::Rect;

/// Two copies of one image laid side by side.
///
/// Both tiles move left together; a tile that has scrolled its full width
/// past the left edge jumps to the right edge of the other tile, so the
/// pair always covers one contiguous strip.
#[derive(Debug, Clone)]
pub struct Scroller {
    pub tiles: [Sprite; 2],
    /// Pixels moved left per update.
    pub speed: i32,
}

impl Scroller {
    pub fn new(image: SpriteImage, y: i32, speed: i32) -> Self {
        let width = image.width();
        Self {
            tiles: [
                Sprite::new(image.clone(), 0, y),
                Sprite::new(image, width, y),
            ],
            speed,
        }
    }

    pub fn update(&mut self) {
        let [a, b] = &mut self.tiles;
        a.rect.translate(-self.speed, 0);
        b.rect.translate(-self.speed, 0);

        if a.rect.x < -a.rect.width {
            a.rect.x = b.rect.max_x();
        }
        if b.rect.x < -b.rect.width {
            b.rect.x = a.rect.max_x();
        }
    }

    /// True when `rect` overlaps either tile.
    pub fn intersects(&self, rect: &Rect) -> bool {
        self.tiles.iter().any(|tile| tile.rect.intersects(rect))
    }

    /// True when one tile starts exactly where the other ends.
    pub fn is_contiguous(&self) -> bool {
        let [a, b] = &self.tiles;
        a.rect.max_x() == b.rect.x || b.rect.max_x() == a.rect.x
    }
}

impl Drawable for Scroller {
    fn queue_sprites(&self, queue: &mut DrawQueue) {
        for tile in &self.tiles {
            queue.add(tile);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn scroller(width: u32, speed: i32) -> Scroller {
        Scroller::new(SpriteImage::new("base.png", RgbaImage::new(width, 10)), 400, speed)
    }

    #[test]
    fn test_tiles_start_side_by_side() {
        let s = scroller(336, 2);
        assert_eq!(s.tiles[0].rect.x, 0);
        assert_eq!(s.tiles[1].rect.x, 336);
        assert_eq!(s.tiles[0].rect.y, 400);
        assert_eq!(s.tiles[1].rect.y, 400);
    }

    #[test]
    fn test_first_tile_wraps_behind_second() {
        let mut s = scroller(10, 3);
        // x: 0 -> -3 -> -6 -> -9 -> -12 (wraps)
        for _ in 0..4 {
            s.update();
        }
        assert_eq!(s.tiles[1].rect.x, -2);
        assert_eq!(s.tiles[0].rect.x, 8);
        assert!(s.is_contiguous());
    }

    #[test]
    fn test_contiguous_for_all_ticks() {
        for (width, speed) in [(336, 2), (288, 1), (7, 3), (10, 10), (5, 4)] {
            let mut s = scroller(width, speed);
            for tick in 0..2000 {
                s.update();
                assert!(
                    s.is_contiguous(),
                    "width {width} speed {speed} broke at tick {tick}: {} / {}",
                    s.tiles[0].rect.x,
                    s.tiles[1].rect.x
                );
                let leftmost = s.tiles[0].rect.x.min(s.tiles[1].rect.x);
                assert!(leftmost <= 0 && leftmost >= -(width as i32) - speed);
            }
        }
    }

    #[test]
    fn test_ground_collision_checks_both_tiles() {
        let mut s = scroller(336, 2);
        let bird = Rect::new(30, 390, 34, 24);
        assert!(s.intersects(&bird));

        // Scroll until the first tile has wrapped to the right of the bird.
        while s.tiles[0].rect.x <= 64 {
            s.update();
        }
        assert!(!s.tiles[0].rect.intersects(&bird));
        assert!(s.intersects(&bird));
        assert!(!s.intersects(&Rect::new(30, 100, 34, 24)));
    }

    #[test]
    fn test_queues_both_tiles() {
        let s = scroller(20, 1);
        let mut queue = DrawQueue::new();
        queue.add(&s);
        assert_eq!(queue.len(), 2);
    }
}
