//! Scrolling pipe obstacles.

use super::sprite::{DrawQueue, Drawable, Sprite};
use crate::assets::SpriteImage;
use crate::core::geometry::Rect;

#[derive(Debug, Clone)]
pub struct Pipe {
    pub sprite: Sprite,
    /// Pixels moved left per update.
    pub speed: i32,
}

impl Pipe {
    pub fn new(image: SpriteImage, x: i32, y: i32, rotation: i32, speed: i32) -> Self {
        Self {
            sprite: Sprite::new(image, x, y).with_rotation(rotation),
            speed,
        }
    }

    pub fn update(&mut self) {
        self.sprite.rect.translate(-self.speed, 0);
    }

    /// Fully scrolled past the left edge of the frame.
    pub fn is_off_bound(&self) -> bool {
        self.sprite.rect.x < -self.sprite.rect.width
    }

    pub fn rect(&self) -> &Rect {
        &self.sprite.rect
    }
}

impl Drawable for Pipe {
    fn queue_sprites(&self, queue: &mut DrawQueue) {
        queue.add(&self.sprite);
    }
}
