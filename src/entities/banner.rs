//! Static full-frame prompts: "get ready" and "game over".

use super::sprite::{DrawQueue, Drawable, Sprite};
use crate::assets::SpriteImage;
use crate::core::config::GameConfig;

#[derive(Debug, Clone)]
pub struct Banner {
    pub sprite: Sprite,
}

impl Banner {
    /// Center `image` in the frame.
    pub fn centered(config: &GameConfig, image: SpriteImage) -> Self {
        let x = (config.width - image.width()) / 2;
        let y = (config.height - image.height()) / 2;
        Self {
            sprite: Sprite::new(image, x, y),
        }
    }
}

impl Drawable for Banner {
    fn queue_sprites(&self, queue: &mut DrawQueue) {
        queue.add(&self.sprite);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::REFERENCE_CONFIG;
    use crate::core::geometry::Rect;
    use image::RgbaImage;

    #[test]
    fn test_centered() {
        let config = GameConfig::from_toml_str(REFERENCE_CONFIG).unwrap();
        let banner = Banner::centered(
            &config,
            SpriteImage::new("gameover.png", RgbaImage::new(192, 42)),
        );
        assert_eq!(banner.sprite.rect, Rect::new(48, 235, 192, 42));
    }
}
