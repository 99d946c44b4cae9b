//! Procedural pipe pairs.

use crate::assets::{Assets, SpriteImage};
use crate::core::config::GameConfig;
use crate::core::constants::PIPE_FLIPPED_ROTATION;
use crate::entities::Pipe;
use rand::Rng;

/// Builds pipe pairs entering from the right edge.
#[derive(Debug, Clone)]
pub struct PipeSpawner {
    image: SpriteImage,
    frame_width: i32,
    frame_height: i32,
    /// Vertical gap between the pipes of a pair.
    interval: i32,
    speed: i32,
}

impl PipeSpawner {
    pub fn new(config: &GameConfig, assets: &Assets) -> Self {
        Self {
            image: assets.pipe.clone(),
            frame_width: config.width,
            frame_height: config.height,
            interval: config.pipe_interval,
            speed: config.base_speed,
        }
    }

    /// Uniform offset in `[-interval/2, interval/2)`.
    pub fn gap_offset<R: Rng>(&self, rng: &mut R) -> i32 {
        let half = self.interval / 2;
        if half == 0 {
            return 0;
        }
        rng.gen_range(-half..half)
    }

    /// A random pair, lower pipe first.
    pub fn spawn_pair<R: Rng>(&self, rng: &mut R) -> [Pipe; 2] {
        let offset = self.gap_offset(rng);
        self.pair_at(offset)
    }

    /// The pair for a given offset. The lower pipe's top edge sits at
    /// `height/2 + offset`; the flipped upper pipe ends exactly `interval`
    /// pixels above it.
    pub fn pair_at(&self, offset: i32) -> [Pipe; 2] {
        let lower_y = self.frame_height / 2 + offset;
        let upper_y = lower_y - self.image.height() - self.interval;

        log::debug!(
            "Spawning pipe pair: offset {offset}, gap {}..{}",
            lower_y - self.interval,
            lower_y
        );

        [
            Pipe::new(self.image.clone(), self.frame_width, lower_y, 0, self.speed),
            Pipe::new(
                self.image.clone(),
                self.frame_width,
                upper_y,
                PIPE_FLIPPED_ROTATION,
                self.speed,
            ),
        ]
    }
}
