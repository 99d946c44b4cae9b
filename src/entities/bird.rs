//! The player's bird.

use super::sprite::{DrawQueue, Drawable, Sprite};
use crate::assets::{Assets, SpriteImage};
use crate::core::config::GameConfig;
use crate::core::constants::{
    BIRD_CLIMB_STEP, BIRD_DIVE_STEP, BIRD_FACE_UP_SPEED, BIRD_FRAME_COUNT, BIRD_NOSE_DOWN_ANGLE,
    BIRD_NOSE_UP_ANGLE, BIRD_START_X, BIRD_START_Y,
};
use crate::core::geometry::Rect;

#[derive(Debug, Clone)]
pub struct Bird {
    pub sprite: Sprite,
    /// Pixels per tick, positive is down.
    pub velocity: f64,
    /// Updates since creation; drives the flap animation.
    pub tick: u64,
    /// Next animation frame to show.
    pub frame_index: usize,
    pub target_rotation: i32,
    frames: [SpriteImage; BIRD_FRAME_COUNT],
    animation_interval: u64,
    gravity: f64,
    speed_buffer: f64,
    fly_height: f64,
}

impl Bird {
    pub fn new(config: &GameConfig, assets: &Assets) -> Self {
        let frames = assets.bird_frames.clone();
        Self {
            sprite: Sprite::new(frames[0].clone(), BIRD_START_X, BIRD_START_Y),
            velocity: 0.0,
            tick: 0,
            frame_index: 0,
            target_rotation: 0,
            frames,
            animation_interval: u64::from(config.bird_animation_interval),
            gravity: config.gravity,
            speed_buffer: config.speed_buffer,
            fly_height: config.bird_fly_height,
        }
    }

    /// Upward impulse. Replaces the current velocity, so repeated calls
    /// within a tick do not stack.
    pub fn fly(&mut self) {
        self.velocity = -self.fly_height;
    }

    pub fn update(&mut self) {
        self.animate();
        self.tick += 1;

        // Damped gravity: the delta is taken from the pre-update velocity.
        self.velocity += self.gravity - self.velocity * self.speed_buffer;
        self.sprite.rect.translate(0, self.velocity as i32);

        self.target_rotation = if self.velocity <= BIRD_FACE_UP_SPEED {
            BIRD_NOSE_UP_ANGLE
        } else {
            BIRD_NOSE_DOWN_ANGLE
        };
        self.sprite.rotation = ease_rotation(self.sprite.rotation, self.target_rotation);
    }

    fn animate(&mut self) {
        if self.tick % self.animation_interval == 0 {
            self.sprite.set_image(self.frames[self.frame_index].clone());
            self.frame_index = (self.frame_index + 1) % BIRD_FRAME_COUNT;
        }
    }

    pub fn rect(&self) -> &Rect {
        &self.sprite.rect
    }
}

/// Step `current` toward `target`: quickly when tilting up, slowly when
/// tilting down. Never steps past the target.
fn ease_rotation(current: i32, target: i32) -> i32 {
    if current > target {
        (current - BIRD_DIVE_STEP).max(target)
    } else if current < target {
        (current + BIRD_CLIMB_STEP).min(target)
    } else {
        current
    }
}

impl Drawable for Bird {
    fn queue_sprites(&self, queue: &mut DrawQueue) {
        queue.add(&self.sprite);
    }
}
