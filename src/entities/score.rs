//! Three-digit score readout.

use super::sprite::{DrawQueue, Drawable, Sprite};
use crate::assets::{Assets, SpriteImage};
use crate::core::config::GameConfig;
use crate::core::constants::{SCORE_DIGITS, SCORE_RIGHT_MARGIN, SCORE_TOP};
use crate::core::geometry::Rect;

/// Split a score into hundreds, tens and units. Scores above 999 wrap.
pub fn score_digits(score: u32) -> [usize; SCORE_DIGITS] {
    [
        ((score / 100) % 10) as usize,
        ((score / 10) % 10) as usize,
        (score % 10) as usize,
    ]
}

#[derive(Debug, Clone)]
pub struct ScoreDisplay {
    score: u32,
    digits: [usize; SCORE_DIGITS],
    slots: [Rect; SCORE_DIGITS],
    /// Digit glyphs indexed by value.
    glyphs: Vec<SpriteImage>,
}

impl ScoreDisplay {
    pub fn new(config: &GameConfig, assets: &Assets) -> Self {
        let x = config.width - SCORE_RIGHT_MARGIN;
        let width = assets.digits[0].width();
        let height = assets.digits[0].height();
        let slot = |i: i32| Rect::new(x + width * i, SCORE_TOP, width, height);

        Self {
            score: 0,
            digits: score_digits(0),
            slots: [slot(0), slot(1), slot(2)],
            glyphs: assets.digits.clone(),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn set_score(&mut self, score: u32) {
        self.score = score;
        self.digits = score_digits(score);
    }

    pub fn increment(&mut self) {
        self.set_score(self.score.saturating_add(1));
    }

    pub fn digits(&self) -> [usize; SCORE_DIGITS] {
        self.digits
    }

    pub fn slots(&self) -> &[Rect; SCORE_DIGITS] {
        &self.slots
    }
}

impl Drawable for ScoreDisplay {
    fn queue_sprites(&self, queue: &mut DrawQueue) {
        for (slot, digit) in self.slots.iter().zip(self.digits) {
            queue.push(Sprite::new(
                self.glyphs[digit].clone(),
                slot.x,
                slot.y,
            ));
        }
    }
}
