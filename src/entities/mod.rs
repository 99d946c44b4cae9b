//! Everything the session simulates and draws.
//!
//! Each kind of object is its own concrete type composed around a
//! [`Sprite`]; they share the [`Drawable`] seam rather than a base type.

pub mod banner;
pub mod bird;
pub mod pipe;
pub mod score;
pub mod scroller;
pub mod sprite;

pub use banner::Banner;
pub use bird::Bird;
pub use pipe::Pipe;
pub use score::{score_digits, ScoreDisplay};
pub use scroller::Scroller;
pub use sprite::{DrawQueue, Drawable, RotationGuard, Sprite, Surface};
