//! Presentation: sprite compositing and the terminal front end.

pub mod frame_buffer;
pub mod terminal;

pub use frame_buffer::FrameBuffer;
pub use terminal::{render_game, HalfBlockView, TerminalGuard, TerminalRenderer};
