//! Phase machine, pipe spawning and per-frame drawing queue assembly.

pub mod session;
pub mod spawner;
pub mod types;

pub use session::Session;
pub use spawner::PipeSpawner;
pub use types::GamePhase;
