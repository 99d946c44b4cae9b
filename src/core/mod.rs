pub mod config;
pub mod constants;
pub mod game_loop;
pub mod geometry;
