//! Sprite resolution.
//!
//! Every sprite the game draws is resolved once at startup into an
//! [`Assets`] table. Missing or undecodable sprites abort startup; nothing
//! is loaded lazily while the game runs.

pub mod directory;
pub mod placeholder;

pub use directory::DirectoryAssets;
pub use placeholder::PlaceholderAssets;

use crate::core::config::GameConfig;
use crate::core::constants::BIRD_FRAME_COUNT;
use image::RgbaImage;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Asset resolution errors. All of them are fatal at startup.
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("sprite `{name}` not found at {}", .path.display())]
    Missing { name: String, path: PathBuf },

    #[error("failed to decode sprite `{name}`: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("unknown sprite `{0}`")]
    Unknown(String),
}

/// Shared handle to a decoded, read-only RGBA image.
///
/// Cloning the handle never copies pixels.
#[derive(Clone)]
pub struct SpriteImage {
    name: Arc<str>,
    pixels: Arc<RgbaImage>,
}

impl SpriteImage {
    pub fn new(name: &str, pixels: RgbaImage) -> Self {
        Self {
            name: Arc::from(name),
            pixels: Arc::new(pixels),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> i32 {
        self.pixels.width() as i32
    }

    pub fn height(&self) -> i32 {
        self.pixels.height() as i32
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// True when both handles point at the same decoded image.
    pub fn same_image(&self, other: &SpriteImage) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

impl fmt::Debug for SpriteImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SpriteImage({} {}x{})", self.name, self.width(), self.height())
    }
}

/// Resolves logical sprite names (e.g. `pipe-green.png`) to images.
pub trait AssetSource {
    fn load(&self, name: &str) -> Result<SpriteImage, AssetError>;
}

/// Every sprite the game draws, resolved for one configuration.
#[derive(Debug, Clone)]
pub struct Assets {
    pub background: SpriteImage,
    pub base: SpriteImage,
    pub pipe: SpriteImage,
    /// Up-flap, mid-flap, down-flap.
    pub bird_frames: [SpriteImage; BIRD_FRAME_COUNT],
    pub message: SpriteImage,
    pub game_over: SpriteImage,
    /// Glyphs for `0` through `9`, indexed by digit.
    pub digits: Vec<SpriteImage>,
}

impl Assets {
    /// Resolve the full sprite table, failing on the first missing sprite.
    pub fn load(config: &GameConfig, source: &dyn AssetSource) -> Result<Self, AssetError> {
        let bird = |flap: &str| source.load(&format!("{}bird-{flap}.png", config.bird_color));

        let assets = Self {
            background: source.load(&format!("background-{}.png", config.time))?,
            base: source.load("base.png")?,
            pipe: source.load(&format!("pipe-{}.png", config.pipe_color))?,
            bird_frames: [bird("upflap")?, bird("midflap")?, bird("downflap")?],
            message: source.load("message.png")?,
            game_over: source.load("gameover.png")?,
            digits: (0..10)
                .map(|digit| source.load(&format!("{digit}.png")))
                .collect::<Result<_, _>>()?,
        };

        log::info!(
            "Loaded sprites: background {}x{}, pipe {}x{}, bird {}x{}",
            assets.background.width(),
            assets.background.height(),
            assets.pipe.width(),
            assets.pipe.height(),
            assets.bird_frames[0].width(),
            assets.bird_frames[0].height(),
        );

        Ok(assets)
    }
}
