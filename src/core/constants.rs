// Bird spawn position and flight
pub const BIRD_START_X: i32 = 30;
pub const BIRD_START_Y: i32 = 200;
pub const BIRD_FRAME_COUNT: usize = 3;
/// At or below this downward speed the bird faces up.
pub const BIRD_FACE_UP_SPEED: f64 = 5.0;
pub const BIRD_NOSE_UP_ANGLE: i32 = -15;
pub const BIRD_NOSE_DOWN_ANGLE: i32 = 90;
pub const BIRD_DIVE_STEP: i32 = 10;
pub const BIRD_CLIMB_STEP: i32 = 5;

// Pipes
pub const PIPE_FLIPPED_ROTATION: i32 = 180;

// Score glyphs
pub const SCORE_RIGHT_MARGIN: i32 = 100;
pub const SCORE_TOP: i32 = 25;
pub const SCORE_DIGITS: usize = 3;

// Pacing
/// Scrollers and pipes advance on every `SCROLL_TICK_DIVISOR`th tick.
pub const SCROLL_TICK_DIVISOR: u64 = 2;
/// Pause between the bird leaving the screen and the game-over banner.
pub const ENDING_DELAY_MS: u64 = 500;

// Files
pub const CONFIG_FILE_NAME: &str = "flappy.toml";
pub const LOG_FILE_NAME: &str = "flappy.log";
pub const DEFAULT_ASSET_DIR: &str = "assets/sprites";
