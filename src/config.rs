/// Gameplay constants.
///
/// All positions and sizes are in a fixed 800×600 logical pixel space;
/// the display layer scales them onto whatever terminal grid it gets.

pub const SCREEN_WIDTH: i32 = 800;
pub const SCREEN_HEIGHT: i32 = 600;

// Sprite bounding boxes, in logical pixels.
pub const PLAYER_WIDTH: i32 = 64;
pub const PLAYER_HEIGHT: i32 = 64;
pub const ENEMY_WIDTH: i32 = 64;
pub const ENEMY_HEIGHT: i32 = 64;
pub const BULLET_WIDTH: i32 = 16;
pub const BULLET_HEIGHT: i32 = 32;

// Speeds are logical pixels per tick at the 60 Hz frame cap.
pub const PLAYER_SPEED: i32 = 8;
pub const BULLET_SPEED: i32 = 10;
pub const ENEMY_BASE_SPEED: i32 = 5;

pub const NUM_ENEMIES: usize = 6;

pub const PLAYER_START_X: i32 = 370;
pub const PLAYER_START_Y: i32 = 480;

/// Fresh enemies start in this vertical band…
pub const ENEMY_SPAWN_Y_MIN: i32 = 50;
pub const ENEMY_SPAWN_Y_MAX: i32 = 150;
/// …while a shot-down enemy reappears in this slightly wider one.
pub const RESPAWN_Y_MIN: i32 = 30;
pub const RESPAWN_Y_MAX: i32 = 200;

/// Vertical step applied each time an enemy reverses at a screen edge.
pub const ENEMY_DESCENT_STEP: i32 = 50;

/// An enemy whose bottom edge reaches this line while horizontally lined up
/// with the player ends the session even without rect overlap.
pub const BREACH_LINE_Y: i32 = 450;

pub const FRAME_RATE: u32 = 60;

/// How long the end banner stays up before falling back to the menu.
pub const GAME_OVER_PAUSE_MS: u64 = 2000;
