/// All game entity types — pure data, no logic.

use crate::geometry::Rect;

/// The single-shot bullet is always in exactly one of these states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletState {
    /// Off screen, waiting to be fired.
    Resting,
    /// Travelling up the screen.
    Flying,
}

/// Whether the current session is still running.  GameOver is a transient
/// outcome carried out of a tick, not a standing screen of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Which top-level screen the application is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    MainMenu,
    Playing,
    Guidelines,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    /// Horizontal velocity, one of -speed / 0 / +speed.
    pub x_change: i32,
}

#[derive(Clone, Debug)]
pub struct Bullet {
    pub rect: Rect,
    pub state: BulletState,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub rect: Rect,
    /// Signed horizontal speed; reverses at screen edges.
    pub x_change: i32,
    /// Vertical step applied on each edge bounce, not each tick.
    pub y_change: i32,
}

// ── Master session state ──────────────────────────────────────────────────────

/// The entire session state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct PlayState {
    pub player: Player,
    pub bullet: Bullet,
    /// Always exactly `NUM_ENEMIES` long; killed enemies are respawned in
    /// place, never removed.
    pub enemies: Vec<Enemy>,
    pub score: u32,
    pub status: GameStatus,
}
