/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `PlayState` (and, where needed, an RNG handle) and returns a brand-new
/// `PlayState`.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::config::{
    BREACH_LINE_Y, BULLET_HEIGHT, BULLET_SPEED, BULLET_WIDTH, ENEMY_BASE_SPEED,
    ENEMY_DESCENT_STEP, ENEMY_HEIGHT, ENEMY_SPAWN_Y_MAX, ENEMY_SPAWN_Y_MIN, ENEMY_WIDTH,
    NUM_ENEMIES, PLAYER_HEIGHT, PLAYER_SPEED, PLAYER_START_X, PLAYER_START_Y, PLAYER_WIDTH,
    RESPAWN_Y_MAX, RESPAWN_Y_MIN, SCREEN_WIDTH,
};
use crate::entities::{Bullet, BulletState, Enemy, GameStatus, PlayState, Player};
use crate::geometry::Rect;

// ── Constructors ─────────────────────────────────────────────────────────────

/// A fresh enemy somewhere in the upper spawn band, moving right.
pub fn spawn_enemy(rng: &mut impl Rng) -> Enemy {
    Enemy {
        rect: Rect::new(
            rng.gen_range(0..=SCREEN_WIDTH - ENEMY_WIDTH),
            rng.gen_range(ENEMY_SPAWN_Y_MIN..=ENEMY_SPAWN_Y_MAX),
            ENEMY_WIDTH,
            ENEMY_HEIGHT,
        ),
        x_change: ENEMY_BASE_SPEED,
        y_change: ENEMY_DESCENT_STEP,
    }
}

/// Build the initial state for a new session: player at the start position,
/// bullet resting, a full wave of enemies, score 0.
pub fn init_play(rng: &mut impl Rng) -> PlayState {
    PlayState {
        player: Player {
            rect: Rect::new(PLAYER_START_X, PLAYER_START_Y, PLAYER_WIDTH, PLAYER_HEIGHT),
            x_change: 0,
        },
        bullet: Bullet {
            rect: Rect::new(0, 0, BULLET_WIDTH, BULLET_HEIGHT),
            state: BulletState::Resting,
        },
        enemies: (0..NUM_ENEMIES).map(|_| spawn_enemy(rng)).collect(),
        score: 0,
        status: GameStatus::Playing,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn steer_left(state: &PlayState) -> PlayState {
    PlayState {
        player: Player {
            x_change: -PLAYER_SPEED,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

pub fn steer_right(state: &PlayState) -> PlayState {
    PlayState {
        player: Player {
            x_change: PLAYER_SPEED,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

pub fn halt_player(state: &PlayState) -> PlayState {
    PlayState {
        player: Player {
            x_change: 0,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// Fire the bullet from the player's muzzle.  The weapon is single-shot:
/// while the bullet is already in flight this is a no-op.
pub fn fire_bullet(state: &PlayState) -> PlayState {
    if state.bullet.state == BulletState::Flying {
        return state.clone();
    }
    let mut bullet = state.bullet.clone();
    bullet.rect.x = state.player.rect.centerx() - BULLET_WIDTH / 2;
    bullet.rect.y = state.player.rect.top();
    bullet.state = BulletState::Flying;
    PlayState {
        bullet,
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame: integrate positions, then resolve
/// collisions.  All randomness (enemy respawns) comes through `rng` so
/// callers control determinism.
pub fn tick(state: &PlayState, rng: &mut impl Rng) -> PlayState {
    // ── 1. Move the player, clamped to the screen ────────────────────────────
    let mut player = state.player.clone();
    player.rect.x =
        (player.rect.x + player.x_change).clamp(0, SCREEN_WIDTH - player.rect.width);

    // ── 2. Move the bullet; leaving the top of the screen is a miss ──────────
    let mut bullet = state.bullet.clone();
    if bullet.state == BulletState::Flying {
        bullet.rect.y -= BULLET_SPEED;
        if bullet.rect.bottom() < 0 {
            bullet.state = BulletState::Resting;
        }
    }

    // ── 3. Enemy bounce-and-descend ───────────────────────────────────────────
    // Each enemy moves independently; descent happens only on an edge
    // reversal, never on an ordinary tick.
    let mut enemies = state.enemies.clone();
    for enemy in &mut enemies {
        enemy.rect.x += enemy.x_change;
        if enemy.rect.left() <= 0 || enemy.rect.right() >= SCREEN_WIDTH {
            enemy.x_change = -enemy.x_change;
            enemy.rect.y += enemy.y_change;
        }
    }

    // ── 4. Bullet ↔ enemies: first match only ─────────────────────────────────
    // At most one kill per bullet per tick; the hit enemy is respawned in
    // place so the wave never shrinks.
    let mut score = state.score;
    if bullet.state == BulletState::Flying {
        for enemy in &mut enemies {
            if bullet.rect.intersects(&enemy.rect) {
                score += 1;
                bullet.state = BulletState::Resting;
                enemy.rect.x = rng.gen_range(0..=SCREEN_WIDTH - enemy.rect.width);
                enemy.rect.y = rng.gen_range(RESPAWN_Y_MIN..=RESPAWN_Y_MAX);
                break;
            }
        }
    }

    // ── 5. Enemies ↔ player: direct overlap, then lane breach ────────────────
    let mut status = GameStatus::Playing;
    for enemy in &enemies {
        if enemy.rect.intersects(&player.rect) {
            status = GameStatus::GameOver;
            break;
        }
        // An enemy that has descended to the player's lane ends the session
        // even without pixel overlap.
        if enemy.rect.bottom() >= BREACH_LINE_Y
            && (player.rect.centerx() - enemy.rect.centerx()).abs() < player.rect.width / 2
        {
            status = GameStatus::GameOver;
            break;
        }
    }

    PlayState {
        player,
        bullet,
        enemies,
        score,
        status,
    }
}

// ── Scoring ──────────────────────────────────────────────────────────────────

/// Commit a finished session's score to the running top score.  The top
/// score only ever increases, and only when the session beat it.
pub fn settle_top_score(score: u32, top_score: u32) -> u32 {
    if score > top_score {
        score
    } else {
        top_score
    }
}
