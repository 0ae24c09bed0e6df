mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::{thread_rng, Rng};

use elsu_vs_enemy::compute::{
    fire_bullet, halt_player, init_play, settle_top_score, steer_left, steer_right, tick,
};
use elsu_vs_enemy::config::{FRAME_RATE, GAME_OVER_PAUSE_MS};
use elsu_vs_enemy::entities::{GameMode, GameStatus, PlayState};

const FRAME: Duration = Duration::from_micros(1_000_000 / FRAME_RATE as u64); // 60 Hz cap

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so the window is always refreshed
/// before expiry while the key is actually down.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

/// Esc / Ctrl-C are the terminal analogs of a window-close request and must
/// be honored in every mode, including mid game-over delay.
fn is_quit_event(ev: &Event) -> bool {
    matches!(
        ev,
        Event::Key(KeyEvent {
            code: KeyCode::Esc,
            kind: KeyEventKind::Press,
            ..
        })
    ) || matches!(
        ev,
        Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) if modifiers.contains(KeyModifiers::CONTROL)
    )
}

// ── Main menu ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq)]
enum MenuChoice {
    Play,
    Guidelines,
    Quit,
}

const MENU_BUTTONS: &[(&str, MenuChoice)] = &[
    ("PLAY NOW", MenuChoice::Play),
    ("HOW TO PLAY?", MenuChoice::Guidelines),
    ("QUIT", MenuChoice::Quit),
];

/// Screen region a button occupies, for mouse hit-testing.
struct ButtonHit {
    row: u16,
    col_start: u16,
    col_end: u16,
    choice: MenuChoice,
}

fn hit_index(hits: &[ButtonHit], column: u16, row: u16) -> Option<usize> {
    hits.iter()
        .position(|h| h.row == row && column >= h.col_start && column <= h.col_end)
}

fn draw_menu<W: Write>(
    out: &mut W,
    top_score: u32,
    hovered: Option<usize>,
) -> std::io::Result<Vec<ButtonHit>> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  ELSU  VS  ENEMY  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    let top_str = format!("Top Score: {}", top_score);
    out.queue(cursor::MoveTo(
        cx.saturating_sub(top_str.chars().count() as u16 / 2),
        cy.saturating_sub(4),
    ))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&top_str))?;

    // Buttons — hover (or click) with the mouse, or use the key shortcuts
    let mut hits = Vec::with_capacity(MENU_BUTTONS.len());
    for (i, (label, choice)) in MENU_BUTTONS.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16 * 2;
        let col = cx.saturating_sub(label.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(if hovered == Some(i) {
            Color::Green
        } else {
            Color::White
        }))?;
        out.queue(Print(*label))?;
        hits.push(ButtonHit {
            row,
            col_start: col,
            col_end: col + label.chars().count() as u16,
            choice: *choice,
        });
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy + 6))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("[P] Play   [H] How to play   [Q] Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(hits)
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    top_score: u32,
) -> std::io::Result<MenuChoice> {
    let mut hovered: Option<usize> = None;
    let mut hits = draw_menu(out, top_score, hovered)?;

    loop {
        let ev = match rx.recv() {
            Ok(ev) => ev,
            Err(_) => return Ok(MenuChoice::Quit), // input thread gone
        };
        match ev {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                modifiers,
                ..
            }) => match code {
                KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Enter => {
                    return Ok(MenuChoice::Play);
                }
                KeyCode::Char('h') | KeyCode::Char('H') => return Ok(MenuChoice::Guidelines),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuChoice::Quit);
                }
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(MenuChoice::Quit);
                }
                _ => {}
            },
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Moved,
                column,
                row,
                ..
            }) => {
                let now = hit_index(&hits, column, row);
                if now != hovered {
                    hovered = now;
                    hits = draw_menu(out, top_score, hovered)?;
                }
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                if let Some(i) = hit_index(&hits, column, row) {
                    return Ok(hits[i].choice);
                }
            }
            Event::Resize(..) => {
                hits = draw_menu(out, top_score, hovered)?;
            }
            _ => {}
        }
    }
}

// ── Guidelines screen ─────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
fn show_guidelines<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<bool> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let lines: &[&str] = &[
        "HOW TO PLAY",
        "",
        "Move with ← → (or A / D) and shoot with SPACE.",
        "Only one bullet can be in the air at a time.",
        "Enemies sweep sideways and drop a step at every wall.",
        "Each hit scores a point and the enemy reappears up top.",
        "If an enemy touches you, or reaches your lane, it's over.",
        "Press Q during play to give up and return to the menu.",
    ];
    for (i, line) in lines.iter().enumerate() {
        let row = cy.saturating_sub(6) + i as u16;
        out.queue(cursor::MoveTo(
            cx.saturating_sub(line.chars().count() as u16 / 2),
            row,
        ))?;
        out.queue(style::SetForegroundColor(if i == 0 {
            Color::Cyan
        } else {
            Color::White
        }))?;
        out.queue(Print(*line))?;
    }

    let back = "BACK";
    let back_row = cy + 4;
    let back_col = cx.saturating_sub(back.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(back_col, back_row))?;
    out.queue(style::SetForegroundColor(Color::Green))?;
    out.queue(Print(back))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    loop {
        let ev = match rx.recv() {
            Ok(ev) => ev,
            Err(_) => return Ok(true),
        };
        if is_quit_event(&ev) {
            return Ok(true);
        }
        match ev {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Enter | KeyCode::Char('q')
                | KeyCode::Char('Q') => return Ok(false),
                _ => {}
            },
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                if row == back_row
                    && column >= back_col
                    && column <= back_col + back.chars().count() as u16
                {
                    return Ok(false);
                }
            }
            _ => {}
        }
    }
}

// ── Play loop ─────────────────────────────────────────────────────────────────

enum SessionEnd {
    /// Explicit quit — terminate the program.
    Quit,
    /// Q pressed — back to the menu with no score commit.
    ToMenu,
    /// A collision or lane breach ended the session.
    GameOver,
}

/// Run one session at the 60 Hz frame cap.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key, and the steering velocity is rebuilt
/// from the currently "held" keys each frame.  On terminals with keyboard
/// enhancement we get real release events; classic terminals fall back to
/// the hold-window expiry, which the OS key-repeat keeps refreshed.  Either
/// way the result matches a key-down/key-up velocity model.
fn play_session<W: Write>(
    out: &mut W,
    state: &mut PlayState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut impl Rng,
) -> std::io::Result<SessionEnd> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if is_quit_event(&ev) {
                return Ok(SessionEnd::Quit);
            }
            if let Event::Key(KeyEvent { code, kind, .. }) = ev {
                match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') => {
                                return Ok(SessionEnd::ToMenu);
                            }
                            KeyCode::Char(' ') => {
                                // No-op while the bullet is already flying
                                *state = fire_bullet(state);
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                }
            }
        }

        // ── Rebuild steering from the held keys ────────────────────────────────
        let left = is_held(&key_frame, &KeyCode::Left, frame)
            || is_held(&key_frame, &KeyCode::Char('a'), frame)
            || is_held(&key_frame, &KeyCode::Char('A'), frame);
        let right = is_held(&key_frame, &KeyCode::Right, frame)
            || is_held(&key_frame, &KeyCode::Char('d'), frame)
            || is_held(&key_frame, &KeyCode::Char('D'), frame);

        *state = if left && !right {
            steer_left(state)
        } else if right && !left {
            steer_right(state)
        } else {
            halt_player(state)
        };

        *state = tick(state, rng);
        display::render(out, state)?;

        if state.status == GameStatus::GameOver {
            log::info!("session over, score {}", state.score);
            return Ok(SessionEnd::GameOver);
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

/// Show the end banner and hold it for the fixed delay.  Gameplay input is
/// deliberately ignored during the freeze, but quit requests are still
/// honored promptly.  Returns `true` → quit program.
fn game_over_screen<W: Write>(
    out: &mut W,
    state: &PlayState,
    prev_top_score: u32,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    display::render_game_over(out, state, prev_top_score)?;

    let deadline = Instant::now() + Duration::from_millis(GAME_OVER_PAUSE_MS);
    while Instant::now() < deadline {
        while let Ok(ev) = rx.try_recv() {
            if is_quit_event(&ev) {
                return Ok(true);
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
    // Drop anything mashed during the freeze so it doesn't leak into the menu
    while rx.try_recv().is_ok() {}
    Ok(false)
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    env_logger::init();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let mut top_score: u32 = 0;
    let mut mode = GameMode::MainMenu;

    log::info!("starting up");

    loop {
        mode = match mode {
            GameMode::MainMenu => match show_menu(out, rx, top_score)? {
                MenuChoice::Play => GameMode::Playing,
                MenuChoice::Guidelines => GameMode::Guidelines,
                MenuChoice::Quit => break,
            },
            GameMode::Playing => {
                let mut state = init_play(&mut rng);
                match play_session(out, &mut state, rx, &mut rng)? {
                    SessionEnd::Quit => break,
                    // Quit-to-menu commits nothing
                    SessionEnd::ToMenu => GameMode::MainMenu,
                    SessionEnd::GameOver => {
                        let prev_top = top_score;
                        top_score = settle_top_score(state.score, top_score);
                        if game_over_screen(out, &state, prev_top, rx)? {
                            break;
                        }
                        GameMode::MainMenu
                    }
                }
            }
            GameMode::Guidelines => {
                if show_guidelines(out, rx)? {
                    break;
                }
                GameMode::MainMenu
            }
        };
    }

    log::info!("goodbye, top score {}", top_score);
    Ok(())
}
