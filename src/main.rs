mod display;

use std::collections::HashMap;
use std::io::{self, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use shooting_stars::config::GameConfig;
use shooting_stars::entities::{Direction, FrameInput};
use shooting_stars::error::ConfigError;
use shooting_stars::logging;
use shooting_stars::session::{init_session, step, Flow};

/// Side-view boss fight in the terminal
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file overriding the default game constants
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for boss waves (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Enable verbose logging (to `shooting_stars.log` unless --log-file is given)
    #[arg(short, long)]
    verbose: bool,

    /// Write log records to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Where `--verbose` logs when no `--log-file` is given.
const DEFAULT_LOG_FILE: &str = "shooting_stars.log";

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events.
const HOLD_WINDOW: u64 = 4;

fn is_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| {
        key_frame
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    })
}

const UP_KEYS: [KeyCode; 3] = [KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const DOWN_KEYS: [KeyCode; 3] = [KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];

fn config_error(err: ConfigError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err.to_string())
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Drain pending key events and fold them into one frame of input.
///
/// Held keys (direction, fire) use the `key_frame` map; confirm, restart
/// and quit are one-shot and only count on the frame they were pressed.
fn read_input(
    rx: &mpsc::Receiver<Event>,
    key_frame: &mut HashMap<KeyCode, u64>,
    frame: u64,
) -> FrameInput {
    let mut input = FrameInput::default();

    while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
        match kind {
            KeyEventKind::Press => {
                key_frame.insert(code, frame);
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => input.quit = true,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        input.quit = true
                    }
                    KeyCode::Enter => input.confirm = true,
                    KeyCode::Char('r') | KeyCode::Char('R') => input.restart = true,
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

    // Up + down together cancel out before the core sees them.
    input.direction = match (
        is_held(key_frame, &UP_KEYS, frame),
        is_held(key_frame, &DOWN_KEYS, frame),
    ) {
        (true, false) => Direction::Up,
        (false, true) => Direction::Down,
        _ => Direction::Still,
    };
    input.fire = is_held(key_frame, &[KeyCode::Char(' ')], frame);
    input
}

// ── Frame loop ────────────────────────────────────────────────────────────────

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: GameConfig,
    mut rng: StdRng,
) -> io::Result<()> {
    let frame_budget = Duration::from_secs_f32(config.frame_time());
    let mut session = init_session(config).map_err(config_error)?;

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let input = read_input(rx, &mut key_frame, frame);
        let dt = last.elapsed().as_secs_f32();
        last = frame_start;

        match step(&session, &input, dt, &mut rng).map_err(config_error)? {
            Flow::Quit => return Ok(()),
            Flow::Continue(next) => session = next,
        }

        display::render(out, &session)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    let args = Args::parse();
    let log_file = args
        .log_file
        .clone()
        .or_else(|| args.verbose.then(|| PathBuf::from(DEFAULT_LOG_FILE)));
    if let Some(path) = &log_file {
        logging::init(args.verbose, path)?;
    }

    let config = match &args.config {
        Some(path) => GameConfig::load(path).map_err(config_error)?,
        None => GameConfig::default(),
    };
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the frame loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, config, rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
