use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event},
    terminal,
};
use rand::thread_rng;

use shuriken_storm::assets::{AssetLibrary, SpriteSet};
use shuriken_storm::compute::{init_state, tick};
use shuriken_storm::config::GameConfig;
use shuriken_storm::display::{self, Viewport};
use shuriken_storm::entities::GameStatus;
use shuriken_storm::error::GameError;
use shuriken_storm::input::KeyTracker;

const LOG_FILE: &str = "shuriken_storm.log";

/// Send logs to a file; the terminal is in raw alternate-screen mode.
fn init_logging() {
    let path = std::env::temp_dir().join(LOG_FILE);
    let Ok(file) = File::create(&path) else {
        return;
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// How the session ended.
enum Outcome {
    Quit,
    Defeated { score: u32 },
}

/// Run one session at a fixed frame rate.
///
/// Each frame: drain pending terminal events into the key tracker,
/// collect a `FrameInput`, advance the simulation, render.  A slow frame
/// delays the next one; nothing is skipped.
fn game_loop<W: Write>(
    out: &mut W,
    config: &GameConfig,
    sprites: &SpriteSet,
    rx: &mpsc::Receiver<Event>,
) -> Result<Outcome, GameError> {
    let mut rng = thread_rng();
    let mut state = init_state(config);
    let mut keys = KeyTracker::new();
    let frame_budget = Duration::from_secs(1) / config.timing.frames_per_second;

    log::info!("Session started, life {}", state.life.value);

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if let Event::Key(key) = ev {
                keys.observe(&key, state.frame);
            }
        }
        let input = keys.collect(state.frame);
        if input.quit_requested() {
            log::info!("Quit requested at score {}", state.score);
            return Ok(Outcome::Quit);
        }

        state = tick(&state, &input, &mut rng);

        let (cols, rows) = terminal::size()?;
        let view = Viewport::new(cols, rows, state.field);
        let frame = display::compose(&state, sprites, config.timing.background_scroll);
        display::render(out, &frame, &view)?;

        if state.status == GameStatus::Defeated {
            // Frozen: no motion, no input, until the pause is over.
            thread::sleep(Duration::from_millis(config.timing.defeat_pause_ms));
            return Ok(Outcome::Defeated { score: state.score });
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    init_logging();

    if let Err(e) = run() {
        log::error!("Fatal: {e}");
        eprintln!("shuriken_storm: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), GameError> {
    // Startup failures are reported before the terminal is touched.
    let config = GameConfig::from_env()?;
    let library = AssetLibrary::with_overrides(&config.sprites)?;
    let sprites = SpriteSet::load(&library)?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    let mut keyboard_enhanced = false;
    let result = display::enter_screen(&mut out)
        .map_err(GameError::from)
        .and_then(|enhanced| {
            keyboard_enhanced = enhanced;
            let rx = spawn_event_reader();
            game_loop(&mut out, &config, &sprites, &rx)
        });

    // Always restore the terminal, whether setup or the game failed.
    display::restore_screen(&mut out, keyboard_enhanced);

    match result? {
        Outcome::Quit => log::info!("Session closed"),
        Outcome::Defeated { score } => println!("Game over. Final score: {score}"),
    }
    Ok(())
}

/// Dedicate a thread exclusively to blocking event reads, sending them
/// through a channel so the game loop never has to block on I/O.
fn spawn_event_reader() -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });
    rx
}
