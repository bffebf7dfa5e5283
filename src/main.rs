mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use flying_fortress::assets::Assets;
use flying_fortress::audio::Audio;
use flying_fortress::compute::{apply_command, init_state, tick};
use flying_fortress::config::{self, Config};
use flying_fortress::controls::Controls;
use flying_fortress::consts::FRAMERATE;
use flying_fortress::entities::{Command, GameEvent, Phase};

/// One-shot keys.
fn key_command(code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Enter => Some(Command::Continue),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(Command::Nuke),
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: we maintain a `key_frame` map that records the frame number
/// of the last press/repeat event for every key.  Each frame we check which
/// keys are still "fresh" and feed the simulation press/release commands
/// whenever that set changes, so holding fire while steering just works.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    assets: &Assets,
    audio: &Audio,
    seed: u64,
) -> Result<()> {
    let frame_time = Duration::from_secs(1) / FRAMERATE;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = init_state(&mut rng);

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut controls = Controls::default();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut commands = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    commands.extend(key_command(code, modifiers));
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let held = Controls::read(&key_frame, frame);
        let mut steering = held.edges(&controls);
        controls = held;
        steering.extend(commands);

        // ── Apply commands, then advance one tick ─────────────────────────────
        for command in steering {
            if command == Command::Quit {
                info!("quit requested");
                return Ok(());
            }
            let restarting = command == Command::Continue && state.run.phase == Phase::GameOver;
            state = apply_command(&state, command);
            if restarting {
                for held in controls.rearm() {
                    state = apply_command(&state, held);
                }
            }
        }
        state = tick(&state, &mut rng);

        let events: Vec<GameEvent> = std::mem::take(&mut state.events);
        for event in &events {
            debug!("{:?}", event);
        }
        audio.play_events(out, &events)?;

        display::render(out, &state, assets, terminal::size()?)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// The terminal is owned by the game, so log lines only go somewhere useful
/// when a log file is configured.
fn init_logging(log_file: Option<&Path>) {
    match log_file.map(File::create) {
        Some(Ok(file)) => {
            env_logger::Builder::new()
                .filter_level(log::LevelFilter::Info)
                .parse_default_env()
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        Some(Err(e)) => {
            eprintln!("cannot open log file: {}", e);
            env_logger::init();
        }
        None => env_logger::init(),
    }
}

fn main() -> Result<()> {
    let config = Config::from_env();
    init_logging(config.log_file.as_deref());
    for warning in &config.warnings {
        warn!("{}", warning);
    }
    info!("Flying Fortress starting with {:?}", config);

    // Missing art is fatal, and is reported before the terminal is taken over.
    let assets = Assets::load(&config.assets_dir).with_context(|| {
        format!(
            "failed to load assets from {} (set {} to override)",
            config.assets_dir.display(),
            config::ENV_ASSETS
        )
    })?;
    let audio = Audio::detect(config.muted);
    let seed = config.seed.unwrap_or_else(rand::random);
    info!("seed {}", seed);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(terminal::SetTitle("Flying Fortress"))?;
    out.execute(cursor::Hide)?;

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

    let result = game_loop(&mut out, &rx, &assets, &audio, seed);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
