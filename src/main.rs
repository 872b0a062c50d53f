//! Flappy Plane entry point
//!
//! Runs a headless demo: placeholder sprites, a recording canvas and a
//! scripted input timeline stand in for the window, art and keyboard.

use std::path::Path;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use flappy_plane::assets::Assets;
use flappy_plane::audio::AudioManager;
use flappy_plane::consts::SETTINGS_FILE;
use flappy_plane::platform::{InputEvent, Key, ScriptedInput, SystemClock};
use flappy_plane::renderer::DrawList;
use flappy_plane::{Game, RankingStore, SessionContext, Settings};

/// Play, flap at a steady rhythm, then leave through the pause menu and quit
fn demo_script(demo_seconds: u32) -> ScriptedInput {
    let end = u64::from(demo_seconds.max(3)) * 1000;
    ScriptedInput::new()
        .at(500, InputEvent::KeyDown(Key::Confirm))
        // One flap per rise-and-fall keeps the plane roughly level
        .every(700, end - 1000, 1300, InputEvent::KeyDown(Key::Jump))
        // Pauses a live run, or retries a crashed one (both record the score)
        .at(end - 500, InputEvent::KeyDown(Key::Escape))
        .at(end - 400, InputEvent::KeyDown(Key::Down))
        .at(end - 400, InputEvent::KeyDown(Key::Confirm))
        .at(end, InputEvent::Quit)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Flappy Plane (headless) starting...");

    let settings = Settings::load(Path::new(SETTINGS_FILE));
    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!("Player {}, seed {}", settings.player_name, seed);

    let ranking = RankingStore::load(settings.save_file.clone());
    let mut audio = AudioManager::default();
    audio.configure(&settings);

    let ctx = SessionContext::new(&settings, Assets::placeholder(), ranking, audio, seed);
    let mut game = Game::new(ctx, Box::new(SystemClock::new()));

    let mut input = demo_script(settings.demo_seconds);
    let mut canvas = DrawList::new();
    let budget = settings.frame_duration();
    let mut frame_start = Instant::now();
    game.run(&mut input, &mut canvas, || {
        let elapsed = frame_start.elapsed();
        if elapsed < budget {
            std::thread::sleep(budget - elapsed);
        }
        frame_start = Instant::now();
    });

    let ranking = &game.context().ranking;
    if ranking.is_empty() {
        log::info!("No ranking yet");
    }
    for (i, entry) in ranking.entries().iter().enumerate() {
        log::info!("{:>2}. {}: {}", i + 1, entry.name, entry.score);
    }
    log::info!(
        "Done after {} frames, best score {}",
        game.frames(),
        ranking.top_score().unwrap_or(0)
    );
}
