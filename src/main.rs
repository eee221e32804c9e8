//! Charge Game headless runner
//!
//! Loads a level and plays it without rendering or input:
//!
//! ```text
//! charge-game [LEVEL_DIR] [LEVEL] [MAX_TICKS]
//! ```
//!
//! `RUST_LOG` controls verbosity.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use charge_game::platform::FramePacer;
    use charge_game::sim::{GameEvent, GameMode};
    use charge_game::{Session, Settings};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let dir = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));
    let level: u32 = match args.next().map(|s| s.parse()) {
        None => 1,
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::error!("Invalid level number: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let max_ticks: u64 = match args.next().map(|s| s.parse()) {
        None => 60 * 60,
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::error!("Invalid tick limit: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let settings = Settings::load_or_default(&dir.join(Settings::FILE_NAME));
    log::info!("Charge Game starting ({} ruleset)", settings.ruleset.as_str());
    let tick_budget = settings.tick_budget_ms;

    let mut session = Session::new(&dir, settings, GameMode::Play);
    log::info!("{} level(s) available", session.scan_levels());
    if let Err(e) = session.load_level(level) {
        log::error!("{}", e);
        return ExitCode::FAILURE;
    }

    session.play_restart();
    let mut pacer = FramePacer::new(tick_budget);
    let mut dt = tick_budget as f64;

    for _ in 0..max_ticks {
        let events = session.tick(dt);
        if let Some(GameEvent::LevelWon { score }) = events
            .iter()
            .find(|e| matches!(e, GameEvent::LevelWon { .. }))
        {
            log::info!(
                "Level {} won after {} ticks with score {}",
                level,
                session.state.time_ticks,
                score
            );
            return ExitCode::SUCCESS;
        }
        dt = pacer.pace();
    }

    log::info!(
        "Level {} not won after {} ticks ({} of {} particles on goal)",
        level,
        max_ticks,
        session.state.particles_on_goal,
        session.state.particles.moving_count()
    );
    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on the web
}
