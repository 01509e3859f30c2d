//! Sky Strike entry point
//!
//! Native builds run a headless demo: an autopilot plays one session against
//! the real simulation and the HUD is logged as it changes.
//!
//! Usage: `sky-strike [seed] [tuning.json]`

use sky_strike::platform::Direction;
use sky_strike::sim::GameEvent;
use sky_strike::{GamePhase, Session, Tuning};

/// ~60 fps frame spacing (ms)
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Give up after ten minutes of game time
const MAX_FRAMES: u32 = 60 * 60 * 10;

fn main() {
    env_logger::init();
    log::info!("Sky Strike (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5EED);
    let tuning = args.next().map(|path| load_tuning(&path)).unwrap_or_default();

    let mut session = Session::new(tuning, seed);
    session.set_field_size(480.0, 640.0);
    session.start_session();

    let mut frames = 0;
    let mut last_hud = session.hud();
    while frames < MAX_FRAMES && session.phase() == GamePhase::Playing {
        steer(&mut session);
        session.frame(frames as f64 * FRAME_MS);
        frames += 1;

        for event in session.events() {
            match event {
                GameEvent::PickupCollected { kind } => log::info!("Collected {:?}", kind),
                GameEvent::GameOver { score } => log::info!("Game over with {} points", score),
                _ => {}
            }
        }

        let hud = session.hud();
        if hud != last_hud {
            log::info!(
                "score {} | health {} ({})",
                hud.score_label(),
                hud.health_label(),
                hud.health_tier.as_str()
            );
            last_hud = hud;
        }
    }

    println!(
        "seed {} survived {:.1}s, score {}, health {}",
        seed,
        frames as f64 * FRAME_MS / 1000.0,
        session.score(),
        session.hud().health_label()
    );
}

/// Read a tuning override file, falling back to stock balance
fn load_tuning(path: &str) -> Tuning {
    match std::fs::read_to_string(path) {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Bad tuning file {}: {} - using defaults", path, e);
                Tuning::default()
            }
        },
        Err(e) => {
            log::warn!("Could not read {}: {} - using defaults", path, e);
            Tuning::default()
        }
    }
}

/// Line up under the lowest hostile, dodging sideways when one gets close
fn steer(session: &mut Session) {
    let player = session.player().clone();
    let center = player.center();

    let target = session
        .hostiles()
        .iter()
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|h| h.center());

    let (left, right) = match target {
        Some(t) if (t.y - center.y).abs() < 120.0 => {
            // Too close to ram safely: slide away
            let flee_left = t.x >= center.x;
            (flee_left, !flee_left)
        }
        Some(t) if (t.x - center.x).abs() > 4.0 => (t.x < center.x, t.x > center.x),
        _ => (false, false),
    };

    session.set_directional_intent(Direction::Left, left);
    session.set_directional_intent(Direction::Right, right);
}
