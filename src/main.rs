//! Scrap Runner entry point
//!
//! Runs a headless autopilot session through the campaign and logs the
//! outcome. Useful for balance passes and as a smoke test of the whole
//! simulation without a renderer attached.

use glam::Vec2;

use scrap_runner::consts::*;
use scrap_runner::sim::{GameEvent, GamePhase, GameState, TickInput};
use scrap_runner::{Engine, EngineError, LevelSet, Settings};

const FRAME: f64 = 1.0 / 60.0;
/// Hard stop in case the bot wedges itself somewhere
const MAX_FRAMES: u64 = 60 * 60 * 10;

fn main() -> Result<(), EngineError> {
    env_logger::init();
    log::info!("Scrap Runner (headless autopilot)");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xCAFE);
    log::info!("seed {seed}");

    let mut engine = Engine::new(
        Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
        LevelSet::builtin(),
        Settings::default(),
        seed,
    )?;
    engine.start();

    let mut now = 0.0;
    for _ in 0..MAX_FRAMES {
        let input = autopilot(engine.state());
        let events = engine.frame(now, input);
        now += FRAME;

        let mut done = false;
        for event in events {
            match event {
                GameEvent::LevelComplete { level } => {
                    let hud = engine.snapshot();
                    log::info!(
                        "cleared level {} ({}) with {} hp, score {}",
                        level,
                        hud.level_name,
                        hud.health,
                        hud.score
                    );
                    engine.advance_level();
                }
                GameEvent::GameOver { won } => {
                    log::info!("run over, won={won}");
                    done = true;
                }
                GameEvent::Message(msg) => log::debug!("{msg}"),
                GameEvent::ScreenShake { .. } => {}
            }
        }
        if done || engine.state().phase == GamePhase::GameOver {
            break;
        }
    }

    let hud = engine.snapshot();
    println!(
        "final: score {} | level {} ({}) | {:.0}/{:.0} hp",
        hud.score, hud.level, hud.level_name, hud.health, hud.max_health
    );
    Ok(())
}

/// Simple bot: line up with the nearest threat ahead and keep firing.
/// Obstacles in the immediate path take priority over distant enemies.
fn autopilot(state: &GameState) -> TickInput {
    let player = &state.player;
    let px = player.body.center().x;
    let py = player.body.center().y;

    // nearest active enemy ahead of the ship
    let target_x = state
        .enemies
        .iter()
        .filter(|e| e.body.active && e.body.center().y < py)
        .min_by(|a, b| {
            let da = py - a.body.center().y;
            let db = py - b.body.center().y;
            da.total_cmp(&db)
        })
        .map(|e| e.body.center().x);

    // sidestep any obstacle closing within half a screen
    let blocking = state.obstacles.iter().find(|o| {
        o.body.active
            && (py - o.body.center().y) < CANVAS_HEIGHT / 2.0
            && (py - o.body.center().y) > 0.0
            && (o.body.center().x - px).abs() < (o.body.size.x + player.body.size.x) / 2.0
    });

    let steer = if let Some(obstacle) = blocking {
        if obstacle.body.center().x >= px { -1 } else { 1 }
    } else if let Some(tx) = target_x {
        if (tx - px).abs() < 20.0 {
            0
        } else if tx > px {
            1
        } else {
            -1
        }
    } else {
        0
    };

    TickInput {
        steer,
        advance: -1,
        shoot: true,
        pause: false,
    }
}
