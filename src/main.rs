//! Dino Dodge entry point
//!
//! The browser build is driven from `web::WebGame`. Natively this runs a
//! headless session with a scripted head sway and prints the outcome.
//!
//! Usage: `dino-dodge [easy|medium|hard] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::cell::RefCell;
    use std::rc::Rc;

    use dino_dodge::consts::TICKS_PER_SECOND;
    use dino_dodge::input::SampleMailbox;
    use dino_dodge::sim::{Engine, GameEvent, GamePhase, LaneConfig};
    use dino_dodge::{Leaderboard, Settings};

    env_logger::init();
    log::info!("Dino Dodge (native) starting...");

    let mut args = std::env::args().skip(1);
    let mut settings = Settings::load();
    if let Some(level) = args.next() {
        if let Err(e) = settings.set_difficulty_name(&level) {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    }
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);

    let mut engine = match Engine::new(LaneConfig::default(), settings.difficulty, seed) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let leaderboard = Rc::new(RefCell::new(Leaderboard::load()));
    {
        let leaderboard = leaderboard.clone();
        let name = settings.player_name.clone();
        engine.subscribe(move |event| {
            if let GameEvent::GameOver { score } = *event {
                leaderboard.borrow_mut().add(&name, score);
            }
        });
    }

    // Tracker reports at 30 Hz, the loop ticks at 60 Hz
    let mailbox = SampleMailbox::new();
    let max_ticks = 5 * 60 * TICKS_PER_SECOND as u64;
    engine.start();
    for t in 0..max_ticks {
        if t % 2 == 0 {
            let sway = 0.5 + 0.2 * (t as f32 * 0.01).sin();
            mailbox.post_face(sway);
        }
        if let Err(e) = engine.tick(mailbox.latest()) {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        if engine.phase() == GamePhase::GameOver {
            break;
        }
    }

    let state = engine.snapshot();
    println!("{}", state.status_line());
    println!(
        "Survived {:.1}s{}",
        state.time_ticks as f32 / TICKS_PER_SECOND as f32,
        if state.over { " (crashed)" } else { "" }
    );
    for (i, entry) in leaderboard.borrow().entries.iter().enumerate() {
        println!("#{} {:<12} {}", i + 1, entry.name, entry.score);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_main, this is just to satisfy the compiler
}
