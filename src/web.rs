//! Browser facade
//!
//! The page owns the canvas, the camera and the face tracker. It forwards
//! face reports and frame times here and draws from the JSON snapshot.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::clock::FrameClock;
use crate::highscores::{Leaderboard, PendingHighScore};
use crate::input::SampleMailbox;
use crate::settings::Settings;
use crate::sim::{Engine, LaneConfig, SteerDirection};

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Dino Dodge starting...");
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Game instance driven by the page's animation loop
#[wasm_bindgen]
pub struct WebGame {
    engine: Engine,
    mailbox: SampleMailbox,
    settings: Settings,
    leaderboard: Rc<RefCell<Leaderboard>>,
    /// Final score awaiting a name from the high score prompt
    pending_high_score: Rc<RefCell<PendingHighScore>>,
    clock: FrameClock,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> Result<WebGame, JsValue> {
        let settings = Settings::load();
        let lane = LaneConfig::new(width, height).map_err(to_js)?;
        let seed = js_sys::Date::now() as u64;
        let mut engine = Engine::new(lane, settings.difficulty, seed).map_err(to_js)?;
        log::info!("Game initialized with seed: {}", seed);

        let leaderboard = Rc::new(RefCell::new(Leaderboard::load()));
        let pending_high_score = Rc::new(RefCell::new(PendingHighScore::new()));
        {
            let leaderboard = leaderboard.clone();
            let pending = pending_high_score.clone();
            engine.subscribe(move |event| {
                pending.borrow_mut().observe(event, &leaderboard.borrow());
            });
        }

        Ok(WebGame {
            engine,
            mailbox: SampleMailbox::new(),
            settings,
            leaderboard,
            pending_high_score,
            clock: FrameClock::new(),
        })
    }

    /// Face tracker result: normalized bounding-box center x
    pub fn face_detected(&self, x_center: f32) {
        self.mailbox.post_face(x_center);
    }

    pub fn face_lost(&self) {
        self.mailbox.post_lost();
    }

    pub fn start(&mut self) {
        self.engine.start();
    }

    pub fn pause(&mut self) {
        self.engine.pause();
    }

    pub fn toggle(&mut self) {
        self.engine.toggle();
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        self.clock.reset();
    }

    /// Apply the selector value and persist it
    pub fn set_difficulty(&mut self, name: &str) -> Result<(), JsValue> {
        let difficulty = self.engine.set_difficulty_name(name).map_err(to_js)?;
        self.settings.difficulty = difficulty;
        self.settings.save();
        Ok(())
    }

    /// Run as many fixed ticks as `dt` seconds of wall time cover
    pub fn update(&mut self, dt: f32) -> Result<(), JsValue> {
        for _ in 0..self.clock.advance(dt) {
            self.engine.tick(self.mailbox.latest()).map_err(to_js)?;
        }
        Ok(())
    }

    /// World state for the renderer
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.engine.snapshot()).map_err(to_js)
    }

    pub fn status_line(&self) -> String {
        self.engine.snapshot().status_line()
    }

    /// Arrow for the steering indicator, empty inside the dead zone
    pub fn steering_arrow(&self) -> String {
        match self.engine.steering_direction() {
            Some(SteerDirection::Left) => "←".to_string(),
            Some(SteerDirection::Right) => "→".to_string(),
            None => String::new(),
        }
    }

    pub fn pending_high_score(&self) -> Option<u32> {
        self.pending_high_score.borrow().get()
    }

    /// Record the pending score under `name`; returns the rank reached
    pub fn submit_high_score(&mut self, name: &str) -> Option<u32> {
        let score = self.pending_high_score.borrow_mut().take()?;
        let mut board = self.leaderboard.borrow_mut();
        let rank = board.add(name, score)?;
        board.save();
        if !name.trim().is_empty() {
            self.settings.player_name = name.trim().to_string();
            self.settings.save();
        }
        Some(rank as u32)
    }

    pub fn player_name(&self) -> String {
        self.settings.player_name.clone()
    }

    pub fn leaderboard_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&*self.leaderboard.borrow()).map_err(to_js)
    }
}
