use crate::constants::TICK_INTERVAL_MS;
use crate::game_loop::FrameClock;
use crate::{Game, GameLoop, Renderer, WebAudio, WebRenderer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const CANVAS_ID: &str = "canvas";

struct Session {
    game_loop: GameLoop<WebRenderer, WebAudio>,
    clock: FrameClock,
}

impl Session {
    fn new(now: f64) -> Result<Self, JsValue> {
        let mut renderer = WebRenderer::new(CANVAS_ID)?;
        renderer.init().map_err(|e| JsValue::from_str(&e.to_string()))?;

        let (width, height) = renderer.surface_size();
        let game = Game::new(width, height);

        Ok(Self {
            game_loop: GameLoop::new(game, renderer, WebAudio::new()?),
            clock: FrameClock::new(now, TICK_INTERVAL_MS),
        })
    }

    // At most one tick per animation frame, so a stalled tab slows the
    // game down rather than fast-forwarding it
    fn frame(&mut self, now: f64) -> Result<(), JsValue> {
        if !self.clock.due(now) {
            return Ok(());
        }

        // Quit has no meaning in a page
        self.game_loop
            .pump_input()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.game_loop
            .tick()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or("no window")?;
    let performance = window.performance().ok_or("no performance")?;

    let session = match Session::new(performance.now()) {
        Ok(session) => Rc::new(RefCell::new(session)),
        Err(e) => {
            web_sys::console::error_1(&format!("[WASM] Failed to start pong: {:?}", e).into());
            return Err(e);
        }
    };

    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if let Err(e) = session.borrow_mut().frame(performance.now()) {
            web_sys::console::error_1(&e);
            return; // Stop loop on error
        }

        // Schedule next frame
        let scheduled = web_sys::window().and_then(|window| {
            let callback = f.borrow();
            let callback = callback.as_ref()?;
            window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .ok()
        });
        if scheduled.is_none() {
            web_sys::console::error_1(&"[WASM] Could not schedule next frame".into());
        }
    }) as Box<dyn FnMut()>));

    if let Some(callback) = g.borrow().as_ref() {
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }

    web_sys::console::log_1(&"[WASM] Pong started".into());
    Ok(())
}
