use crate::entity::Color;
use crate::game::Game;
use crate::input::Key;
use crate::renderer::{draw_scene, Input, Renderer, Surface};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::f64::consts::PI;
use std::io;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

const SCORE_FONT_FAMILY: &str = "sans-serif";

pub struct WebRenderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    window: web_sys::Window,

    // Filled by the key listeners, drained once per tick
    pending_input: Rc<RefCell<VecDeque<Input>>>,
}

impl WebRenderer {
    pub fn new(canvas_id: &str) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            canvas,
            context,
            window,
            pending_input: Rc::new(RefCell::new(VecDeque::new())),
        })
    }

    /// Playing surface size, read once when the session is created.
    pub fn surface_size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn listen(&self, event: &str, to_input: fn(Key) -> Input) -> io::Result<()> {
        let pending_input = self.pending_input.clone();

        let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            // Older engines report `Unidentified` keys but still fill keyCode
            let key = Key::from_dom_key(&event.key()).or_else(|| Key::from_key_code(event.key_code()));
            if let Some(key) = key {
                pending_input.borrow_mut().push_back(to_input(key));
                event.prevent_default();
            } else if event.key() == "r" || event.key() == "R" {
                if event.type_() == "keydown" {
                    pending_input.borrow_mut().push_back(Input::Restart);
                }
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);

        self.window
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("{:?}", e)))?;

        closure.forget(); // Keep listener alive
        Ok(())
    }
}

impl Surface for WebRenderer {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.context.set_fill_style_str(&color.to_css());
        self.context.fill_rect(x, y, width, height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
        self.context.set_fill_style_str(&color.to_css());
        self.context.begin_path();
        // Only fails for a negative radius
        let _ = self
            .context
            .arc_with_anticlockwise(x, y, radius, 0.0, PI * 2.0, true);
        self.context.close_path();
        self.context.fill();
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_size: f64, color: Color) {
        self.context.set_fill_style_str(&color.to_css());
        self.context
            .set_font(&format!("{}px {}", font_size, SCORE_FONT_FAMILY));
        let _ = self.context.fill_text(text, x, y);
    }
}

impl Renderer for WebRenderer {
    fn init(&mut self) -> io::Result<()> {
        self.listen("keydown", Input::KeyDown)?;
        self.listen("keyup", Input::KeyUp)?;
        Ok(())
    }

    fn render(&mut self, game: &Game) -> io::Result<()> {
        draw_scene(self, game);
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        // No cleanup needed for web
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        Ok(self.pending_input.borrow_mut().pop_front())
    }
}
