use crate::audio::AudioSink;
use crate::constants::TICKS_PER_SECOND;
use crate::game::Game;
use crate::renderer::{Input, Renderer};
use std::io;
use std::time::Duration;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

pub const TICK_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / TICKS_PER_SECOND as u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Drives a session: input in, one simulation step, cues out, one frame.
pub struct GameLoop<R: Renderer, A: AudioSink> {
    pub game: Game,
    pub renderer: R,
    pub audio: A,
}

impl<R: Renderer, A: AudioSink> GameLoop<R, A> {
    pub fn new(game: Game, renderer: R, audio: A) -> Self {
        Self {
            game,
            renderer,
            audio,
        }
    }

    pub fn handle_input(&mut self, input: Input) -> Control {
        match input {
            Input::KeyDown(key) => self.game.key_down(key),
            Input::KeyUp(key) => self.game.key_up(key),
            Input::Restart => self.game.restart(),
            Input::Quit => return Control::Quit,
        }
        Control::Continue
    }

    /// Apply every input event the renderer has queued.
    pub fn pump_input(&mut self) -> io::Result<Control> {
        while let Some(input) = self.renderer.poll_input()? {
            if self.handle_input(input) == Control::Quit {
                return Ok(Control::Quit);
            }
        }
        Ok(Control::Continue)
    }

    pub fn tick(&mut self) -> io::Result<()> {
        for cue in self.game.update() {
            self.audio.play(cue);
        }
        self.renderer.render(&self.game)
    }
}

/// Tick gate for frame-driven hosts (requestAnimationFrame), in
/// milliseconds. The schedule advances by whole intervals so frames
/// jittering around the interval still tick every time; when more than
/// an interval behind it re-bases on the current frame instead of
/// bursting.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    next_tick: f64,
    interval: f64,
}

impl FrameClock {
    pub fn new(start: f64, interval: f64) -> Self {
        Self {
            next_tick: start + interval,
            interval,
        }
    }

    /// Whether a tick is due at `now`. At most one tick per call.
    pub fn due(&mut self, now: f64) -> bool {
        // Vsync jitter lets a frame land slightly before its slot
        if now < self.next_tick - self.interval / 4.0 {
            return false;
        }
        self.next_tick += self.interval;
        if self.next_tick <= now {
            self.next_tick = now + self.interval;
        }
        true
    }
}

/// Fixed-cadence scheduler for native targets. A late tick re-bases the
/// schedule instead of running extra ticks to catch up.
#[cfg(not(target_arch = "wasm32"))]
pub struct Ticker {
    next_tick: Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl Ticker {
    pub fn new(start: Instant) -> Self {
        Self { next_tick: start }
    }

    /// How long to wait from `now` before the next tick is due, advancing
    /// the schedule by one interval.
    pub fn schedule(&mut self, now: Instant) -> Duration {
        if self.next_tick < now {
            self.next_tick = now;
        }
        let wait = self.next_tick - now;
        self.next_tick += TICK_INTERVAL;
        wait
    }

    pub fn wait(&mut self) {
        let wait = self.schedule(Instant::now());
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
    }
}
