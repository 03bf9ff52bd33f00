pub mod audio;
pub mod collision;
pub mod constants;
pub mod entity;
pub mod game;
pub mod game_loop;
pub mod input;
pub mod renderer;

#[cfg(not(target_arch = "wasm32"))]
pub mod cli_renderer;

#[cfg(target_arch = "wasm32")]
pub mod web_audio;
#[cfg(target_arch = "wasm32")]
mod web_main;
#[cfg(target_arch = "wasm32")]
pub mod web_renderer;

pub use audio::{AudioSink, Cue, TerminalBell};
pub use collision::overlaps;
pub use entity::{Ball, Color, Net, Paddle, Side};
pub use game::Game;
pub use game_loop::{Control, FrameClock, GameLoop, TICK_INTERVAL};
pub use input::{InputState, Key};
pub use renderer::{draw_scene, Input, Renderer, Surface};

#[cfg(not(target_arch = "wasm32"))]
pub use cli_renderer::CliRenderer;
#[cfg(not(target_arch = "wasm32"))]
pub use game_loop::Ticker;

#[cfg(target_arch = "wasm32")]
pub use web_audio::WebAudio;
#[cfg(target_arch = "wasm32")]
pub use web_main::start_game;
#[cfg(target_arch = "wasm32")]
pub use web_renderer::WebRenderer;
