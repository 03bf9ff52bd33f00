use crate::entity::Color;
use std::f64::consts::FRAC_PI_4;

// Playing surface used when the backend does not dictate one (terminal)
pub const DEFAULT_SURFACE_WIDTH: f64 = 800.0;
pub const DEFAULT_SURFACE_HEIGHT: f64 = 600.0;

pub const PADDLE_WIDTH: f64 = 10.0;
pub const PADDLE_HEIGHT: f64 = 100.0;
pub const PADDLE_MARGIN: f64 = 10.0; // Gap between a paddle and its side wall
pub const PADDLE_STEP: f64 = 8.0; // User paddle travel per tick

pub const OPPONENT_TRACKING: f64 = 0.09;

pub const NET_WIDTH: f64 = 4.0;

pub const BALL_RADIUS: f64 = 7.0;
pub const BALL_INITIAL_SPEED: f64 = 70.0;
pub const BALL_INITIAL_VELOCITY: (f64, f64) = (50.0, 50.0);
pub const SERVE_SPEED: f64 = 7.0;
pub const SPEED_INCREMENT: f64 = 0.2;
pub const DEFLECTION_ANGLE: f64 = FRAC_PI_4;

pub const SCORE_FONT_SIZE: f64 = 35.0;

pub const TICKS_PER_SECOND: u32 = 60;
pub const TICK_INTERVAL_MS: f64 = 1000.0 / TICKS_PER_SECOND as f64;

// Colors
pub const COLOR_BACKGROUND: Color = Color::rgb(0x00, 0x00, 0x00);
pub const COLOR_NET: Color = Color::rgb(0xFF, 0xFF, 0xFF);
pub const COLOR_PADDLE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
pub const COLOR_SCORE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
pub const COLOR_BALL: Color = Color::rgb(0x05, 0xED, 0xFF);
