use crate::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex notation, e.g. `#05EDFF`
    pub fn to_css(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Which end of the table a paddle defends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    User,
    Opponent,
}

impl Side {
    /// Horizontal direction the ball leaves this side's paddle in.
    pub fn outgoing_sign(&self) -> f64 {
        match self {
            Side::User => 1.0,
            Side::Opponent => -1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub x: f64,
    pub y: f64, // Top edge
    pub width: f64,
    pub height: f64,
    pub color: Color,
    pub score: u32,
}

impl Paddle {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            color: COLOR_PADDLE,
            score: 0,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub x: f64, // Center
    pub y: f64,
    pub radius: f64,
    /// Magnitude applied on the next paddle hit. Not kept in sync with
    /// the velocity vector: a serve resets it while the velocity keeps
    /// its old magnitude.
    pub speed: f64,
    pub velocity_x: f64,
    pub velocity_y: f64,
    pub color: Color,
}

impl Ball {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            radius: BALL_RADIUS,
            speed: BALL_INITIAL_SPEED,
            velocity_x: BALL_INITIAL_VELOCITY.0,
            velocity_y: BALL_INITIAL_VELOCITY.1,
            color: COLOR_BALL,
        }
    }

    pub fn top(&self) -> f64 {
        self.y - self.radius
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.radius
    }

    pub fn left(&self) -> f64 {
        self.x - self.radius
    }

    pub fn right(&self) -> f64 {
        self.x + self.radius
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Net {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Color,
}

impl Net {
    /// Full-height divider centred on the surface.
    pub fn new(surface_width: f64, surface_height: f64) -> Self {
        Self {
            x: surface_width / 2.0 - NET_WIDTH / 2.0,
            y: 0.0,
            width: NET_WIDTH,
            height: surface_height,
            color: COLOR_NET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_css() {
        assert_eq!(COLOR_BALL.to_css(), "#05EDFF");
        assert_eq!(COLOR_BACKGROUND.to_css(), "#000000");
    }

    #[test]
    fn test_ball_edges() {
        let ball = Ball::new(100.0, 50.0);
        assert_eq!(ball.top(), 43.0);
        assert_eq!(ball.bottom(), 57.0);
        assert_eq!(ball.left(), 93.0);
        assert_eq!(ball.right(), 107.0);
    }

    #[test]
    fn test_paddle_center() {
        let paddle = Paddle::new(10.0, 250.0);
        assert_eq!(paddle.center_y(), 300.0);
        assert_eq!(paddle.bottom(), 350.0);
        assert_eq!(paddle.score, 0);
    }

    #[test]
    fn test_net_is_centred() {
        let net = Net::new(800.0, 600.0);
        assert_eq!(net.x, 398.0);
        assert_eq!(net.x + net.width / 2.0, 400.0);
        assert_eq!(net.height, 600.0);
    }

    #[test]
    fn test_outgoing_sign() {
        assert_eq!(Side::User.outgoing_sign(), 1.0);
        assert_eq!(Side::Opponent.outgoing_sign(), -1.0);
    }
}
