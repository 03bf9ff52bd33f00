use crate::audio::Cue;
use crate::collision::overlaps;
use crate::constants::*;
use crate::entity::{Ball, Net, Paddle, Side};
use crate::input::{InputState, Key};

/// One running session: the entities, the held keys and the surface
/// they live on. Created once, then advanced by [`Game::update`].
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub width: f64,
    pub height: f64,
    pub user: Paddle,
    pub opponent: Paddle,
    pub ball: Ball,
    pub net: Net,
    pub input: InputState,
}

impl Game {
    pub fn new(width: f64, height: f64) -> Self {
        let paddle_y = height / 2.0 - PADDLE_HEIGHT / 2.0;

        Self {
            width,
            height,
            user: Paddle::new(PADDLE_MARGIN, paddle_y),
            opponent: Paddle::new(width - (PADDLE_WIDTH + PADDLE_MARGIN), paddle_y),
            ball: Ball::new(width / 2.0, height / 2.0),
            net: Net::new(width, height),
            input: InputState::default(),
        }
    }

    pub fn key_down(&mut self, key: Key) {
        self.input.press(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.release(key);
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::User => &self.user,
            Side::Opponent => &self.opponent,
        }
    }

    /// Paddle the ball can currently collide with. Exactly mid-surface
    /// belongs to the opponent.
    pub fn active_side(&self) -> Side {
        if self.ball.x < self.width / 2.0 {
            Side::User
        } else {
            Side::Opponent
        }
    }

    /// Advance the session by one tick and return the sound cues it
    /// raised, in the order they happened.
    pub fn update(&mut self) -> Vec<Cue> {
        let mut cues = Vec::new();

        // Move the user paddle. The guard looks at the pre-move position,
        // so a paddle may finish up to one step past the edge.
        if self.input.up && self.user.y > 0.0 {
            self.user.y -= PADDLE_STEP;
        } else if self.input.down && self.user.bottom() < self.height {
            self.user.y += PADDLE_STEP;
        }

        // Top and bottom walls
        if self.ball.bottom() >= self.height || self.ball.top() <= 0.0 {
            cues.push(Cue::WallHit);
            self.ball.velocity_y = -self.ball.velocity_y;
        }

        // Both goal checks run every tick, the second against the
        // possibly re-served ball
        if self.ball.right() >= self.width {
            cues.push(Cue::Score);
            self.user.score += 1;
            self.log_point(Side::User);
            self.serve();
        }

        if self.ball.left() <= 0.0 {
            cues.push(Cue::Score);
            self.opponent.score += 1;
            self.log_point(Side::Opponent);
            self.serve();
        }

        self.ball.x += self.ball.velocity_x;
        self.ball.y += self.ball.velocity_y;

        // Opponent follows the ball proportionally, unclamped
        self.opponent.y += (self.ball.y - self.opponent.center_y()) * OPPONENT_TRACKING;

        let side = self.active_side();
        if overlaps(self.paddle(side), &self.ball) {
            cues.push(Cue::PaddleHit);
            self.deflect(side);
        }

        cues
    }

    /// Bounce the ball off `side`'s paddle at a fixed angle chosen by
    /// where it struck, then speed it up.
    fn deflect(&mut self, side: Side) {
        let center = self.paddle(side).center_y();
        let angle = if self.ball.y < center {
            -DEFLECTION_ANGLE
        } else if self.ball.y > center {
            DEFLECTION_ANGLE
        } else {
            0.0
        };

        let ball = &mut self.ball;
        ball.velocity_x = side.outgoing_sign() * ball.speed * angle.cos();
        ball.velocity_y = ball.speed * angle.sin();
        ball.speed += SPEED_INCREMENT;

        tracing::debug!(?side, angle, speed = ball.speed, "paddle hit");
    }

    /// Re-centre the ball at serve speed and send it back the way it
    /// came. The velocity keeps its magnitude; only `speed` is reset.
    pub fn serve(&mut self) {
        self.ball.x = self.width / 2.0;
        self.ball.y = self.height / 2.0;
        self.ball.speed = SERVE_SPEED;

        self.ball.velocity_x = -self.ball.velocity_x;
        self.ball.velocity_y = -self.ball.velocity_y;
    }

    fn log_point(&self, scorer: Side) {
        tracing::info!(
            ?scorer,
            user = self.user.score,
            opponent = self.opponent.score,
            "point scored"
        );
    }

    /// Start a fresh session on the same surface.
    pub fn restart(&mut self) {
        tracing::debug!(width = self.width, height = self.height, "session restarted");
        *self = Self::new(self.width, self.height);
    }
}
