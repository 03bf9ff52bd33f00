use crate::entity::{Ball, Paddle};

/// Axis-aligned edges of a shape, built per check and thrown away.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    top: f64,
    bottom: f64,
    left: f64,
    right: f64,
}

impl Bounds {
    fn of_paddle(paddle: &Paddle) -> Self {
        Self {
            top: paddle.y,
            bottom: paddle.y + paddle.height,
            left: paddle.x,
            right: paddle.x + paddle.width,
        }
    }

    // The ball's bounding square, not the circle itself
    fn of_ball(ball: &Ball) -> Self {
        Self {
            top: ball.top(),
            bottom: ball.bottom(),
            left: ball.left(),
            right: ball.right(),
        }
    }
}

/// Rectangle overlap between a paddle and the ball's bounding square.
/// Edges that merely touch do not count. A ball whose square clips a
/// paddle corner registers a hit even when the circle misses.
pub fn overlaps(paddle: &Paddle, ball: &Ball) -> bool {
    let p = Bounds::of_paddle(paddle);
    let b = Bounds::of_ball(ball);

    b.left < p.right && b.top < p.bottom && b.right > p.left && b.bottom > p.top
}
