use crate::constants::*;
use crate::entity::Color;
use crate::game::Game;
use crate::input::Key;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    KeyDown(Key),
    KeyUp(Key),
    Quit,
    Restart,
}

/// Drawing primitives a backend offers, in surface coordinates.
pub trait Surface {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);

    /// `y` is the text baseline.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_size: f64, color: Color);
}

/// Paint one frame: background, net, scores, paddles, ball.
pub fn draw_scene<S: Surface + ?Sized>(surface: &mut S, game: &Game) {
    surface.fill_rect(0.0, 0.0, game.width, game.height, COLOR_BACKGROUND);

    let net = &game.net;
    surface.fill_rect(net.x, net.y, net.width, net.height, net.color);

    let score_y = game.height / 6.0;
    surface.fill_text(
        &game.user.score.to_string(),
        game.width / 4.0,
        score_y,
        SCORE_FONT_SIZE,
        COLOR_SCORE,
    );
    surface.fill_text(
        &game.opponent.score.to_string(),
        3.0 * game.width / 4.0,
        score_y,
        SCORE_FONT_SIZE,
        COLOR_SCORE,
    );

    for paddle in [&game.user, &game.opponent] {
        surface.fill_rect(paddle.x, paddle.y, paddle.width, paddle.height, paddle.color);
    }

    let ball = &game.ball;
    surface.fill_circle(ball.x, ball.y, ball.radius, ball.color);
}

/// Trait that abstracts rendering implementation.
/// This allows for different rendering backends (CLI, Web, etc.)
pub trait Renderer {
    /// Initialize the renderer
    fn init(&mut self) -> io::Result<()>;

    /// Render the current game state
    fn render(&mut self, game: &Game) -> io::Result<()>;

    /// Clean up and restore terminal/display state
    fn cleanup(&mut self) -> io::Result<()>;

    /// Next pending input event, if any. Never blocks.
    fn poll_input(&mut self) -> io::Result<Option<Input>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Rect(f64, f64, f64, f64, Color),
        Circle(f64, f64, f64, Color),
        Text(String, f64, f64, f64, Color),
    }

    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<Call>,
    }

    impl Surface for RecordingSurface {
        fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
            self.calls.push(Call::Rect(x, y, width, height, color));
        }

        fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
            self.calls.push(Call::Circle(x, y, radius, color));
        }

        fn fill_text(&mut self, text: &str, x: f64, y: f64, font_size: f64, color: Color) {
            self.calls.push(Call::Text(text.to_string(), x, y, font_size, color));
        }
    }

    #[test]
    fn test_scene_draw_order() {
        let mut game = Game::new(800.0, 600.0);
        game.user.score = 3;
        game.opponent.score = 11;

        let mut surface = RecordingSurface::default();
        draw_scene(&mut surface, &game);

        assert_eq!(
            surface.calls,
            vec![
                Call::Rect(0.0, 0.0, 800.0, 600.0, COLOR_BACKGROUND),
                Call::Rect(398.0, 0.0, 4.0, 600.0, COLOR_NET),
                Call::Text("3".into(), 200.0, 100.0, 35.0, COLOR_SCORE),
                Call::Text("11".into(), 600.0, 100.0, 35.0, COLOR_SCORE),
                Call::Rect(10.0, 250.0, 10.0, 100.0, COLOR_PADDLE),
                Call::Rect(780.0, 250.0, 10.0, 100.0, COLOR_PADDLE),
                Call::Circle(400.0, 300.0, 7.0, COLOR_BALL),
            ]
        );
    }

    #[test]
    fn test_scene_follows_state() {
        let mut game = Game::new(800.0, 600.0);
        game.update();

        let mut surface = RecordingSurface::default();
        draw_scene(&mut surface, &game);

        assert_eq!(surface.calls.last(), Some(&Call::Circle(450.0, 350.0, 7.0, COLOR_BALL)));
    }
}
