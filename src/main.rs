#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    cli::run()
}

// The browser build starts through `pong::start_game` instead
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use anyhow::Context;
    use pong::constants::{DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH};
    use pong::{CliRenderer, Control, Game, GameLoop, Renderer, TerminalBell, Ticker};
    use std::fs::File;
    use std::sync::Mutex;
    use std::time::Instant;

    // Path of the diagnostic log; logging is off when unset
    const LOG_ENV: &str = "PONG_LOG";

    fn init_logging() -> anyhow::Result<()> {
        let Some(path) = std::env::var_os(LOG_ENV) else {
            return Ok(());
        };
        let file = File::create(&path)
            .with_context(|| format!("cannot create log file {}", path.to_string_lossy()))?;

        // stdout belongs to the game screen, so logs go to the file
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
        Ok(())
    }

    pub fn run() -> anyhow::Result<()> {
        init_logging()?;

        let game = Game::new(DEFAULT_SURFACE_WIDTH, DEFAULT_SURFACE_HEIGHT);
        let mut renderer = CliRenderer::new();
        renderer.init().context("failed to set up the terminal")?;

        let mut game_loop = GameLoop::new(game, renderer, TerminalBell::stdout());
        tracing::info!(
            width = game_loop.game.width,
            height = game_loop.game.height,
            "session started"
        );

        let result = play(&mut game_loop);

        game_loop
            .renderer
            .cleanup()
            .context("failed to restore the terminal")?;
        tracing::info!(
            user = game_loop.game.user.score,
            opponent = game_loop.game.opponent.score,
            "session ended"
        );
        result
    }

    fn play(game_loop: &mut GameLoop<CliRenderer, TerminalBell<std::io::Stdout>>) -> anyhow::Result<()> {
        let mut ticker = Ticker::new(Instant::now());
        loop {
            ticker.wait();

            if game_loop.pump_input()? == Control::Quit {
                return Ok(());
            }
            game_loop.tick()?;
        }
    }
}
