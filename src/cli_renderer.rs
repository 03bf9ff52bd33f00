use crate::entity::Color;
use crate::game::Game;
use crate::input::Key;
use crate::renderer::{draw_scene, Input, Renderer, Surface};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

// Terminals without release events: a key counts as held until no press
// or repeat arrived for this long. The first window has to outlast the
// OS auto-repeat delay, later ones only the repeat gap.
const FIRST_REPEAT_TIMEOUT: Duration = Duration::from_millis(600);
const REPEAT_TIMEOUT: Duration = Duration::from_millis(200);

const INFO_LINES: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub background: Color,
    pub glyph: Option<char>,
}

/// The playing surface rasterised onto a grid of terminal cells, each
/// cell two characters wide.
pub struct CellCanvas {
    columns: usize,
    rows: usize,
    scale_x: f64,
    scale_y: f64,
    cells: Vec<Cell>,
}

impl CellCanvas {
    pub fn new(columns: usize, rows: usize, surface_width: f64, surface_height: f64) -> Self {
        Self {
            columns,
            rows,
            scale_x: columns as f64 / surface_width,
            scale_y: rows as f64 / surface_height,
            cells: vec![
                Cell {
                    background: Color::rgb(0, 0, 0),
                    glyph: None,
                };
                columns * rows
            ],
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    pub fn cell(&self, column: usize, row: usize) -> Cell {
        self.cells[row * self.columns + column]
    }

    fn cell_mut(&mut self, column: usize, row: usize) -> &mut Cell {
        &mut self.cells[row * self.columns + column]
    }

    /// Cells covered by `[start, start + len)` after scaling, clipped to
    /// the grid. Anything on the grid covers at least one cell.
    fn span(start: f64, len: f64, scale: f64, limit: usize) -> Option<(usize, usize)> {
        let first = (start * scale).floor();
        let last = ((start + len) * scale).ceil().max(first + 1.0);
        if last <= 0.0 || first >= limit as f64 {
            return None;
        }
        Some((first.max(0.0) as usize, (last as usize).min(limit)))
    }

    fn locate(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let column = (x * self.scale_x).floor();
        let row = (y * self.scale_y).floor();
        if column < 0.0 || row < 0.0 || column >= self.columns as f64 || row >= self.rows as f64 {
            return None;
        }
        Some((column as usize, row as usize))
    }

    fn paint(&mut self, column: usize, row: usize, color: Color) {
        *self.cell_mut(column, row) = Cell {
            background: color,
            glyph: None,
        };
    }
}

impl Surface for CellCanvas {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        let Some((left, right)) = Self::span(x, width, self.scale_x, self.columns) else {
            return;
        };
        let Some((top, bottom)) = Self::span(y, height, self.scale_y, self.rows) else {
            return;
        };
        for row in top..bottom {
            for column in left..right {
                self.paint(column, row, color);
            }
        }
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
        let (cx, cy) = (x * self.scale_x, y * self.scale_y);
        let (rx, ry) = (radius * self.scale_x, radius * self.scale_y);

        if let (Some((left, right)), Some((top, bottom))) = (
            Self::span(x - radius, 2.0 * radius, self.scale_x, self.columns),
            Self::span(y - radius, 2.0 * radius, self.scale_y, self.rows),
        ) {
            for row in top..bottom {
                for column in left..right {
                    let dx = (column as f64 + 0.5 - cx) / rx;
                    let dy = (row as f64 + 0.5 - cy) / ry;
                    if dx * dx + dy * dy <= 1.0 {
                        self.paint(column, row, color);
                    }
                }
            }
        }

        // Small balls still show up
        if let Some((column, row)) = self.locate(x, y) {
            self.paint(column, row, color);
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, _font_size: f64, _color: Color) {
        let Some((column, row)) = self.locate(x, y) else {
            return;
        };
        for (offset, glyph) in text.chars().enumerate() {
            if column + offset >= self.columns {
                break;
            }
            self.cell_mut(column + offset, row).glyph = Some(glyph);
        }
    }
}

fn terminal_color(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

#[derive(Debug, Clone, Copy)]
struct HeldKey {
    key: Key,
    since: Instant,
    repeating: bool,
}

impl HeldKey {
    fn expired(&self) -> bool {
        let timeout = if self.repeating {
            REPEAT_TIMEOUT
        } else {
            FIRST_REPEAT_TIMEOUT
        };
        self.since.elapsed() >= timeout
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        _ => None,
    }
}

pub struct CliRenderer {
    canvas: Option<CellCanvas>,
    active: bool,
    // Whether the terminal reports key releases itself
    release_events: bool,
    held: Vec<HeldKey>,
}

impl CliRenderer {
    pub fn new() -> Self {
        Self {
            canvas: None,
            active: false,
            release_events: false,
            held: Vec::new(),
        }
    }

    fn grid_size() -> io::Result<(usize, usize)> {
        let (term_width, term_height) = terminal::size()?;
        let columns = ((term_width / 2) as usize).max(20);
        let rows = (term_height.saturating_sub(INFO_LINES) as usize).max(10);
        Ok((columns, rows))
    }

    fn draw_canvas(canvas: &CellCanvas, stdout: &mut io::Stdout) -> io::Result<()> {
        let (columns, rows) = canvas.size();
        queue!(stdout, SetForegroundColor(style::Color::White))?;

        for row in 0..rows {
            queue!(stdout, cursor::MoveTo(0, row as u16))?;
            let mut current = None;
            for column in 0..columns {
                let cell = canvas.cell(column, row);
                if current != Some(cell.background) {
                    queue!(stdout, SetBackgroundColor(terminal_color(cell.background)))?;
                    current = Some(cell.background);
                }
                match cell.glyph {
                    Some(glyph) => queue!(stdout, Print(glyph), Print(' '))?,
                    None => queue!(stdout, Print("  "))?,
                }
            }
        }
        queue!(stdout, ResetColor)?;
        Ok(())
    }

    fn draw_info(&self, game: &Game, rows: usize, stdout: &mut io::Stdout) -> io::Result<()> {
        queue!(
            stdout,
            cursor::MoveTo(0, rows as u16),
            terminal::Clear(ClearType::CurrentLine),
            Print(format!(
                "You: {}  CPU: {}  Speed: {:.1}",
                game.user.score, game.opponent.score, game.ball.speed
            )),
            cursor::MoveTo(0, rows as u16 + 1),
            terminal::Clear(ClearType::CurrentLine),
            Print("Controls: Up/Down to move | Q to quit | R to restart")
        )?;
        Ok(())
    }

    fn translate(&mut self, event: KeyEvent) -> Option<Input> {
        match event.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Some(Input::Quit),
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(Input::Quit)
            }
            KeyCode::Char('r') | KeyCode::Char('R') if event.kind == KeyEventKind::Press => {
                return Some(Input::Restart)
            }
            _ => {}
        }

        let key = map_key(event.code)?;
        match event.kind {
            KeyEventKind::Release => Some(Input::KeyUp(key)),
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if !self.release_events {
                    self.hold(key, event.kind == KeyEventKind::Repeat);
                }
                Some(Input::KeyDown(key))
            }
        }
    }

    fn hold(&mut self, key: Key, repeat: bool) {
        let now = Instant::now();
        match self.held.iter_mut().find(|held| held.key == key) {
            // A second press while held is the terminal auto-repeating
            Some(held) => {
                held.since = now;
                held.repeating = true;
            }
            None => self.held.push(HeldKey {
                key,
                since: now,
                repeating: repeat,
            }),
        }
    }

    fn expired_hold(&mut self) -> Option<Key> {
        let index = self.held.iter().position(HeldKey::expired)?;
        Some(self.held.remove(index).key)
    }
}

impl Default for CliRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for CliRenderer {
    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide
        )?;

        self.release_events = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if self.release_events {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        tracing::debug!(release_events = self.release_events, "terminal initialised");
        Ok(())
    }

    fn render(&mut self, game: &Game) -> io::Result<()> {
        let mut stdout = io::stdout();
        let (columns, rows) = Self::grid_size()?;

        // Rebuild the grid when the terminal is resized
        let canvas = match self.canvas.take() {
            Some(canvas) if canvas.size() == (columns, rows) => canvas,
            _ => {
                queue!(stdout, terminal::Clear(ClearType::All))?;
                CellCanvas::new(columns, rows, game.width, game.height)
            }
        };
        let canvas = self.canvas.insert(canvas);
        draw_scene(canvas, game);

        Self::draw_canvas(canvas, &mut stdout)?;
        self.draw_info(game, rows, &mut stdout)?;

        stdout.flush()?;
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let mut stdout = io::stdout();
        if self.release_events {
            execute!(stdout, PopKeyboardEnhancementFlags)?;
        }
        execute!(
            stdout,
            cursor::Show,
            terminal::LeaveAlternateScreen,
            ResetColor
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        if let Some(key) = self.expired_hold() {
            return Ok(Some(Input::KeyUp(key)));
        }

        while event::poll(Duration::ZERO)? {
            if let Event::Key(key_event) = event::read()? {
                if let Some(input) = self.translate(key_event) {
                    return Ok(Some(input));
                }
            }
        }
        Ok(None)
    }
}

impl Drop for CliRenderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;

    fn scene_canvas(game: &Game) -> CellCanvas {
        let mut canvas = CellCanvas::new(40, 30, game.width, game.height);
        draw_scene(&mut canvas, game);
        canvas
    }

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    #[test]
    fn test_scene_rasterises_every_entity() {
        let game = Game::new(800.0, 600.0);
        let canvas = scene_canvas(&game);

        // Ball over the net at the centre
        assert_eq!(canvas.cell(20, 15).background, COLOR_BALL);
        // Net either side of the ball
        assert_eq!(canvas.cell(19, 0).background, COLOR_NET);
        assert_eq!(canvas.cell(20, 29).background, COLOR_NET);
        // Paddles in the outer columns, rows 12..18
        assert_eq!(canvas.cell(0, 12).background, COLOR_PADDLE);
        assert_eq!(canvas.cell(0, 17).background, COLOR_PADDLE);
        assert_eq!(canvas.cell(0, 18).background, COLOR_BACKGROUND);
        assert_eq!(canvas.cell(39, 15).background, COLOR_PADDLE);
        // Open table
        assert_eq!(canvas.cell(10, 20).background, COLOR_BACKGROUND);
    }

    #[test]
    fn test_scores_written_as_glyphs() {
        let mut game = Game::new(800.0, 600.0);
        game.user.score = 7;
        game.opponent.score = 12;
        let canvas = scene_canvas(&game);

        assert_eq!(canvas.cell(10, 5).glyph, Some('7'));
        assert_eq!(canvas.cell(30, 5).glyph, Some('1'));
        assert_eq!(canvas.cell(31, 5).glyph, Some('2'));
        assert_eq!(canvas.cell(10, 6).glyph, None);
    }

    #[test]
    fn test_thin_rect_covers_a_cell() {
        let mut canvas = CellCanvas::new(10, 10, 1000.0, 1000.0);
        canvas.fill_rect(450.0, 0.0, 1.0, 1.0, COLOR_NET);
        assert_eq!(canvas.cell(4, 0).background, COLOR_NET);
        assert_eq!(canvas.cell(5, 0).background, COLOR_BACKGROUND);
    }

    #[test]
    fn test_off_grid_shapes_are_clipped() {
        let mut canvas = CellCanvas::new(10, 10, 100.0, 100.0);
        canvas.fill_rect(-50.0, -50.0, 20.0, 20.0, COLOR_PADDLE);
        canvas.fill_rect(95.0, 95.0, 50.0, 50.0, COLOR_PADDLE);
        canvas.fill_circle(500.0, 500.0, 7.0, COLOR_BALL);
        canvas.fill_text("99", 98.0, 5.0, 35.0, COLOR_SCORE);

        assert_eq!(canvas.cell(0, 0).background, COLOR_BACKGROUND);
        assert_eq!(canvas.cell(9, 9).background, COLOR_PADDLE);
        assert_eq!(canvas.cell(9, 0).glyph, Some('9'));
    }

    #[test]
    fn test_large_circle_is_round() {
        let mut canvas = CellCanvas::new(10, 10, 10.0, 10.0);
        canvas.fill_circle(5.0, 5.0, 3.0, COLOR_BALL);

        assert_eq!(canvas.cell(5, 5).background, COLOR_BALL);
        assert_eq!(canvas.cell(2, 5).background, COLOR_BALL);
        // Corner of the bounding square stays empty
        assert_eq!(canvas.cell(2, 2).background, COLOR_BACKGROUND);
    }

    #[test]
    fn test_translate_arrow_keys() {
        let mut renderer = CliRenderer::new();
        renderer.release_events = true;

        assert_eq!(
            renderer.translate(key(KeyCode::Up, KeyEventKind::Press)),
            Some(Input::KeyDown(Key::Up))
        );
        assert_eq!(
            renderer.translate(key(KeyCode::Down, KeyEventKind::Release)),
            Some(Input::KeyUp(Key::Down))
        );
        assert_eq!(renderer.translate(key(KeyCode::Left, KeyEventKind::Press)), None);
        assert!(renderer.held.is_empty());
    }

    #[test]
    fn test_translate_commands() {
        let mut renderer = CliRenderer::new();
        assert_eq!(
            renderer.translate(key(KeyCode::Char('q'), KeyEventKind::Press)),
            Some(Input::Quit)
        );
        assert_eq!(
            renderer.translate(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Input::Quit)
        );
        assert_eq!(
            renderer.translate(key(KeyCode::Char('r'), KeyEventKind::Press)),
            Some(Input::Restart)
        );
        assert_eq!(renderer.translate(key(KeyCode::Char('r'), KeyEventKind::Release)), None);
        assert_eq!(renderer.translate(key(KeyCode::Char('c'), KeyEventKind::Press)), None);
    }

    #[test]
    fn test_first_press_held_through_repeat_delay() {
        let mut renderer = CliRenderer::new();
        renderer.translate(key(KeyCode::Up, KeyEventKind::Press));
        assert_eq!(renderer.held.len(), 1);
        assert!(!renderer.held[0].repeating);

        // Typical auto-repeat delays run 250..660 ms
        renderer.held[0].since = Instant::now() - Duration::from_millis(500);
        assert_eq!(renderer.expired_hold(), None);

        renderer.held[0].since = Instant::now() - FIRST_REPEAT_TIMEOUT;
        assert_eq!(renderer.expired_hold(), Some(Key::Up));
        assert!(renderer.held.is_empty());
    }

    #[test]
    fn test_repeating_key_released_after_short_gap() {
        let mut renderer = CliRenderer::new();
        renderer.translate(key(KeyCode::Down, KeyEventKind::Press));
        renderer.translate(key(KeyCode::Down, KeyEventKind::Press));
        assert_eq!(renderer.held.len(), 1);
        assert!(renderer.held[0].repeating);
        assert_eq!(renderer.expired_hold(), None);

        renderer.held[0].since = Instant::now() - REPEAT_TIMEOUT;
        assert_eq!(renderer.expired_hold(), Some(Key::Down));
    }

    #[test]
    fn test_repeat_event_starts_short_window() {
        let mut renderer = CliRenderer::new();
        renderer.translate(key(KeyCode::Up, KeyEventKind::Repeat));
        assert!(renderer.held[0].repeating);
    }
}
