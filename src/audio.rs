use std::io::{self, Write};

/// Sound cues raised by the simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    WallHit,
    Score,
    PaddleHit,
}

/// Playback port. Fire-and-forget: implementations must not block the
/// tick and have no way to report failure back to the game.
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// Recording sink, handy for tests and headless runs.
impl AudioSink for Vec<Cue> {
    fn play(&mut self, cue: Cue) {
        self.push(cue);
    }
}

/// Terminal stand-in for sound: rings the bell when a point is scored.
/// Hits are too frequent for the bell and are only traced.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: Cue) {
        tracing::trace!(?cue, "audio cue");
        if cue == Cue::Score {
            // Playback errors are never surfaced to the game
            let _ = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
        }
    }
}
