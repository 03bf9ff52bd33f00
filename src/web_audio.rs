use crate::audio::{AudioSink, Cue};
use wasm_bindgen::JsValue;
use web_sys::HtmlAudioElement;

const WALL_HIT_CLIP: &str = "sounds/wallHitSound.wav";
const SCORE_CLIP: &str = "sounds/scoreSound.wav";
const PADDLE_HIT_CLIP: &str = "sounds/hitSound.wav";

/// One preloaded `<audio>` element per cue.
pub struct WebAudio {
    wall_hit: HtmlAudioElement,
    score: HtmlAudioElement,
    paddle_hit: HtmlAudioElement,
}

impl WebAudio {
    pub fn new() -> Result<Self, JsValue> {
        Ok(Self {
            wall_hit: HtmlAudioElement::new_with_src(WALL_HIT_CLIP)?,
            score: HtmlAudioElement::new_with_src(SCORE_CLIP)?,
            paddle_hit: HtmlAudioElement::new_with_src(PADDLE_HIT_CLIP)?,
        })
    }
}

impl AudioSink for WebAudio {
    fn play(&mut self, cue: Cue) {
        let clip = match cue {
            Cue::WallHit => &self.wall_hit,
            Cue::Score => &self.score,
            Cue::PaddleHit => &self.paddle_hit,
        };
        // A clip that is still playing keeps playing; rejections are ignored
        let _ = clip.play();
    }
}
