//! Browser implementations of the platform traits

use web_sys::Document;

use super::ScoreDisplay;

/// Writes the score into the page HUD
///
/// Expects `#hud-score .hud-value`, `#final-score` and a `#game-over`
/// container; missing elements are skipped.
pub struct DomScoreDisplay {
    document: Document,
}

impl DomScoreDisplay {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn set_text(&self, selector: &str, text: &str) {
        if let Some(el) = self.document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn set_game_over_visible(&self, visible: bool) {
        if let Some(el) = self.document.get_element_by_id("game-over") {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }
}

impl ScoreDisplay for DomScoreDisplay {
    fn show_score(&mut self, score: u64) {
        self.set_text("#hud-score .hud-value", &score.to_string());
    }

    fn show_final_score(&mut self, score: u64) {
        self.set_text("#hud-score .hud-value", &score.to_string());
        self.set_text("#final-score", &score.to_string());
        self.set_game_over_visible(true);
    }

    fn clear_final_score(&mut self) {
        self.set_game_over_visible(false);
    }
}
