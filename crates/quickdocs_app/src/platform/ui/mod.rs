pub mod constants;
pub mod input;
pub mod keymap;
pub mod render;
pub mod screen;

use constants::SCROLL_STEP;

/// Terminal-local state that never reaches the session: the line being
/// typed, output of local commands and the transcript scroll offset.
#[derive(Debug, Default)]
pub struct UiState {
    pub input: String,
    pub footer: Vec<String>,
    /// Lines scrolled up from the bottom of the transcript.
    pub scroll: usize,
}

impl UiState {
    /// Takes the typed line and resets local output for the next command.
    pub fn submit(&mut self) -> String {
        self.footer.clear();
        self.scroll = 0;
        std::mem::take(&mut self.input)
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_add(SCROLL_STEP);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_sub(SCROLL_STEP);
    }
}
