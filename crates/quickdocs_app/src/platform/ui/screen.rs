use std::io;

use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use quickdocs_core::AppViewModel;
use ratatui::backend::Backend;
use ratatui::Terminal;

use super::render;
use super::UiState;

/// Raw mode and the alternate screen for as long as the guard lives.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
    }
}

pub struct Screen<B: Backend> {
    terminal: Terminal<B>,
}

impl<B: Backend> Screen<B> {
    pub fn new(backend: B) -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
        })
    }

    pub fn draw(&mut self, view: &AppViewModel, ui: &UiState) -> io::Result<()> {
        self.terminal.draw(|f| render::draw(f, view, ui))?;
        Ok(())
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}
