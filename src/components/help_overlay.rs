//! Modal help overlay. The text is embedded at build time so the binary
//! stays self-contained.

use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::theme;
use crate::ui::centered_rect;

use super::markdown::markdown_lines;

include!(concat!(env!("OUT_DIR"), "/generated_help.rs"));

#[derive(Debug, Default)]
pub struct HelpOverlay {
    visible: bool,
    scroll: u16,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
        self.scroll = 0;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

impl super::Component for HelpOverlay {
    fn render(&mut self, frame: &mut Frame, area: Rect, _focused: bool) {
        if !self.visible {
            return;
        }
        let popup = centered_rect(area, 56, 18);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::accent()))
            .title(" Help ");
        let inner = block.inner(popup);
        frame.render_widget(Clear, popup);
        frame.render_widget(block, popup);
        let lines = markdown_lines(HELP_TEXT);
        let max_scroll = (lines.len() as u16).saturating_sub(inner.height);
        self.scroll = self.scroll.min(max_scroll);
        frame.render_widget(
            Paragraph::new(lines).scroll((self.scroll, 0)),
            inner,
        );
    }

    fn handle_event(&mut self, event: &Event) -> bool {
        if !self.visible {
            return false;
        }
        let Event::Key(key) = event else {
            return false;
        };
        if key.kind == KeyEventKind::Release {
            return false;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                self.hide();
                true
            }
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                true
            }
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                true
            }
            // a visible modal swallows everything else
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Component;
    use crossterm::event::{KeyEvent, KeyModifiers};

    #[test]
    fn embedded_help_is_not_empty() {
        assert!(HELP_TEXT.contains("Ctrl"));
    }

    #[test]
    fn escape_closes_the_overlay() {
        let mut overlay = HelpOverlay::new();
        overlay.show();
        assert!(overlay.is_visible());
        let handled = overlay.handle_event(&Event::Key(KeyEvent::new(
            KeyCode::Esc,
            KeyModifiers::NONE,
        )));
        assert!(handled);
        assert!(!overlay.is_visible());
    }

    #[test]
    fn hidden_overlay_ignores_events() {
        let mut overlay = HelpOverlay::new();
        assert!(!overlay.handle_event(&Event::Key(KeyEvent::new(
            KeyCode::Esc,
            KeyModifiers::NONE,
        ))));
    }
}
