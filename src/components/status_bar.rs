use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ui::truncate_to_width;

/// One-line status surface: the active task on the left, transient hints on
/// the right.
pub struct StatusBar {
    left: String,
    right: String,
    style: Style,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            left: String::new(),
            right: String::new(),
            style: Style::default(),
        }
    }

    pub fn set_left<T: Into<String>>(&mut self, value: T) {
        self.left = value.into();
    }

    pub fn set_right<T: Into<String>>(&mut self, value: T) {
        self.right = value.into();
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    pub fn left(&self) -> &str {
        &self.left
    }

    pub fn right(&self) -> &str {
        &self.right
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl super::Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect, _focused: bool) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let width = area.width as usize;
        let left = truncate_to_width(&self.left, width);
        let right = if self.right.is_empty() {
            String::new()
        } else {
            truncate_to_width(&self.right, width.saturating_sub(left.chars().count() + 1))
        };
        let pad = width
            .saturating_sub(left.chars().count())
            .saturating_sub(right.chars().count());
        let line = Line::from(vec![
            Span::raw(left),
            Span::raw(" ".repeat(pad)),
            Span::raw(right),
        ]);
        frame.render_widget(Paragraph::new(line).style(self.style), area);
    }
}
