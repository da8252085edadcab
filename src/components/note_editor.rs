//! The note entry surface: a small centered editor that submits on Enter
//! and talks to the host only through request/command channels.

use std::sync::mpsc::{Receiver, Sender};

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use tracing::debug;

use crate::messages::{
    EditorCommand, EditorRequest, NotePayload, StackAnchor, send_lossy,
};
use crate::theme;
use crate::ui::truncate_to_width;

/// Draft entry mode. Markdown drafts are submitted as rich text and render
/// with their formatting in the stack panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    Plain,
    Markdown,
}

impl EntryMode {
    fn kind(self) -> &'static str {
        match self {
            EntryMode::Plain => "text",
            EntryMode::Markdown => "rich-text",
        }
    }

    fn label(self) -> &'static str {
        match self {
            EntryMode::Plain => "plain",
            EntryMode::Markdown => "markdown",
        }
    }
}

pub struct NoteEditor {
    lines: Vec<String>,
    cursor_row: usize,
    mode: EntryMode,
    requests: Sender<EditorRequest>,
    commands: Receiver<EditorCommand>,
    anchor_rx: Receiver<StackAnchor>,
    /// Last reported stack position; the hide transition aims at it.
    anchor: Option<StackAnchor>,
}

impl NoteEditor {
    pub fn new(
        requests: Sender<EditorRequest>,
        commands: Receiver<EditorCommand>,
        anchor_rx: Receiver<StackAnchor>,
    ) -> Self {
        Self {
            lines: vec![String::new()],
            cursor_row: 0,
            mode: EntryMode::Plain,
            requests,
            commands,
            anchor_rx,
            anchor: None,
        }
    }

    pub fn mode(&self) -> EntryMode {
        self.mode
    }

    pub fn draft(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }

    pub fn anchor(&self) -> Option<StackAnchor> {
        self.anchor
    }

    /// Drain host commands and anchor replies.
    pub fn pump(&mut self) {
        while let Ok(command) = self.commands.try_recv() {
            match command {
                EditorCommand::Clear => {
                    self.lines = vec![String::new()];
                    self.cursor_row = 0;
                }
            }
        }
        while let Ok(anchor) = self.anchor_rx.try_recv() {
            self.anchor = Some(anchor);
        }
    }

    fn submit(&mut self) {
        if self.is_empty() {
            debug!("submit refused: empty draft");
            return;
        }
        // Ask for the stack position first so the transition target is fresh
        // by the time the submit lands.
        send_lossy(
            &self.requests,
            EditorRequest::RequestStackPosition,
            "stack position request",
        );
        let payload = NotePayload::new(self.mode.kind(), self.draft());
        send_lossy(
            &self.requests,
            EditorRequest::SubmitNote(payload),
            "note submission",
        );
    }

    fn insert_char(&mut self, c: char) {
        self.lines[self.cursor_row].push(c);
    }

    fn newline(&mut self) {
        self.cursor_row += 1;
        self.lines.insert(self.cursor_row, String::new());
    }

    fn backspace(&mut self) {
        if self.lines[self.cursor_row].pop().is_none() && self.cursor_row > 0 {
            self.lines.remove(self.cursor_row);
            self.cursor_row -= 1;
        }
    }
}

impl super::Component for NoteEditor {
    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let border = if focused {
            theme::editor_border()
        } else {
            theme::editor_dim_border()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" New note ")
            .title_bottom(Line::from(Span::styled(
                format!(" {} ", self.mode.label()),
                Style::default().fg(theme::editor_mode_fg()),
            )));
        let inner = block.inner(area);
        frame.render_widget(Clear, area);
        frame.render_widget(block, area);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let height = inner.height as usize;
        let skip = self.lines.len().saturating_sub(height);
        let text: Vec<Line> = self
            .lines
            .iter()
            .skip(skip)
            .map(|l| Line::from(truncate_to_width(l, inner.width as usize)))
            .collect();
        frame.render_widget(Paragraph::new(text), inner);
        if focused {
            let row = (self.cursor_row - skip).min(height.saturating_sub(1)) as u16;
            let col = (self.lines[self.cursor_row].chars().count() as u16)
                .min(inner.width.saturating_sub(1));
            frame.set_cursor_position((inner.x + col, inner.y + row));
        }
    }

    fn handle_event(&mut self, event: &Event) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        if key.kind == KeyEventKind::Release {
            return false;
        }
        match key.code {
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
                self.newline();
                true
            }
            KeyCode::Enter => {
                self.submit();
                true
            }
            KeyCode::Esc => {
                send_lossy(&self.requests, EditorRequest::RequestHide, "hide request");
                true
            }
            KeyCode::Backspace => {
                self.backspace();
                true
            }
            KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.mode = match self.mode {
                    EntryMode::Plain => EntryMode::Markdown,
                    EntryMode::Markdown => EntryMode::Plain,
                };
                true
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c);
                true
            }
            _ => false,
        }
    }
}
