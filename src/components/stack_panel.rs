//! The stack display surface: a collapsed rail that expands on hover or on
//! new notes, shows the newest notes with previews, and resolves pointer and
//! keyboard reorder gestures.
//!
//! The panel owns the note stack and is the only writer to it. The host
//! feeds it [`StackCommand`]s through a channel pumped each tick and learns
//! about reorders through [`StackNotification`]s; nothing else reaches in.

use std::sync::mpsc::{Receiver, Sender};
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use tracing::{debug, info, warn};

use crate::constants::{FORMATTED_PREVIEW_MAX_ROWS, HOVER_LEAVE_GRACE_MS};
use crate::messages::{StackCommand, StackNotification};
use crate::stack::model::NoteStack;
use crate::stack::preview::{Preview, truncated_preview};
use crate::stack::reorder::{DropTarget, Indicator, ReorderEngine};
use crate::stack::view::{PresentationState, button_label, visible_entries};
use crate::theme;
use crate::timer::IdleTimer;
use crate::ui::{hit, truncate_to_width};

use super::markdown::markdown_lines;

/// What a screen position maps to, rebuilt on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    /// Rail icon / panel title: click toggles expansion.
    Toggle,
    /// A rendered note, identified by its absolute stack index.
    Entry(usize),
    /// A drop indicator row, present only while a drag is active.
    Indicator(Indicator),
    /// The Pop / Clear button.
    Button,
}

pub struct StackPanel {
    stack: NoteStack,
    presentation: PresentationState,
    reorder: ReorderEngine,
    collapse_timer: IdleTimer,
    leave_timer: IdleTimer,
    collapse_idle: Duration,
    commands: Receiver<StackCommand>,
    /// Keyboard selection, as an absolute stack index.
    selected: usize,
    drag_hover: Option<DropTarget>,
    zones: Vec<(Rect, Zone)>,
    area: Rect,
}

impl StackPanel {
    pub fn new(
        commands: Receiver<StackCommand>,
        notify_tx: Sender<StackNotification>,
        collapse_idle: Duration,
    ) -> Self {
        Self {
            stack: NoteStack::new(),
            presentation: PresentationState::new(),
            reorder: ReorderEngine::new(notify_tx),
            collapse_timer: IdleTimer::new(),
            leave_timer: IdleTimer::new(),
            collapse_idle,
            commands,
            selected: 0,
            drag_hover: None,
            zones: Vec::new(),
            area: Rect::default(),
        }
    }

    pub fn stack(&self) -> &NoteStack {
        &self.stack
    }

    pub fn is_expanded(&self) -> bool {
        self.presentation.is_expanded()
    }

    pub fn dragging(&self) -> Option<usize> {
        self.reorder.dragging()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn toggle_expanded(&mut self) {
        if self.presentation.is_expanded() {
            self.presentation.force_collapse();
        } else {
            self.presentation.expand(true);
        }
    }

    /// Drain pending host commands. Every append re-arms the auto-collapse
    /// debounce, so a burst of submissions keeps the panel open until the
    /// burst ends.
    pub fn pump(&mut self, now: Instant) {
        while let Ok(command) = self.commands.try_recv() {
            match command {
                StackCommand::Append { body, created_at } => {
                    let id = self.stack.append_at(body, created_at);
                    debug!(%id, "append command applied");
                    self.presentation.expand(true);
                    self.collapse_timer.reset(now, self.collapse_idle);
                }
                StackCommand::Expand => self.presentation.expand(true),
                StackCommand::Collapse => {
                    self.presentation.force_collapse();
                    self.collapse_timer.cancel();
                    self.leave_timer.cancel();
                }
            }
        }
        self.clamp_selection();
    }

    /// Advance deadline-driven behavior. Collapse attempts are still refused
    /// while the pointer is inside the panel.
    pub fn tick(&mut self, now: Instant) {
        if self.collapse_timer.fired(now) {
            self.presentation.try_collapse();
        }
        if self.leave_timer.fired(now) {
            self.presentation.try_collapse();
        }
    }

    /// The single button action: pop the newest note into the active task
    /// slot, or clear the active task once the stack is empty.
    pub fn pop_or_clear(&mut self) {
        if self.stack.count() > 0 {
            match self.stack.pop_newest() {
                Ok(entry) => info!(id = %entry.id(), "popped note into active task"),
                Err(err) => warn!(%err, "pop failed"),
            }
        } else if self.stack.active_task().is_some() {
            self.stack.clear_active_task();
            info!("cleared active task");
        }
        self.clamp_selection();
    }

    /// Route a pointer event. Returns true when the event was consumed by
    /// the panel (inside its area or part of an active drag).
    pub fn handle_mouse(&mut self, event: &MouseEvent, now: Instant) -> bool {
        let inside = hit(self.area, event.column, event.row);
        match event.kind {
            MouseEventKind::Moved => {
                if inside && !self.presentation.hover_active() {
                    self.presentation.set_hover(true);
                    self.presentation.expand(false);
                    self.leave_timer.cancel();
                } else if !inside && self.presentation.hover_active() {
                    self.presentation.set_hover(false);
                    self.leave_timer
                        .reset(now, Duration::from_millis(HOVER_LEAVE_GRACE_MS));
                }
                inside
            }
            MouseEventKind::Down(MouseButton::Left) => match self.zone_at(event.column, event.row)
            {
                Some(Zone::Toggle) => {
                    self.toggle_expanded();
                    true
                }
                Some(Zone::Entry(index)) => {
                    self.selected = index;
                    self.reorder.begin_drag(&self.stack, index);
                    true
                }
                Some(Zone::Button) => {
                    if button_label(&self.stack).enabled {
                        self.pop_or_clear();
                    }
                    true
                }
                Some(Zone::Indicator(_)) | None => inside,
            },
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.reorder.dragging().is_some() {
                    self.drag_hover = match self.zone_at(event.column, event.row) {
                        Some(Zone::Entry(index)) => Some(DropTarget::Entry(index)),
                        Some(Zone::Indicator(indicator)) => {
                            Some(DropTarget::Indicator(indicator))
                        }
                        _ => None,
                    };
                    true
                } else {
                    inside
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.reorder.dragging().is_none() {
                    return inside;
                }
                match self.drag_hover.take() {
                    Some(target) => {
                        if let Err(err) = self.reorder.drop_on(&mut self.stack, target) {
                            warn!(%err, "drop rejected");
                        }
                    }
                    None => self.reorder.cancel_drag(),
                }
                self.clamp_selection();
                true
            }
            _ => false,
        }
    }

    fn zone_at(&self, column: u16, row: u16) -> Option<Zone> {
        self.zones
            .iter()
            .find(|(rect, _)| hit(*rect, column, row))
            .map(|(_, zone)| *zone)
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.stack.count().saturating_sub(1));
    }

    fn drop_grabbed(&mut self, target: DropTarget) -> bool {
        match self.reorder.drop_on(&mut self.stack, target) {
            Ok(changed) => changed,
            Err(err) => {
                warn!(%err, "keyboard reorder rejected");
                false
            }
        }
    }

    fn render_rail(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let border = if focused {
            theme::panel_focused_border()
        } else {
            theme::panel_border()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let badge = Style::default()
            .fg(theme::count_badge_fg())
            .bg(theme::count_badge_bg());
        let lines = vec![
            Line::from("≡"),
            Line::from(Span::styled(format!("{}", self.stack.count()), badge)),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
        self.zones.push((area, Zone::Toggle));
    }

    fn render_expanded(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let border = if focused {
            theme::panel_focused_border()
        } else {
            theme::panel_border()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(format!(" Stack ({}) ", self.stack.count()));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        // clicking the title row collapses the panel
        self.zones.push((
            Rect::new(area.x, area.y, area.width, 1),
            Zone::Toggle,
        ));

        if inner.height < 2 {
            return;
        }
        let button_row = inner.y + inner.height - 1;
        let mut y = inner.y;

        // own the row data up front so zone bookkeeping below can borrow
        // self mutably
        let (rows, hidden) = {
            let visible = visible_entries(&self.stack);
            let rows: Vec<(usize, Preview)> = visible
                .entries
                .iter()
                .map(|(abs, entry)| (*abs, truncated_preview(entry.body())))
                .collect();
            (rows, visible.hidden)
        };
        if hidden > 0 && y < button_row {
            let marker = Line::from(Span::styled(
                format!("+{} more", hidden),
                Style::default().fg(theme::hidden_marker_fg()),
            ));
            frame.render_widget(
                Paragraph::new(marker),
                Rect::new(inner.x, y, inner.width, 1),
            );
            y += 1;
        }

        let dragging = self.reorder.dragging();
        for (visual, (abs, preview)) in rows.iter().enumerate() {
            // Indicator above this row. The panel renders newest-first, so
            // the visually topmost slot is the end of the stack.
            if dragging.is_some() && y < button_row {
                let indicator = if visual == 0 {
                    Indicator::Bottom
                } else {
                    Indicator::After(*abs)
                };
                y = self.render_indicator(frame, inner, y, indicator);
            }
            if y >= button_row {
                break;
            }

            let lines: Vec<Line> = match preview {
                Preview::Plain(text) => text
                    .split('\n')
                    .take(2)
                    .map(|l| Line::from(truncate_to_width(l, inner.width as usize)))
                    .collect(),
                Preview::Formatted(md) => markdown_lines(md)
                    .into_iter()
                    .take(FORMATTED_PREVIEW_MAX_ROWS as usize)
                    .collect(),
                Preview::MediaBadge(badge) => vec![Line::from(*badge)],
            };
            let mut style = Style::default();
            if dragging == Some(*abs) {
                style = style.fg(theme::dragging_fg());
            } else if self.drag_hover == Some(DropTarget::Entry(*abs)) {
                style = style.fg(theme::drop_indicator_fg());
            }
            if focused && dragging.is_none() && self.selected == *abs {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let height = (lines.len() as u16).min(button_row - y);
            let rect = Rect::new(inner.x, y, inner.width, height);
            frame.render_widget(Paragraph::new(lines).style(style), rect);
            self.zones.push((rect, Zone::Entry(*abs)));
            y += height;
        }

        // Trailing indicator: below the oldest visible row. With hidden
        // entries it lands just above the hidden region instead of at the
        // very front of the stack.
        if dragging.is_some() && y < button_row {
            let indicator = if hidden == 0 {
                Indicator::Top
            } else {
                Indicator::After(hidden - 1)
            };
            self.render_indicator(frame, inner, y, indicator);
        }

        let button = button_label(&self.stack);
        let style = if !button.enabled {
            Style::default().fg(theme::button_disabled_fg())
        } else if button.label == "Clear" {
            Style::default()
                .fg(theme::button_fg())
                .bg(theme::clear_button_bg())
        } else {
            Style::default()
                .fg(theme::button_fg())
                .bg(theme::button_bg())
        };
        let rect = Rect::new(inner.x, button_row, inner.width, 1);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("[ {} ]", button.label),
                style,
            )))
            .alignment(Alignment::Center),
            rect,
        );
        self.zones.push((rect, Zone::Button));
    }

    fn render_indicator(
        &mut self,
        frame: &mut Frame,
        inner: Rect,
        y: u16,
        indicator: Indicator,
    ) -> u16 {
        let hovered = self.drag_hover == Some(DropTarget::Indicator(indicator));
        let mut style = Style::default().fg(theme::drop_indicator_fg());
        if hovered {
            style = style.add_modifier(Modifier::BOLD);
        }
        let glyph = if hovered { "━" } else { "╌" };
        let rect = Rect::new(inner.x, y, inner.width, 1);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                glyph.repeat(inner.width as usize),
                style,
            ))),
            rect,
        );
        self.zones.push((rect, Zone::Indicator(indicator)));
        y + 1
    }
}

impl super::Component for StackPanel {
    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        self.zones.clear();
        self.area = area;
        if area.width == 0 || area.height == 0 {
            return;
        }
        if self.presentation.is_expanded() {
            self.render_expanded(frame, area, focused);
        } else {
            self.render_rail(frame, area, focused);
        }
    }

    fn handle_event(&mut self, event: &Event) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        if key.kind == KeyEventKind::Release {
            return false;
        }
        if !self.presentation.is_expanded() {
            return false;
        }
        let count = self.stack.count();
        // The panel renders newest-first, so "up" means toward the end of
        // the stack.
        match (key.code, self.reorder.dragging()) {
            (KeyCode::Up, Some(source)) => {
                let dest = source + 1;
                if dest < count && self.drop_grabbed(DropTarget::Entry(dest)) {
                    self.reorder.begin_drag(&self.stack, dest);
                    self.selected = dest;
                }
                true
            }
            (KeyCode::Down, Some(source)) => {
                if source > 0 {
                    let dest = source - 1;
                    if self.drop_grabbed(DropTarget::Entry(dest)) {
                        self.reorder.begin_drag(&self.stack, dest);
                        self.selected = dest;
                    }
                }
                true
            }
            // Entry drops here, not indicators: an entry drop lands exactly
            // on the target index, so Home/End reach the true end slots.
            (KeyCode::Home, Some(_)) => {
                if self.drop_grabbed(DropTarget::Entry(count.saturating_sub(1))) {
                    self.selected = count.saturating_sub(1);
                }
                true
            }
            (KeyCode::End, Some(_)) => {
                if self.drop_grabbed(DropTarget::Entry(0)) {
                    self.selected = 0;
                }
                true
            }
            (KeyCode::Esc, Some(_)) => {
                self.reorder.cancel_drag();
                true
            }
            (KeyCode::Up, None) => {
                if count > 0 {
                    self.selected = (self.selected + 1).min(count - 1);
                }
                true
            }
            (KeyCode::Down, None) => {
                self.selected = self.selected.saturating_sub(1);
                true
            }
            (KeyCode::Char(' ') | KeyCode::Char('g'), None) => {
                self.reorder.begin_drag(&self.stack, self.selected);
                true
            }
            (KeyCode::Enter, None) => {
                if button_label(&self.stack).enabled {
                    self.pop_or_clear();
                }
                true
            }
            _ => false,
        }
    }
}
