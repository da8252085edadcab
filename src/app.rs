//! Host controller: owns the surfaces, pumps the message channels between
//! them, computes layout, and applies the keybinding table.
//!
//! The editor and the stack panel never call each other. Every interaction
//! crosses this controller as a message, which is also where raw payloads
//! are validated before they can reach the model.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant, SystemTime};

use crossterm::event::{Event, KeyEventKind, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use tracing::{debug, info, warn};

use crate::components::{Component, HelpOverlay, NoteEditor, StackPanel, StatusBar};
use crate::constants::{
    EDITOR_FADE_STEPS, EDITOR_HEIGHT, EDITOR_WIDTH, SAVE_SETTLE_MS, STACK_PANEL_HEIGHT,
    STACK_PANEL_WIDTH, STACK_RAIL_WIDTH,
};
use crate::event_loop::ControlFlow;
use crate::keybindings::{Action, KeyBindings};
use crate::messages::{
    EditorCommand, EditorRequest, NotePayload, StackAnchor, StackCommand, StackNotification,
    send_lossy,
};
use crate::note::{NoteBody, OrderSnapshot};
use crate::stack::status_line;
use crate::theme;
use crate::timer::DelayedAction;
use crate::ui::centered_rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Editor,
    Stack,
}

pub struct App {
    panel: StackPanel,
    editor: NoteEditor,
    status: StatusBar,
    help: HelpOverlay,
    bindings: KeyBindings,
    focus: Focus,
    editor_visible: bool,
    /// Show/hide transition progress in ticks. Toggling mid-transition
    /// reverses direction from the current step instead of restarting.
    fade_step: u8,
    save_in_progress: bool,
    save_clear: DelayedAction,
    save_token: u64,
    editor_requests: Receiver<EditorRequest>,
    editor_commands: Sender<EditorCommand>,
    anchor_tx: Sender<StackAnchor>,
    stack_commands: Sender<StackCommand>,
    notifications: Receiver<StackNotification>,
    last_order: Vec<OrderSnapshot>,
    last_area: Rect,
}

impl App {
    pub fn new(collapse_idle: Duration) -> Self {
        let (editor_req_tx, editor_req_rx) = mpsc::channel();
        let (editor_cmd_tx, editor_cmd_rx) = mpsc::channel();
        let (anchor_tx, anchor_rx) = mpsc::channel();
        let (stack_cmd_tx, stack_cmd_rx) = mpsc::channel();
        let (notify_tx, notify_rx) = mpsc::channel();
        Self {
            panel: StackPanel::new(stack_cmd_rx, notify_tx, collapse_idle),
            editor: NoteEditor::new(editor_req_tx, editor_cmd_rx, anchor_rx),
            status: StatusBar::new(),
            help: HelpOverlay::new(),
            bindings: KeyBindings::default(),
            focus: Focus::Stack,
            editor_visible: false,
            fade_step: 0,
            save_in_progress: false,
            save_clear: DelayedAction::new(),
            save_token: 0,
            editor_requests: editor_req_rx,
            editor_commands: editor_cmd_tx,
            anchor_tx,
            stack_commands: stack_cmd_tx,
            notifications: notify_rx,
            last_order: Vec::new(),
            last_area: Rect::default(),
        }
    }

    pub fn panel(&self) -> &StackPanel {
        &self.panel
    }

    pub fn is_editor_visible(&self) -> bool {
        self.editor_visible
    }

    pub fn save_in_progress(&self) -> bool {
        self.save_in_progress
    }

    pub fn last_order(&self) -> &[OrderSnapshot] {
        &self.last_order
    }

    pub fn show_editor(&mut self) {
        if !self.editor_visible {
            debug!("showing note editor");
        }
        self.editor_visible = true;
        self.focus = Focus::Editor;
        // a fresh editor cycle invalidates any pending settle-clear
        self.save_clear.cancel();
        self.save_in_progress = false;
    }

    pub fn hide_editor(&mut self) {
        if self.editor_visible {
            debug!("hiding note editor");
        }
        self.editor_visible = false;
        self.focus = Focus::Stack;
    }

    pub fn toggle_editor(&mut self) {
        if self.editor_visible {
            self.hide_editor();
        } else {
            self.show_editor();
        }
    }

    fn handle_submit(&mut self, payload: NotePayload, now: Instant) {
        if self.save_in_progress {
            debug!("submit ignored while a save is settling");
            return;
        }
        match NoteBody::parse(&payload.kind, &payload.content) {
            Ok(body) => {
                self.save_in_progress = true;
                // expand first so the append lands on an open panel
                send_lossy(&self.stack_commands, StackCommand::Expand, "expand command");
                send_lossy(
                    &self.stack_commands,
                    StackCommand::Append {
                        body,
                        created_at: SystemTime::now(),
                    },
                    "append command",
                );
                send_lossy(&self.editor_commands, EditorCommand::Clear, "editor clear");
                self.hide_editor();
                self.save_token = self
                    .save_clear
                    .schedule(now, Duration::from_millis(SAVE_SETTLE_MS));
            }
            Err(err) => warn!(%err, "rejected note payload"),
        }
    }

    /// Advance one tick: pump every channel, fire timers, refresh the
    /// status line.
    pub fn on_tick(&mut self, now: Instant) {
        while let Ok(request) = self.editor_requests.try_recv() {
            match request {
                EditorRequest::SubmitNote(payload) => self.handle_submit(payload, now),
                EditorRequest::RequestStackPosition => {
                    let anchor = self.stack_anchor();
                    send_lossy(&self.anchor_tx, anchor, "stack anchor");
                }
                EditorRequest::RequestHide => self.hide_editor(),
                EditorRequest::RequestShow => self.show_editor(),
            }
        }
        while let Ok(StackNotification::OrderChanged(order)) = self.notifications.try_recv() {
            info!(notes = order.len(), "stack order changed");
            self.last_order = order;
        }

        self.panel.pump(now);
        self.panel.tick(now);
        self.editor.pump();

        if self.editor_visible && self.fade_step < EDITOR_FADE_STEPS {
            self.fade_step += 1;
        } else if !self.editor_visible && self.fade_step > 0 {
            self.fade_step -= 1;
        }
        if self.save_clear.fired(now, self.save_token) {
            self.save_in_progress = false;
        }

        let active = self.panel.stack().active_task();
        let style = if active.is_some() {
            Style::default().fg(theme::status_active_fg())
        } else {
            Style::default().fg(theme::status_idle_fg())
        };
        self.status.set_style(style);
        self.status.set_left(status_line(active));
        let help_key = self
            .bindings
            .combos_for(Action::OpenHelp)
            .into_iter()
            .next()
            .unwrap_or_default();
        self.status.set_right(format!(
            "{} notes | {} help",
            self.panel.stack().count(),
            help_key
        ));
    }

    /// Route one input event. Global bindings win; everything else goes to
    /// the focused surface.
    pub fn on_event(&mut self, event: &Event, now: Instant) -> ControlFlow {
        match event {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Release {
                    return ControlFlow::Continue;
                }
                if self.help.is_visible() {
                    if self.bindings.matches(Action::CloseOverlay, key) {
                        self.help.hide();
                    } else {
                        self.help.handle_event(event);
                    }
                    return ControlFlow::Continue;
                }
                if self.bindings.matches(Action::Quit, key) {
                    return ControlFlow::Quit;
                }
                if self.bindings.matches(Action::ToggleEditor, key) {
                    self.toggle_editor();
                    return ControlFlow::Continue;
                }
                if self.bindings.matches(Action::OpenHelp, key) {
                    self.help.show();
                    return ControlFlow::Continue;
                }
                if self.bindings.matches(Action::FocusNext, key) {
                    self.focus = match self.focus {
                        Focus::Editor => Focus::Stack,
                        Focus::Stack if self.editor_visible => Focus::Editor,
                        Focus::Stack => Focus::Stack,
                    };
                    return ControlFlow::Continue;
                }
                if self.bindings.matches(Action::PopOrClear, key) {
                    self.panel.pop_or_clear();
                    return ControlFlow::Continue;
                }
                if self.bindings.matches(Action::ToggleStackPanel, key) {
                    self.panel.toggle_expanded();
                    return ControlFlow::Continue;
                }
                let handled = match self.focus {
                    Focus::Editor if self.editor_visible => self.editor.handle_event(event),
                    _ => self.panel.handle_event(event),
                };
                if !handled {
                    debug!(?key, "unhandled key");
                }
                ControlFlow::Continue
            }
            Event::Mouse(mouse) => {
                self.on_mouse(mouse, now);
                ControlFlow::Continue
            }
            _ => ControlFlow::Continue,
        }
    }

    fn on_mouse(&mut self, mouse: &MouseEvent, now: Instant) {
        if self.panel.handle_mouse(mouse, now) && matches!(mouse.kind, MouseEventKind::Down(_)) {
            self.focus = Focus::Stack;
        }
    }

    fn panel_area(&self, body: Rect) -> Rect {
        let width = if self.panel.is_expanded() {
            STACK_PANEL_WIDTH
        } else {
            STACK_RAIL_WIDTH
        }
        .min(body.width);
        let height = STACK_PANEL_HEIGHT.min(body.height);
        Rect {
            x: body.x + body.width - width,
            y: body.y + (body.height - height) / 2,
            width,
            height,
        }
    }

    /// Where the editor's submit transition should aim: the stack panel's
    /// top-left corner in the last rendered layout.
    fn stack_anchor(&self) -> StackAnchor {
        let body = self.body_area(self.last_area);
        let panel = self.panel_area(body);
        StackAnchor {
            x: panel.x,
            y: panel.y,
        }
    }

    fn body_area(&self, area: Rect) -> Rect {
        Rect {
            height: area.height.saturating_sub(1),
            ..area
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.last_area = area;
        if area.width == 0 || area.height == 0 {
            return;
        }
        let body = self.body_area(area);
        let status_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
        let overlay_open = self.help.is_visible();

        let panel_area = self.panel_area(body);
        self.panel.render(
            frame,
            panel_area,
            self.focus == Focus::Stack && !overlay_open,
        );
        self.status.render(frame, status_area, false);

        if self.editor_visible || self.fade_step > 0 {
            let editor_area = centered_rect(body, EDITOR_WIDTH, EDITOR_HEIGHT);
            let focused = self.editor_visible
                && self.focus == Focus::Editor
                && self.fade_step == EDITOR_FADE_STEPS
                && !overlay_open;
            self.editor.render(frame, editor_area, focused);
        }
        self.help.render(frame, area, overlay_open);
    }
}
