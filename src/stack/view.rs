//! Pure derivation of what the stack display surface should render, given
//! the model and transient UI flags. Nothing here mutates the stack, and the
//! rendered output is never read back as state.

use tracing::debug;

use crate::constants::VISIBLE_NOTES;
use crate::note::NoteEntry;
use crate::stack::model::NoteStack;

/// The slice of the stack the panel renders: the newest notes first, plus
/// how many older notes are hidden behind the "+N more" marker.
#[derive(Debug)]
pub struct VisibleStack<'a> {
    /// Newest first; at most [`VISIBLE_NOTES`] long. Each entry carries its
    /// absolute index in the stack so reorder gestures resolve against the
    /// full order.
    pub entries: Vec<(usize, &'a NoteEntry)>,
    /// Count of older entries not rendered.
    pub hidden: usize,
}

pub fn visible_entries(stack: &NoteStack) -> VisibleStack<'_> {
    let all = stack.entries();
    let shown = all.len().min(VISIBLE_NOTES);
    let entries = all
        .iter()
        .enumerate()
        .rev()
        .take(shown)
        .map(|(i, e)| (i, e))
        .collect();
    VisibleStack {
        entries,
        hidden: all.len() - shown,
    }
}

/// Label and enablement of the panel's single action button. Total over all
/// four combinations of stack-empty and active-task-present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    pub label: &'static str,
    pub enabled: bool,
}

pub fn button_label(stack: &NoteStack) -> ButtonState {
    match (stack.count() == 0, stack.active_task().is_some()) {
        (true, false) => ButtonState {
            label: "Pop",
            enabled: false,
        },
        (true, true) => ButtonState {
            label: "Clear",
            enabled: true,
        },
        (false, _) => ButtonState {
            label: "Pop",
            enabled: true,
        },
    }
}

/// Expand/collapse state of the panel. The single source of truth: the view
/// layer renders from it and never reads state back out of what was drawn.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresentationState {
    expanded: bool,
    hover_active: bool,
}

impl PresentationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn hover_active(&self) -> bool {
        self.hover_active
    }

    pub fn set_hover(&mut self, inside: bool) {
        self.hover_active = inside;
    }

    /// Expand when forced or currently collapsed.
    pub fn expand(&mut self, force: bool) {
        if force || !self.expanded {
            if !self.expanded {
                debug!("expanding stack panel");
            }
            self.expanded = true;
        }
    }

    /// Collapse attempt from a timer or pointer-leave: refused while the
    /// pointer is inside the panel. Returns whether the state changed.
    pub fn try_collapse(&mut self) -> bool {
        if self.expanded && !self.hover_active {
            debug!("collapsing stack panel");
            self.expanded = false;
            true
        } else {
            false
        }
    }

    /// Explicit collapse command from the host: unconditional.
    pub fn force_collapse(&mut self) {
        self.expanded = false;
    }
}
