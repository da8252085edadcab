//! Authoritative ordered store of pending notes plus the single active task
//! slot.
//!
//! The stack is owned exclusively by the stack display surface; every other
//! collaborator reaches it through the message boundary in
//! [`crate::messages`], never by direct reference.

use std::time::SystemTime;

use thiserror::Error;
use tracing::debug;

use crate::note::{NoteBody, NoteEntry, NoteId, OrderSnapshot};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StackError {
    /// `pop_newest` was called with no pending entries. Recoverable: callers
    /// fall back to clearing the active task.
    #[error("cannot pop from an empty stack")]
    EmptyStack,
    /// A reorder primitive was handed an index outside `[0, count())`. This
    /// is a caller contract violation (stale index), not a user error.
    #[error("index {index} out of range for stack of {len}")]
    InvalidIndex { index: usize, len: usize },
}

/// Ordered collection of pending notes. Arrival order is preserved until an
/// explicit reorder; the newest entry is always last.
#[derive(Debug, Default)]
pub struct NoteStack {
    entries: Vec<NoteEntry>,
    active: Option<NoteEntry>,
    next_id: u64,
}

impl NoteStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a note with the current time as its creation timestamp.
    pub fn append(&mut self, body: NoteBody) -> NoteId {
        self.append_at(body, SystemTime::now())
    }

    /// Append a note carrying an externally supplied creation timestamp
    /// (used by the message path so the submit time survives the hop).
    /// Ids are assigned here and never reused, so entries stay unique.
    pub fn append_at(&mut self, body: NoteBody, created_at: SystemTime) -> NoteId {
        let id = NoteId(self.next_id);
        self.next_id += 1;
        self.entries.push(NoteEntry::new(id, body, created_at));
        debug!(%id, count = self.entries.len(), "appended note");
        id
    }

    /// Remove the newest entry and promote it to the active task slot,
    /// silently replacing whatever the slot held.
    pub fn pop_newest(&mut self) -> Result<&NoteEntry, StackError> {
        let entry = self.entries.pop().ok_or(StackError::EmptyStack)?;
        debug!(id = %entry.id(), remaining = self.entries.len(), "popped note");
        Ok(self.active.insert(entry))
    }

    /// Replace the active task. There is no undo or history of cleared
    /// tasks; the previous occupant is discarded.
    pub fn set_active_task(&mut self, entry: NoteEntry) {
        self.active = Some(entry);
    }

    /// Clear the active task slot. No-op when already empty.
    pub fn clear_active_task(&mut self) {
        if self.active.take().is_some() {
            debug!("cleared active task");
        }
    }

    pub fn active_task(&self) -> Option<&NoteEntry> {
        self.active.as_ref()
    }

    /// Reorder primitive: remove the entry at `from` and reinsert it at
    /// `to`, both absolute indices into the current order. `from == to` is a
    /// no-op. Position resolution (including indicator shift correction)
    /// happens in the reorder engine before this is called; out-of-range
    /// indices here fail fast instead of clamping.
    pub fn move_entry(&mut self, from: usize, to: usize) -> Result<(), StackError> {
        let len = self.entries.len();
        if from >= len {
            return Err(StackError::InvalidIndex { index: from, len });
        }
        if to >= len {
            return Err(StackError::InvalidIndex { index: to, len });
        }
        if from == to {
            return Ok(());
        }
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        debug!(from, to, "moved note");
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[NoteEntry] {
        &self.entries
    }

    /// Full-order projection for the order-changed notification.
    pub fn order_snapshot(&self) -> Vec<OrderSnapshot> {
        self.entries.iter().map(NoteEntry::snapshot).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> NoteBody {
        NoteBody::Text(s.into())
    }

    fn contents(stack: &NoteStack) -> Vec<&str> {
        stack.entries().iter().map(|e| e.body().raw()).collect()
    }

    #[test]
    fn append_preserves_arrival_order() {
        let mut stack = NoteStack::new();
        for s in ["a", "b", "c", "d"] {
            stack.append(text(s));
        }
        assert_eq!(contents(&stack), ["a", "b", "c", "d"]);
        assert_eq!(stack.count(), 4);
    }

    #[test]
    fn ids_are_unique_and_never_reused() {
        let mut stack = NoteStack::new();
        let a = stack.append(text("a"));
        let b = stack.append(text("b"));
        assert_ne!(a, b);
        stack.pop_newest().unwrap();
        let c = stack.append(text("c"));
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn pop_promotes_newest_to_active_task() {
        let mut stack = NoteStack::new();
        stack.append(text("older"));
        let id = stack.append(text("newest"));
        let popped = stack.pop_newest().unwrap();
        assert_eq!(popped.id(), id);
        assert_eq!(stack.count(), 1);
        // popped entry is gone from the pending order
        assert_eq!(contents(&stack), ["older"]);
        assert_eq!(stack.active_task().map(|e| e.id()), Some(id));
    }

    #[test]
    fn pop_on_empty_stack_fails() {
        let mut stack = NoteStack::new();
        assert_eq!(stack.pop_newest().err(), Some(StackError::EmptyStack));
    }

    #[test]
    fn pop_replaces_previous_active_task() {
        let mut stack = NoteStack::new();
        stack.append(text("first"));
        stack.append(text("second"));
        stack.pop_newest().unwrap();
        stack.pop_newest().unwrap();
        assert_eq!(stack.active_task().map(|e| e.body().raw()), Some("first"));
        assert_eq!(stack.count(), 0);
    }

    #[test]
    fn clear_active_task_is_idempotent() {
        let mut stack = NoteStack::new();
        stack.append(text("a"));
        stack.pop_newest().unwrap();
        stack.clear_active_task();
        assert!(stack.active_task().is_none());
        // second clear is a no-op
        stack.clear_active_task();
        assert!(stack.active_task().is_none());
    }

    #[test]
    fn move_entry_same_index_is_noop() {
        let mut stack = NoteStack::new();
        for s in ["a", "b", "c"] {
            stack.append(text(s));
        }
        stack.move_entry(1, 1).unwrap();
        assert_eq!(contents(&stack), ["a", "b", "c"]);
    }

    #[test]
    fn move_entry_rejects_out_of_range() {
        let mut stack = NoteStack::new();
        stack.append(text("a"));
        assert!(matches!(
            stack.move_entry(3, 0),
            Err(StackError::InvalidIndex { index: 3, len: 1 })
        ));
        assert!(matches!(
            stack.move_entry(0, 1),
            Err(StackError::InvalidIndex { index: 1, len: 1 })
        ));
    }

    #[test]
    fn move_entry_reinserts_at_target() {
        let mut stack = NoteStack::new();
        for s in ["a", "b", "c", "d"] {
            stack.append(text(s));
        }
        stack.move_entry(0, 2).unwrap();
        assert_eq!(contents(&stack), ["b", "c", "a", "d"]);
        stack.move_entry(3, 0).unwrap();
        assert_eq!(contents(&stack), ["d", "b", "c", "a"]);
    }

    #[test]
    fn snapshot_excludes_ids() {
        let mut stack = NoteStack::new();
        stack.append(text("a"));
        let snap = stack.order_snapshot();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].content, "a");
    }
}
