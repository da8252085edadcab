//! Drag-and-drop reorder resolution.
//!
//! Two kinds of drop target exist and they deliberately resolve
//! differently: dropping onto another entry inserts at that entry's original
//! absolute index with no further correction, while dropping onto a
//! positional indicator first computes an insert slot and then compensates
//! for the removal shift when the source sat before it. The asymmetry is
//! intentional; see DESIGN.md.

use std::sync::mpsc::Sender;

use tracing::{debug, warn};

use crate::messages::{StackNotification, send_lossy};
use crate::stack::model::{NoteStack, StackError};

/// A positional indicator rendered above, between, or below entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// Before the first entry.
    Top,
    /// After the last entry.
    Bottom,
    /// Immediately after the entry at absolute index `i`.
    After(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// Drop directly onto the entry at this absolute index.
    Entry(usize),
    Indicator(Indicator),
}

/// Resolves drag gestures into stack mutations and emits the new order to
/// the host after every successful move.
#[derive(Debug)]
pub struct ReorderEngine {
    drag_source: Option<usize>,
    notify_tx: Sender<StackNotification>,
}

impl ReorderEngine {
    pub fn new(notify_tx: Sender<StackNotification>) -> Self {
        Self {
            drag_source: None,
            notify_tx,
        }
    }

    /// Capture the dragged entry's absolute index. Refused (returns false)
    /// when there is nothing to reorder or the index is stale.
    pub fn begin_drag(&mut self, stack: &NoteStack, index: usize) -> bool {
        if stack.count() <= 1 {
            debug!(count = stack.count(), "drag refused: nothing to reorder");
            return false;
        }
        if index >= stack.count() {
            warn!(index, count = stack.count(), "drag refused: stale index");
            return false;
        }
        self.drag_source = Some(index);
        true
    }

    pub fn dragging(&self) -> Option<usize> {
        self.drag_source
    }

    pub fn cancel_drag(&mut self) {
        self.drag_source = None;
    }

    /// Resolve the drop and mutate the stack. Returns `Ok(true)` when the
    /// order changed, `Ok(false)` for no-ops (no active drag, same-position
    /// drop). The drag state is consumed either way.
    pub fn drop_on(
        &mut self,
        stack: &mut NoteStack,
        target: DropTarget,
    ) -> Result<bool, StackError> {
        let Some(source) = self.drag_source.take() else {
            return Ok(false);
        };
        let count = stack.count();
        let insert = match target {
            // Entry drop: land exactly on the target's original absolute
            // index. No shift correction, even when moving downward.
            DropTarget::Entry(index) => {
                if index == source {
                    return Ok(false);
                }
                index
            }
            DropTarget::Indicator(indicator) => {
                let position = match indicator {
                    Indicator::Top => 0,
                    Indicator::Bottom => count.saturating_sub(1),
                    Indicator::After(i) => i + 1,
                };
                let position = position.min(count.saturating_sub(1));
                if position == source {
                    return Ok(false);
                }
                // Removal shifts everything after the source left by one.
                if source < position { position - 1 } else { position }
            }
        };
        stack.move_entry(source, insert)?;
        debug!(source, insert, "reordered note");
        send_lossy(
            &self.notify_tx,
            StackNotification::OrderChanged(stack.order_snapshot()),
            "order changed",
        );
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::NoteBody;
    use std::sync::mpsc::{self, Receiver};

    fn stack_abcd() -> NoteStack {
        let mut stack = NoteStack::new();
        for s in ["A", "B", "C", "D"] {
            stack.append(NoteBody::Text(s.into()));
        }
        stack
    }

    fn engine() -> (ReorderEngine, Receiver<StackNotification>) {
        let (tx, rx) = mpsc::channel();
        (ReorderEngine::new(tx), rx)
    }

    fn contents(stack: &NoteStack) -> Vec<&str> {
        stack.entries().iter().map(|e| e.body().raw()).collect()
    }

    #[test]
    fn entry_drop_inserts_at_target_index() {
        let mut stack = stack_abcd();
        let (mut eng, _rx) = engine();
        assert!(eng.begin_drag(&stack, 0));
        // dropping A onto C (absolute index 2)
        assert_eq!(eng.drop_on(&mut stack, DropTarget::Entry(2)), Ok(true));
        assert_eq!(contents(&stack), ["B", "C", "A", "D"]);
    }

    #[test]
    fn entry_drop_upward() {
        let mut stack = stack_abcd();
        let (mut eng, _rx) = engine();
        assert!(eng.begin_drag(&stack, 3));
        assert_eq!(eng.drop_on(&mut stack, DropTarget::Entry(1)), Ok(true));
        assert_eq!(contents(&stack), ["A", "D", "B", "C"]);
    }

    #[test]
    fn entry_drop_on_self_is_noop() {
        let mut stack = stack_abcd();
        let (mut eng, rx) = engine();
        assert!(eng.begin_drag(&stack, 2));
        assert_eq!(eng.drop_on(&mut stack, DropTarget::Entry(2)), Ok(false));
        assert_eq!(contents(&stack), ["A", "B", "C", "D"]);
        // no-ops do not emit an order notification
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn indicator_after_applies_shift_correction() {
        let mut stack = stack_abcd();
        let (mut eng, _rx) = engine();
        assert!(eng.begin_drag(&stack, 0));
        // after-index(2) targets position 3; source 0 < 3, corrected to 2
        assert_eq!(
            eng.drop_on(&mut stack, DropTarget::Indicator(Indicator::After(2))),
            Ok(true)
        );
        assert_eq!(contents(&stack), ["B", "C", "A", "D"]);
    }

    #[test]
    fn indicator_top_and_bottom() {
        let mut stack = stack_abcd();
        let (mut eng, _rx) = engine();
        assert!(eng.begin_drag(&stack, 2));
        assert_eq!(
            eng.drop_on(&mut stack, DropTarget::Indicator(Indicator::Top)),
            Ok(true)
        );
        assert_eq!(contents(&stack), ["C", "A", "B", "D"]);

        assert!(eng.begin_drag(&stack, 0));
        assert_eq!(
            eng.drop_on(&mut stack, DropTarget::Indicator(Indicator::Bottom)),
            Ok(true)
        );
        // bottom targets position count-1 = 3; source 0 < 3, corrected to 2
        assert_eq!(contents(&stack), ["A", "B", "C", "D"]);
    }

    #[test]
    fn indicator_resolving_to_source_is_noop() {
        let mut stack = stack_abcd();
        let (mut eng, rx) = engine();
        assert!(eng.begin_drag(&stack, 1));
        // after-index(0) targets position 1 == source
        assert_eq!(
            eng.drop_on(&mut stack, DropTarget::Indicator(Indicator::After(0))),
            Ok(false)
        );
        assert_eq!(contents(&stack), ["A", "B", "C", "D"]);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn indicator_past_end_clamps_to_last_slot() {
        let mut stack = stack_abcd();
        let (mut eng, _rx) = engine();
        assert!(eng.begin_drag(&stack, 1));
        assert_eq!(
            eng.drop_on(&mut stack, DropTarget::Indicator(Indicator::After(7))),
            Ok(true)
        );
        // clamped to position 3; source 1 < 3, corrected to 2
        assert_eq!(contents(&stack), ["A", "C", "B", "D"]);
    }

    #[test]
    fn drag_disabled_with_one_entry() {
        let mut stack = NoteStack::new();
        stack.append(NoteBody::Text("only".into()));
        let (mut eng, _rx) = engine();
        assert!(!eng.begin_drag(&stack, 0));
        assert!(eng.dragging().is_none());
        assert_eq!(contents(&stack), ["only"]);
    }

    #[test]
    fn drop_without_drag_is_noop() {
        let mut stack = stack_abcd();
        let (mut eng, _rx) = engine();
        assert_eq!(eng.drop_on(&mut stack, DropTarget::Entry(1)), Ok(false));
        assert_eq!(contents(&stack), ["A", "B", "C", "D"]);
    }

    #[test]
    fn successful_reorder_emits_full_order() {
        let mut stack = stack_abcd();
        let (mut eng, rx) = engine();
        assert!(eng.begin_drag(&stack, 0));
        eng.drop_on(&mut stack, DropTarget::Entry(2)).unwrap();
        let StackNotification::OrderChanged(order) = rx.try_recv().unwrap();
        let names: Vec<&str> = order.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(names, ["B", "C", "A", "D"]);
    }

    #[test]
    fn drag_state_is_consumed_by_drop() {
        let mut stack = stack_abcd();
        let (mut eng, _rx) = engine();
        assert!(eng.begin_drag(&stack, 0));
        eng.drop_on(&mut stack, DropTarget::Entry(1)).unwrap();
        assert!(eng.dragging().is_none());
    }
}
