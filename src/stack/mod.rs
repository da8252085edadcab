//! The note stack core: the ordered model, the derived view state, preview
//! formatting and the drag-and-drop reorder engine.

pub mod model;
pub mod preview;
pub mod reorder;
pub mod view;

pub use model::{NoteStack, StackError};
pub use preview::{Preview, status_line, truncated_preview};
pub use reorder::{DropTarget, Indicator, ReorderEngine};
pub use view::{ButtonState, PresentationState, VisibleStack, button_label, visible_entries};
