//! notestack: a sticky-note stack for the terminal.
//!
//! Notes are captured in a small editor and pile up on a collapsible stack
//! panel docked at the right edge. The newest note can be popped into an
//! "active task" slot shown in the status line, and the stack is reordered
//! by dragging notes or by grabbing them with the keyboard.
//!
//! The three surfaces (editor, stack panel, status line) communicate only
//! through typed messages pumped by [`app::App`]; the note model itself
//! lives in [`stack`] and is owned exclusively by the panel.

pub mod app;
pub mod components;
pub mod constants;
pub mod drivers;
pub mod event_loop;
pub mod keybindings;
pub mod messages;
pub mod note;
pub mod stack;
pub mod theme;
pub mod timer;
pub mod tracing_sub;
pub mod ui;
