//! Shared crate-wide constants.

/// Idle window (in milliseconds) after the last append before the stack
/// panel auto-collapses.
///
/// Every new append fully resets this window (debounce, not interval): only
/// the deadline installed by the most recent reset can ever fire. Collapse is
/// still refused at fire time while the pointer is inside the panel.
pub const COLLAPSE_IDLE_MS: u64 = 1000;

/// Grace period (in milliseconds) after the pointer leaves the stack panel
/// before a collapse may fire.
///
/// Prevents accidental collapse when the pointer briefly clips the panel
/// edge. Re-entering the panel before the deadline cancels the pending
/// collapse.
pub const HOVER_LEAVE_GRACE_MS: u64 = 200;

/// Delay (in milliseconds) after a submit before the editor's
/// save-in-progress flag is cleared.
///
/// Covers the hide transition plus a settle margin. The delayed clear
/// carries a generation token and is ignored if the editor has been shown or
/// hidden again in the meantime.
pub const SAVE_SETTLE_MS: u64 = 650;

/// Maximum number of characters shown in a note preview inside the stack
/// panel before truncation kicks in.
pub const PREVIEW_MAX_CHARS: usize = 100;

/// Maximum number of characters of a plain-text active task shown in the
/// status line.
pub const STATUS_PREVIEW_MAX_CHARS: usize = 120;

/// How many of the newest notes the expanded stack panel renders. Older
/// notes are summarized by a "+N more" marker.
pub const VISIBLE_NOTES: usize = 3;

/// Height clamp (in rows) for a formatted rich-text preview. Formatted
/// previews keep their markup and are clipped vertically instead of being
/// character-truncated.
pub const FORMATTED_PREVIEW_MAX_ROWS: u16 = 3;

/// Width (in columns) of the collapsed stack rail: just the icon and the
/// count badge.
pub const STACK_RAIL_WIDTH: u16 = 4;

/// Width (in columns) of the expanded stack panel.
pub const STACK_PANEL_WIDTH: u16 = 34;

/// Height (in rows) of the stack panel, collapsed or expanded.
pub const STACK_PANEL_HEIGHT: u16 = 16;

/// Note editor window size (columns x rows).
pub const EDITOR_WIDTH: u16 = 42;
pub const EDITOR_HEIGHT: u16 = 10;

/// Event loop poll interval. Ticks drive timers and transition pacing, so
/// this bounds how late a deadline can fire.
pub const POLL_INTERVAL_MS: u64 = 33;

/// Number of ticks an editor show/hide transition takes. Purely cosmetic
/// pacing; toggling mid-transition reverses direction instead of stacking a
/// second animation.
pub const EDITOR_FADE_STEPS: u8 = 6;
