//! Small rendering helpers shared by the surfaces.

use ratatui::layout::Rect;

/// Truncate `s` to at most `width` display characters, appending an
/// ellipsis when anything was cut. Character-based, not byte-based.
pub fn truncate_to_width(s: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    if s.chars().count() <= width {
        return s.to_owned();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// A `width` x `height` rectangle centered within `bounds`, clamped to fit.
pub fn centered_rect(bounds: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(bounds.width);
    let h = height.min(bounds.height);
    Rect {
        x: bounds.x + (bounds.width - w) / 2,
        y: bounds.y + (bounds.height - h) / 2,
        width: w,
        height: h,
    }
}

/// Whether a terminal cell position falls inside `rect`.
pub fn hit(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}
