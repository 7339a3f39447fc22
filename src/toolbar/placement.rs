//! Balloon rectangle placement relative to an anchor cell.

use ratatui::layout::Rect;

/// Compute where the balloon should float for an anchor at `(col, row)`
/// inside `bounds`.
///
/// The balloon prefers the row directly above the anchor and flips below
/// when there is no room. Horizontally it is centered on the anchor and
/// clamped so it never leaves `bounds`. Returns `None` when `bounds` is too
/// small to hold the balloon at all.
pub fn balloon_rect(bounds: Rect, col: u16, row: u16, width: u16, height: u16) -> Option<Rect> {
    if width == 0 || height == 0 || bounds.width < width || bounds.height < height {
        return None;
    }

    let above = row >= bounds.y.saturating_add(height);
    let y = if above {
        row - height
    } else {
        // Flip below the anchor row, clamped to the bottom edge.
        row.saturating_add(1)
            .min(bounds.y + bounds.height - height)
    };

    let half = width / 2;
    let min_x = bounds.x;
    let max_x = bounds.x + bounds.width - width;
    let x = col.saturating_sub(half).clamp(min_x, max_x);

    Some(Rect {
        x,
        y,
        width,
        height,
    })
}
