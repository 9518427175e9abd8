//! Size and position clamping against per-panel rules.

use crate::geometry::{Point, Rect, Size};
use crate::panel::Constraints;

/// Clamps a desired size to the panel's min/max rules.
///
/// Width and height clamp independently. When the aspect ratio is locked, the
/// height is recomputed from the clamped width and then re-clamped. At a
/// min/max boundary this second clamp can leave the final ratio slightly off
/// target; callers that need the exact ratio must size within the interior of
/// the allowed range.
pub fn clamp_size(desired: Size, constraints: &Constraints) -> Size {
    let min = constraints.min_size;
    let max = constraints.max_size;

    let w = desired.w.clamp(min.w, max.w);
    let mut h = desired.h.clamp(min.h, max.h);

    if let Some(aspect) = constraints.aspect_ratio {
        if aspect.locked && aspect.ratio > 0. {
            h = (w / aspect.ratio).clamp(min.h, max.h);
        }
    }

    Size::new(w, h)
}

/// The area a panel must stay within: its own bounds override, else the
/// canvas starting at the origin.
pub fn applicable_bounds(constraints: &Constraints, view_size: Size) -> Rect {
    constraints
        .position_bounds
        .unwrap_or_else(|| Rect::new(Point::ZERO, view_size))
}

/// Clamps a desired position so a panel of `size` stays within `bounds`.
///
/// When the panel is larger than the bounds the allowed interval inverts
/// (`max < min`); it is de-inverted first so the panel pins to the bounds
/// origin instead of oscillating.
pub fn clamp_position(desired: Point, size: Size, bounds: Rect) -> Point {
    let min_x = bounds.loc.x;
    let min_y = bounds.loc.y;
    let max_x = f64::max(min_x, bounds.right() - size.w);
    let max_y = f64::max(min_y, bounds.bottom() - size.h);

    Point::new(desired.x.clamp(min_x, max_x), desired.y.clamp(min_y, max_y))
}
