//! Grid and magnetic snapping of candidate positions.

use crate::geometry::{Point, Rect};

/// Snapping configuration for interactive moves.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SnapOptions {
    /// Grid cell size; `None` disables grid snapping.
    pub grid: Option<f64>,
    /// Magnetic snap distance against other panels; `None` disables it.
    pub magnetic: Option<f64>,
}

/// Rounds each coordinate to the nearest multiple of `grid`.
pub fn snap_to_grid(pos: Point, grid: f64) -> Point {
    Point::new((pos.x / grid).round() * grid, (pos.y / grid).round() * grid)
}

/// The alignment stops of a rect along one axis: leading edge, center,
/// trailing edge.
fn stops(start: f64, extent: f64) -> [f64; 3] {
    [start, start + extent / 2., start + extent]
}

/// Snaps one axis of the candidate against other rects' stops.
///
/// `others` is scanned in order; the first rect with any stop pair within
/// `threshold` wins the axis (within that rect, the closest pair is used).
/// Ties between rects therefore resolve by iteration order.
fn snap_axis(start: f64, extent: f64, others: impl Iterator<Item = (f64, f64)>, threshold: f64) -> f64 {
    let candidate = stops(start, extent);
    for (other_start, other_extent) in others {
        let other = stops(other_start, other_extent);

        let mut best: Option<f64> = None;
        for cand_stop in candidate {
            for other_stop in other {
                let delta = other_stop - cand_stop;
                if delta.abs() <= threshold && best.map_or(true, |b| delta.abs() < b.abs()) {
                    best = Some(delta);
                }
            }
        }

        if let Some(delta) = best {
            return start + delta;
        }
    }
    start
}

/// Applies grid and magnetic snapping to a candidate rect's position.
///
/// Grid snapping runs first, then magnetic snapping adjusts each axis
/// independently against the other panels' edges and centers.
pub fn snap_position(candidate: Rect, others: &[Rect], options: SnapOptions) -> Point {
    let mut pos = candidate.loc;

    if let Some(grid) = options.grid {
        if grid > 0. {
            pos = snap_to_grid(pos, grid);
        }
    }

    if let Some(threshold) = options.magnetic {
        if threshold > 0. {
            pos.x = snap_axis(
                pos.x,
                candidate.size.w,
                others.iter().map(|r| (r.loc.x, r.size.w)),
                threshold,
            );
            pos.y = snap_axis(
                pos.y,
                candidate.size.h,
                others.iter().map(|r| (r.loc.y, r.size.h)),
                threshold,
            );
        }
    }

    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rect {
        Rect::new(Point::new(x, y), Size::new(w, h))
    }

    #[test]
    fn grid_rounds_to_nearest_multiple() {
        assert_eq!(snap_to_grid(Point::new(24., 26.), 10.), Point::new(20., 30.));
        assert_eq!(snap_to_grid(Point::new(-7., 5.), 10.), Point::new(-10., 10.));
    }

    #[test]
    fn magnetic_aligns_edge_within_threshold() {
        // Candidate's left edge at 305, other's right edge at 300.
        let candidate = rect(305., 500., 200., 100.);
        let others = [rect(0., 0., 300., 200.)];
        let opts = SnapOptions {
            grid: None,
            magnetic: Some(8.),
        };

        let snapped = snap_position(candidate, &others, opts);
        assert_eq!(snapped.x, 300.);
        // Y stops of the other rect (0, 100, 200) are all far away.
        assert_eq!(snapped.y, 500.);
    }

    #[test]
    fn magnetic_aligns_centers() {
        // Candidate center y at 148, other center y at 150.
        let candidate = rect(600., 98., 200., 100.);
        let others = [rect(0., 50., 300., 200.)];
        let opts = SnapOptions {
            grid: None,
            magnetic: Some(5.),
        };

        let snapped = snap_position(candidate, &others, opts);
        assert_eq!(snapped.y, 100.);
    }

    #[test]
    fn beyond_threshold_does_not_snap() {
        let candidate = rect(320., 500., 200., 100.);
        let others = [rect(0., 0., 300., 200.)];
        let opts = SnapOptions {
            grid: None,
            magnetic: Some(8.),
        };

        assert_eq!(snap_position(candidate, &others, opts), candidate.loc);
    }

    #[test]
    fn first_rect_in_order_wins_ties() {
        // Both rects offer a right edge 4 away from the candidate's left
        // edge, in opposite directions.
        let candidate = rect(304., 500., 200., 100.);
        let a = rect(0., 0., 300., 100.);
        let b = rect(8., 900., 300., 100.);

        let opts = SnapOptions {
            grid: None,
            magnetic: Some(8.),
        };
        assert_eq!(snap_position(candidate, &[a, b], opts).x, 300.);
        assert_eq!(snap_position(candidate, &[b, a], opts).x, 308.);
    }

    #[test]
    fn grid_applies_before_magnetic() {
        let candidate = rect(296., 503., 200., 100.);
        let others = [rect(0., 0., 300., 200.)];
        let opts = SnapOptions {
            grid: Some(50.),
            magnetic: Some(8.),
        };

        // Grid pulls x to 300 (already aligned), y to 500.
        let snapped = snap_position(candidate, &others, opts);
        assert_eq!(snapped, Point::new(300., 500.));
    }
}
