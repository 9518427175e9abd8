//! Axis-aligned overlap tests between panel rectangles.

use crate::geometry::Rect;
use crate::panel::{Panel, PanelId};

/// Open-interval AABB overlap test with a configurable gap.
///
/// `b` is expanded by `gap` on every side before the test. The intervals are
/// open, so rects that exactly touch edges do not collide at `gap == 0`.
pub fn rects_collide(a: Rect, b: Rect, gap: f64) -> bool {
    let b = b.expanded(gap);
    a.left() < b.right() && b.left() < a.right() && a.top() < b.bottom() && b.top() < a.bottom()
}

/// Returns every visible panel whose rect collides with `candidate`.
///
/// `exclude` skips the panel being moved or resized so it never collides with
/// itself. Hidden panels don't take part in collision.
pub fn detect_collisions<'a>(
    candidate: Rect,
    panels: impl Iterator<Item = &'a Panel>,
    exclude: Option<PanelId>,
    gap: f64,
) -> Vec<&'a Panel> {
    panels
        .filter(|p| Some(p.id) != exclude)
        .filter(|p| p.visible)
        .filter(|p| rects_collide(candidate, p.rect(), gap))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Size};
    use crate::panel::{ComponentKind, Constraints, PanelMetadata};

    fn panel(id: u64, pos: Point, size: Size) -> Panel {
        Panel {
            id: PanelId(id),
            kind: ComponentKind::Notes,
            position: pos,
            size,
            z_index: 0,
            visible: true,
            locked: false,
            constraints: Constraints::default(),
            metadata: PanelMetadata {
                title: "Notes".into(),
                ..Default::default()
            },
            created_at: id,
        }
    }

    #[test]
    fn overlapping_rects_collide() {
        let a = Rect::new(Point::ZERO, Size::new(300., 200.));
        let b = Rect::new(Point::new(299., 199.), Size::new(300., 200.));
        assert!(rects_collide(a, b, 0.));
    }

    #[test]
    fn touching_rects_do_not_collide_without_gap() {
        let a = Rect::new(Point::ZERO, Size::new(300., 200.));
        let right = Rect::new(Point::new(300., 0.), Size::new(300., 200.));
        let below = Rect::new(Point::new(0., 200.), Size::new(300., 200.));
        assert!(!rects_collide(a, right, 0.));
        assert!(!rects_collide(a, below, 0.));
    }

    #[test]
    fn gap_turns_near_misses_into_collisions() {
        let a = Rect::new(Point::ZERO, Size::new(300., 200.));
        let b = Rect::new(Point::new(305., 0.), Size::new(300., 200.));
        assert!(!rects_collide(a, b, 0.));
        assert!(rects_collide(a, b, 10.));
    }

    #[test]
    fn excluded_and_hidden_panels_are_skipped() {
        let mut hidden = panel(2, Point::new(10., 10.), Size::new(300., 200.));
        hidden.visible = false;
        let panels = [
            panel(1, Point::ZERO, Size::new(300., 200.)),
            hidden,
            panel(3, Point::new(20., 20.), Size::new(300., 200.)),
        ];

        let candidate = Rect::new(Point::ZERO, Size::new(300., 200.));
        let hits = detect_collisions(candidate, panels.iter(), Some(PanelId(1)), 0.);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, PanelId(3));
    }
}
