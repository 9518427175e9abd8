//! Interactive move and resize gestures.
//!
//! A gesture captures an immutable snapshot of the panel at `begin`, then
//! recomputes a candidate from that snapshot on every pointer delta. Nothing
//! is written to the registry until `commit`, which writes the final
//! candidate exactly once; `cancel` simply drops the gesture, leaving the
//! registry at the start state. Only those two states are ever observable.
//!
//! For moves, each delta step chains boundary clamp → collision block →
//! magnetic snap. For resizes: resize delta → constraint clamp (with anchor
//! correction for top/left handles) → boundary clamp → collision block. A
//! colliding candidate is rejected outright — the panel holds its last valid
//! candidate rather than sliding or bouncing.

use crate::collision::detect_collisions;
use crate::constraints::{applicable_bounds, clamp_position, clamp_size};
use crate::geometry::{Point, Rect, Size};
use crate::panel::{Panel, PanelId};
use crate::registry::{PanelRegistry, PanelUpdate};
use crate::resize::{apply_resize_delta, ResizeEdge};

/// An in-flight panel drag.
#[derive(Debug)]
pub struct MoveGesture {
    id: PanelId,
    start: Panel,
    candidate: Point,
}

impl MoveGesture {
    /// Captures the start snapshot. Fails on unknown or locked panels.
    pub fn begin(registry: &PanelRegistry, id: PanelId) -> Option<Self> {
        let panel = registry.panel(id)?;
        if panel.locked {
            return None;
        }
        Some(Self {
            id,
            start: panel.clone(),
            candidate: panel.position,
        })
    }

    pub fn panel_id(&self) -> PanelId {
        self.id
    }

    /// Current candidate position; what the rendering layer should preview.
    pub fn candidate(&self) -> Point {
        self.candidate
    }

    /// Recomputes the candidate for a total pointer delta from the start.
    pub fn update(&mut self, registry: &PanelRegistry, delta: Point) -> Point {
        let desired = self.start.position + delta;

        let bounds = applicable_bounds(&self.start.constraints, registry.view_size());
        let clamped = clamp_position(desired, self.start.size, bounds);

        let rect = Rect::new(clamped, self.start.size);
        let blocked = !detect_collisions(
            rect,
            registry.panels(),
            Some(self.id),
            registry.options().collision_gap,
        )
        .is_empty();
        if blocked {
            return self.candidate;
        }

        let others: Vec<Rect> = registry
            .panels()
            .filter(|p| p.id != self.id && p.visible)
            .map(|p| p.rect())
            .collect();
        let snapped = crate::snap::snap_position(rect, &others, registry.options().snap);

        self.candidate = clamp_position(snapped, self.start.size, bounds);
        self.candidate
    }

    /// Writes the final candidate into the registry, once.
    pub fn commit(self, registry: &mut PanelRegistry) -> bool {
        registry.update(
            self.id,
            PanelUpdate {
                position: Some(self.candidate),
                ..Default::default()
            },
        )
    }

    /// Reverts to the start snapshot. Nothing was written, so this is a drop.
    pub fn cancel(self) {}
}

/// An in-flight resize drag on one of the eight handles.
#[derive(Debug)]
pub struct ResizeGesture {
    id: PanelId,
    edges: ResizeEdge,
    start: Panel,
    candidate: (Point, Size),
}

impl ResizeGesture {
    /// Captures the start snapshot. Fails on unknown or locked panels and on
    /// edge sets that aren't one of the eight handles.
    pub fn begin(registry: &PanelRegistry, id: PanelId, edges: ResizeEdge) -> Option<Self> {
        if !edges.is_valid_handle() {
            return None;
        }
        let panel = registry.panel(id)?;
        if panel.locked {
            return None;
        }
        Some(Self {
            id,
            edges,
            start: panel.clone(),
            candidate: (panel.position, panel.size),
        })
    }

    pub fn panel_id(&self) -> PanelId {
        self.id
    }

    pub fn candidate(&self) -> (Point, Size) {
        self.candidate
    }

    /// Recomputes the candidate for a total pointer delta from the start.
    pub fn update(&mut self, registry: &PanelRegistry, delta: Point) -> (Point, Size) {
        let (mut pos, desired_size) =
            apply_resize_delta(self.edges, delta, self.start.position, self.start.size);
        let size = clamp_size(desired_size, &self.start.constraints);

        // When dragging the top or left edge, the opposite edge is the
        // anchor: re-derive the position from it so a size clamp doesn't make
        // the panel drift.
        if self.edges.contains(ResizeEdge::LEFT) {
            pos.x = self.start.rect().right() - size.w;
        }
        if self.edges.contains(ResizeEdge::TOP) {
            pos.y = self.start.rect().bottom() - size.h;
        }

        let bounds = applicable_bounds(&self.start.constraints, registry.view_size());
        let pos = clamp_position(pos, size, bounds);

        let blocked = !detect_collisions(
            Rect::new(pos, size),
            registry.panels(),
            Some(self.id),
            registry.options().collision_gap,
        )
        .is_empty();
        if !blocked {
            self.candidate = (pos, size);
        }
        self.candidate
    }

    /// Writes the final candidate into the registry, once.
    pub fn commit(self, registry: &mut PanelRegistry) -> bool {
        let (position, size) = self.candidate;
        registry.update(
            self.id,
            PanelUpdate {
                position: Some(position),
                size: Some(size),
                ..Default::default()
            },
        )
    }

    /// Reverts to the start snapshot. Nothing was written, so this is a drop.
    pub fn cancel(self) {}
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::panel::{AspectRatio, ComponentKind, Constraints};
    use crate::registry::{CreateOptions, LayoutOptions};
    use crate::snap::SnapOptions;

    fn registry() -> PanelRegistry {
        let options = LayoutOptions {
            snap: SnapOptions {
                grid: None,
                magnetic: Some(8.),
            },
            ..Default::default()
        };
        PanelRegistry::new(Size::new(1920., 1080.), options)
    }

    fn create_at(reg: &mut PanelRegistry, x: f64, y: f64, w: f64, h: f64) -> PanelId {
        reg.create(
            ComponentKind::Notes,
            CreateOptions {
                position: Some(Point::new(x, y)),
                size: Some(Size::new(w, h)),
                ..Default::default()
            },
        )
    }

    #[test]
    fn move_clamps_to_the_canvas() {
        let mut reg = registry();
        let id = create_at(&mut reg, 100., 100., 300., 200.);

        let mut gesture = MoveGesture::begin(&reg, id).unwrap();
        let candidate = gesture.update(&reg, Point::new(-500., 5000.));
        assert_eq!(candidate, Point::new(0., 880.));

        assert!(gesture.commit(&mut reg));
        assert_eq!(reg.panel(id).unwrap().position, Point::new(0., 880.));
        reg.verify_invariants();
    }

    #[test]
    fn colliding_candidate_is_rejected_outright() {
        let mut reg = registry();
        let wall = create_at(&mut reg, 600., 100., 300., 200.);
        let id = create_at(&mut reg, 100., 100., 300., 200.);

        let mut gesture = MoveGesture::begin(&reg, id).unwrap();
        // Into the wall: candidate stays at the start position.
        let candidate = gesture.update(&reg, Point::new(400., 0.));
        assert_eq!(candidate, Point::new(100., 100.));
        // A clear move still works afterwards.
        let candidate = gesture.update(&reg, Point::new(0., 400.));
        assert_eq!(candidate, Point::new(100., 500.));

        let _ = wall;
    }

    #[test]
    fn move_snaps_to_a_neighbor_edge() {
        let mut reg = registry();
        let _anchor = create_at(&mut reg, 0., 0., 300., 200.);
        let id = create_at(&mut reg, 500., 600., 200., 100.);

        let mut gesture = MoveGesture::begin(&reg, id).unwrap();
        // Lands the left edge at 305; magnetic snap pulls it to 300.
        let candidate = gesture.update(&reg, Point::new(-195., 0.));
        assert_eq!(candidate.x, 300.);
    }

    #[test]
    fn cancel_leaves_the_registry_untouched() {
        let mut reg = registry();
        let id = create_at(&mut reg, 100., 100., 300., 200.);

        let mut gesture = MoveGesture::begin(&reg, id).unwrap();
        gesture.update(&reg, Point::new(50., 50.));
        gesture.cancel();

        assert_eq!(reg.panel(id).unwrap().position, Point::new(100., 100.));
    }

    #[test]
    fn locked_panels_refuse_gestures() {
        let mut reg = registry();
        let id = create_at(&mut reg, 100., 100., 300., 200.);
        reg.update(
            id,
            PanelUpdate {
                locked: Some(true),
                ..Default::default()
            },
        );

        assert!(MoveGesture::begin(&reg, id).is_none());
        assert!(ResizeGesture::begin(&reg, id, ResizeEdge::BOTTOM_RIGHT).is_none());
    }

    #[test]
    fn resize_clamps_to_constraints_and_keeps_the_anchor() {
        let mut reg = registry();
        let id = create_at(&mut reg, 400., 400., 300., 200.);

        let mut gesture = ResizeGesture::begin(&reg, id, ResizeEdge::TOP_LEFT).unwrap();
        // Shrink far below the minimum size (120x80).
        let (pos, size) = gesture.update(&reg, Point::new(400., 400.));
        assert_eq!(size, Size::new(120., 80.));
        // Bottom-right corner stays anchored at (700, 600).
        assert_eq!(pos, Point::new(580., 520.));

        assert!(gesture.commit(&mut reg));
        assert_eq!(reg.panel(id).unwrap().size, Size::new(120., 80.));
        reg.verify_invariants();
    }

    #[test]
    fn resize_follows_a_locked_aspect_ratio() {
        let mut reg = registry();
        let id = create_at(&mut reg, 400., 400., 300., 200.);
        assert!(reg.update(
            id,
            PanelUpdate {
                constraints: Some(Constraints {
                    aspect_ratio: Some(AspectRatio {
                        locked: true,
                        ratio: 1.5,
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            },
        ));

        let mut gesture = ResizeGesture::begin(&reg, id, ResizeEdge::BOTTOM_RIGHT).unwrap();
        // Widening alone re-derives the height from the ratio.
        let (_, size) = gesture.update(&reg, Point::new(60., 0.));
        assert_eq!(size, Size::new(360., 240.));
        assert_abs_diff_eq!(size.w / size.h, 1.5);

        assert!(gesture.commit(&mut reg));
        assert_eq!(reg.panel(id).unwrap().size, Size::new(360., 240.));
        reg.verify_invariants();
    }

    #[test]
    fn invalid_handles_are_refused() {
        let mut reg = registry();
        let id = create_at(&mut reg, 100., 100., 300., 200.);
        assert!(ResizeGesture::begin(&reg, id, ResizeEdge::empty()).is_none());
        assert!(
            ResizeGesture::begin(&reg, id, ResizeEdge::LEFT | ResizeEdge::RIGHT).is_none()
        );
    }
}
