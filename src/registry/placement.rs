//! Free-position search for creates, duplicates, and pastes.

use tracing::warn;

use super::PanelRegistry;
use crate::collision::detect_collisions;
use crate::constraints::clamp_position;
use crate::geometry::{Point, Rect, Size};
use crate::panel::PanelId;

impl PanelRegistry {
    /// Finds a non-colliding position for a new panel of `size`.
    ///
    /// Probes a fixed grid of candidate slots row-major, capped at the
    /// attempt budget, and falls back to a randomized in-bounds position when
    /// the probe exhausts. Never fails.
    pub(crate) fn find_free_position(&mut self, size: Size) -> Point {
        let step = self.options.placement_step;
        let budget = self.options.placement_attempts;
        let gap = self.options.collision_gap;

        let max_x = f64::max(0., self.view_size.w - size.w);
        let max_y = f64::max(0., self.view_size.h - size.h);

        let mut attempts = 0;
        let mut y = 0.;
        while y <= max_y && attempts < budget {
            let mut x = 0.;
            while x <= max_x && attempts < budget {
                let candidate = Rect::new(Point::new(x, y), size);
                if detect_collisions(candidate, self.panels(), None, gap).is_empty() {
                    return candidate.loc;
                }
                attempts += 1;
                x += step;
            }
            y += step;
        }

        warn!("placement probe exhausted after {attempts} attempts, falling back to random");
        self.random_in_bounds(size)
    }

    /// Searches for a free position by stepping away from `start` by the
    /// duplicate offset, for duplicates and pastes.
    pub(crate) fn find_free_position_near(
        &mut self,
        start: Point,
        size: Size,
        exclude: Option<PanelId>,
    ) -> Point {
        let offset = self.options.duplicate_offset;
        let budget = self.options.placement_attempts;
        let gap = self.options.collision_gap;
        let bounds = Rect::new(Point::ZERO, self.view_size);

        let mut last = None;
        for attempt in 1..=budget {
            let shift = offset * attempt as f64;
            let candidate_pos =
                clamp_position(start + Point::new(shift, shift), size, bounds);
            // Once the clamp pins the candidate, further attempts repeat it.
            if last == Some(candidate_pos) {
                break;
            }
            last = Some(candidate_pos);
            let candidate = Rect::new(candidate_pos, size);
            if detect_collisions(candidate, self.panels(), exclude, gap).is_empty() {
                return candidate_pos;
            }
        }

        warn!("offset search exhausted, falling back to random");
        self.random_in_bounds(size)
    }

    /// A pseudo-random position keeping the panel fully in bounds.
    pub(crate) fn random_in_bounds(&mut self, size: Size) -> Point {
        let max_x = f64::max(0., self.view_size.w - size.w);
        let max_y = f64::max(0., self.view_size.h - size.h);
        let x = self.rng.f64() * max_x;
        let y = self.rng.f64() * max_y;
        Point::new(x, y)
    }
}
