//! Named collections of panels transformed together.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{Point, Rect};
use crate::panel::PanelId;

/// Padding added around the member envelope when deriving group bounds.
pub const GROUP_PADDING: f64 = 8.;

/// Unique group identifier, assigned by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub(crate) u64);

impl GroupId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "group-{}", self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroupError {
    #[error("cannot create a group with no members")]
    Empty,
}

/// A named collection of panels.
///
/// Membership is never empty: when the last member is removed, the group is
/// deleted rather than retained. `bounds` is derived state, recomputed by the
/// registry after any member mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    /// Member panel ids in insertion order. Non-empty.
    pub members: Vec<PanelId>,
    /// Envelope of the member rects, expanded by [`GROUP_PADDING`].
    pub bounds: Rect,
    pub locked: bool,
    pub minimized: bool,
    /// Keep member offsets intact when the group moves.
    pub maintain_relative_positions: bool,
    /// Allow [`resize_group`](crate::registry::PanelRegistry::resize_group)
    /// to scale the members.
    pub synchronize_resize: bool,
    pub z_index: i32,
}

/// Envelope of member rects plus the fixed group padding.
///
/// `None` when the iterator is empty; an empty group has no valid bounds.
pub fn derive_bounds(rects: impl Iterator<Item = Rect>) -> Option<Rect> {
    rects
        .reduce(|acc, r| acc.union(r))
        .map(|envelope| envelope.expanded(GROUP_PADDING))
}

/// Scales a member rect from `old_bounds` space into `new_bounds` space.
///
/// The offset from the group origin and the size both scale by the
/// independent per-axis factors.
pub fn scale_member_rect(rect: Rect, old_bounds: Rect, new_bounds: Rect) -> Rect {
    let scale_x = new_bounds.size.w / f64::max(old_bounds.size.w, 1.);
    let scale_y = new_bounds.size.h / f64::max(old_bounds.size.h, 1.);

    let offset = rect.loc - old_bounds.loc;
    let loc = new_bounds.loc + Point::new(offset.x * scale_x, offset.y * scale_y);
    let size = crate::geometry::Size::new(rect.size.w * scale_x, rect.size.h * scale_y);
    Rect::new(loc, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Size};

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rect {
        Rect::new(Point::new(x, y), Size::new(w, h))
    }

    #[test]
    fn bounds_envelope_members_with_padding() {
        let bounds = derive_bounds([rect(10., 10., 100., 100.), rect(200., 50., 50., 200.)].into_iter())
            .unwrap();
        assert_eq!(bounds, rect(2., 2., 256., 256.));
    }

    #[test]
    fn no_members_means_no_bounds() {
        assert_eq!(derive_bounds(std::iter::empty()), None);
    }

    #[test]
    fn member_scaling_is_independent_per_axis() {
        let old = rect(0., 0., 200., 200.);
        let new = rect(0., 0., 400., 200.);

        // Width doubles: x-offset and width double, y and height unchanged.
        let scaled = scale_member_rect(rect(50., 30., 60., 40.), old, new);
        assert_eq!(scaled, rect(100., 30., 120., 40.));
    }

    #[test]
    fn member_scaling_follows_the_new_origin() {
        let old = rect(100., 100., 200., 100.);
        let new = rect(0., 0., 100., 100.);

        let scaled = scale_member_rect(rect(150., 100., 100., 50.), old, new);
        assert_eq!(scaled, rect(25., 0., 50., 50.));
    }
}
