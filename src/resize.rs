//! Pure resize-delta math for the eight resize handles.

use bitflags::bitflags;

use crate::geometry::{Point, Size};

bitflags! {
    /// Which edge(s) a resize handle drags.
    ///
    /// Corner handles combine two flags, e.g. `TOP | LEFT` for the
    /// north-west handle.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ResizeEdge: u8 {
        const TOP = 0b0001;
        const BOTTOM = 0b0010;
        const LEFT = 0b0100;
        const RIGHT = 0b1000;

        const TOP_LEFT = Self::TOP.bits() | Self::LEFT.bits();
        const TOP_RIGHT = Self::TOP.bits() | Self::RIGHT.bits();
        const BOTTOM_LEFT = Self::BOTTOM.bits() | Self::LEFT.bits();
        const BOTTOM_RIGHT = Self::BOTTOM.bits() | Self::RIGHT.bits();
    }
}

impl ResizeEdge {
    /// Whether this is one of the eight draggable handles.
    ///
    /// Empty sets and opposite-edge combinations are not handles.
    pub fn is_valid_handle(self) -> bool {
        !self.is_empty()
            && !self.contains(ResizeEdge::TOP | ResizeEdge::BOTTOM)
            && !self.contains(ResizeEdge::LEFT | ResizeEdge::RIGHT)
    }
}

/// Resize-cursor shape for a handle, exposed to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    /// Vertical arrows for the north/south handles.
    NsResize,
    /// Horizontal arrows for the east/west handles.
    EwResize,
    /// Diagonal arrows for the north-east/south-west handles.
    NeswResize,
    /// Diagonal arrows for the north-west/south-east handles.
    NwseResize,
}

pub fn cursor_hint(edges: ResizeEdge) -> Option<CursorHint> {
    if !edges.is_valid_handle() {
        return None;
    }
    let vertical = edges.intersects(ResizeEdge::TOP | ResizeEdge::BOTTOM);
    let horizontal = edges.intersects(ResizeEdge::LEFT | ResizeEdge::RIGHT);
    let hint = if vertical && horizontal {
        if edges == ResizeEdge::TOP_RIGHT || edges == ResizeEdge::BOTTOM_LEFT {
            CursorHint::NeswResize
        } else {
            CursorHint::NwseResize
        }
    } else if vertical {
        CursorHint::NsResize
    } else {
        CursorHint::EwResize
    };
    Some(hint)
}

/// Maps a pointer delta on a resize handle to a new position and size.
///
/// The edges opposite the handle stay fixed: dragging `TOP` moves the top
/// edge and keeps the bottom in place, dragging `RIGHT` grows from the fixed
/// left edge, and so on. No clamping happens here; callers pipe the result
/// through the constraint resolver and collision detector before committing.
pub fn apply_resize_delta(
    edges: ResizeEdge,
    delta: Point,
    position: Point,
    size: Size,
) -> (Point, Size) {
    let mut pos = position;
    let mut size = size;

    if edges.contains(ResizeEdge::LEFT) {
        pos.x += delta.x;
        size.w -= delta.x;
    } else if edges.contains(ResizeEdge::RIGHT) {
        size.w += delta.x;
    }

    if edges.contains(ResizeEdge::TOP) {
        pos.y += delta.y;
        size.h -= delta.y;
    } else if edges.contains(ResizeEdge::BOTTOM) {
        size.h += delta.y;
    }

    (pos, size)
}
