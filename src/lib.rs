//! Panel layout and interaction engine.
//!
//! Boardkit is the geometry core of a dashboard of movable, resizable
//! panels: constraint clamping, collision detection, grid and magnetic
//! snapping, 8-direction resize math, stacking order, group transforms, and
//! the authoritative [`PanelRegistry`] that enforces the data-model
//! invariants across every mutation.
//!
//! The crate draws nothing and reads no input. The UI layer drives it
//! through [`PanelRegistry`] and the [`gesture`] types; the rendering layer
//! consumes [`PanelRegistry::panels_back_to_front`] for draw order and
//! [`resize::cursor_hint`] for handle cursors.
//!
//! All mutations are expected to run on one interaction thread. There is no
//! internal locking; auxiliary work (persistence, thumbnailing) must operate
//! on [`snapshot::WorkspaceSnapshot`] copies, never live references.

pub mod collision;
pub mod constraints;
pub mod geometry;
pub mod gesture;
pub mod group;
pub mod import;
pub mod panel;
pub mod registry;
pub mod resize;
pub mod snap;
pub mod snapshot;

pub use geometry::{Point, Rect, Size};
pub use gesture::{MoveGesture, ResizeGesture};
pub use group::{Group, GroupError, GroupId};
pub use panel::{ComponentKind, Constraints, Panel, PanelId, PanelMetadata};
pub use registry::{
    BulkOp, BulkOutcome, CreateOptions, LayoutOptions, PanelRegistry, PanelUpdate, SearchCriteria,
};
pub use resize::{CursorHint, ResizeEdge};
pub use snap::SnapOptions;
pub use snapshot::WorkspaceSnapshot;
