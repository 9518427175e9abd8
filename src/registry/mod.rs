//! Authoritative store of panels and groups.
//!
//! The registry is the only component the UI and rendering layers talk to.
//! It owns every panel and group, enforces the data-model invariants on each
//! write, and exposes read-only ordered views for drawing.
//!
//! There is no ambient instance: callers construct a registry explicitly and
//! pass it around. All mutations are expected to run on one interaction
//! thread; long-running auxiliary work must operate on snapshot copies
//! ([`export_snapshot`](PanelRegistry::export_snapshot)), never on live
//! references.
//!
//! ## Module structure
//!
//! ```text
//! registry/
//! ├── mod.rs        - PanelRegistry struct, accessors, ordered views
//! ├── operations.rs - create/update/delete/duplicate/bulk
//! ├── placement.rs  - free-slot probe, offset search, random fallback
//! ├── zorder.rs     - stacking order operations
//! ├── groups.rs     - group lifecycle and group transforms
//! ├── selection.rs  - selection set and clipboard
//! └── search.rs     - search, statistics, health check
//! ```

mod groups;
mod operations;
mod placement;
mod search;
mod selection;
mod zorder;


use std::collections::HashMap;

pub use operations::{BulkOp, BulkOutcome, CreateOptions, PanelUpdate};
pub use search::{HealthIssue, RegistryStats, SearchCriteria};

use crate::geometry::Size;
use crate::group::{Group, GroupId};
use crate::panel::{Panel, PanelId};
use crate::snap::SnapOptions;

/// Tunables of the layout engine.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub snap: SnapOptions,
    /// Gap used by the collision detector during drags and placement.
    pub collision_gap: f64,
    /// Step of the row-major placement probe grid.
    pub placement_step: f64,
    /// Attempt budget for placement and offset searches.
    pub placement_attempts: usize,
    /// Offset applied per attempt when placing duplicates and pastes.
    pub duplicate_offset: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            snap: SnapOptions {
                grid: None,
                magnetic: Some(8.),
            },
            collision_gap: 0.,
            placement_step: 50.,
            placement_attempts: 100,
            duplicate_offset: 24.,
        }
    }
}

/// Authoritative store of panels and groups.
#[derive(Debug)]
pub struct PanelRegistry {
    /// All live panels.
    panels: HashMap<PanelId, Panel>,

    /// Panel ids in insertion order.
    ///
    /// Gives iteration a stable order, which also pins the magnetic snap
    /// tie-break and the O(n²) statistics scan.
    order: Vec<PanelId>,

    /// All live groups. BTreeMap keeps creation order.
    groups: std::collections::BTreeMap<GroupId, Group>,

    /// Selected panel ids, in selection order. Subset of live ids.
    selection: Vec<PanelId>,

    /// Panel snapshots captured by the last copy. Pruned on panel delete.
    clipboard: Vec<Panel>,

    /// Canvas size panels are placed within.
    view_size: Size,

    options: LayoutOptions,

    next_panel_id: u64,
    next_group_id: u64,
    created_seq: u64,

    /// Seeded rng for the randomized placement fallback.
    rng: fastrand::Rng,
}

impl PanelRegistry {
    pub fn new(view_size: Size, options: LayoutOptions) -> Self {
        Self {
            panels: HashMap::new(),
            order: Vec::new(),
            groups: std::collections::BTreeMap::new(),
            selection: Vec::new(),
            clipboard: Vec::new(),
            view_size,
            options,
            next_panel_id: 1,
            next_group_id: 1,
            created_seq: 0,
            rng: fastrand::Rng::with_seed(0x_b0a2d_5eed),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn contains(&self, id: PanelId) -> bool {
        self.panels.contains_key(&id)
    }

    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.get(&id)
    }

    /// Panels in insertion order.
    pub fn panels(&self) -> impl Iterator<Item = &Panel> + '_ {
        self.order.iter().map(|id| &self.panels[id])
    }

    /// Panels ordered for drawing: back to front by `(z_index, created_at)`.
    pub fn panels_back_to_front(&self) -> Vec<&Panel> {
        let mut panels: Vec<&Panel> = self.panels().collect();
        panels.sort_by_key(|p| (p.z_index, p.created_at));
        panels
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> + '_ {
        self.groups.values()
    }

    pub fn view_size(&self) -> Size {
        self.view_size
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: LayoutOptions) {
        self.options = options;
    }

    /// Updates the canvas size. Panel positions are not rewritten; they
    /// re-clamp against the new bounds on their next move.
    pub fn set_view_size(&mut self, view_size: Size) {
        self.view_size = view_size;
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    pub(crate) fn alloc_panel_id(&mut self) -> PanelId {
        let id = PanelId(self.next_panel_id);
        self.next_panel_id += 1;
        id
    }

    pub(crate) fn alloc_group_id(&mut self) -> GroupId {
        let id = GroupId(self.next_group_id);
        self.next_group_id += 1;
        id
    }

    pub(crate) fn next_seq(&mut self) -> u64 {
        let seq = self.created_seq;
        self.created_seq += 1;
        seq
    }

    pub(crate) fn insert_panel(&mut self, panel: Panel) {
        self.order.push(panel.id);
        self.panels.insert(panel.id, panel);
    }

    /// Drops every panel, group, selection entry, and clipboard snapshot.
    ///
    /// Id counters keep running so ids are never reused across an import.
    pub(crate) fn clear(&mut self) {
        self.panels.clear();
        self.order.clear();
        self.groups.clear();
        self.selection.clear();
        self.clipboard.clear();
    }

    pub(crate) fn groups_mut(&mut self) -> &mut std::collections::BTreeMap<GroupId, Group> {
        &mut self.groups
    }

    #[cfg(test)]
    pub(crate) fn verify_invariants(&self) {
        use crate::constraints::applicable_bounds;

        assert_eq!(self.order.len(), self.panels.len());
        for id in &self.order {
            assert!(self.panels.contains_key(id), "order entry must be live");
        }

        for panel in self.panels.values() {
            let c = &panel.constraints;
            assert!(
                panel.size.w >= c.min_size.w
                    && panel.size.w <= c.max_size.w
                    && panel.size.h >= c.min_size.h
                    && panel.size.h <= c.max_size.h,
                "panel size must stay within constraints"
            );

            let bounds = applicable_bounds(c, self.view_size);
            let max_x = f64::max(bounds.loc.x, bounds.right() - panel.size.w);
            let max_y = f64::max(bounds.loc.y, bounds.bottom() - panel.size.h);
            assert!(
                panel.position.x >= bounds.loc.x
                    && panel.position.x <= max_x
                    && panel.position.y >= bounds.loc.y
                    && panel.position.y <= max_y,
                "panel position must stay within bounds"
            );
        }

        for group in self.groups.values() {
            assert!(!group.members.is_empty(), "groups must never be empty");
            for member in &group.members {
                assert!(
                    self.panels.contains_key(member),
                    "group members must be live panels"
                );
            }
        }

        for id in &self.selection {
            assert!(self.panels.contains_key(id), "selection must be live");
        }
        for snapshot in &self.clipboard {
            // Clipboard snapshots of deleted panels are pruned by delete().
            assert!(
                self.panels.contains_key(&snapshot.id),
                "clipboard must not reference deleted panels"
            );
        }
    }
}
