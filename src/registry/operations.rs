//! Panel lifecycle: create, update, delete, duplicate, bulk.

use tracing::debug;

use super::PanelRegistry;
use crate::constraints::{applicable_bounds, clamp_position, clamp_size};
use crate::geometry::{Point, Size};
use crate::panel::{ComponentKind, Constraints, Panel, PanelId, PanelMetadata};

/// Options for [`PanelRegistry::create`]. Unset fields take per-kind
/// defaults; an unset position triggers the placement probe.
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub title: Option<String>,
    pub constraints: Option<Constraints>,
    pub tags: Vec<String>,
    /// Caller clock, milliseconds. Stamped into the metadata timestamps.
    pub now_ms: u64,
}

/// Partial update merged into a panel by [`PanelRegistry::update`].
///
/// The merged candidate is validated as a whole; on failure nothing is
/// written.
#[derive(Debug, Clone, Default)]
pub struct PanelUpdate {
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub z_index: Option<i32>,
    pub visible: Option<bool>,
    pub locked: Option<bool>,
    pub title: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub tags: Option<Vec<String>>,
    pub constraints: Option<Constraints>,
    /// Caller clock; bumps `modified_ms` when the update commits.
    pub now_ms: Option<u64>,
}

/// Best-effort batch operation. Not transactional.
#[derive(Debug, Clone, PartialEq)]
pub enum BulkOp {
    Show,
    Hide,
    Lock,
    Unlock,
    Delete,
    MoveBy(Point),
}

/// Per-id outcome of a bulk operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkOutcome {
    pub successful: Vec<PanelId>,
    pub failed: Vec<PanelId>,
}

impl PanelRegistry {
    /// Creates a panel and returns its id.
    ///
    /// With no explicit position, a bounded row-major probe finds a free
    /// slot, falling back to a randomized in-bounds position. Creation never
    /// fails for placement reasons.
    pub fn create(&mut self, kind: ComponentKind, options: CreateOptions) -> PanelId {
        let constraints = options.constraints.unwrap_or_default();
        let size = clamp_size(options.size.unwrap_or_else(|| kind.default_size()), &constraints);

        let position = match options.position {
            Some(pos) => clamp_position(pos, size, applicable_bounds(&constraints, self.view_size)),
            None => {
                let probed = self.find_free_position(size);
                clamp_position(probed, size, applicable_bounds(&constraints, self.view_size))
            }
        };

        let id = self.alloc_panel_id();
        let created_at = self.next_seq();
        let z_index = self.panels().map(|p| p.z_index).max().map_or(0, |z| z + 1);

        let panel = Panel {
            id,
            kind,
            position,
            size,
            z_index,
            visible: true,
            locked: false,
            constraints,
            metadata: PanelMetadata {
                title: options.title.unwrap_or_else(|| kind.label().to_string()),
                icon: None,
                color: None,
                tags: options.tags,
                created_ms: options.now_ms,
                modified_ms: options.now_ms,
            },
            created_at,
        };

        debug!("created {id} ({kind:?}) at {position:?}");
        self.insert_panel(panel);
        id
    }

    /// Merges `update` into the panel and validates the whole result.
    ///
    /// All-or-nothing: on any validation failure the store is left untouched
    /// and `false` is returned. Positions are clamped to the applicable
    /// bounds rather than rejected, matching interactive moves.
    pub fn update(&mut self, id: PanelId, update: PanelUpdate) -> bool {
        let Some(current) = self.panels.get(&id) else {
            return false;
        };

        let mut candidate = current.clone();
        if let Some(size) = update.size {
            candidate.size = size;
        }
        if let Some(z) = update.z_index {
            candidate.z_index = z;
        }
        if let Some(visible) = update.visible {
            candidate.visible = visible;
        }
        if let Some(locked) = update.locked {
            candidate.locked = locked;
        }
        if let Some(title) = update.title {
            candidate.metadata.title = title;
        }
        if let Some(icon) = update.icon {
            candidate.metadata.icon = Some(icon);
        }
        if let Some(color) = update.color {
            candidate.metadata.color = Some(color);
        }
        if let Some(tags) = update.tags {
            candidate.metadata.tags = tags;
        }
        if let Some(constraints) = update.constraints {
            candidate.constraints = constraints;
        }
        if let Some(position) = update.position {
            candidate.position = position;
        }

        if !candidate.is_valid() {
            return false;
        }

        let bounds = applicable_bounds(&candidate.constraints, self.view_size);
        candidate.position = clamp_position(candidate.position, candidate.size, bounds);

        if let Some(now_ms) = update.now_ms {
            candidate.metadata.modified_ms = now_ms;
        }

        self.panels.insert(id, candidate);
        self.refresh_groups_of(id);
        true
    }

    /// Deletes a panel, cascading through the dependent state.
    ///
    /// The cascade runs as explicit steps: detach from its group (deleting
    /// the group if it empties), drop from the selection, prune clipboard
    /// snapshots, then remove the panel itself. Terminal: ids are not reused.
    pub fn delete(&mut self, id: PanelId) -> bool {
        if !self.panels.contains_key(&id) {
            return false;
        }

        self.detach_from_groups(id);
        self.selection.retain(|sel| *sel != id);
        self.clipboard.retain(|snapshot| snapshot.id != id);
        self.order.retain(|ord| *ord != id);
        self.panels.remove(&id);

        debug!("deleted {id}");
        true
    }

    /// Duplicates a panel into a new independent one, offset to a free spot.
    pub fn duplicate(&mut self, id: PanelId, now_ms: u64) -> Option<PanelId> {
        let source = self.panels.get(&id)?.clone();

        let position = self.find_free_position_near(source.position, source.size, None);
        let new_id = self.alloc_panel_id();
        let created_at = self.next_seq();
        let z_index = self.panels().map(|p| p.z_index).max().map_or(0, |z| z + 1);

        let mut panel = source;
        panel.id = new_id;
        panel.position = position;
        panel.z_index = z_index;
        panel.created_at = created_at;
        panel.metadata.created_ms = now_ms;
        panel.metadata.modified_ms = now_ms;

        self.insert_panel(panel);
        Some(new_id)
    }

    /// Applies `op` to each id, best-effort. One failure doesn't stop the
    /// rest; the outcome lists which ids succeeded and which failed.
    pub fn bulk(&mut self, ids: &[PanelId], op: BulkOp) -> BulkOutcome {
        let mut outcome = BulkOutcome::default();

        for &id in ids {
            let ok = match &op {
                BulkOp::Show => self.set_flag(id, |p| p.visible = true),
                BulkOp::Hide => self.set_flag(id, |p| p.visible = false),
                BulkOp::Lock => self.set_flag(id, |p| p.locked = true),
                BulkOp::Unlock => self.set_flag(id, |p| p.locked = false),
                BulkOp::Delete => self.delete(id),
                BulkOp::MoveBy(delta) => self.move_by(id, *delta),
            };
            if ok {
                outcome.successful.push(id);
            } else {
                outcome.failed.push(id);
            }
        }

        outcome
    }

    fn set_flag(&mut self, id: PanelId, apply: impl FnOnce(&mut Panel)) -> bool {
        match self.panels.get_mut(&id) {
            Some(panel) => {
                apply(panel);
                true
            }
            None => false,
        }
    }

    /// Translates a panel, clamped to its bounds. Locked panels don't move.
    fn move_by(&mut self, id: PanelId, delta: Point) -> bool {
        let Some(panel) = self.panels.get(&id) else {
            return false;
        };
        if panel.locked {
            return false;
        }

        let bounds = applicable_bounds(&panel.constraints, self.view_size);
        let position = clamp_position(panel.position + delta, panel.size, bounds);
        self.panels.get_mut(&id).unwrap().position = position;
        self.refresh_groups_of(id);
        true
    }
}
