//! Workspace snapshots for persistence and templates.
//!
//! Snapshot types are decoupled from live registry state: they carry raw id
//! values, and import remaps them onto fresh ids. The engine is agnostic to
//! the storage format and medium; callers serialize the snapshot however
//! they like (everything here is serde-derived).

use serde::{Deserialize, Serialize};

use crate::constraints::{applicable_bounds, clamp_position, clamp_size};
use crate::geometry::{Point, Size};
use crate::panel::{ComponentKind, Constraints, Panel, PanelId, PanelMetadata};
use crate::registry::PanelRegistry;

/// A full copy of the registry's persistent state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceSnapshot {
    pub panels: Vec<PanelSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupSnapshot>,
}

/// One panel's persistent fields. `id` is only meaningful within the
/// snapshot (group membership references it); imports assign fresh ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSnapshot {
    pub id: u64,
    pub kind: ComponentKind,
    pub position: Point,
    pub size: Size,
    pub z_index: i32,
    pub visible: bool,
    pub locked: bool,
    pub constraints: Constraints,
    pub metadata: PanelMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    pub name: String,
    /// Snapshot-local panel ids.
    pub members: Vec<u64>,
    pub locked: bool,
    pub minimized: bool,
    pub maintain_relative_positions: bool,
    pub synchronize_resize: bool,
}

impl PanelRegistry {
    /// Deep-copies the registry into a snapshot.
    ///
    /// Safe to hand to auxiliary work (persistence, thumbnailing): it shares
    /// nothing with the live registry.
    pub fn export_snapshot(&self) -> WorkspaceSnapshot {
        let panels = self
            .panels_back_to_front()
            .into_iter()
            .map(|p| PanelSnapshot {
                id: p.id.get(),
                kind: p.kind,
                position: p.position,
                size: p.size,
                z_index: p.z_index,
                visible: p.visible,
                locked: p.locked,
                constraints: p.constraints.clone(),
                metadata: p.metadata.clone(),
            })
            .collect();

        let groups = self
            .groups()
            .map(|g| GroupSnapshot {
                name: g.name.clone(),
                members: g.members.iter().map(|m| m.get()).collect(),
                locked: g.locked,
                minimized: g.minimized,
                maintain_relative_positions: g.maintain_relative_positions,
                synchronize_resize: g.synchronize_resize,
            })
            .collect();

        WorkspaceSnapshot { panels, groups }
    }

    /// Replaces the registry's content with a snapshot.
    ///
    /// Ids are remapped onto fresh ones; positions, sizes, stacking order,
    /// and group membership are preserved. Each panel re-clamps against its
    /// constraints and the current canvas so an imported snapshot can never
    /// violate the data model. Selection and clipboard are cleared. Returns
    /// the new ids in snapshot order.
    pub fn import_snapshot(&mut self, snapshot: &WorkspaceSnapshot) -> Vec<PanelId> {
        self.clear();

        let mut id_map = std::collections::HashMap::new();
        let mut imported = Vec::with_capacity(snapshot.panels.len());

        for entry in &snapshot.panels {
            let id = self.alloc_panel_id();
            let created_at = self.next_seq();

            let size = clamp_size(entry.size, &entry.constraints);
            let bounds = applicable_bounds(&entry.constraints, self.view_size());
            let position = clamp_position(entry.position, size, bounds);

            let panel = Panel {
                id,
                kind: entry.kind,
                position,
                size,
                z_index: entry.z_index.max(0),
                visible: entry.visible,
                locked: entry.locked,
                constraints: entry.constraints.clone(),
                metadata: entry.metadata.clone(),
                created_at,
            };
            self.insert_panel(panel);
            id_map.insert(entry.id, id);
            imported.push(id);
        }

        // Ids inside one snapshot may collide on z; imports renumber densely.
        self.normalize_z_order();

        for group in &snapshot.groups {
            let members: Vec<PanelId> = group
                .members
                .iter()
                .filter_map(|m| id_map.get(m).copied())
                .collect();
            if members.is_empty() {
                continue;
            }
            if let Ok(id) = self.create_group(group.name.clone(), &members) {
                let g = self.groups_mut().get_mut(&id).unwrap();
                g.locked = group.locked;
                g.minimized = group.minimized;
                g.maintain_relative_positions = group.maintain_relative_positions;
                g.synchronize_resize = group.synchronize_resize;
            }
        }

        imported
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{CreateOptions, LayoutOptions};

    fn registry() -> PanelRegistry {
        PanelRegistry::new(Size::new(1920., 1080.), LayoutOptions::default())
    }

    fn create_at(reg: &mut PanelRegistry, x: f64, y: f64) -> PanelId {
        reg.create(
            ComponentKind::Todo,
            CreateOptions {
                position: Some(Point::new(x, y)),
                size: Some(Size::new(300., 200.)),
                ..Default::default()
            },
        )
    }

    #[test]
    fn round_trip_preserves_count_and_relative_positions() {
        let mut reg = registry();
        let a = create_at(&mut reg, 0., 0.);
        let b = create_at(&mut reg, 700., 300.);
        let offset = reg.panel(b).unwrap().position - reg.panel(a).unwrap().position;

        let snapshot = reg.export_snapshot();

        let mut fresh = registry();
        let imported = fresh.import_snapshot(&snapshot);
        assert_eq!(imported.len(), 2);
        assert_eq!(fresh.len(), 2);

        let new_offset =
            fresh.panel(imported[1]).unwrap().position - fresh.panel(imported[0]).unwrap().position;
        assert_eq!(new_offset, offset);
        fresh.verify_invariants();
    }

    #[test]
    fn round_trip_preserves_groups_and_stacking() {
        let mut reg = registry();
        let a = create_at(&mut reg, 0., 0.);
        let b = create_at(&mut reg, 700., 300.);
        reg.create_group("pair", &[a, b]).unwrap();
        reg.bring_to_front(a);

        let snapshot = reg.export_snapshot();
        let mut fresh = registry();
        fresh.import_snapshot(&snapshot);

        assert_eq!(fresh.groups().count(), 1);
        let group = fresh.groups().next().unwrap();
        assert_eq!(group.name, "pair");
        assert_eq!(group.members.len(), 2);

        // `a` was brought to front before the export; it must still draw last.
        let order = fresh.panels_back_to_front();
        let top = order.last().unwrap();
        assert_eq!(top.position, Point::new(0., 0.));
        fresh.verify_invariants();
    }

    #[test]
    fn snapshots_serialize_through_serde_json() {
        let mut reg = registry();
        create_at(&mut reg, 100., 100.);

        let snapshot = reg.export_snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: WorkspaceSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn import_reclamps_out_of_range_entries() {
        let snapshot = WorkspaceSnapshot {
            panels: vec![PanelSnapshot {
                id: 7,
                kind: ComponentKind::Weather,
                position: Point::new(-100., 5000.),
                size: Size::new(5., 5.),
                z_index: -3,
                visible: true,
                locked: false,
                constraints: Constraints::default(),
                metadata: PanelMetadata {
                    title: "Weather".into(),
                    ..Default::default()
                },
            }],
            groups: Vec::new(),
        };

        let mut reg = registry();
        let imported = reg.import_snapshot(&snapshot);
        let panel = reg.panel(imported[0]).unwrap();
        assert_eq!(panel.size, Size::new(120., 80.));
        assert!(panel.z_index >= 0);
        assert_eq!(panel.position, Point::new(0., 1000.));
        reg.verify_invariants();
    }
}
