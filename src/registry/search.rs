//! Search, statistics, and diagnostics over the registry.

use std::collections::HashMap;

use super::PanelRegistry;
use crate::collision::rects_collide;
use crate::constraints::applicable_bounds;
use crate::geometry::Rect;
use crate::group::GroupId;
use crate::panel::{ComponentKind, Panel, PanelId};

/// Search filter. Every supplied field must match (AND semantics).
#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    pub kind: Option<ComponentKind>,
    /// Case-insensitive substring of the title.
    pub title_contains: Option<String>,
    /// Panels must carry all of these tags.
    pub tags: Vec<String>,
    pub visible: Option<bool>,
    pub locked: Option<bool>,
    /// Panels whose rect intersects this region.
    pub region: Option<Rect>,
}

/// Aggregate counters over the registry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistryStats {
    pub total: usize,
    pub visible: usize,
    pub hidden: usize,
    pub locked: usize,
    /// Panels that belong to some group.
    pub grouped: usize,
    pub groups: usize,
    pub by_kind: HashMap<ComponentKind, usize>,
    pub total_area: f64,
    /// Pairs of visible panels whose rects overlap. O(n²) pairwise scan,
    /// acceptable for panel counts in the tens.
    pub overlapping_pairs: usize,
}

/// A single finding from [`PanelRegistry::health_check`].
#[derive(Debug, Clone, PartialEq)]
pub enum HealthIssue {
    SizeOutOfBounds { panel: PanelId },
    PositionOutOfBounds { panel: PanelId },
    ZConflict { z_index: i32, panels: Vec<PanelId> },
    EmptyGroup { group: GroupId },
    DanglingGroupMember { group: GroupId, panel: PanelId },
    StaleSelection { panel: PanelId },
    StaleClipboardEntry { panel: PanelId },
}

impl PanelRegistry {
    /// Panels matching every supplied criterion, in insertion order.
    pub fn search(&self, criteria: &SearchCriteria) -> Vec<&Panel> {
        let needle = criteria
            .title_contains
            .as_ref()
            .map(|s| s.to_lowercase());

        self.panels()
            .filter(|p| criteria.kind.map_or(true, |k| p.kind == k))
            .filter(|p| {
                needle
                    .as_ref()
                    .map_or(true, |n| p.metadata.title.to_lowercase().contains(n))
            })
            .filter(|p| {
                criteria
                    .tags
                    .iter()
                    .all(|tag| p.metadata.tags.iter().any(|t| t == tag))
            })
            .filter(|p| criteria.visible.map_or(true, |v| p.visible == v))
            .filter(|p| criteria.locked.map_or(true, |l| p.locked == l))
            .filter(|p| {
                criteria
                    .region
                    .map_or(true, |region| rects_collide(p.rect(), region, 0.))
            })
            .collect()
    }

    /// Aggregate counters, including the pairwise overlap count.
    pub fn statistics(&self) -> RegistryStats {
        let mut stats = RegistryStats {
            total: self.panels.len(),
            groups: self.groups.len(),
            ..Default::default()
        };

        for panel in self.panels() {
            if panel.visible {
                stats.visible += 1;
            } else {
                stats.hidden += 1;
            }
            if panel.locked {
                stats.locked += 1;
            }
            *stats.by_kind.entry(panel.kind).or_insert(0) += 1;
            stats.total_area += panel.size.area();
        }

        stats.grouped = self
            .panels
            .keys()
            .filter(|id| self.group_of(**id).is_some())
            .count();

        let panels: Vec<&Panel> = self.panels().collect();
        for (i, a) in panels.iter().enumerate() {
            for b in &panels[i + 1..] {
                if a.visible && b.visible && rects_collide(a.rect(), b.rect(), 0.) {
                    stats.overlapping_pairs += 1;
                }
            }
        }

        stats
    }

    /// Non-mutating scan for invariant violations.
    ///
    /// An empty result means the registry is healthy. Findings indicate bugs
    /// (or a view resize that hasn't been followed by panel moves yet); the
    /// engine itself never commits a state that violates the data model.
    pub fn health_check(&self) -> Vec<HealthIssue> {
        let mut issues = Vec::new();

        for panel in self.panels() {
            let c = &panel.constraints;
            let size_ok = panel.size.w >= c.min_size.w
                && panel.size.w <= c.max_size.w
                && panel.size.h >= c.min_size.h
                && panel.size.h <= c.max_size.h;
            if !size_ok {
                issues.push(HealthIssue::SizeOutOfBounds { panel: panel.id });
            }

            let bounds = applicable_bounds(c, self.view_size);
            let max_x = f64::max(bounds.loc.x, bounds.right() - panel.size.w);
            let max_y = f64::max(bounds.loc.y, bounds.bottom() - panel.size.h);
            let pos_ok = panel.position.x >= bounds.loc.x
                && panel.position.x <= max_x
                && panel.position.y >= bounds.loc.y
                && panel.position.y <= max_y;
            if !pos_ok {
                issues.push(HealthIssue::PositionOutOfBounds { panel: panel.id });
            }
        }

        let mut by_z: HashMap<i32, Vec<PanelId>> = HashMap::new();
        for panel in self.panels() {
            by_z.entry(panel.z_index).or_default().push(panel.id);
        }
        let mut conflicts: Vec<(i32, Vec<PanelId>)> = by_z
            .into_iter()
            .filter(|(_, ids)| ids.len() > 1)
            .collect();
        conflicts.sort_by_key(|(z, _)| *z);
        for (z_index, mut panels) in conflicts {
            panels.sort();
            issues.push(HealthIssue::ZConflict { z_index, panels });
        }

        for group in self.groups.values() {
            if group.members.is_empty() {
                issues.push(HealthIssue::EmptyGroup { group: group.id });
            }
            for member in &group.members {
                if !self.panels.contains_key(member) {
                    issues.push(HealthIssue::DanglingGroupMember {
                        group: group.id,
                        panel: *member,
                    });
                }
            }
        }

        for id in &self.selection {
            if !self.panels.contains_key(id) {
                issues.push(HealthIssue::StaleSelection { panel: *id });
            }
        }
        for snapshot in &self.clipboard {
            if !self.panels.contains_key(&snapshot.id) {
                issues.push(HealthIssue::StaleClipboardEntry { panel: snapshot.id });
            }
        }

        issues
    }
}
