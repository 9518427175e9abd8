//! Group lifecycle and group transforms.

use tracing::debug;

use super::PanelRegistry;
use crate::constraints::{applicable_bounds, clamp_position};
use crate::geometry::{Point, Rect};
use crate::group::{derive_bounds, scale_member_rect, Group, GroupError, GroupId};
use crate::panel::PanelId;

impl PanelRegistry {
    /// Creates a group over the given panels.
    ///
    /// Unknown ids are dropped; if no members remain the group is not
    /// created. A panel belongs to at most one group, so members are detached
    /// from any previous group first (which may delete it if it empties).
    pub fn create_group(
        &mut self,
        name: impl Into<String>,
        member_ids: &[PanelId],
    ) -> Result<GroupId, GroupError> {
        let mut members: Vec<PanelId> = Vec::new();
        for &id in member_ids {
            if self.panels.contains_key(&id) && !members.contains(&id) {
                members.push(id);
            }
        }
        if members.is_empty() {
            return Err(GroupError::Empty);
        }

        for &member in &members {
            self.detach_from_groups(member);
        }

        let bounds = self.member_envelope(&members).unwrap_or_default();
        let z_index = members
            .iter()
            .map(|id| self.panels[id].z_index)
            .max()
            .unwrap_or(0);

        let id = self.alloc_group_id();
        self.groups.insert(
            id,
            Group {
                id,
                name: name.into(),
                members,
                bounds,
                locked: false,
                minimized: false,
                maintain_relative_positions: true,
                synchronize_resize: false,
                z_index,
            },
        );

        debug!("created {id}");
        Ok(id)
    }

    /// Creates a group from the current selection.
    pub fn create_group_from_selection(
        &mut self,
        name: impl Into<String>,
    ) -> Result<GroupId, GroupError> {
        let selection = self.selection.clone();
        self.create_group(name, &selection)
    }

    /// Disbands a group, leaving its members in place.
    pub fn delete_group(&mut self, id: GroupId) -> bool {
        self.groups.remove(&id).is_some()
    }

    /// The group a panel belongs to, if any.
    pub fn group_of(&self, panel: PanelId) -> Option<GroupId> {
        self.groups
            .values()
            .find(|g| g.members.contains(&panel))
            .map(|g| g.id)
    }

    /// Translates every member of a group atomically.
    ///
    /// A locked group doesn't move. Individual member `locked` flags are not
    /// consulted: the group moves as one unit. With
    /// `maintain_relative_positions` the delta is clamped against the group
    /// bounds and then tightened to the most constrained member, so member
    /// offsets survive intact and no member escapes its own position bounds;
    /// otherwise each member clamps independently.
    pub fn move_group(&mut self, id: GroupId, delta: Point) -> bool {
        let Some(group) = self.groups.get(&id) else {
            return false;
        };
        if group.locked {
            return false;
        }

        let members = group.members.clone();
        let delta = if group.maintain_relative_positions {
            let canvas = Rect::new(Point::ZERO, self.view_size);
            let bounds = group.bounds;
            let clamped_loc = clamp_position(bounds.loc + delta, bounds.size, canvas);
            let mut delta = clamped_loc - bounds.loc;
            // Every member starts in bounds, so its allowed delta interval
            // contains zero and shrinking per member keeps all earlier
            // members satisfied.
            for member in &members {
                let panel = &self.panels[member];
                let bounds = applicable_bounds(&panel.constraints, self.view_size);
                let target = clamp_position(panel.position + delta, panel.size, bounds);
                delta = target - panel.position;
            }
            delta
        } else {
            delta
        };

        // Compute all new positions before writing any, so a mid-iteration
        // failure can't leave the group half-moved.
        let mut moves: Vec<(PanelId, Point)> = Vec::with_capacity(members.len());
        for member in &members {
            let panel = &self.panels[member];
            let mut position = panel.position + delta;
            if !self.groups[&id].maintain_relative_positions {
                let bounds = applicable_bounds(&panel.constraints, self.view_size);
                position = clamp_position(position, panel.size, bounds);
            }
            moves.push((*member, position));
        }
        for (member, position) in moves {
            self.panels.get_mut(&member).unwrap().position = position;
        }

        self.recompute_group(id);
        true
    }

    /// Scales a group's members into `new_bounds`.
    ///
    /// Only active when the group has `synchronize_resize` set and isn't
    /// locked. The per-axis scale factors apply to each member's offset from
    /// the group origin and to its size. Member `aspect_ratio.locked`
    /// constraints are intentionally not re-applied during the scale; min/max
    /// sizes still clamp so the size invariant holds.
    pub fn resize_group(&mut self, id: GroupId, new_bounds: Rect) -> bool {
        let Some(group) = self.groups.get(&id) else {
            return false;
        };
        if group.locked || !group.synchronize_resize {
            return false;
        }
        if new_bounds.size.w <= 0. || new_bounds.size.h <= 0. {
            return false;
        }

        let members = group.members.clone();
        let old_bounds = group.bounds;

        for member in &members {
            let panel = &self.panels[member];
            let scaled = scale_member_rect(panel.rect(), old_bounds, new_bounds);

            let min = panel.constraints.min_size;
            let max = panel.constraints.max_size;
            let size = crate::geometry::Size::new(
                scaled.size.w.clamp(min.w, max.w),
                scaled.size.h.clamp(min.h, max.h),
            );
            let bounds = applicable_bounds(&panel.constraints, self.view_size);
            let position = clamp_position(scaled.loc, size, bounds);

            let panel = self.panels.get_mut(member).unwrap();
            panel.position = position;
            panel.size = size;
        }

        self.recompute_group(id);
        true
    }

    /// Removes a panel from whichever group holds it.
    ///
    /// Groups whose membership reaches zero are deleted, never kept empty.
    pub(crate) fn detach_from_groups(&mut self, panel: PanelId) {
        let mut emptied: Vec<GroupId> = Vec::new();
        let mut touched: Vec<GroupId> = Vec::new();

        for group in self.groups.values_mut() {
            let before = group.members.len();
            group.members.retain(|m| *m != panel);
            if group.members.len() != before {
                if group.members.is_empty() {
                    emptied.push(group.id);
                } else {
                    touched.push(group.id);
                }
            }
        }

        for id in emptied {
            debug!("{id} emptied, deleting");
            self.groups.remove(&id);
        }
        for id in touched {
            self.recompute_group(id);
        }
    }

    /// Recomputes the derived bounds of any group containing this panel.
    pub(crate) fn refresh_groups_of(&mut self, panel: PanelId) {
        let ids: Vec<GroupId> = self
            .groups
            .values()
            .filter(|g| g.members.contains(&panel))
            .map(|g| g.id)
            .collect();
        for id in ids {
            self.recompute_group(id);
        }
    }

    /// Recomputes a group's envelope bounds and z-index from its members.
    fn recompute_group(&mut self, id: GroupId) {
        let Some(group) = self.groups.get(&id) else {
            return;
        };

        let rects = group.members.iter().map(|m| self.panels[m].rect());
        let bounds = derive_bounds(rects);
        let z_index = group
            .members
            .iter()
            .map(|m| self.panels[m].z_index)
            .max()
            .unwrap_or(0);

        let group = self.groups.get_mut(&id).unwrap();
        if let Some(bounds) = bounds {
            group.bounds = bounds;
        }
        group.z_index = z_index;
    }

    /// Envelope bounds for an explicit member list.
    fn member_envelope(&self, members: &[PanelId]) -> Option<Rect> {
        derive_bounds(members.iter().map(|m| self.panels[m].rect()))
    }
}
