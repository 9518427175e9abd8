//! Stacking-order operations.
//!
//! Stacking is a total order over integer z-indices. Operations here may
//! temporarily produce duplicate z-indices (e.g. after an import); the
//! explicit [`normalize_z_order`](PanelRegistry::normalize_z_order) pass
//! resolves them, preserving the relative order of previously-distinct
//! panels.

use super::PanelRegistry;
use crate::panel::PanelId;

impl PanelRegistry {
    /// Raises a panel above every other panel.
    pub fn bring_to_front(&mut self, id: PanelId) -> bool {
        if !self.panels.contains_key(&id) {
            return false;
        }
        let top = self.panels.values().map(|p| p.z_index).max().unwrap_or(0);
        let panel = self.panels.get_mut(&id).unwrap();
        panel.z_index = top + 1;
        true
    }

    /// Lowers a panel below every other panel.
    ///
    /// The z-index may go negative; only relative order matters, and a
    /// normalize pass folds everything back to a dense non-negative range.
    pub fn send_to_back(&mut self, id: PanelId) -> bool {
        if !self.panels.contains_key(&id) {
            return false;
        }
        let bottom = self.panels.values().map(|p| p.z_index).min().unwrap_or(0);
        let panel = self.panels.get_mut(&id).unwrap();
        panel.z_index = bottom - 1;
        true
    }

    /// Swaps the panel's z-index with its next neighbor in sorted order.
    pub fn step_forward(&mut self, id: PanelId) -> bool {
        self.step(id, true)
    }

    /// Swaps the panel's z-index with its previous neighbor in sorted order.
    pub fn step_backward(&mut self, id: PanelId) -> bool {
        self.step(id, false)
    }

    fn step(&mut self, id: PanelId, forwards: bool) -> bool {
        let sorted = self.z_sorted_ids();
        let Some(idx) = sorted.iter().position(|sid| *sid == id) else {
            return false;
        };

        let neighbor_idx = if forwards {
            idx + 1
        } else if idx > 0 {
            idx - 1
        } else {
            return false;
        };
        let Some(&neighbor) = sorted.get(neighbor_idx) else {
            return false;
        };

        let z_a = self.panels[&id].z_index;
        let z_b = self.panels[&neighbor].z_index;
        self.panels.get_mut(&id).unwrap().z_index = z_b;
        self.panels.get_mut(&neighbor).unwrap().z_index = z_a;
        true
    }

    /// Panels sharing a z-index with at least one other panel.
    ///
    /// Duplicates can arise from concurrent creates at the import boundary;
    /// they are resolved by [`normalize_z_order`](Self::normalize_z_order).
    pub fn z_conflicts(&self) -> Vec<PanelId> {
        let mut counts = std::collections::HashMap::new();
        for panel in self.panels.values() {
            *counts.entry(panel.z_index).or_insert(0usize) += 1;
        }

        let mut conflicted: Vec<PanelId> = self
            .panels
            .values()
            .filter(|p| counts[&p.z_index] > 1)
            .map(|p| p.id)
            .collect();
        conflicted.sort();
        conflicted
    }

    /// Renumbers z-indices densely to `0..n-1`.
    ///
    /// Stable sort by `(z_index, created_at)`, so previously-distinct panels
    /// keep their relative order and ties break by creation order.
    /// Idempotent.
    pub fn normalize_z_order(&mut self) {
        let sorted = self.z_sorted_ids();
        for (z, id) in sorted.into_iter().enumerate() {
            self.panels.get_mut(&id).unwrap().z_index = z as i32;
        }
    }

    fn z_sorted_ids(&self) -> Vec<PanelId> {
        let mut ids: Vec<PanelId> = self.order.clone();
        ids.sort_by_key(|id| {
            let p = &self.panels[id];
            (p.z_index, p.created_at)
        });
        ids
    }
}
