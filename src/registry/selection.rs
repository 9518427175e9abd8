//! Selection set and clipboard.

use super::PanelRegistry;
use crate::panel::{Panel, PanelId};

impl PanelRegistry {
    /// Adds a panel to the selection. No-op if already selected.
    pub fn select(&mut self, id: PanelId) -> bool {
        if !self.panels.contains_key(&id) {
            return false;
        }
        if !self.selection.contains(&id) {
            self.selection.push(id);
        }
        true
    }

    pub fn deselect(&mut self, id: PanelId) {
        self.selection.retain(|sel| *sel != id);
    }

    pub fn toggle_selected(&mut self, id: PanelId) -> bool {
        if self.selection.contains(&id) {
            self.deselect(id);
            false
        } else {
            self.select(id)
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_selected(&self, id: PanelId) -> bool {
        self.selection.contains(&id)
    }

    /// Selected panels in selection order.
    pub fn selected_panels(&self) -> Vec<&Panel> {
        self.selection.iter().map(|id| &self.panels[id]).collect()
    }

    pub fn selected_ids(&self) -> &[PanelId] {
        &self.selection
    }

    /// Snapshots the current selection into the clipboard.
    ///
    /// The clipboard holds deep copies in selection order; later mutations of
    /// the live panels don't affect it. Returns the number of panels copied.
    pub fn copy_selection(&mut self) -> usize {
        self.clipboard = self
            .selection
            .iter()
            .map(|id| self.panels[id].clone())
            .collect();
        self.clipboard.len()
    }

    /// Pastes the clipboard as new independent panels.
    ///
    /// Each pasted panel gets a fresh id, a free position offset from the
    /// source, and lands on top of the stack. The pasted panels become the
    /// new selection. Returns the new ids in clipboard order.
    pub fn paste(&mut self, now_ms: u64) -> Vec<PanelId> {
        let snapshots = self.clipboard.clone();
        let mut pasted = Vec::with_capacity(snapshots.len());

        for snapshot in snapshots {
            let position =
                self.find_free_position_near(snapshot.position, snapshot.size, None);
            let id = self.alloc_panel_id();
            let created_at = self.next_seq();
            let z_index = self.panels().map(|p| p.z_index).max().map_or(0, |z| z + 1);

            let mut panel = snapshot;
            panel.id = id;
            panel.position = position;
            panel.z_index = z_index;
            panel.created_at = created_at;
            panel.metadata.created_ms = now_ms;
            panel.metadata.modified_ms = now_ms;

            self.insert_panel(panel);
            pasted.push(id);
        }

        self.selection = pasted.clone();
        pasted
    }

    pub fn clipboard_len(&self) -> usize {
        self.clipboard.len()
    }
}
