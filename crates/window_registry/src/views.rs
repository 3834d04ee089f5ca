//! Read-only projections over a [`WindowRegistry`] snapshot.

use serde::{Deserialize, Serialize};

use crate::model::{WindowEntry, WindowId, WindowRegistry};

/// A top-level window together with the submenus that name it as parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowNode {
    pub entry: WindowEntry,
    pub children: Vec<WindowEntry>,
}

/// One button in the taskbar tab strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskbarTab {
    pub id: WindowId,
    pub title: String,
    pub icon_id: Option<String>,
    pub active: bool,
}

impl WindowRegistry {
    pub fn is_shaking(&self, window_id: &WindowId) -> bool {
        self.shaking.contains_key(window_id)
    }

    pub fn active_entry(&self) -> Option<&WindowEntry> {
        self.active_id.as_ref().and_then(|id| self.entry(id))
    }

    /// Top-level windows in registration order, each with its children.
    ///
    /// Children whose parent is not registered are left out.
    pub fn window_tree(&self) -> Vec<WindowNode> {
        self.top_level()
            .map(|parent| WindowNode {
                entry: parent.clone(),
                children: self
                    .entries
                    .iter()
                    .filter(|child| child.parent_id.as_ref() == Some(&parent.id))
                    .cloned()
                    .collect(),
            })
            .collect()
    }

    /// Window ids back-to-front. Equal ranks keep registration order.
    pub fn paint_order(&self) -> Vec<WindowId> {
        let mut ordered: Vec<&WindowEntry> = self.entries.iter().collect();
        ordered.sort_by_key(|entry| entry.stack_order);
        ordered.into_iter().map(|entry| entry.id.clone()).collect()
    }

    pub fn taskbar_tabs(&self) -> Vec<TaskbarTab> {
        self.top_level()
            .map(|entry| TaskbarTab {
                id: entry.id.clone(),
                title: entry.title.clone(),
                icon_id: entry.icon_id.clone(),
                active: entry.active,
            })
            .collect()
    }
}
