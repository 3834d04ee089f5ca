use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Prefix used for registry-allocated anonymous window ids.
pub const ANONYMOUS_WINDOW_ID_PREFIX: &str = "window";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for WindowId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Stacking tier of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowKind {
    #[default]
    Normal,
    Modal,
    System,
    Menu,
}

impl WindowKind {
    /// Critical windows are activated as soon as they register.
    pub fn is_critical(self) -> bool {
        matches!(self, Self::System | Self::Modal)
    }
}

/// Placement hint for layout consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowPosition {
    #[default]
    Center,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowEntry {
    pub id: WindowId,
    pub title: String,
    pub parent_id: Option<WindowId>,
    pub kind: WindowKind,
    pub closable: bool,
    pub active: bool,
    pub stack_order: u32,
    pub icon_id: Option<String>,
    pub position: WindowPosition,
}

impl WindowEntry {
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Payload a window component supplies when it mounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterWindowRequest {
    pub id: WindowId,
    pub title: String,
    pub kind: WindowKind,
    pub parent_id: Option<WindowId>,
    pub closable: bool,
    pub icon_id: Option<String>,
    pub position: WindowPosition,
    /// Explicit rank; `None` or `Some(0)` falls back to the tier default.
    pub stack_order: Option<u32>,
}

impl RegisterWindowRequest {
    pub fn new(id: impl Into<WindowId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: WindowKind::Normal,
            parent_id: None,
            closable: true,
            icon_id: None,
            position: WindowPosition::Center,
            stack_order: None,
        }
    }

    pub fn kind(mut self, kind: WindowKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn parent(mut self, parent_id: impl Into<WindowId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    pub fn icon(mut self, icon_id: impl Into<String>) -> Self {
        self.icon_id = Some(icon_id.into());
        self
    }

    pub fn position(mut self, position: WindowPosition) -> Self {
        self.position = position;
        self
    }

    pub fn stack_order(mut self, stack_order: u32) -> Self {
        self.stack_order = Some(stack_order);
        self
    }
}

/// Registration metadata for windows that do not carry a stable id of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowTemplate {
    pub title: String,
    pub kind: WindowKind,
    pub parent_id: Option<WindowId>,
    pub closable: bool,
    pub icon_id: Option<String>,
    pub position: WindowPosition,
}

impl WindowTemplate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: WindowKind::Normal,
            parent_id: None,
            closable: true,
            icon_id: None,
            position: WindowPosition::Center,
        }
    }

    pub fn into_request(self, id: WindowId) -> RegisterWindowRequest {
        RegisterWindowRequest {
            id,
            title: self.title,
            kind: self.kind,
            parent_id: self.parent_id,
            closable: self.closable,
            icon_id: self.icon_id,
            position: self.position,
            stack_order: None,
        }
    }
}

/// Snapshot of every registered window plus focus, rank, and shake bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRegistry {
    /// Entries in registration order.
    pub entries: Vec<WindowEntry>,
    pub active_id: Option<WindowId>,
    pub next_rank: u32,
    /// Shaking ids mapped to the generation of their most recent trigger.
    pub shaking: BTreeMap<WindowId, u64>,
    pub next_shake_generation: u64,
    pub next_anonymous_id: u64,
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::with_base_rank(crate::config::DEFAULT_BASE_RANK)
    }
}

impl WindowRegistry {
    pub fn with_base_rank(base_rank: u32) -> Self {
        Self {
            entries: Vec::new(),
            active_id: None,
            next_rank: base_rank,
            shaking: BTreeMap::new(),
            next_shake_generation: 1,
            next_anonymous_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, window_id: &WindowId) -> bool {
        self.entry(window_id).is_some()
    }

    pub fn entry(&self, window_id: &WindowId) -> Option<&WindowEntry> {
        self.entries.iter().find(|w| &w.id == window_id)
    }

    pub fn entry_mut(&mut self, window_id: &WindowId) -> Option<&mut WindowEntry> {
        self.entries.iter_mut().find(|w| &w.id == window_id)
    }

    pub fn top_level(&self) -> impl Iterator<Item = &WindowEntry> {
        self.entries.iter().filter(|w| w.is_top_level())
    }

    pub fn highest_stack_order(&self) -> Option<u32> {
        self.entries.iter().map(|w| w.stack_order).max()
    }

    /// Hands out a fresh `window-<n>` id that is not currently registered.
    pub fn allocate_window_id(&mut self) -> WindowId {
        loop {
            let candidate = WindowId(format!(
                "{ANONYMOUS_WINDOW_ID_PREFIX}-{}",
                self.next_anonymous_id
            ));
            self.next_anonymous_id = self.next_anonymous_id.saturating_add(1);
            if !self.contains(&candidate) {
                return candidate;
            }
        }
    }
}
