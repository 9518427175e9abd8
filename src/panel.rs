//! Panel records and their per-panel rules.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};

/// Unique, immutable panel identifier.
///
/// Assigned by the registry, never reused within a registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PanelId(pub(crate) u64);

impl PanelId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PanelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "panel-{}", self.0)
    }
}

/// Content type hosted by a panel.
///
/// Closed set; the rendering layer maps each kind to a widget. Legacy type
/// strings that don't match any kind fall back to [`ComponentKind::Notes`] at
/// the import boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    Todo,
    Notes,
    Calendar,
    Timer,
    Bookmarks,
    Weather,
    Rss,
    QuickLinks,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 8] = [
        ComponentKind::Todo,
        ComponentKind::Notes,
        ComponentKind::Calendar,
        ComponentKind::Timer,
        ComponentKind::Bookmarks,
        ComponentKind::Weather,
        ComponentKind::Rss,
        ComponentKind::QuickLinks,
    ];

    /// Default size for a freshly created panel of this kind.
    pub fn default_size(self) -> Size {
        match self {
            ComponentKind::Todo => Size::new(300., 400.),
            ComponentKind::Notes => Size::new(320., 280.),
            ComponentKind::Calendar => Size::new(360., 320.),
            ComponentKind::Timer => Size::new(240., 180.),
            ComponentKind::Bookmarks => Size::new(280., 360.),
            ComponentKind::Weather => Size::new(260., 200.),
            ComponentKind::Rss => Size::new(340., 420.),
            ComponentKind::QuickLinks => Size::new(280., 160.),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ComponentKind::Todo => "Todo",
            ComponentKind::Notes => "Notes",
            ComponentKind::Calendar => "Calendar",
            ComponentKind::Timer => "Timer",
            ComponentKind::Bookmarks => "Bookmarks",
            ComponentKind::Weather => "Weather",
            ComponentKind::Rss => "RSS",
            ComponentKind::QuickLinks => "Quick Links",
        }
    }

    /// Maps a legacy type string to a kind, if it is recognized.
    pub fn from_legacy_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        let kind = match name.as_str() {
            "todo" | "todos" | "tasks" | "task-list" => ComponentKind::Todo,
            "notes" | "note" | "sticky" | "sticky-note" => ComponentKind::Notes,
            "calendar" | "agenda" => ComponentKind::Calendar,
            "timer" | "pomodoro" | "stopwatch" => ComponentKind::Timer,
            "bookmarks" | "bookmark" => ComponentKind::Bookmarks,
            "weather" | "forecast" => ComponentKind::Weather,
            "rss" | "feed" | "news" => ComponentKind::Rss,
            "quick-links" | "quicklinks" | "links" => ComponentKind::QuickLinks,
            _ => return None,
        };
        Some(kind)
    }
}

/// Aspect-ratio rule: `ratio` is width divided by height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectRatio {
    pub locked: bool,
    pub ratio: f64,
}

/// Per-panel size and position rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    pub min_size: Size,
    pub max_size: Size,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatio>,
    /// Overrides the canvas as the area the panel must stay within.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_bounds: Option<Rect>,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            min_size: Size::new(120., 80.),
            max_size: Size::new(1600., 1200.),
            aspect_ratio: None,
            position_bounds: None,
        }
    }
}

/// Free-form descriptive data attached to a panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelMetadata {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Caller-supplied creation timestamp, milliseconds.
    pub created_ms: u64,
    /// Caller-supplied last-modification timestamp, milliseconds.
    pub modified_ms: u64,
}

/// A movable, resizable rectangular unit of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub id: PanelId,
    pub kind: ComponentKind,
    pub position: Point,
    pub size: Size,
    pub z_index: i32,
    pub visible: bool,
    pub locked: bool,
    pub constraints: Constraints,
    pub metadata: PanelMetadata,
    /// Creation sequence number; tie-break for equal z-indices.
    pub(crate) created_at: u64,
}

impl Panel {
    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    /// Whole-candidate validation used to gate registry writes.
    ///
    /// Checks the fields a caller can push out of range through an update:
    /// a non-empty title, size within the panel's own min/max, a coherent
    /// min/max interval, and a non-negative z-index. Position is clamped on
    /// write rather than validated, mirroring interactive moves.
    pub(crate) fn is_valid(&self) -> bool {
        let c = &self.constraints;
        if self.metadata.title.trim().is_empty() {
            return false;
        }
        if self.z_index < 0 {
            return false;
        }
        if c.min_size.w > c.max_size.w || c.min_size.h > c.max_size.h {
            return false;
        }
        self.size.w >= c.min_size.w
            && self.size.w <= c.max_size.w
            && self.size.h >= c.min_size.h
            && self.size.h <= c.max_size.h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(size: Size) -> Panel {
        Panel {
            id: PanelId(1),
            kind: ComponentKind::Notes,
            position: Point::ZERO,
            size,
            z_index: 0,
            visible: true,
            locked: false,
            constraints: Constraints::default(),
            metadata: PanelMetadata {
                title: "Notes".into(),
                ..Default::default()
            },
            created_at: 0,
        }
    }

    #[test]
    fn size_below_minimum_is_invalid() {
        assert!(!panel(Size::new(10., 10.)).is_valid());
        assert!(panel(Size::new(300., 200.)).is_valid());
    }

    #[test]
    fn empty_title_is_invalid() {
        let mut p = panel(Size::new(300., 200.));
        p.metadata.title = "  ".into();
        assert!(!p.is_valid());
    }

    #[test]
    fn negative_z_index_is_invalid() {
        let mut p = panel(Size::new(300., 200.));
        p.z_index = -1;
        assert!(!p.is_valid());
    }

    #[test]
    fn legacy_names_resolve_case_insensitively() {
        assert_eq!(
            ComponentKind::from_legacy_name("  Pomodoro "),
            Some(ComponentKind::Timer)
        );
        assert_eq!(ComponentKind::from_legacy_name("widget-9000"), None);
    }
}
