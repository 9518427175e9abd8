//! Legacy workspace import boundary.
//!
//! Older releases (and the browser-extension builds) persisted panels in a
//! number of loosely-shaped JSON layouts. This module turns any of them into
//! validated panel records with an explicit warning list. Unknown panel type
//! strings map to a best-effort default kind with a warning; malformed
//! entries are skipped with a warning. Import never hard-fails.

use serde_json::Value;
use tracing::warn;

use crate::geometry::{Point, Size};
use crate::panel::{ComponentKind, PanelId};
use crate::registry::{CreateOptions, PanelRegistry};

/// Kind assigned to legacy entries whose type string isn't recognized.
pub const FALLBACK_KIND: ComponentKind = ComponentKind::Notes;

/// One extracted legacy panel, not yet admitted to a registry.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyPanelRecord {
    pub kind: ComponentKind,
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub title: Option<String>,
    pub visible: bool,
    pub locked: bool,
    pub tags: Vec<String>,
}

/// Result of a legacy import: best-effort records plus warnings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyImport {
    pub records: Vec<LegacyPanelRecord>,
    pub warnings: Vec<String>,
}

/// Extracts panel records from an arbitrary legacy JSON shape.
///
/// Accepts either a bare array of panel objects or an object with a `panels`
/// array. Every coercion that loses information pushes a warning rather than
/// silently guessing.
pub fn import_legacy(value: &Value) -> LegacyImport {
    let mut import = LegacyImport::default();

    let entries = match value {
        Value::Array(entries) => entries.as_slice(),
        Value::Object(map) => match map.get("panels") {
            Some(Value::Array(entries)) => entries.as_slice(),
            Some(other) => {
                import
                    .warnings
                    .push(format!("`panels` is not an array (got {})", kind_name(other)));
                return import;
            }
            None => {
                import
                    .warnings
                    .push("object has no `panels` array".to_string());
                return import;
            }
        },
        other => {
            import
                .warnings
                .push(format!("unsupported legacy payload (got {})", kind_name(other)));
            return import;
        }
    };

    for (idx, entry) in entries.iter().enumerate() {
        match extract_record(entry, idx, &mut import.warnings) {
            Some(record) => import.records.push(record),
            None => {
                import.warnings.push(format!("skipped entry {idx}: not a panel object"));
            }
        }
    }

    for warning in &import.warnings {
        warn!("legacy import: {warning}");
    }

    import
}

fn extract_record(entry: &Value, idx: usize, warnings: &mut Vec<String>) -> Option<LegacyPanelRecord> {
    let obj = entry.as_object()?;

    let kind = match obj
        .get("type")
        .or_else(|| obj.get("kind"))
        .or_else(|| obj.get("componentType"))
        .and_then(Value::as_str)
    {
        Some(name) => ComponentKind::from_legacy_name(name).unwrap_or_else(|| {
            warnings.push(format!(
                "entry {idx}: unknown panel type {name:?}, defaulting to {FALLBACK_KIND:?}"
            ));
            FALLBACK_KIND
        }),
        None => {
            warnings.push(format!(
                "entry {idx}: missing panel type, defaulting to {FALLBACK_KIND:?}"
            ));
            FALLBACK_KIND
        }
    };

    let position = point_of(obj.get("position")).or_else(|| {
        match (number_of(obj.get("x")), number_of(obj.get("y"))) {
            (Some(x), Some(y)) => Some(Point::new(x, y)),
            _ => None,
        }
    });

    let size = size_of(obj.get("size")).or_else(|| {
        match (number_of(obj.get("width")), number_of(obj.get("height"))) {
            (Some(w), Some(h)) => Some(Size::new(w, h)),
            _ => None,
        }
    });

    let title = obj
        .get("title")
        .or_else(|| obj.get("name"))
        .and_then(Value::as_str)
        .map(str::to_string);

    let tags = obj
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Some(LegacyPanelRecord {
        kind,
        position,
        size,
        title,
        visible: obj.get("visible").and_then(Value::as_bool).unwrap_or(true),
        locked: obj.get("locked").and_then(Value::as_bool).unwrap_or(false),
        tags,
    })
}

fn point_of(value: Option<&Value>) -> Option<Point> {
    let obj = value?.as_object()?;
    Some(Point::new(
        number_of(obj.get("x"))?,
        number_of(obj.get("y"))?,
    ))
}

fn size_of(value: Option<&Value>) -> Option<Size> {
    let obj = value?.as_object()?;
    let w = number_of(obj.get("width")).or_else(|| number_of(obj.get("w")))?;
    let h = number_of(obj.get("height")).or_else(|| number_of(obj.get("h")))?;
    Some(Size::new(w, h))
}

fn number_of(value: Option<&Value>) -> Option<f64> {
    let value = value?;
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
        .filter(|n| n.is_finite())
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl PanelRegistry {
    /// Admits extracted legacy records into the registry.
    ///
    /// Each record goes through the normal create path, so panel invariants
    /// hold on every accepted record (sizes clamp, positions clamp or come
    /// from the placement probe). Records missing a visibility/lock state
    /// already defaulted at extraction. Returns the new ids in record order.
    pub fn adopt_legacy(&mut self, import: &LegacyImport, now_ms: u64) -> Vec<PanelId> {
        let mut ids = Vec::with_capacity(import.records.len());

        for record in &import.records {
            let id = self.create(
                record.kind,
                CreateOptions {
                    position: record.position,
                    size: record.size,
                    title: record.title.clone(),
                    tags: record.tags.clone(),
                    now_ms,
                    ..Default::default()
                },
            );
            if !record.visible {
                self.bulk(&[id], crate::registry::BulkOp::Hide);
            }
            if record.locked {
                self.bulk(&[id], crate::registry::BulkOp::Lock);
            }
            ids.push(id);
        }

        ids
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::registry::LayoutOptions;

    #[test]
    fn bare_arrays_and_wrapped_objects_both_parse() {
        let bare = json!([{ "type": "todo", "x": 10, "y": 20 }]);
        let wrapped = json!({ "panels": [{ "type": "todo", "x": 10, "y": 20 }] });

        assert_eq!(import_legacy(&bare).records, import_legacy(&wrapped).records);
        assert_eq!(import_legacy(&bare).records.len(), 1);
    }

    #[test]
    fn unknown_type_defaults_with_a_warning() {
        let payload = json!({ "panels": [{ "type": "crypto-ticker", "x": 0, "y": 0 }] });
        let import = import_legacy(&payload);

        assert_eq!(import.records.len(), 1);
        assert_eq!(import.records[0].kind, FALLBACK_KIND);
        assert!(import.warnings.iter().any(|w| w.contains("crypto-ticker")));
    }

    #[test]
    fn malformed_entries_are_skipped_not_fatal() {
        let payload = json!({ "panels": [
            42,
            { "type": "timer", "position": { "x": 5, "y": 6 }, "size": { "w": 200, "h": 150 } },
            "nope",
        ]});
        let import = import_legacy(&payload);

        assert_eq!(import.records.len(), 1);
        assert_eq!(import.records[0].kind, ComponentKind::Timer);
        assert_eq!(import.records[0].position, Some(Point::new(5., 6.)));
        assert_eq!(import.records[0].size, Some(Size::new(200., 150.)));
        assert_eq!(import.warnings.len(), 2);
    }

    #[test]
    fn numeric_strings_and_flags_coerce() {
        let payload = json!([{
            "kind": "weather",
            "x": "120", "y": "80",
            "width": 260, "height": 200,
            "name": "Outside",
            "visible": false,
            "locked": true,
            "tags": ["home", 3],
        }]);
        let import = import_legacy(&payload);
        let record = &import.records[0];

        assert_eq!(record.kind, ComponentKind::Weather);
        assert_eq!(record.position, Some(Point::new(120., 80.)));
        assert_eq!(record.title.as_deref(), Some("Outside"));
        assert!(!record.visible);
        assert!(record.locked);
        assert_eq!(record.tags, vec!["home".to_string()]);
    }

    #[test]
    fn adopted_records_satisfy_panel_invariants() {
        let payload = json!({ "panels": [
            { "type": "notes", "x": -999, "y": 99999, "width": 1, "height": 1 },
            { "type": "mystery" },
        ]});
        let import = import_legacy(&payload);

        let mut reg = PanelRegistry::new(Size::new(1920., 1080.), LayoutOptions::default());
        let ids = reg.adopt_legacy(&import, 0);
        assert_eq!(ids.len(), 2);
        reg.verify_invariants();

        // The tiny out-of-bounds entry clamped up to the minimum size.
        let panel = reg.panel(ids[0]).unwrap();
        assert_eq!(panel.size, Size::new(120., 80.));
    }
}
