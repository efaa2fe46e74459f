//! Reads saved assignment lists, including the older format that stored a
//! single `facultyName` string per slot instead of a `facultyNames` list.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::timetable::slots::{is_lunch, locate};
use crate::timetable::Assignment;

/// A saved record as it may appear on disk, before normalization. Only
/// `slotCode` must be a string; every other field is coerced.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredAssignment {
    slot_code: String,
    #[serde(default)]
    day: Value,
    #[serde(default)]
    time_index: Value,
    #[serde(default)]
    faculty_names: Value,
    // Legacy single-name field
    #[serde(default)]
    faculty_name: Value,
    #[serde(default)]
    group_id: Value,
}

impl StoredAssignment {
    fn into_assignment(self) -> Assignment {
        let faculty_names = normalize_faculty_names(&self.faculty_names, &self.faculty_name);
        let position = locate(&self.slot_code);
        let day = match self.day {
            Value::String(day) => day,
            _ => position.as_ref().map(|slot| slot.day.clone()).unwrap_or_default(),
        };
        let time_index = coerce_time_index(&self.time_index)
            .or_else(|| position.as_ref().map(|slot| slot.time_index))
            .unwrap_or(0);
        Assignment {
            slot_code: self.slot_code,
            day,
            time_index,
            faculty_names,
            group_id: coerce_group_id(&self.group_id),
        }
    }
}

fn coerce_time_index(value: &Value) -> Option<usize> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Strings are kept, numbers become their decimal text, anything else is
/// treated as ungrouped.
fn coerce_group_id(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Keeps `facultyNames` when it is a list, else wraps a legacy
/// `facultyName` string, else yields nothing.
fn normalize_faculty_names(faculty_names: &Value, faculty_name: &Value) -> Vec<String> {
    match (faculty_names, faculty_name) {
        (Value::Array(items), _) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        (_, Value::String(name)) => vec![name.clone()],
        _ => Vec::new(),
    }
}

/// Parses a saved assignment list. Unreadable input gives an empty list.
/// Records without a string `slotCode`, or saved for LUNCH, are skipped.
pub fn load_assignments(raw: &str) -> Vec<Assignment> {
    let records = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(records)) => records,
        Ok(_) => {
            warn!("saved assignments are not a list, starting empty");
            return Vec::new();
        }
        Err(e) => {
            warn!(error = %e, "could not parse saved assignments, starting empty");
            return Vec::new();
        }
    };

    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<StoredAssignment>(record) {
            Ok(stored) if is_lunch(&stored.slot_code) => {
                warn!("dropping saved assignment for LUNCH");
                None
            }
            Ok(stored) => Some(stored.into_assignment()),
            Err(e) => {
                warn!(error = %e, "dropping unreadable saved assignment");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_format_kept_as_is() {
        let raw = r#"[{"slotCode":"A11","day":"Monday","timeIndex":0,"facultyNames":["Dr. A","Dr. B"],"groupId":"42"}]"#;
        let loaded = load_assignments(raw);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].faculty_names, vec!["Dr. A", "Dr. B"]);
        assert_eq!(loaded[0].group_id, "42");
    }

    #[test]
    fn test_legacy_single_name() {
        let raw = r#"[{"slotCode":"B11","day":"Monday","timeIndex":1,"facultyName":"Dr. Legacy"}]"#;
        let loaded = load_assignments(raw);
        assert_eq!(loaded[0].faculty_names, vec!["Dr. Legacy"]);
        assert_eq!(loaded[0].group_id, "");
    }

    #[test]
    fn test_list_wins_over_legacy_field() {
        let raw = r#"[{"slotCode":"B11","day":"Monday","timeIndex":1,"facultyNames":[],"facultyName":"Dr. Old"}]"#;
        assert!(load_assignments(raw)[0].faculty_names.is_empty());
    }

    #[test]
    fn test_missing_names_default_to_empty() {
        let raw = r#"[{"slotCode":"C11","day":"Monday","timeIndex":2,"facultyName":7}]"#;
        assert!(load_assignments(raw)[0].faculty_names.is_empty());
    }

    #[test]
    fn test_corrupt_input_is_empty() {
        assert!(load_assignments("{not json").is_empty());
        assert!(load_assignments(r#"{"slotCode":"A11"}"#).is_empty());
        assert!(load_assignments("").is_empty());
    }

    #[test]
    fn test_numeric_group_id_is_kept_as_text() {
        let raw = r#"[{"slotCode":"A11","day":"Monday","timeIndex":0,"facultyNames":["Dr. A"],"groupId":1700000000000}]"#;
        let loaded = load_assignments(raw);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].group_id, "1700000000000");
        assert_eq!(loaded[0].faculty_names, vec!["Dr. A"]);
    }

    #[test]
    fn test_odd_group_id_loads_ungrouped() {
        let raw = r#"[{"slotCode":"A11","facultyNames":["Dr. A"],"groupId":{"x":1}},{"slotCode":"B11","facultyNames":["Dr. B"],"groupId":true}]"#;
        let loaded = load_assignments(raw);
        assert_eq!(loaded.len(), 2);
        assert!(loaded.iter().all(|a| a.group_id.is_empty()));
    }

    #[test]
    fn test_string_time_index_is_parsed() {
        let raw = r#"[{"slotCode":"B11","day":"Monday","timeIndex":"1","facultyNames":["Dr. B"],"groupId":""}]"#;
        let loaded = load_assignments(raw);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].time_index, 1);
        assert_eq!(loaded[0].faculty_names, vec!["Dr. B"]);
    }

    #[test]
    fn test_unusable_position_falls_back_to_table() {
        let raw = r#"[{"slotCode":"E14","day":5,"timeIndex":-2,"facultyNames":["Dr. E"]},{"slotCode":"X99","timeIndex":1.5,"facultyNames":["Dr. X"]}]"#;
        let loaded = load_assignments(raw);
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].day, "Tuesday");
        assert_eq!(loaded[0].time_index, 5);
        assert_eq!(loaded[1].day, "");
        assert_eq!(loaded[1].time_index, 0);
    }

    #[test]
    fn test_bad_records_are_skipped() {
        let raw = r#"[{"day":"Monday"},{"slotCode":7,"facultyNames":["y"]},{"slotCode":"LUNCH","facultyNames":["x"]},{"slotCode":"A11","facultyNames":["Dr. A"],"groupId":null}]"#;
        let loaded = load_assignments(raw);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].slot_code, "A11");
        assert_eq!(loaded[0].group_id, "");
    }
}
