use serde::{Deserialize, Serialize};

/// Position of one assignable slot in the weekly grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRef {
    pub slot_code: String,
    pub day: String,
    pub time_index: usize,
}

/// Faculty bound to one slot. `day` and `time_index` are copies of the
/// slot's position, kept for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub slot_code: String,
    pub day: String,
    pub time_index: usize,
    pub faculty_names: Vec<String>,
    #[serde(default)]
    pub group_id: String,
}

impl Assignment {
    pub fn new(slot: &SlotRef, faculty_names: Vec<String>, group_id: &str) -> Self {
        Self {
            slot_code: slot.slot_code.clone(),
            day: slot.day.clone(),
            time_index: slot.time_index,
            faculty_names,
            group_id: group_id.to_string(),
        }
    }

    pub fn has_faculty(&self) -> bool {
        !self.faculty_names.is_empty()
    }

    pub fn contains(&self, faculty_name: &str) -> bool {
        self.faculty_names.iter().any(|name| name == faculty_name)
    }
}

/// What a batch operation does to each slot it touches
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacultyUpdate {
    /// Delete the slot's assignment entirely
    ClearAssignment,
    /// Keep the slot's assignment but drop all of its faculty
    ClearFaculty,
    /// Union these names into the slot's faculty
    Add(Vec<String>),
}

impl FacultyUpdate {
    /// Maps the wire shape (absent / empty list / names) onto an update
    pub fn from_names(names: Option<Vec<String>>) -> Self {
        match names {
            None => FacultyUpdate::ClearAssignment,
            Some(names) if names.is_empty() => FacultyUpdate::ClearFaculty,
            Some(names) => FacultyUpdate::Add(names),
        }
    }
}
