use chrono::Utc;
use tracing::{debug, info, warn};

use super::slots::is_lunch;
use super::types::{Assignment, FacultyUpdate, SlotRef};
use crate::storage::{migrate, LocalStorage};

/// Name of the storage entry holding the saved assignment list
pub const STORAGE_KEY: &str = "ffcs-assignments";

/// Owns the slot -> faculty assignments and writes the full list back to
/// storage after every change.
///
/// At most one record exists per slot code, and no record is ever stored
/// for LUNCH.
pub struct AssignmentStore<S: LocalStorage> {
    storage: S,
    assignments: Vec<Assignment>,
}

impl<S: LocalStorage> AssignmentStore<S> {
    /// Loads the saved list, or starts empty when there is none or it
    /// cannot be read.
    pub fn open(storage: S) -> Self {
        let assignments = match storage.get_item(STORAGE_KEY) {
            Ok(Some(raw)) => migrate::load_assignments(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "could not read saved assignments, starting empty");
                Vec::new()
            }
        };
        info!(count = assignments.len(), "loaded assignments");
        Self { storage, assignments }
    }

    pub fn get_assignment(&self, slot_code: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.slot_code == slot_code)
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Applies one update to every slot of a batch.
    ///
    /// A batch of more than one slot shares a fresh group id; single-slot
    /// batches get none. The list is written back even when nothing changed.
    pub fn apply_assignment(&mut self, slots: &[SlotRef], update: FacultyUpdate) {
        let group_id = if slots.len() > 1 { self.next_group_id() } else { String::new() };
        let update = match update {
            FacultyUpdate::Add(names) if names.is_empty() => FacultyUpdate::ClearFaculty,
            other => other,
        };

        for slot in slots {
            if is_lunch(&slot.slot_code) {
                debug!("skipping LUNCH in batch");
                continue;
            }
            let existing = self.assignments.iter().position(|a| a.slot_code == slot.slot_code);

            match (&update, existing) {
                (FacultyUpdate::ClearAssignment, Some(index)) => {
                    self.assignments.remove(index);
                }
                (FacultyUpdate::ClearAssignment, None) => {}
                (FacultyUpdate::ClearFaculty, Some(index)) => {
                    self.assignments[index].faculty_names.clear();
                }
                (FacultyUpdate::ClearFaculty, None) => {
                    // An empty record still carries the batch's group id
                    self.assignments.push(Assignment::new(slot, Vec::new(), &group_id));
                }
                (FacultyUpdate::Add(names), Some(index)) => {
                    let assignment = &mut self.assignments[index];
                    assignment.faculty_names = merge_names(&assignment.faculty_names, names);
                    if assignment.group_id.is_empty() {
                        assignment.group_id = group_id.clone();
                    }
                }
                (FacultyUpdate::Add(names), None) => {
                    self.assignments.push(Assignment::new(slot, merge_names(&[], names), &group_id));
                }
            }
        }

        debug!(slots = slots.len(), group_id = %group_id, "applied batch");
        self.persist();
    }

    /// Removes one faculty member from a slot. When that slot's record
    /// belongs to a batch group the name is removed from every record in
    /// the group. Records left with no faculty are deleted.
    pub fn remove_faculty(&mut self, faculty_name: &str, slot_code: &str) {
        let Some(target) = self
            .assignments
            .iter()
            .find(|a| a.slot_code == slot_code && a.contains(faculty_name))
        else {
            debug!(faculty = faculty_name, slot = slot_code, "faculty not in slot");
            return;
        };
        let group_id = target.group_id.clone();

        for assignment in &mut self.assignments {
            let affected = if group_id.is_empty() {
                assignment.slot_code == slot_code
            } else {
                assignment.group_id == group_id
            };
            if affected {
                assignment.faculty_names.retain(|name| name != faculty_name);
            }
        }
        self.assignments.retain(Assignment::has_faculty);

        debug!(faculty = faculty_name, slot = slot_code, group_id = %group_id, "removed faculty");
        self.persist();
    }

    /// Removes one faculty member from each listed slot in turn
    pub fn remove_faculty_from_slots(&mut self, faculty_name: &str, slot_codes: &[String]) {
        for slot_code in slot_codes {
            self.remove_faculty(faculty_name, slot_code);
        }
    }

    pub fn clear_all(&mut self) {
        self.assignments.clear();
        info!("cleared all assignments");
        self.persist();
    }

    // Millisecond timestamp, bumped past any id already in use
    fn next_group_id(&self) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        while self.assignments.iter().any(|a| a.group_id == candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }

    fn persist(&mut self) {
        let json = match serde_json::to_string(&self.assignments) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "could not serialize assignments");
                return;
            }
        };
        if let Err(e) = self.storage.set_item(STORAGE_KEY, &json) {
            warn!(error = %e, "could not save assignments");
        }
    }
}

/// Union of two name lists: existing names first, then new ones in order,
/// with every duplicate dropped.
fn merge_names(existing: &[String], new: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(existing.len() + new.len());
    for name in existing.iter().chain(new) {
        if !merged.contains(name) {
            merged.push(name.clone());
        }
    }
    merged
}
