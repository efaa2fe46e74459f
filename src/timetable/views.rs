use serde::Serialize;

use super::slots::{self, is_lunch, DAYS, TIME_LABELS};
use super::types::Assignment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    Lunch,
    Available,
    Assigned,
    /// Assigned, but filtered out of an available-only view
    Hidden,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    pub slot_code: String,
    pub day: String,
    pub state: CellState,
    pub faculty_names: Vec<String>,
    pub initials: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRow {
    pub time_index: usize,
    pub time_label: String,
    pub cells: Vec<GridCell>,
}

/// Faculty members that occupy exactly the same set of slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyGroup {
    pub slot_codes: Vec<String>,
    pub faculty_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultySlots {
    pub faculty_name: String,
    pub slot_codes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub assigned: usize,
    pub available: usize,
}

fn find<'a>(assignments: &'a [Assignment], slot_code: &str) -> Option<&'a Assignment> {
    assignments.iter().find(|a| a.slot_code == slot_code)
}

/// Up to two uppercase initials, one per space-separated word
pub fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|word| word.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

/// One row per time index, one cell per day
pub fn grid(assignments: &[Assignment], available_only: bool) -> Vec<GridRow> {
    TIME_LABELS
        .iter()
        .enumerate()
        .map(|(time_index, label)| {
            let cells = DAYS
                .iter()
                .enumerate()
                .filter_map(|(day_index, day)| {
                    let code = slots::slot_code(day_index, time_index)?;
                    Some(grid_cell(assignments, code, day, available_only))
                })
                .collect();
            GridRow { time_index, time_label: label.to_string(), cells }
        })
        .collect()
}

fn grid_cell(assignments: &[Assignment], code: &str, day: &str, available_only: bool) -> GridCell {
    let faculty = find(assignments, code)
        .filter(|a| a.has_faculty())
        .map(|a| a.faculty_names.clone())
        .unwrap_or_default();

    let state = if is_lunch(code) {
        CellState::Lunch
    } else if faculty.is_empty() {
        CellState::Available
    } else if available_only {
        CellState::Hidden
    } else {
        CellState::Assigned
    };

    let faculty_names = if state == CellState::Assigned { faculty } else { Vec::new() };
    GridCell {
        slot_code: code.to_string(),
        day: day.to_string(),
        state,
        initials: faculty_names.iter().map(|name| initials(name)).collect(),
        faculty_names,
    }
}

/// Each faculty member with the distinct slots holding them, in order of
/// first appearance.
pub fn faculty_overview(assignments: &[Assignment]) -> Vec<FacultySlots> {
    let mut overview: Vec<FacultySlots> = Vec::new();
    for assignment in assignments {
        for name in &assignment.faculty_names {
            let position = match overview.iter().position(|f| &f.faculty_name == name) {
                Some(position) => position,
                None => {
                    overview.push(FacultySlots { faculty_name: name.clone(), slot_codes: Vec::new() });
                    overview.len() - 1
                }
            };
            let entry = &mut overview[position];
            if !entry.slot_codes.contains(&assignment.slot_code) {
                entry.slot_codes.push(assignment.slot_code.clone());
            }
        }
    }
    overview
}

/// Groups faculty members whose sorted slot sets are identical
pub fn faculty_by_slot_combination(assignments: &[Assignment]) -> Vec<FacultyGroup> {
    let mut groups: Vec<FacultyGroup> = Vec::new();
    for FacultySlots { faculty_name, mut slot_codes } in faculty_overview(assignments) {
        slot_codes.sort();
        match groups.iter_mut().find(|g| g.slot_codes == slot_codes) {
            Some(group) => group.faculty_names.push(faculty_name),
            None => groups.push(FacultyGroup { slot_codes, faculty_names: vec![faculty_name] }),
        }
    }
    groups
}

/// Slot counters. Every stored record counts as assigned, including
/// records left with no faculty.
pub fn summary(assignments: &[Assignment]) -> Summary {
    let total = slots::total_assignable();
    let assigned = assignments.len();
    Summary { total, assigned, available: total.saturating_sub(assigned) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::locate;

    fn assignment(code: &str, faculty: &[&str], group_id: &str) -> Assignment {
        let slot = locate(code).unwrap();
        Assignment::new(&slot, faculty.iter().map(|s| s.to_string()).collect(), group_id)
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Dr. Anita Rao"), "DA");
        assert_eq!(initials("kumar"), "K");
        assert_eq!(initials("a  b"), "AB");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_grid_states() {
        let assignments = vec![assignment("A11", &["Dr. A"], ""), assignment("B11", &[], "")];
        let rows = grid(&assignments, false);
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].cells.len(), 6);
        assert_eq!(rows[0].cells[0].state, CellState::Assigned);
        assert_eq!(rows[0].cells[0].initials, vec!["DA"]);
        assert_eq!(rows[1].cells[0].state, CellState::Available);
        assert!(rows[3].cells.iter().all(|c| c.state == CellState::Lunch));
    }

    #[test]
    fn test_available_only_hides_assigned() {
        let assignments = vec![assignment("A11", &["Dr. A"], "")];
        let rows = grid(&assignments, true);
        assert_eq!(rows[0].cells[0].state, CellState::Hidden);
        assert!(rows[0].cells[0].faculty_names.is_empty());
        assert_eq!(rows[0].cells[1].state, CellState::Available);
        assert!(rows[3].cells.iter().all(|c| c.state == CellState::Lunch));
    }

    #[test]
    fn test_faculty_by_slot_combination() {
        let assignments = vec![
            assignment("B11", &["Dr. A", "Dr. B"], "1"),
            assignment("A11", &["Dr. A", "Dr. B", "Dr. C"], "1"),
        ];
        let groups = faculty_by_slot_combination(&assignments);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].slot_codes, vec!["A11", "B11"]);
        assert_eq!(groups[0].faculty_names, vec!["Dr. A", "Dr. B"]);
        assert_eq!(groups[1].slot_codes, vec!["A11"]);
        assert_eq!(groups[1].faculty_names, vec!["Dr. C"]);
    }

    #[test]
    fn test_summary_counts_records() {
        let assignments = vec![assignment("A11", &["Dr. A"], ""), assignment("B11", &[], "")];
        let s = summary(&assignments);
        assert_eq!(s, Summary { total: 42, assigned: 2, available: 40 });
    }
}
