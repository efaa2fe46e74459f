use serde::Serialize;
use super::types::SlotRef;

/// Reserved code for the lunch break column; never assignable
pub const LUNCH: &str = "LUNCH";

/// Time index of the lunch break on every day
pub const LUNCH_INDEX: usize = 3;

pub const DAYS: [&str; 6] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"];

pub const TIME_LABELS: [&str; 8] = [
    "08:30 – 10:00",
    "10:05 – 11:35",
    "11:40 – 13:10",
    "13:10 – 13:15 (LUNCH)",
    "13:15 – 14:45",
    "14:50 – 16:20",
    "16:25 – 17:55",
    "18:00 – 19:30",
];

// day -> time index -> slot code
const SLOT_CODES: [[&str; 8]; 6] = [
    ["A11", "B11", "C11", LUNCH, "A21", "A14", "B21", "C21"],
    ["D11", "E11", "F11", LUNCH, "D21", "E14", "E21", "F21"],
    ["A12", "B12", "C12", LUNCH, "A22", "B14", "B22", "A24"],
    ["D12", "E12", "F12", LUNCH, "D22", "F14", "E22", "F22"],
    ["A13", "B13", "C13", LUNCH, "A23", "C14", "B23", "B24"],
    ["D13", "E13", "F13", LUNCH, "D23", "D14", "D24", "E23"],
];

/// Slot codes of one day, as sent to the planner page
#[derive(Debug, Clone, Serialize)]
pub struct DaySlots {
    pub day: &'static str,
    pub times: Vec<&'static str>,
}

/// The whole weekly table with its time labels
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotData {
    pub slots: Vec<DaySlots>,
    pub time_labels: Vec<&'static str>,
}

pub fn slot_data() -> SlotData {
    SlotData {
        slots: DAYS
            .iter()
            .zip(SLOT_CODES.iter())
            .map(|(day, codes)| DaySlots { day: *day, times: codes.to_vec() })
            .collect(),
        time_labels: TIME_LABELS.to_vec(),
    }
}

pub fn is_lunch(slot_code: &str) -> bool {
    slot_code == LUNCH
}

/// Slot code at a grid position, if the position exists
pub fn slot_code(day_index: usize, time_index: usize) -> Option<&'static str> {
    SLOT_CODES.get(day_index)?.get(time_index).copied()
}

pub fn time_label(time_index: usize) -> Option<&'static str> {
    TIME_LABELS.get(time_index).copied()
}

/// Finds where an assignable slot sits in the grid. LUNCH is never located.
pub fn locate(slot_code: &str) -> Option<SlotRef> {
    if is_lunch(slot_code) {
        return None;
    }
    for (day_index, codes) in SLOT_CODES.iter().enumerate() {
        if let Some(time_index) = codes.iter().position(|code| *code == slot_code) {
            return Some(SlotRef {
                slot_code: slot_code.to_string(),
                day: DAYS[day_index].to_string(),
                time_index,
            });
        }
    }
    None
}

/// Every assignable slot, day by day
pub fn assignable_slots() -> Vec<SlotRef> {
    DAYS.iter()
        .zip(SLOT_CODES.iter())
        .flat_map(|(day, codes)| {
            codes.iter().enumerate().filter(|(_, code)| !is_lunch(code)).map(move |(time_index, code)| SlotRef {
                slot_code: code.to_string(),
                day: day.to_string(),
                time_index,
            })
        })
        .collect()
}

pub fn total_assignable() -> usize {
    SLOT_CODES.iter().flatten().filter(|code| !is_lunch(code)).count()
}
