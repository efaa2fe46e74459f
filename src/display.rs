use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use crate::error::Result;
use crate::timetable::slots::{time_label, DAYS};
use crate::timetable::views::{grid, summary, CellState, GridCell};
use crate::timetable::Assignment;

const LABEL_WIDTH: usize = 22;
const CELL_WIDTH: usize = 16;

fn format_cell(cell: &GridCell) -> String {
    match cell.state {
        CellState::Assigned => format!("{}[{}]", cell.slot_code, cell.initials.join(",")),
        _ => cell.slot_code.clone(),
    }
}

/// Renders the weekly grid as text: a header row of days, then one line per
/// time label. Assigned slots show as `CODE[INITIALS]`, e.g. `A11[DA,PK]`.
pub fn render_timetable(assignments: &[Assignment]) -> String {
    let mut out = String::new();
    out.push_str("** FFCS Timetable **\n");

    out.push_str(&format!("{:<width$}", "Time", width = LABEL_WIDTH));
    for day in DAYS {
        out.push_str(&format!("| {:<width$}", day, width = CELL_WIDTH));
    }
    out.push('\n');

    for row in grid(assignments, false) {
        out.push_str(&format!("{:<width$}", row.time_label, width = LABEL_WIDTH));
        for cell in &row.cells {
            out.push_str(&format!("| {:<width$}", format_cell(cell), width = CELL_WIDTH));
        }
        out.push('\n');
    }
    out
}

/// Writes the rendered timetable to a file
pub fn write_timetable_to_file<P: AsRef<Path>>(assignments: &[Assignment], path: P) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(render_timetable(assignments).as_bytes())?;
    Ok(())
}

/// Prints the timetable followed by the slot counters and every assignment
pub fn print_timetable(assignments: &[Assignment]) {
    print!("{}", render_timetable(assignments));

    let counts = summary(assignments);
    println!(
        "\nTotal slots: {}  Assigned: {}  Available: {}",
        counts.total, counts.assigned, counts.available
    );

    if assignments.is_empty() {
        println!("No faculty assigned yet.");
        return;
    }
    println!("\nAssignments:");
    for assignment in assignments {
        let faculty = if assignment.has_faculty() {
            assignment.faculty_names.join(", ")
        } else {
            "[EMPTY]".to_string()
        };
        println!("  {} ({}) -> {}", assignment.slot_code, assignment.day, faculty);
    }
}

/// Exports assignments as CSV with a header row. Faculty names are joined
/// with "; " in one column.
pub fn export_assignments_to_csv<W: Write>(assignments: &[Assignment], writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(["slot_code", "day", "time_index", "time_label", "faculty_names", "group_id"])?;
    for assignment in assignments {
        let time_index = assignment.time_index.to_string();
        let label = time_label(assignment.time_index).unwrap_or_default();
        let faculty = assignment.faculty_names.join("; ");
        wtr.write_record([
            assignment.slot_code.as_str(),
            assignment.day.as_str(),
            time_index.as_str(),
            label,
            faculty.as_str(),
            assignment.group_id.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
