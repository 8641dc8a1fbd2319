//! Plain-text rendering of session state.

use roster_core::{DefaultRosterSession, SortDirection, StudentRecord};
use std::fmt::Write;

const BAR_CHAR: char = '#';

/// Student table with a sort indicator and a `!` marker on low attendance.
pub fn table(session: &DefaultRosterSession) -> String {
    let mut out = String::new();
    let sort = session.sort_state();
    if let Some(field) = sort.field() {
        let arrow = match sort.direction() {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        };
        let _ = writeln!(out, "sorted by {field} {arrow}");
    }

    let _ = writeln!(
        out,
        "{:>4}  {:<20} {:<26} {:>3}  {:<5} {:>6}  {}",
        "ID", "Name", "Email", "Age", "Grade", "Att.", "Subjects"
    );
    for record in session.visible() {
        let _ = writeln!(out, "{}", row(record));
    }
    if session.visible().is_empty() {
        let _ = writeln!(out, "(no students)");
    }
    out
}

fn row(record: &StudentRecord) -> String {
    let subjects = record
        .subjects
        .iter()
        .map(|subject| subject.name())
        .collect::<Vec<_>>()
        .join(", ");
    let flag = if record.has_low_attendance() { "!" } else { " " };
    format!(
        "{:>4}  {:<20} {:<26} {:>3}  {:<5} {:>5}%{}  {}",
        record.id,
        record.name,
        record.email,
        record.age,
        record.grade,
        record.attendance,
        flag,
        subjects
    )
}

/// Dashboard figures plus a horizontal bar chart of the grade histogram.
pub fn dashboard(session: &DefaultRosterSession) -> String {
    let stats = session.stats();
    let mut out = String::new();
    let _ = writeln!(out, "Total Students:     {}", stats.total_students);
    let _ = writeln!(
        out,
        "Average Grade:      {}",
        stats
            .average_grade
            .map_or_else(|| "n/a".to_string(), |value| format!("{value:.1}"))
    );
    let _ = writeln!(
        out,
        "Average Attendance: {}",
        stats
            .average_attendance
            .map_or_else(|| "n/a".to_string(), |value| format!("{value:.0}%"))
    );
    let _ = writeln!(out, "Low Attendance:     {}", stats.low_attendance_count);

    let series = session.chart_series();
    let _ = writeln!(out, "\n{}", series.label);
    for (label, value) in series.labels.iter().zip(&series.values) {
        let bar = BAR_CHAR.to_string().repeat(*value);
        let _ = writeln!(out, "{label:<3} {bar} {value}");
    }
    out
}
