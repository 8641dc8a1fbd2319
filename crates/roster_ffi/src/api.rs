//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose one roster session per opaque handle to Dart via FRB.
//! - Flatten core types into plain DTOs (strings, integers, vectors).
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Failures come back as response envelopes with a message, never as
//!   Rust errors.
//! - Confirmation for delete is collected by the UI before calling in.

use log::info;
use roster_core::{
    core_version as core_version_inner, init_logging as init_logging_inner,
    DefaultRosterSession, Grade, RosterConfig, SortField, StudentEdit, StudentRecord, Subject,
};
use std::collections::BTreeSet;

/// Opaque session handle owned by the Dart side.
#[flutter_rust_bridge::frb(opaque)]
pub struct RosterHandle {
    session: DefaultRosterSession,
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message on failure.
/// Safe to repeat with the same `level + log_dir`.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Opens a new in-memory roster.
///
/// # FFI contract
/// - `seed_demo = true` starts from the three demo students.
/// - Notices auto-dismiss after the default delay.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_open(seed_demo: bool) -> RosterHandle {
    let config = RosterConfig {
        seed_demo_roster: seed_demo,
        ..RosterConfig::default()
    };
    let session = DefaultRosterSession::from_config(&config);
    info!(
        "event=roster_open module=ffi status=ok seeded={} total={}",
        seed_demo,
        session.records().len()
    );
    RosterHandle { session }
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRow {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub grade: String,
    pub attendance: u32,
    pub subjects: Vec<String>,
    pub enrollment_date_ms: i64,
    pub last_updated_ms: i64,
    pub low_attendance: bool,
    pub editing: bool,
}

/// Filtered/sorted table plus its sort indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterView {
    pub rows: Vec<StudentRow>,
    /// `name|email|grade|age|attendance`, `None` when unsorted.
    pub sort_field: Option<String>,
    pub sort_ascending: bool,
    pub search_term: String,
    pub grade_filter: Option<String>,
}

/// Dashboard cards, chart columns and grade filter options.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterDashboard {
    pub total_students: u32,
    /// `None` when the roster is empty.
    pub average_grade: Option<f64>,
    /// `None` when the roster is empty.
    pub average_attendance: Option<f64>,
    pub low_attendance_count: u32,
    pub chart_label: String,
    pub chart_labels: Vec<String>,
    pub chart_values: Vec<u32>,
    pub grade_options: Vec<String>,
}

/// Banner payload. `kind` is `success|error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeDto {
    pub message: String,
    pub kind: String,
}

/// Form input for a new student.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentInput {
    pub name: String,
    pub email: String,
    pub age: Option<i64>,
    pub grade: String,
    pub attendance: Option<i64>,
    pub subjects: Vec<String>,
}

/// Inline edit input. `None` fields stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentEditInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i64>,
    pub grade: Option<String>,
    pub attendance: Option<i64>,
    pub subjects: Option<Vec<String>>,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterActionResponse {
    pub ok: bool,
    /// Affected student id when known.
    pub student_id: Option<u32>,
    pub message: String,
}

impl RosterActionResponse {
    fn success(message: impl Into<String>, student_id: u32) -> Self {
        Self {
            ok: true,
            student_id: Some(student_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            student_id: None,
            message: message.into(),
        }
    }
}

/// Updates the search box term.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_set_search(handle: &mut RosterHandle, term: String) {
    handle.session.set_search_term(term);
}

/// Sets the grade dropdown; `None` or blank shows all grades.
///
/// Returns an empty string on success, or an error for unknown grades.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_set_grade_filter(handle: &mut RosterHandle, grade: Option<String>) -> String {
    let filter = match grade.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(label) => match Grade::parse(label) {
            Some(grade) => Some(grade),
            None => return format!("unknown grade `{label}`"),
        },
    };
    handle.session.set_grade_filter(filter);
    String::new()
}

/// Header-click sort. Returns an error string for unknown fields.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_sort_by(handle: &mut RosterHandle, field: String) -> String {
    match SortField::parse(&field) {
        Some(field) => {
            handle.session.sort_by(field);
            String::new()
        }
        None => format!("unknown sort field `{}`", field.trim()),
    }
}

/// Adds a student from form input.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_add(handle: &mut RosterHandle, input: StudentInput) -> RosterActionResponse {
    let subjects = match parse_subjects(&input.subjects) {
        Ok(subjects) => subjects,
        Err(message) => return RosterActionResponse::failure(message),
    };

    {
        let draft = handle.session.draft_mut();
        draft.name = input.name;
        draft.email = input.email;
        draft.age = input.age;
        draft.grade = input.grade;
        draft.attendance = input.attendance;
        draft.subjects = subjects;
    }

    match handle.session.add_student() {
        Ok(record) => RosterActionResponse::success(notice_message(handle), record.id),
        Err(err) => RosterActionResponse::failure(err.to_string()),
    }
}

/// Opens one row for inline editing.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_begin_edit(handle: &mut RosterHandle, id: u32) -> RosterActionResponse {
    match handle.session.begin_edit(id) {
        Ok(()) => RosterActionResponse::success("Editing.", id),
        Err(err) => RosterActionResponse::failure(err.to_string()),
    }
}

/// Saves an inline edit. On failure the row stays open.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_commit_edit(
    handle: &mut RosterHandle,
    id: u32,
    input: StudentEditInput,
) -> RosterActionResponse {
    let subjects = match input.subjects.as_deref().map(parse_subjects).transpose() {
        Ok(subjects) => subjects,
        Err(message) => return RosterActionResponse::failure(message),
    };
    let edit = StudentEdit {
        name: input.name,
        email: input.email,
        age: input.age,
        grade: input.grade,
        attendance: input.attendance,
        subjects,
    };

    match handle.session.commit_edit(id, &edit) {
        Ok(record) => RosterActionResponse::success(notice_message(handle), record.id),
        Err(err) => RosterActionResponse::failure(err.to_string()),
    }
}

/// Closes inline editing without saving.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_cancel_edit(handle: &mut RosterHandle, id: u32) -> bool {
    handle.session.cancel_edit(id)
}

/// Deletes one student. `confirmed = false` is a no-op success.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_delete(handle: &mut RosterHandle, id: u32, confirmed: bool) -> RosterActionResponse {
    match handle.session.delete_student(id, |_| confirmed) {
        Ok(roster_core::DeleteOutcome::Deleted(record)) => {
            RosterActionResponse::success(notice_message(handle), record.id)
        }
        Ok(roster_core::DeleteOutcome::Cancelled) => {
            RosterActionResponse::success("Delete cancelled.", id)
        }
        Err(err) => RosterActionResponse::failure(err.to_string()),
    }
}

/// Current table contents.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_view(handle: &RosterHandle) -> RosterView {
    let session = &handle.session;
    let sort = session.sort_state();
    RosterView {
        rows: session
            .visible()
            .iter()
            .map(|record| to_row(record, session.is_editing(record.id)))
            .collect(),
        sort_field: sort.field().map(|field| field.as_str().to_string()),
        sort_ascending: sort.is_ascending(),
        search_term: session.query().search_term.clone(),
        grade_filter: session
            .query()
            .grade_filter
            .map(|grade| grade.label().to_string()),
    }
}

/// Current dashboard figures.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_dashboard(handle: &RosterHandle) -> RosterDashboard {
    let stats = handle.session.stats();
    let series = handle.session.chart_series();
    RosterDashboard {
        total_students: to_u32(stats.total_students),
        average_grade: stats.average_grade,
        average_attendance: stats.average_attendance,
        low_attendance_count: to_u32(stats.low_attendance_count),
        chart_label: series.label,
        chart_labels: series.labels,
        chart_values: series.values.into_iter().map(to_u32).collect(),
        grade_options: handle
            .session
            .unique_grades()
            .iter()
            .map(|grade| grade.label().to_string())
            .collect(),
    }
}

/// Notice currently shown, if any.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_notice(handle: &RosterHandle) -> Option<NoticeDto> {
    handle.session.notice().map(|notice| NoticeDto {
        message: notice.message,
        kind: notice.kind.as_str().to_string(),
    })
}

fn notice_message(handle: &RosterHandle) -> String {
    handle
        .session
        .notice()
        .map(|notice| notice.message)
        .unwrap_or_default()
}

fn parse_subjects(values: &[String]) -> Result<BTreeSet<Subject>, String> {
    values
        .iter()
        .map(|value| Subject::parse(value).ok_or_else(|| format!("unknown subject `{value}`")))
        .collect()
}

fn to_row(record: &StudentRecord, editing: bool) -> StudentRow {
    StudentRow {
        id: record.id,
        name: record.name.clone(),
        email: record.email.clone(),
        age: u32::from(record.age),
        grade: record.grade.label().to_string(),
        attendance: u32::from(record.attendance),
        subjects: record
            .subjects
            .iter()
            .map(|subject| subject.name().to_string())
            .collect(),
        enrollment_date_ms: record.enrollment_date,
        last_updated_ms: record.last_updated,
        low_attendance: record.has_low_attendance(),
        editing,
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
