//! Core domain logic for the student roster.
//! This crate is the single source of truth for roster invariants.

pub mod clock;
pub mod config;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod search;
pub mod service;
pub mod stats;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::RosterConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::grade::Grade;
pub use model::student::{StudentDraft, StudentEdit, StudentId, StudentRecord};
pub use model::subject::Subject;
pub use model::validation::{validate, StudentValidationError, ValidatedStudent};
pub use notify::notice_board::{Notice, NoticeBoard, NoticeKind};
pub use repo::seed::demo_roster;
pub use repo::student_repo::{InMemoryStudentRepository, RepoError, RepoResult, StudentRepository};
pub use search::roster_query::{derive, RosterQuery, SortDirection, SortField, SortState};
pub use service::roster_service::{RosterError, RosterResult, RosterService};
pub use service::roster_session::{DefaultRosterSession, DeleteOutcome, RosterSession};
pub use stats::aggregate::{
    average_attendance, average_grade, unique_grades, ChartSeries, GradeHistogram, RosterStats,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
