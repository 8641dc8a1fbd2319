//! Field rules for student candidates.
//!
//! # Responsibility
//! - Check a draft or edited record against roster field constraints.
//! - Produce normalized, typed field values on success.
//!
//! # Invariants
//! - Rules run in a fixed order: name, email, age, grade, attendance.
//!   The first failing rule is reported.
//! - Validation is pure: no logging, no clock, no store access.

use crate::model::grade::Grade;
use crate::model::student::StudentDraft;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const NAME_MIN_CHARS: usize = 2;
pub const AGE_MIN: i64 = 15;
pub const AGE_MAX: i64 = 25;
pub const ATTENDANCE_MIN: i64 = 0;
pub const ATTENDANCE_MAX: i64 = 100;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Reason a candidate student was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentValidationError {
    /// Name missing or shorter than two characters.
    InvalidName,
    /// Email missing or not shaped like `local@domain.tld`.
    InvalidEmail,
    /// Age missing or outside 15..=25.
    AgeOutOfRange(Option<i64>),
    /// Grade left blank.
    MissingGrade,
    /// Grade text not on the letter scale.
    UnknownGrade(String),
    /// Attendance missing or outside 0..=100.
    AttendanceOutOfRange(Option<i64>),
    /// Stored record carries id 0.
    InvalidId,
    /// Stored record was updated before it was enrolled.
    TimestampOrder { enrolled: i64, updated: i64 },
}

impl Display for StudentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName => write!(f, "Please enter a valid name"),
            Self::InvalidEmail => write!(f, "Please enter a valid email address"),
            Self::AgeOutOfRange(_) => write!(f, "Age must be between {AGE_MIN} and {AGE_MAX}"),
            Self::MissingGrade => write!(f, "Please select a grade"),
            Self::UnknownGrade(value) => write!(f, "Unknown grade `{value}`"),
            Self::AttendanceOutOfRange(_) => write!(
                f,
                "Attendance must be between {ATTENDANCE_MIN} and {ATTENDANCE_MAX}"
            ),
            Self::InvalidId => write!(f, "student id must be positive"),
            Self::TimestampOrder { enrolled, updated } => write!(
                f,
                "last_updated ({updated}) must be >= enrollment_date ({enrolled})"
            ),
        }
    }
}

impl Error for StudentValidationError {}

impl StudentValidationError {
    /// Stable rule code for log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidName => "invalid_name",
            Self::InvalidEmail => "invalid_email",
            Self::AgeOutOfRange(_) => "age_out_of_range",
            Self::MissingGrade => "missing_grade",
            Self::UnknownGrade(_) => "unknown_grade",
            Self::AttendanceOutOfRange(_) => "attendance_out_of_range",
            Self::InvalidId => "invalid_id",
            Self::TimestampOrder { .. } => "timestamp_order",
        }
    }
}

/// Field values that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedStudent {
    /// Display name as entered.
    pub name: String,
    pub email: String,
    pub age: u8,
    pub grade: Grade,
    pub attendance: u8,
}

/// Runs the roster field rules against one candidate.
///
/// # Errors
/// - Returns the first violated rule, in declaration order.
pub fn validate(candidate: &StudentDraft) -> Result<ValidatedStudent, StudentValidationError> {
    if candidate.name.chars().count() < NAME_MIN_CHARS {
        return Err(StudentValidationError::InvalidName);
    }

    if !is_valid_email(&candidate.email) {
        return Err(StudentValidationError::InvalidEmail);
    }

    let age = match candidate.age {
        Some(value) if (AGE_MIN..=AGE_MAX).contains(&value) => value as u8,
        other => return Err(StudentValidationError::AgeOutOfRange(other)),
    };

    if candidate.grade.trim().is_empty() {
        return Err(StudentValidationError::MissingGrade);
    }
    let grade = Grade::parse(&candidate.grade)
        .ok_or_else(|| StudentValidationError::UnknownGrade(candidate.grade.clone()))?;

    let attendance = match candidate.attendance {
        Some(value) if (ATTENDANCE_MIN..=ATTENDANCE_MAX).contains(&value) => value as u8,
        other => return Err(StudentValidationError::AttendanceOutOfRange(other)),
    };

    Ok(ValidatedStudent {
        name: candidate.name.clone(),
        email: candidate.email.clone(),
        age,
        grade,
        attendance,
    })
}

/// Simple `local@domain.tld` shape check.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::is_valid_email;

    #[test]
    fn email_pattern_accepts_plain_addresses() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("a.b+c@sub.domain.org"));
    }

    #[test]
    fn email_pattern_rejects_missing_parts_and_whitespace() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("jane smith@example.com"));
        assert!(!is_valid_email("jane@@example.com"));
    }
}
