//! Student domain records.
//!
//! # Responsibility
//! - Define the stored student record and the editor-side draft/edit shapes.
//! - Keep view state (editing markers) out of the domain record.
//!
//! # Invariants
//! - `id` is positive and unique within one store.
//! - `enrollment_date <= last_updated`, both Unix epoch milliseconds.
//! - `age` and `attendance` always satisfy validation ranges.

use crate::model::grade::Grade;
use crate::model::subject::Subject;
use crate::model::validation::{validate, StudentValidationError, ValidatedStudent};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Roster-local student identifier, assigned as `max + 1`.
pub type StudentId = u32;

/// Attendance percentage under which a student is flagged.
pub const LOW_ATTENDANCE_THRESHOLD: u8 = 75;

/// Canonical stored student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStudentRecord")]
pub struct StudentRecord {
    pub id: StudentId,
    pub name: String,
    pub email: String,
    pub age: u8,
    pub grade: Grade,
    /// Whole percent, 0..=100.
    pub attendance: u8,
    pub subjects: BTreeSet<Subject>,
    /// Set once at creation.
    pub enrollment_date: i64,
    /// Refreshed on every successful edit.
    pub last_updated: i64,
}

impl StudentRecord {
    /// Builds a record from validated fields, enrolled and updated at `now_ms`.
    pub fn enroll(
        id: StudentId,
        fields: ValidatedStudent,
        subjects: BTreeSet<Subject>,
        now_ms: i64,
    ) -> Self {
        Self {
            id,
            name: fields.name,
            email: fields.email,
            age: fields.age,
            grade: fields.grade,
            attendance: fields.attendance,
            subjects,
            enrollment_date: now_ms,
            last_updated: now_ms,
        }
    }

    /// Re-checks field rules plus id and timestamp invariants.
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        if self.id == 0 {
            return Err(StudentValidationError::InvalidId);
        }
        validate(&StudentDraft::from(self))?;
        if self.last_updated < self.enrollment_date {
            return Err(StudentValidationError::TimestampOrder {
                enrolled: self.enrollment_date,
                updated: self.last_updated,
            });
        }
        Ok(())
    }

    pub fn has_low_attendance(&self) -> bool {
        self.attendance < LOW_ATTENDANCE_THRESHOLD
    }
}

#[derive(Deserialize)]
struct RawStudentRecord {
    id: StudentId,
    name: String,
    email: String,
    age: u8,
    grade: Grade,
    attendance: u8,
    subjects: BTreeSet<Subject>,
    enrollment_date: i64,
    last_updated: i64,
}

impl TryFrom<RawStudentRecord> for StudentRecord {
    type Error = StudentValidationError;

    fn try_from(raw: RawStudentRecord) -> Result<Self, Self::Error> {
        let record = Self {
            id: raw.id,
            name: raw.name,
            email: raw.email,
            age: raw.age,
            grade: raw.grade,
            attendance: raw.attendance,
            subjects: raw.subjects,
            enrollment_date: raw.enrollment_date,
            last_updated: raw.last_updated,
        };
        record.validate()?;
        Ok(record)
    }
}

/// Editor-side candidate for a new student.
///
/// Numeric fields are kept as entered (`None` when blank) so range checks
/// can report out-of-range input instead of failing on conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDraft {
    pub name: String,
    pub email: String,
    pub age: Option<i64>,
    /// Raw grade label; blank means "not selected".
    pub grade: String,
    pub attendance: Option<i64>,
    pub subjects: BTreeSet<Subject>,
}

impl Default for StudentDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            age: None,
            grade: String::new(),
            attendance: Some(100),
            subjects: BTreeSet::new(),
        }
    }
}

impl StudentDraft {
    /// Checkbox semantics: `checked` adds the subject, otherwise removes it.
    pub fn toggle_subject(&mut self, subject: Subject, checked: bool) {
        if checked {
            self.subjects.insert(subject);
        } else {
            self.subjects.remove(&subject);
        }
    }

    /// Restores the empty form state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Overlays the supplied edit fields onto this candidate.
    pub fn apply(&mut self, edit: &StudentEdit) {
        if let Some(name) = &edit.name {
            self.name = name.clone();
        }
        if let Some(email) = &edit.email {
            self.email = email.clone();
        }
        if let Some(age) = edit.age {
            self.age = Some(age);
        }
        if let Some(grade) = &edit.grade {
            self.grade = grade.clone();
        }
        if let Some(attendance) = edit.attendance {
            self.attendance = Some(attendance);
        }
        if let Some(subjects) = &edit.subjects {
            self.subjects = subjects.clone();
        }
    }
}

impl From<&StudentRecord> for StudentDraft {
    fn from(record: &StudentRecord) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            age: Some(i64::from(record.age)),
            grade: record.grade.label().to_string(),
            attendance: Some(i64::from(record.attendance)),
            subjects: record.subjects.clone(),
        }
    }
}

/// Per-field edit for an existing record. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentEdit {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i64>,
    pub grade: Option<String>,
    pub attendance: Option<i64>,
    pub subjects: Option<BTreeSet<Subject>>,
}
