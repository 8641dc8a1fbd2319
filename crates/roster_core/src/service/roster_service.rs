//! Roster mutation service.
//!
//! # Responsibility
//! - Provide add, edit and delete entry points over a record store.
//! - Track which records are currently open for editing.
//!
//! # Invariants
//! - Every write runs the field validator first; rejected writes leave the
//!   store and editing state untouched.
//! - New ids are `max(existing) + 1`, or 1 for an empty store.
//! - `last_updated` never moves backwards on commit.
//! - Editing markers live here, keyed by id, never on the record itself.

use crate::clock::Clock;
use crate::model::student::{StudentDraft, StudentEdit, StudentId, StudentRecord};
use crate::model::validation::{validate, StudentValidationError};
use crate::repo::student_repo::{RepoError, StudentRepository};
use log::{info, warn};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from roster mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// Candidate failed a field rule.
    Validation(StudentValidationError),
    /// No record with this id.
    NotFound(StudentId),
    /// Commit requested for a record that is not open for editing.
    NotEditing(StudentId),
    /// Every id up to `u32::MAX` is taken.
    IdSpaceExhausted,
    /// Store-level failure not covered above.
    Repo(RepoError),
}

impl Display for RosterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "Student {id} not found"),
            Self::NotEditing(id) => write!(f, "Student {id} is not being edited"),
            Self::IdSpaceExhausted => write!(f, "No student ids left to assign"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RosterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StudentValidationError> for RosterError {
    fn from(value: StudentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for RosterError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

pub type RosterResult<T> = Result<T, RosterError>;

/// Write facade over one record store.
pub struct RosterService<R: StudentRepository, C: Clock> {
    repo: R,
    clock: C,
    editing: BTreeSet<StudentId>,
}

impl<R: StudentRepository, C: Clock> RosterService<R, C> {
    pub fn new(repo: R, clock: C) -> Self {
        Self {
            repo,
            clock,
            editing: BTreeSet::new(),
        }
    }

    pub fn records(&self) -> &[StudentRecord] {
        self.repo.records()
    }

    pub fn get(&self, id: StudentId) -> Option<&StudentRecord> {
        self.repo.get(id)
    }

    /// Validates `draft` and appends it as a new student.
    ///
    /// # Errors
    /// - `Validation` with the first failed rule; the store is unchanged.
    pub fn add(&mut self, draft: &StudentDraft) -> RosterResult<StudentRecord> {
        let fields = validate(draft).map_err(|err| {
            warn!(
                "event=student_add module=service status=rejected rule={}",
                err.code()
            );
            err
        })?;

        let id = match self.repo.max_id() {
            Some(max) => max.checked_add(1).ok_or(RosterError::IdSpaceExhausted)?,
            None => 1,
        };
        let record =
            StudentRecord::enroll(id, fields, draft.subjects.clone(), self.clock.now_ms());
        self.repo.insert(record.clone())?;

        info!(
            "event=student_add module=service status=ok id={} total={}",
            id,
            self.repo.len()
        );
        Ok(record)
    }

    /// Opens `id` for editing. Re-opening an open record is a no-op.
    pub fn begin_edit(&mut self, id: StudentId) -> RosterResult<()> {
        if self.repo.get(id).is_none() {
            return Err(RosterError::NotFound(id));
        }
        self.editing.insert(id);
        Ok(())
    }

    pub fn is_editing(&self, id: StudentId) -> bool {
        self.editing.contains(&id)
    }

    /// Closes editing without applying anything. Returns whether `id` was open.
    pub fn cancel_edit(&mut self, id: StudentId) -> bool {
        self.editing.remove(&id)
    }

    /// Validates `edit` over the current record and applies it in place.
    ///
    /// # Errors
    /// - `NotFound` / `NotEditing` when the record is absent or not open.
    /// - `Validation` when the edited candidate fails a rule; the record
    ///   stays open for editing and unchanged.
    pub fn commit_edit(&mut self, id: StudentId, edit: &StudentEdit) -> RosterResult<StudentRecord> {
        let current = self.repo.get(id).ok_or(RosterError::NotFound(id))?;
        if !self.editing.contains(&id) {
            return Err(RosterError::NotEditing(id));
        }

        let mut candidate = StudentDraft::from(current);
        candidate.apply(edit);
        let fields = validate(&candidate).map_err(|err| {
            warn!(
                "event=student_update module=service status=rejected id={} rule={}",
                id,
                err.code()
            );
            err
        })?;

        let updated = StudentRecord {
            id,
            name: fields.name,
            email: fields.email,
            age: fields.age,
            grade: fields.grade,
            attendance: fields.attendance,
            subjects: candidate.subjects,
            enrollment_date: current.enrollment_date,
            last_updated: self.clock.now_ms().max(current.last_updated),
        };
        self.repo.replace(updated.clone())?;
        self.editing.remove(&id);

        info!("event=student_update module=service status=ok id={}", id);
        Ok(updated)
    }

    /// Removes exactly the record with `id`.
    ///
    /// # Errors
    /// - `NotFound` when no such record exists; the store is unchanged.
    pub fn delete(&mut self, id: StudentId) -> RosterResult<StudentRecord> {
        let removed = self.repo.remove(id).map_err(|err| {
            warn!("event=student_delete module=service status=not_found id={}", id);
            RosterError::from(err)
        })?;
        self.editing.remove(&id);

        info!(
            "event=student_delete module=service status=ok id={} total={}",
            id,
            self.repo.len()
        );
        Ok(removed)
    }
}
