//! Student record store contracts and in-memory implementation.
//!
//! # Responsibility
//! - Hold the authoritative ordered sequence of student records.
//! - Provide stable insert/replace/remove/read APIs for the service layer.
//!
//! # Invariants
//! - Write paths call `StudentRecord::validate()` before mutating.
//! - Ids are unique; insertion order is preserved for reads.
//! - Failed writes leave the store untouched.

use crate::model::student::{StudentId, StudentRecord};
use crate::model::validation::StudentValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Record store error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    Validation(StudentValidationError),
    DuplicateId(StudentId),
    NotFound(StudentId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "student id already in use: {id}"),
            Self::NotFound(id) => write!(f, "student not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateId(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<StudentValidationError> for RepoError {
    fn from(value: StudentValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Repository interface for the student record store.
pub trait StudentRepository {
    fn insert(&mut self, record: StudentRecord) -> RepoResult<StudentId>;
    fn replace(&mut self, record: StudentRecord) -> RepoResult<()>;
    fn remove(&mut self, id: StudentId) -> RepoResult<StudentRecord>;
    fn get(&self, id: StudentId) -> Option<&StudentRecord>;
    /// All records in insertion order.
    fn records(&self) -> &[StudentRecord];

    fn max_id(&self) -> Option<StudentId> {
        self.records().iter().map(|record| record.id).max()
    }

    fn len(&self) -> usize {
        self.records().len()
    }

    fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

/// Vec-backed record store living for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryStudentRepository {
    records: Vec<StudentRecord>,
}

impl InMemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from pre-existing records.
    ///
    /// # Errors
    /// - Rejects invalid records and duplicate ids.
    pub fn with_records(records: Vec<StudentRecord>) -> RepoResult<Self> {
        let mut repo = Self::new();
        for record in records {
            repo.insert(record)?;
        }
        Ok(repo)
    }

    fn position(&self, id: StudentId) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }
}

impl StudentRepository for InMemoryStudentRepository {
    fn insert(&mut self, record: StudentRecord) -> RepoResult<StudentId> {
        record.validate()?;
        if self.position(record.id).is_some() {
            return Err(RepoError::DuplicateId(record.id));
        }

        let id = record.id;
        self.records.push(record);
        Ok(id)
    }

    fn replace(&mut self, record: StudentRecord) -> RepoResult<()> {
        record.validate()?;
        let index = self
            .position(record.id)
            .ok_or(RepoError::NotFound(record.id))?;
        self.records[index] = record;
        Ok(())
    }

    fn remove(&mut self, id: StudentId) -> RepoResult<StudentRecord> {
        let index = self.position(id).ok_or(RepoError::NotFound(id))?;
        Ok(self.records.remove(index))
    }

    fn get(&self, id: StudentId) -> Option<&StudentRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    fn records(&self) -> &[StudentRecord] {
        &self.records
    }
}
