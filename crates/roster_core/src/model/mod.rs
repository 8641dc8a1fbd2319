//! Student roster domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by roster business logic.
//! - Own the field validation rules shared by add and edit paths.
//!
//! # Invariants
//! - Every stored student is identified by a positive `StudentId`.
//! - Records are only created from validated fields.

pub mod grade;
pub mod student;
pub mod subject;
pub mod validation;
