//! Record store abstractions and the in-memory implementation.
//!
//! # Responsibility
//! - Define the data access contract used by the roster service.
//! - Keep storage details out of service/business orchestration.
//!
//! # Invariants
//! - Repository writes enforce `StudentRecord::validate()` before mutating.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateId`).

pub mod seed;
pub mod student_repo;
