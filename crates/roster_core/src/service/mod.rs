//! Roster use-case services.
//!
//! # Responsibility
//! - `roster_service`: the only write path into the record store.
//! - `roster_session`: owns view parameters and derived state for one
//!   front end and recomputes them after every change.

pub mod roster_service;
pub mod roster_session;
