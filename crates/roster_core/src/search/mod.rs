//! Filtered and sorted roster views.
//!
//! # Responsibility
//! - Derive the displayed record sequence from the store and view parameters.
//!
//! # See also
//! - `crate::service::roster_session` for when views are recomputed.

pub mod roster_query;
