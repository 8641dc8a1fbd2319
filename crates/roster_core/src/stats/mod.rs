//! Dashboard statistics derived from the record store.

pub mod aggregate;
