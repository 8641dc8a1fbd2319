//! Transient user-facing notices.

pub mod notice_board;
