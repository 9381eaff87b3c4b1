//! Shared utilities (filesystem helpers).

pub mod fs;
