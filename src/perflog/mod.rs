//! Performance log container format decoding.
//!
//! This module contains types and functions for reading the on-the-wire
//! structures of the gzip-compressed performance-log container: the
//! version record, table blocks with their column schemas, type-tagged
//! cell values, and the CSV/JSON projections of the decoded data.
//!
//! Start with [`stream::PerfStream`] to open a `.gz` container, then use
//! [`container::convert`] to drive a full decode into a [`container::RowSink`].

pub mod container;
pub mod csv;
pub mod stream;
pub mod summary;
pub mod value;
