//! # segment-archive-format
//!
//! Segmented multi-channel time-series archives: a filename convention
//! that makes a directory of files an ordered timeline, and a codec that
//! reads and writes validated multi-channel segment files.
//!
//! This crate is the supported public entry point and provides a small,
//! stable surface over `segment-archive-core`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use segment_archive_format::prelude::*;
//! ```

/// Convenience prelude with the stable, supported surface.
pub mod prelude;

/// Catalog namespace (wrapper-only).
pub mod catalog {
    pub use segment_archive_core::catalog::{CatalogError, CatalogResult};
}

/// Storage container namespace (wrapper-only).
pub mod storage {
    pub use segment_archive_core::storage::{ArchiveFile, ArchiveWriter, StorageError};
}

pub use segment_archive_core::archive::{read, write, ArchiveError, SampleRates};
pub use segment_archive_core::catalog::{
    sort, sort_matches, Identifier, SegmentName, Source, Suffix,
};
pub use segment_archive_core::series::{TimeSeries, TimeSeriesDict};
