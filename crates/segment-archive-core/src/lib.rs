//! Core engine for segmented multi-channel time-series archives.
//!
//! This crate provides the foundational pieces for `segment-archive-format`:
//!
//! - A fixed filename grammar (`<prefix>-<t0>-<length>.<suffix>`) and a
//!   catalog sorter that turns a directory of archive files into a
//!   time-ordered timeline without opening any of them (`catalog` module).
//! - An archive codec that validates a set of named channels for mutual
//!   duration consistency and reads/writes them as one self-describing
//!   file per segment (`archive` module).
//! - A minimal sample-rate-aware time-series value and an
//!   insertion-ordered channel map (`series` module).
//! - The keyed-dataset-with-attributes container the codec persists
//!   through (`storage` module).
//!
//! Higher-level crates (for example, the CLI or the public facade) are
//! expected to depend on this core crate rather than re-implementing the
//! naming and container logic.
#![deny(missing_docs)]
pub mod archive;
pub mod catalog;
pub mod series;
pub mod storage;

pub use archive::{read, write, ArchiveError, SampleRates};
pub use catalog::{sort, sort_matches, CatalogError, Identifier, SegmentName, Source, Suffix};
pub use series::{TimeSeries, TimeSeriesDict};
