//! Wrapper prelude.
//!
//! The `segment-archive-format` crate is the supported public entry
//! point. Downstream code should prefer importing from this prelude
//! instead of depending on internal core module paths.

pub use crate::catalog;
pub use crate::{
    read, sort, sort_matches, write, ArchiveError, Identifier, SampleRates, SegmentName, Source,
    Suffix, TimeSeries, TimeSeriesDict,
};
