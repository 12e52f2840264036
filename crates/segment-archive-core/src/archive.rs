//! The archive codec: validated multi-channel write and read paths.
//!
//! One archive file holds one contiguous time segment. The write path
//! checks that every named channel covers the same wall-clock duration
//! (differing sample rates are expected to balance out through differing
//! sample counts) and persists the set as one file named per the catalog
//! grammar. The read path reconstructs [`TimeSeries`] values from a file,
//! failing fast on the first requested channel that is absent.
//!
//! The codec and the catalog are composed only through conventions: the
//! filename grammar and the attribute names below, never through direct
//! calls.
//!
//! [`TimeSeries`]: crate::series::TimeSeries

mod read;
mod write;

pub use read::read;
pub use write::{write, SampleRates};

use std::path::PathBuf;

use snafu::prelude::*;

use crate::storage::StorageError;

/// File-level attribute holding the segment start time.
pub const T0_ATTR: &str = "t0";

/// Per-dataset attribute holding that channel's samples per second.
pub const SAMPLE_RATE_ATTR: &str = "sample_rate";

/// General result type used by codec operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Errors from archive codec operations.
///
/// `SampleRateCount`, `UnequalDuration`, and `NoChannels` are write-time
/// configuration failures raised before any file is opened;
/// `ChannelNotFound` is the read-time lookup failure; `Storage` wraps
/// whatever the container layer surfaces (including the accepted
/// truncated-archive gap).
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ArchiveError {
    /// A per-channel sample-rate list disagreed with the channel count.
    #[snafu(display("only {rates} sample rate(s) provided for {channels} channel(s)"))]
    SampleRateCount {
        /// Number of rates provided.
        rates: usize,
        /// Number of channels provided.
        channels: usize,
    },

    /// Two channels computed different wall-clock durations.
    #[snafu(display(
        "channel durations must all be equal: '{channel_a}' spans {duration_a} s \
         but '{channel_b}' spans {duration_b} s"
    ))]
    UnequalDuration {
        /// The reference channel (first in the mapping).
        channel_a: String,
        /// The reference channel's duration in seconds.
        duration_a: f64,
        /// The first channel that disagreed.
        channel_b: String,
        /// The disagreeing channel's duration in seconds.
        duration_b: f64,
    },

    /// The channel mapping was empty.
    #[snafu(display("cannot write an archive with no channels"))]
    NoChannels,

    /// A requested channel is absent from the archive.
    #[snafu(display("archive {} does not contain channel '{channel}'", path.display()))]
    ChannelNotFound {
        /// The missing channel's name.
        channel: String,
        /// The archive that was read.
        path: PathBuf,
    },

    /// A container-layer failure while reading or writing the file.
    #[snafu(display("archive storage error: {source}"))]
    Storage {
        /// Underlying container error.
        #[snafu(source, backtrace)]
        source: StorageError,
    },
}
