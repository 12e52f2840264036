//! Read path: load requested channels with their rates and start time.

use std::path::Path;

use snafu::prelude::*;

use super::{ArchiveResult, ChannelNotFoundSnafu, StorageSnafu, SAMPLE_RATE_ATTR, T0_ATTR};
use crate::{
    series::{TimeSeries, TimeSeriesDict},
    storage::ArchiveFile,
};

/// Read the requested channels from the archive at `path`.
///
/// The file's global start time is read once; each requested channel is
/// then looked up independently, and the first one absent aborts the
/// whole read; no partial result is returned. The returned dict holds
/// one [`TimeSeries`] per channel, anchored at the file's start time and
/// carrying that channel's own sample rate, in the order the channels
/// were requested.
///
/// # Errors
///
/// [`ArchiveError::ChannelNotFound`] for a missing channel;
/// [`ArchiveError::Storage`] when the file cannot be opened or decoded
/// (a truncated archive surfaces here).
///
/// [`ArchiveError::ChannelNotFound`]: super::ArchiveError::ChannelNotFound
/// [`ArchiveError::Storage`]: super::ArchiveError::Storage
pub fn read(path: &Path, channels: &[&str]) -> ArchiveResult<TimeSeriesDict> {
    let mut archive = ArchiveFile::open(path).context(StorageSnafu)?;
    let t0 = archive.attr(T0_ATTR).context(StorageSnafu)?;

    let mut out = TimeSeriesDict::new();
    for &channel in channels {
        let dataset = archive
            .read_dataset(channel)
            .context(StorageSnafu)?
            .context(ChannelNotFoundSnafu { channel, path })?;
        let sample_rate = dataset
            .require_attr(SAMPLE_RATE_ATTR)
            .context(StorageSnafu)?;
        out.insert(channel, TimeSeries::new(dataset.samples, t0, sample_rate));
    }
    Ok(out)
}
