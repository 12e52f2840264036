//! Write path: validate channel consistency, then persist one archive.

use std::path::{Path, PathBuf};

use log::warn;
use snafu::prelude::*;

use super::{
    ArchiveResult, NoChannelsSnafu, SampleRateCountSnafu, StorageSnafu, UnequalDurationSnafu,
    SAMPLE_RATE_ATTR, T0_ATTR,
};
use crate::{catalog::SegmentName, storage::ArchiveWriter};

/// Sample-rate specification for a write: one rate applied uniformly to
/// every channel, or an explicit list zipped with the channels in order.
#[derive(Clone, Debug, PartialEq)]
pub enum SampleRates {
    /// Every channel samples at this rate.
    Uniform(f64),

    /// One rate per channel, in channel order.
    PerChannel(Vec<f64>),
}

impl SampleRates {
    /// Expand to one rate per channel, validating cardinality.
    fn resolve(self, channels: usize) -> ArchiveResult<Vec<f64>> {
        match self {
            SampleRates::Uniform(rate) => Ok(vec![rate; channels]),
            SampleRates::PerChannel(rates) => {
                ensure!(
                    rates.len() == channels,
                    SampleRateCountSnafu {
                        rates: rates.len(),
                        channels,
                    }
                );
                Ok(rates)
            }
        }
    }
}

impl From<f64> for SampleRates {
    fn from(rate: f64) -> Self {
        SampleRates::Uniform(rate)
    }
}

impl From<Vec<f64>> for SampleRates {
    fn from(rates: Vec<f64>) -> Self {
        SampleRates::PerChannel(rates)
    }
}

/// Render a seconds value for a filename field: a value whose fractional
/// part is exactly zero prints as an integer, anything else keeps its
/// fractional form.
pub(crate) fn format_seconds(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Validate `channels` for mutual consistency and persist them as one
/// archive file in `write_dir`, named `{prefix}-{t0}-{length}.hdf5`.
///
/// `channels` is an ordered, non-empty list of `(name, samples)` pairs;
/// a [`SampleRates::PerChannel`] list is zipped with it in order. The
/// single load-bearing invariant is that `len(samples) / sample_rate`
/// must be exactly equal (by value) across channels; the archive format
/// assumes one common segment length. Validation happens before any file
/// is opened, so a failed write never creates a handle; an existing file
/// at the target path is overwritten without being checked.
///
/// Returns the path of the newly written file.
///
/// # Errors
///
/// [`ArchiveError::NoChannels`], [`ArchiveError::SampleRateCount`], and
/// [`ArchiveError::UnequalDuration`] for configuration failures;
/// [`ArchiveError::Storage`] when the container layer fails mid-write
/// (in which case an incomplete file may be left behind).
///
/// [`ArchiveError::NoChannels`]: super::ArchiveError::NoChannels
/// [`ArchiveError::SampleRateCount`]: super::ArchiveError::SampleRateCount
/// [`ArchiveError::UnequalDuration`]: super::ArchiveError::UnequalDuration
/// [`ArchiveError::Storage`]: super::ArchiveError::Storage
pub fn write(
    write_dir: &Path,
    t0: f64,
    sample_rates: impl Into<SampleRates>,
    prefix: &str,
    channels: &[(&str, &[f64])],
) -> ArchiveResult<PathBuf> {
    ensure!(!channels.is_empty(), NoChannelsSnafu);

    let rates = sample_rates.into().resolve(channels.len())?;

    // Exact value equality: differing rates are expected to yield the
    // same duration through differing sample counts.
    let (first_name, first_samples) = channels[0];
    let reference = first_samples.len() as f64 / rates[0];
    for (&(name, samples), &rate) in channels.iter().zip(&rates).skip(1) {
        let duration = samples.len() as f64 / rate;
        ensure!(
            duration == reference,
            UnequalDurationSnafu {
                channel_a: first_name,
                duration_a: reference,
                channel_b: name,
                duration_b: duration,
            }
        );
    }

    let file_name = format!(
        "{}-{}-{}.hdf5",
        prefix,
        format_seconds(t0),
        format_seconds(reference)
    );
    if SegmentName::parse(&file_name).is_none() {
        // Five-digit durations and fractional start times land here: the
        // file is still written, but catalog scans will not see it.
        warn!("archive name '{file_name}' falls outside the catalog grammar");
    }

    let path = write_dir.join(file_name);
    let mut writer = ArchiveWriter::create(&path).context(StorageSnafu)?;
    writer.set_attr(T0_ATTR, t0);
    for (&(name, samples), &rate) in channels.iter().zip(&rates) {
        writer
            .put_dataset(name, samples, &[(SAMPLE_RATE_ATTR, rate)])
            .context(StorageSnafu)?;
    }
    writer.finish().context(StorageSnafu)
}
