//! Sample-rate-aware time-series values handed out by the archive codec.
//!
//! This module contains **pure** data types with no IO. The codec in
//! [`crate::archive`] constructs these from container contents; nothing
//! here knows about files or the filename grammar.

/// One named channel's worth of samples, anchored at a segment start time.
///
/// The wall-clock duration of a series is fully determined by its sample
/// count and sample rate; two channels of the same segment may have
/// different rates and therefore different sample counts while still
/// covering the same interval.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeries {
    /// The sample values, in time order.
    pub data: Vec<f64>,

    /// Segment start time (seconds, epoch-style timestamp).
    pub t0: f64,

    /// Samples per second.
    pub sample_rate: f64,
}

impl TimeSeries {
    /// Build a series from raw samples, a start time, and a sample rate.
    pub fn new(data: Vec<f64>, t0: f64, sample_rate: f64) -> Self {
        Self {
            data,
            t0,
            sample_rate,
        }
    }

    /// Wall-clock duration in seconds: `len / sample_rate`.
    pub fn duration(&self) -> f64 {
        self.data.len() as f64 / self.sample_rate
    }

    /// End time of the series: `t0 + duration`.
    pub fn end_time(&self) -> f64 {
        self.t0 + self.duration()
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the series holds no samples.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// An insertion-ordered mapping from channel name to [`TimeSeries`].
///
/// The read path promises to return channels in the order they were
/// requested, so this map preserves insertion order on iteration while
/// still supporting lookup by name. Channel sets are small (a handful of
/// names per archive), so lookup is a linear scan.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimeSeriesDict {
    entries: Vec<(String, TimeSeries)>,
}

impl TimeSeriesDict {
    /// Create an empty dict.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a series under `name`, replacing any existing entry with the
    /// same name in place (the original position is kept).
    pub fn insert(&mut self, name: impl Into<String>, series: TimeSeries) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = series,
            None => self.entries.push((name, series)),
        }
    }

    /// Look up a series by channel name.
    pub fn get(&self, name: &str) -> Option<&TimeSeries> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    /// Iterate `(name, series)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TimeSeries)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// Channel names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Number of channels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dict holds no channels.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for TimeSeriesDict {
    type Item = (String, TimeSeries);
    type IntoIter = std::vec::IntoIter<(String, TimeSeries)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
