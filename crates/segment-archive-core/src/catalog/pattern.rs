//! The segment filename grammar.
//!
//! Archive files are named `<prefix>-<t0>-<length>.<suffix>`:
//!
//! - `prefix`: opaque stream label, `[a-zA-Z0-9_:-]+`
//! - `t0`: segment start time, exactly 10 digits
//! - `length`: segment duration in seconds, 1-4 digits with no leading zero
//! - `suffix`: one of `gwf`, `hdf5`, `h5`
//!
//! Parsing exposes the fields as a typed [`SegmentName`] record instead of
//! a raw capture set, so callers that need `prefix`/`length`/`suffix` get
//! them without re-parsing.

use std::{fmt, sync::LazyLock};

use regex::Regex;

const PREFIX_RE: &str = "[a-zA-Z0-9_:-]+";
const T0_RE: &str = "[0-9]{10}";
const LENGTH_RE: &str = "[1-9][0-9]{0,3}";

/// Compiled grammar. Anchored at the end of the name only: a base name
/// whose tail matches is accepted, which is what keeps the catalog's
/// silent filtering policy permissive about decorated prefixes.
static SEGMENT_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        "(?P<prefix>{PREFIX_RE})-(?P<t0>{T0_RE})-(?P<length>{LENGTH_RE})\\.(?P<suffix>gwf|hdf5|h5)$"
    ))
    .expect("segment filename grammar is a valid regex")
});

/// Recognized archive file extensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suffix {
    /// Frame files (`.gwf`).
    Gwf,
    /// Archive files written by this crate (`.hdf5`).
    Hdf5,
    /// Shortened archive extension (`.h5`).
    H5,
}

impl Suffix {
    /// The extension string, without the leading dot.
    pub fn as_str(&self) -> &'static str {
        match self {
            Suffix::Gwf => "gwf",
            Suffix::Hdf5 => "hdf5",
            Suffix::H5 => "h5",
        }
    }

    /// Map an extension string (no dot) onto a suffix, if recognized.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "gwf" => Some(Suffix::Gwf),
            "hdf5" => Some(Suffix::Hdf5),
            "h5" => Some(Suffix::H5),
            _ => None,
        }
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed fields parsed from one segment filename.
///
/// This is the structured record returned by
/// [`sort_matches`](crate::catalog::sort_matches); it carries everything
/// the name encodes so the file's time range is known without opening it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SegmentName {
    /// Opaque label identifying the data source or stream group.
    pub prefix: String,

    /// Segment start time parsed from the fixed-width 10-digit field.
    pub t0: u64,

    /// Segment duration in whole seconds (1-9999 per the grammar).
    pub length: u32,

    /// The file extension.
    pub suffix: Suffix,
}

impl SegmentName {
    /// Parse a base filename against the grammar.
    ///
    /// Returns `None` for any name that does not carry a grammar-shaped
    /// tail; the catalog treats that as a filtering decision, never an
    /// error. The digit-count bounds of the grammar guarantee the numeric
    /// fields fit their types.
    pub fn parse(name: &str) -> Option<Self> {
        let caps = SEGMENT_NAME_RE.captures(name)?;
        let t0 = caps["t0"].parse().ok()?;
        let length = caps["length"].parse().ok()?;
        let suffix = Suffix::from_extension(&caps["suffix"])?;
        Some(Self {
            prefix: caps["prefix"].to_string(),
            t0,
            length,
            suffix,
        })
    }

    /// Render the canonical filename for these fields.
    ///
    /// `t0` keeps its fixed 10-digit width, so a name parsed from a
    /// zero-padded timestamp round-trips unchanged.
    pub fn file_name(&self) -> String {
        format!(
            "{}-{:010}-{}.{}",
            self.prefix, self.t0, self.length, self.suffix
        )
    }
}

impl fmt::Display for SegmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}
