//! Catalog sorting over segment filenames.
//!
//! A directory of archive files is an ordered, queryable timeline as long
//! as every file follows the naming grammar in [`pattern`]. This module
//! turns either a directory or an explicit identifier list into a list
//! sorted ascending by the start time embedded in each name, without
//! opening a single file.
//!
//! Two policies are deliberately asymmetric:
//!
//! - A malformed input *shape* (a path that is not a directory, a list
//!   mixing structured paths with plain strings) is a hard
//!   [`CatalogError`].
//! - A filename that does not follow the grammar is silently dropped
//!   from the output; a directory with zero matching files sorts to an
//!   empty list.

mod order;
mod pattern;

pub use pattern::{SegmentName, Suffix};

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use log::debug;
use snafu::{prelude::*, Backtrace};

use self::order::{cmp_entry_by_t0, CatalogEntry};

/// General result type used by catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Input-shape errors raised while normalizing a catalog source.
///
/// These are configuration/usage failures and are never produced by
/// unrecognized filenames, which the sorter filters silently.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CatalogError {
    /// A directory source did not resolve to an existing directory.
    #[snafu(display("'{}' is not a directory", path.display()))]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// Listing the directory's children failed.
    #[snafu(display("failed to list directory {}: {source}", path.display()))]
    ListDir {
        /// The directory being listed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
        /// Backtrace captured when the error occurred.
        backtrace: Backtrace,
    },

    /// An identifier list mixed structured paths with plain strings.
    #[snafu(display(
        "source list mixes {paths} structured path(s) with {names} plain string(s); \
         provide either all paths or all strings"
    ))]
    MixedIdentifiers {
        /// Number of `Identifier::Path` elements found.
        paths: usize,
        /// Number of `Identifier::Name` elements found.
        names: usize,
    },
}

/// One catalog input identifier.
///
/// Whatever form the caller hands in is the form that comes back out of
/// [`sort`]; only the terminal filename component is ever consulted for
/// grammar matching.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Identifier {
    /// A structured filesystem path.
    Path(PathBuf),

    /// A plain string, possibly carrying a directory prefix.
    Name(String),
}

impl Identifier {
    /// The terminal filename component used for grammar matching. An
    /// identifier with no terminal component (for example `".."`) yields
    /// an empty name, which no grammar-shaped name equals, so it is
    /// filtered, not an error.
    fn base_name(&self) -> String {
        let path = match self {
            Identifier::Path(p) => p.as_path(),
            Identifier::Name(s) => Path::new(s),
        };
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Borrow the structured path, when this identifier is one.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Identifier::Path(p) => Some(p),
            Identifier::Name(_) => None,
        }
    }

    /// Convert into a `PathBuf`, whichever variant this is.
    pub fn into_path_buf(self) -> PathBuf {
        match self {
            Identifier::Path(p) => p,
            Identifier::Name(s) => PathBuf::from(s),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Path(p) => write!(f, "{}", p.display()),
            Identifier::Name(s) => f.write_str(s),
        }
    }
}

impl From<PathBuf> for Identifier {
    fn from(path: PathBuf) -> Self {
        Identifier::Path(path)
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Identifier::Name(name)
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Identifier::Name(name.to_string())
    }
}

/// A catalog input: either a directory to scan or an explicit identifier
/// list.
///
/// The list form must be internally homogeneous: all structured paths
/// or all plain strings. The tagged representation makes normalization a
/// single match instead of runtime type inspection.
#[derive(Clone, Debug)]
pub enum Source {
    /// Scan the direct children of this directory.
    Directory(PathBuf),

    /// Sort these identifiers as given.
    List(Vec<Identifier>),
}

impl Source {
    /// A directory source.
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Source::Directory(path.into())
    }

    /// A list source of structured paths.
    pub fn paths(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Source::List(paths.into_iter().map(Identifier::Path).collect())
    }

    /// A list source of plain string names.
    pub fn names<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Source::List(
            names
                .into_iter()
                .map(|n| Identifier::Name(n.into()))
                .collect(),
        )
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::Directory(path)
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Source::Directory(path.to_path_buf())
    }
}

impl From<Vec<PathBuf>> for Source {
    fn from(paths: Vec<PathBuf>) -> Self {
        Source::paths(paths)
    }
}

impl From<Vec<String>> for Source {
    fn from(names: Vec<String>) -> Self {
        Source::List(names.into_iter().map(Identifier::Name).collect())
    }
}

/// Normalize a source into candidate identifiers, enforcing the input
/// shape contract. Directory children are returned as directory-joined
/// paths; list elements pass through unchanged once homogeneity holds.
fn candidates(source: Source) -> CatalogResult<Vec<Identifier>> {
    match source {
        Source::Directory(dir) => {
            ensure!(dir.is_dir(), NotADirectorySnafu { path: &dir });

            let mut out = Vec::new();
            for entry in fs::read_dir(&dir).context(ListDirSnafu { path: &dir })? {
                let entry = entry.context(ListDirSnafu { path: &dir })?;
                out.push(Identifier::Path(entry.path()));
            }
            Ok(out)
        }
        Source::List(identifiers) => {
            let paths = identifiers
                .iter()
                .filter(|i| matches!(i, Identifier::Path(_)))
                .count();
            let names = identifiers.len() - paths;
            ensure!(
                paths == 0 || names == 0,
                MixedIdentifiersSnafu { paths, names }
            );
            Ok(identifiers)
        }
    }
}

/// Filter candidates against the grammar and sort ascending by `t0`.
fn collect_entries(source: Source) -> CatalogResult<Vec<CatalogEntry>> {
    let mut entries = Vec::new();
    for identifier in candidates(source)? {
        let base = identifier.base_name();
        match SegmentName::parse(&base) {
            Some(name) => entries.push(CatalogEntry {
                t0: name.t0,
                identifier,
                name,
            }),
            None => debug!("catalog: skipping '{base}' (outside the filename grammar)"),
        }
    }
    entries.sort_unstable_by(cmp_entry_by_t0);
    Ok(entries)
}

/// Sort a source's grammar-conforming files ascending by their embedded
/// start time, returning the original identifiers.
///
/// Non-conforming filenames are silently excluded; a source with zero
/// conforming files yields an empty list. Input-shape violations fail
/// with [`CatalogError`].
pub fn sort(source: impl Into<Source>) -> CatalogResult<Vec<Identifier>> {
    Ok(collect_entries(source.into())?
        .into_iter()
        .map(|e| e.identifier)
        .collect())
}

/// Like [`sort`], but return the typed parsed records instead of the
/// original identifiers, for callers that need `prefix`/`length`/`suffix`
/// without re-parsing.
pub fn sort_matches(source: impl Into<Source>) -> CatalogResult<Vec<SegmentName>> {
    Ok(collect_entries(source.into())?
        .into_iter()
        .map(|e| e.name)
        .collect())
}
