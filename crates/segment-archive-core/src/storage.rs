//! The keyed-dataset-with-attributes archive container.
//!
//! This module owns all byte-level I/O for archive files. One file holds:
//!
//! - A set of file-level attributes (name → float), e.g. the segment
//!   start time.
//! - Any number of named datasets, each a gzip-compressed sequence of
//!   little-endian `f64` samples with its own attribute set.
//!
//! The layout is footer-indexed, so a writer streams dataset blocks and
//! emits the index last:
//!
//! ```text
//! [magic "SGA1"] [dataset blocks ...] [JSON footer] [footer_len u64 LE] [magic]
//! ```
//!
//! Head and tail magic are both validated on open, so a truncated or
//! partially-written file is rejected up front rather than misread. The
//! codec in [`crate::archive`] goes through [`ArchiveWriter`] and
//! [`ArchiveFile`] only; nothing above this module touches raw bytes.

use std::{
    collections::BTreeMap,
    fs::File,
    io::{Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use serde::{Deserialize, Serialize};
use snafu::{prelude::*, Backtrace};

/// Magic bytes at the head and tail of every archive file.
const MAGIC: [u8; 4] = *b"SGA1";

/// Bytes occupied by the trailer: footer length (u64) plus tail magic.
const TRAILER_LEN: u64 = 8 + MAGIC.len() as u64;

/// General result type used by storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by the archive container layer.
///
/// A reader encountering a truncated or interrupted write surfaces one of
/// `TooShort`, `InvalidMagic`, or `FooterDecode`; there is no dedicated
/// partial-write error kind.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum StorageError {
    /// An I/O error on the underlying file.
    #[snafu(display("I/O error at {}: {source}", path.display()))]
    Io {
        /// Path of the file being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
        /// Backtrace captured when the error occurred.
        backtrace: Backtrace,
    },

    /// The file does not carry the archive magic at head or tail.
    #[snafu(display("not a segment archive (bad magic): {}", path.display()))]
    InvalidMagic {
        /// Path of the rejected file.
        path: PathBuf,
    },

    /// The file is shorter than its fixed framing, or the recorded footer
    /// length points outside the file.
    #[snafu(display("archive truncated or too short: {}", path.display()))]
    TooShort {
        /// Path of the rejected file.
        path: PathBuf,
    },

    /// The footer index could not be encoded.
    #[snafu(display("failed to encode archive footer for {}: {source}", path.display()))]
    FooterEncode {
        /// Path of the file being written.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The footer index could not be decoded.
    #[snafu(display("failed to decode archive footer in {}: {source}", path.display()))]
    FooterDecode {
        /// Path of the file being read.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// A requested attribute is absent from the file or dataset.
    #[snafu(display("archive {} has no attribute '{attribute}'", path.display()))]
    MissingAttribute {
        /// Path of the archive the attribute was looked up in.
        path: PathBuf,
        /// Name of the missing attribute.
        attribute: String,
    },

    /// A dataset block decompressed to a size inconsistent with its
    /// recorded sample count.
    #[snafu(display(
        "dataset '{name}' in {} is corrupt: expected {expected} sample bytes, got {actual}",
        path.display()
    ))]
    DatasetShape {
        /// Path of the archive holding the corrupt dataset.
        path: PathBuf,
        /// Name of the corrupt dataset.
        name: String,
        /// Expected decompressed byte count (`sample_count * 8`).
        expected: u64,
        /// Actual decompressed byte count.
        actual: u64,
    },
}

/// Footer index: everything needed to locate and decode the file's
/// contents without scanning the blocks.
#[derive(Debug, Serialize, Deserialize)]
struct Footer {
    /// File-level attributes.
    attrs: BTreeMap<String, f64>,
    /// Per-dataset index entries, in write order.
    datasets: Vec<DatasetEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct DatasetEntry {
    name: String,
    attrs: BTreeMap<String, f64>,
    offset: u64,
    compressed_len: u64,
    sample_count: u64,
}

/// Streaming writer for one archive file.
///
/// Dataset blocks are written as they arrive; attributes and the index
/// are held in memory and emitted by [`ArchiveWriter::finish`]. Creating
/// a writer truncates any existing file at the same path.
pub struct ArchiveWriter {
    file: File,
    path: PathBuf,
    attrs: BTreeMap<String, f64>,
    datasets: Vec<DatasetEntry>,
    cursor: u64,
}

impl ArchiveWriter {
    /// Create (or overwrite) the archive at `path` and write the head
    /// magic.
    pub fn create(path: &Path) -> StorageResult<Self> {
        let mut file = File::create(path).context(IoSnafu { path })?;
        file.write_all(&MAGIC).context(IoSnafu { path })?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
            attrs: BTreeMap::new(),
            datasets: Vec::new(),
            cursor: MAGIC.len() as u64,
        })
    }

    /// Record a file-level attribute. Setting the same name twice keeps
    /// the last value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: f64) {
        self.attrs.insert(name.into(), value);
    }

    /// Append one named dataset: the samples are gzip-compressed and
    /// streamed to disk, and the given attributes are recorded in the
    /// index alongside the block location.
    pub fn put_dataset(
        &mut self,
        name: &str,
        samples: &[f64],
        attrs: &[(&str, f64)],
    ) -> StorageResult<()> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        for &sample in samples {
            encoder
                .write_f64::<LittleEndian>(sample)
                .context(IoSnafu { path: &self.path })?;
        }
        let block = encoder.finish().context(IoSnafu { path: &self.path })?;

        self.file
            .write_all(&block)
            .context(IoSnafu { path: &self.path })?;

        self.datasets.push(DatasetEntry {
            name: name.to_string(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            offset: self.cursor,
            compressed_len: block.len() as u64,
            sample_count: samples.len() as u64,
        });
        self.cursor += block.len() as u64;
        Ok(())
    }

    /// Write the footer index and trailer, sync the file, and return its
    /// path.
    pub fn finish(mut self) -> StorageResult<PathBuf> {
        let footer = Footer {
            attrs: std::mem::take(&mut self.attrs),
            datasets: std::mem::take(&mut self.datasets),
        };
        let payload =
            serde_json::to_vec(&footer).context(FooterEncodeSnafu { path: &self.path })?;

        self.file
            .write_all(&payload)
            .context(IoSnafu { path: &self.path })?;
        self.file
            .write_u64::<LittleEndian>(payload.len() as u64)
            .context(IoSnafu { path: &self.path })?;
        self.file
            .write_all(&MAGIC)
            .context(IoSnafu { path: &self.path })?;
        self.file.sync_all().context(IoSnafu { path: &self.path })?;
        Ok(self.path)
    }
}

/// One decoded dataset: samples plus its attribute set.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    /// Dataset (channel) name.
    pub name: String,

    /// The decompressed sample values, in stored order.
    pub samples: Vec<f64>,

    attrs: BTreeMap<String, f64>,
    path: PathBuf,
}

impl Dataset {
    /// Look up a dataset attribute.
    pub fn attr(&self, name: &str) -> Option<f64> {
        self.attrs.get(name).copied()
    }

    /// Look up a dataset attribute, failing with
    /// [`StorageError::MissingAttribute`] when absent.
    pub fn require_attr(&self, name: &str) -> StorageResult<f64> {
        self.attr(name).context(MissingAttributeSnafu {
            path: &self.path,
            attribute: name,
        })
    }
}

/// Read-only handle on one archive file.
///
/// Opening validates head and tail magic and decodes the footer index;
/// dataset blocks are only read (and decompressed) on demand.
#[derive(Debug)]
pub struct ArchiveFile {
    file: File,
    path: PathBuf,
    footer: Footer,
}

impl ArchiveFile {
    /// Open and validate the archive at `path`.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let mut file = File::open(path).context(IoSnafu { path })?;
        let len = file.metadata().context(IoSnafu { path })?.len();
        ensure!(len >= MAGIC.len() as u64 + TRAILER_LEN, TooShortSnafu { path });

        let mut head = [0u8; MAGIC.len()];
        file.read_exact(&mut head).context(IoSnafu { path })?;
        ensure!(head == MAGIC, InvalidMagicSnafu { path });

        file.seek(SeekFrom::End(-(TRAILER_LEN as i64)))
            .context(IoSnafu { path })?;
        let footer_len = file.read_u64::<LittleEndian>().context(IoSnafu { path })?;
        let mut tail = [0u8; MAGIC.len()];
        file.read_exact(&mut tail).context(IoSnafu { path })?;
        ensure!(tail == MAGIC, InvalidMagicSnafu { path });
        ensure!(
            footer_len <= len - MAGIC.len() as u64 - TRAILER_LEN,
            TooShortSnafu { path }
        );

        file.seek(SeekFrom::End(-((TRAILER_LEN + footer_len) as i64)))
            .context(IoSnafu { path })?;
        let mut payload = vec![0u8; footer_len as usize];
        file.read_exact(&mut payload).context(IoSnafu { path })?;
        let footer: Footer =
            serde_json::from_slice(&payload).context(FooterDecodeSnafu { path })?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
            footer,
        })
    }

    /// Path this handle was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a file-level attribute, failing with
    /// [`StorageError::MissingAttribute`] when absent.
    pub fn attr(&self, name: &str) -> StorageResult<f64> {
        self.footer.attrs.get(name).copied().context(MissingAttributeSnafu {
            path: &self.path,
            attribute: name,
        })
    }

    /// Whether a dataset with this name exists in the index.
    pub fn has_dataset(&self, name: &str) -> bool {
        self.footer.datasets.iter().any(|d| d.name == name)
    }

    /// Dataset names in stored order.
    pub fn dataset_names(&self) -> impl Iterator<Item = &str> {
        self.footer.datasets.iter().map(|d| d.name.as_str())
    }

    /// Read and decompress one dataset. Returns `Ok(None)` when no
    /// dataset with this name exists; the caller decides whether that is
    /// an error.
    pub fn read_dataset(&mut self, name: &str) -> StorageResult<Option<Dataset>> {
        let entry = match self.footer.datasets.iter().find(|d| d.name == name) {
            Some(entry) => entry.clone(),
            None => return Ok(None),
        };

        self.file
            .seek(SeekFrom::Start(entry.offset))
            .context(IoSnafu { path: &self.path })?;
        let mut compressed = vec![0u8; entry.compressed_len as usize];
        self.file
            .read_exact(&mut compressed)
            .context(IoSnafu { path: &self.path })?;

        let mut raw = Vec::with_capacity(entry.sample_count as usize * 8);
        GzDecoder::new(compressed.as_slice())
            .read_to_end(&mut raw)
            .context(IoSnafu { path: &self.path })?;

        let expected = entry.sample_count * 8;
        ensure!(
            raw.len() as u64 == expected,
            DatasetShapeSnafu {
                path: &self.path,
                name: entry.name.clone(),
                expected,
                actual: raw.len() as u64,
            }
        );

        let mut samples = vec![0f64; entry.sample_count as usize];
        raw.as_slice()
            .read_f64_into::<LittleEndian>(&mut samples)
            .context(IoSnafu { path: &self.path })?;

        Ok(Some(Dataset {
            name: entry.name,
            samples,
            attrs: entry.attrs,
            path: self.path.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn container_roundtrip_preserves_attrs_and_samples() -> TestResult {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("seg.hdf5");

        let mut writer = ArchiveWriter::create(&path)?;
        writer.set_attr("t0", 1_234_567_890.0);
        writer.put_dataset("strain", &[1.0, 2.5, -3.0], &[("sample_rate", 3.0)])?;
        writer.put_dataset("aux", &[0.0; 6], &[("sample_rate", 6.0)])?;
        let written = writer.finish()?;
        assert_eq!(written, path);

        let mut archive = ArchiveFile::open(&path)?;
        assert_eq!(archive.attr("t0")?, 1_234_567_890.0);
        assert!(archive.has_dataset("strain"));
        assert!(!archive.has_dataset("nope"));

        let names: Vec<&str> = archive.dataset_names().collect();
        assert_eq!(names, vec!["strain", "aux"]);

        let strain = archive
            .read_dataset("strain")?
            .ok_or("strain dataset missing")?;
        assert_eq!(strain.samples, vec![1.0, 2.5, -3.0]);
        assert_eq!(strain.attr("sample_rate"), Some(3.0));
        assert_eq!(strain.require_attr("sample_rate")?, 3.0);
        Ok(())
    }

    #[test]
    fn unknown_dataset_reads_as_none() -> TestResult {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("seg.hdf5");

        let mut writer = ArchiveWriter::create(&path)?;
        writer.put_dataset("only", &[1.0], &[])?;
        writer.finish()?;

        let mut archive = ArchiveFile::open(&path)?;
        assert!(archive.read_dataset("other")?.is_none());
        Ok(())
    }

    #[test]
    fn missing_attribute_is_reported_by_name() -> TestResult {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("seg.hdf5");
        ArchiveWriter::create(&path)?.finish()?;

        let archive = ArchiveFile::open(&path)?;
        let err = archive.attr("t0").expect_err("expected missing attribute");
        assert!(matches!(err, StorageError::MissingAttribute { .. }));
        assert!(err.to_string().contains("'t0'"));
        Ok(())
    }

    #[test]
    fn truncated_file_is_rejected() -> TestResult {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("truncated.hdf5");
        std::fs::write(&path, b"SGA1")?;

        let err = ArchiveFile::open(&path).expect_err("expected truncation error");
        assert!(matches!(err, StorageError::TooShort { .. }));
        Ok(())
    }

    #[test]
    fn foreign_file_is_rejected_by_magic() -> TestResult {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("foreign.hdf5");
        std::fs::write(&path, vec![0u8; 64])?;

        let err = ArchiveFile::open(&path).expect_err("expected magic error");
        assert!(matches!(err, StorageError::InvalidMagic { .. }));
        Ok(())
    }

    #[test]
    fn corrupt_footer_is_a_decode_error() -> TestResult {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("corrupt.hdf5");

        // Valid framing, garbage JSON in the footer region.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&MAGIC);
        let junk = b"not json at all";
        bytes.extend_from_slice(junk);
        bytes.extend_from_slice(&(junk.len() as u64).to_le_bytes());
        bytes.extend_from_slice(&MAGIC);
        std::fs::write(&path, bytes)?;

        let err = ArchiveFile::open(&path).expect_err("expected footer error");
        assert!(matches!(err, StorageError::FooterDecode { .. }));
        Ok(())
    }

    #[test]
    fn interrupted_write_leaves_unreadable_file() -> TestResult {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("partial.hdf5");

        // Writer dropped without finish(): blocks on disk, no footer.
        let mut writer = ArchiveWriter::create(&path)?;
        writer.put_dataset("strain", &[1.0; 128], &[("sample_rate", 16.0)])?;
        drop(writer);

        assert!(ArchiveFile::open(&path).is_err());
        Ok(())
    }
}
