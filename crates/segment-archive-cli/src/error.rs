use std::path::PathBuf;

use segment_archive_core::{
    archive::ArchiveError, catalog::CatalogError, storage::StorageError,
};
use snafu::Snafu;

pub type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CliError {
    #[snafu(display("Catalog listing failed: {source}"))]
    Catalog { source: CatalogError },

    #[snafu(display("Failed to open archive {}: {source}", path.display()))]
    OpenArchive {
        path: PathBuf,
        source: StorageError,
    },

    #[snafu(display("Failed to read archive {}: {source}", path.display()))]
    ReadArchive {
        path: PathBuf,
        #[snafu(source(from(ArchiveError, Box::new)))]
        source: Box<ArchiveError>,
    },
}
