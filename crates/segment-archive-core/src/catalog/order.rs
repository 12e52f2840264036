//! Catalog entry ordering.
//!
//! Provides the deterministic comparison used when sorting catalog
//! entries by time. Ordering is defined by the parsed `t0`, with the
//! original identifier as a stable tie-breaker so equal start times
//! always come out in the same order.

use std::cmp::Ordering;

use super::{Identifier, SegmentName};

/// Ephemeral sorting record pairing a candidate's parsed start time with
/// its original identifier and full parsed name. Dropped as soon as the
/// sorted output is produced.
pub(crate) struct CatalogEntry {
    pub t0: u64,
    pub identifier: Identifier,
    pub name: SegmentName,
}

pub(crate) fn cmp_entry_by_t0(a: &CatalogEntry, b: &CatalogEntry) -> Ordering {
    a.t0.cmp(&b.t0)
        .then_with(|| a.identifier.cmp(&b.identifier))
}
