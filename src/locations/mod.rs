//! Read-only location table
//!
//! The table is an ordered slice of [`RegionRecord`]s. Order matters: every
//! lookup that can match several records returns the first one.

mod regions;

pub use regions::REGIONS;

use crate::models::RegionRecord;

/// Borrowed, immutable view over a sequence of regions
#[derive(Debug, Clone, Copy)]
pub struct LocationTable<'a> {
    records: &'a [RegionRecord],
}

impl Default for LocationTable<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LocationTable<'static> {
    /// The compiled-in Korean region table
    #[must_use]
    pub fn builtin() -> Self {
        Self { records: REGIONS }
    }
}

impl<'a> LocationTable<'a> {
    #[must_use]
    pub fn new(records: &'a [RegionRecord]) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order
    pub fn iter(&self) -> std::slice::Iter<'a, RegionRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn records(&self) -> &'a [RegionRecord] {
        self.records
    }
}

impl<'a> IntoIterator for LocationTable<'a> {
    type Item = &'a RegionRecord;
    type IntoIter = std::slice::Iter<'a, RegionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
