// Copyright (c) 2025 Steven Rosenthal smr@dt3.org
// See LICENSE file in root directory for license terms.

use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::error::ArchiveError;
use crate::name_parser::ObservationSpan;

const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

/// Metadata for one file found in the archive.
#[derive(Clone, Debug, PartialEq)]
pub struct FileRecord {
    pub file_name: String,
    // None if the file name could not be parsed.
    pub span: Option<ObservationSpan>,
    // Local clock.
    pub modified_time: NaiveDateTime,
    pub size_bytes: u64,
    pub path: PathBuf,
}

impl FileRecord {
    pub fn start_time(&self) -> Option<NaiveDateTime> {
        self.span.map(|s| s.start)
    }

    pub fn end_time(&self) -> Option<NaiveDateTime> {
        self.span.map(|s| s.end)
    }

    pub fn size_megabytes(&self) -> f64 {
        self.size_bytes as f64 / BYTES_PER_MEGABYTE
    }

    /// Size rounded to a tenth of a megabyte, e.g. "2.4M".
    pub fn size_label(&self) -> String {
        format!("{:.1}M", self.size_megabytes())
    }
}

/// The files returned by one archive search, in discovery order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArchiveIndex {
    records: Vec<FileRecord>,
}

impl ArchiveIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: FileRecord) {
        self.records.push(record);
    }

    /// Appends `other`'s records after this index's records.
    pub fn append(&mut self, other: ArchiveIndex) {
        self.records.extend(other.records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileRecord> {
        self.records.iter()
    }

    /// Returns the record whose start time is closest to `target`, the
    /// earliest-listed one on ties. Records without a start time are never
    /// chosen; if there are none with a start time, NotFound is returned.
    pub fn nearest(&self, target: &NaiveDateTime) -> Result<&FileRecord, ArchiveError> {
        self.records.iter()
            .filter_map(|r| r.start_time().map(|start| ((start - *target).abs(), r)))
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, r)| r)
            .ok_or_else(|| ArchiveError::NotFound(
                format!("Data does not exist for the time {}", target)))
    }
}

impl From<Vec<FileRecord>> for ArchiveIndex {
    fn from(records: Vec<FileRecord>) -> Self {
        Self{records}
    }
}

impl IntoIterator for ArchiveIndex {
    type Item = FileRecord;
    type IntoIter = std::vec::IntoIter<FileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ArchiveIndex {
    type Item = &'a FileRecord;
    type IntoIter = std::slice::Iter<'a, FileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// mod tests.
