// Copyright (c) 2025 Steven Rosenthal smr@dt3.org
// See LICENSE file in root directory for license terms.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use glob::{glob_with, MatchOptions, Pattern};
use log::{debug, info, warn};

use solar_annotator_elements::archive_index::{ArchiveIndex, FileRecord};
use solar_annotator_elements::catalog::{Product, Satellite};
use solar_annotator_elements::date_util::{date_range, end_of_day};
use solar_annotator_elements::error::ArchiveError;
use solar_annotator_elements::name_parser::{parse_dates, NamingConvention};
use solar_annotator_elements::retriever_trait::Retriever;

/// A mirror of the satellite data archive on local disk, laid out as
/// `{root}/{satellite}/{level}/data/{product}/{YYYY}/{MM}/{DD}/`.
///
/// Day directories are listed with glob patterns, so `root` must be valid
/// UTF-8; otherwise every day fails with InvalidArgument.
pub struct LocalArchive {
    root: PathBuf,
}

impl LocalArchive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LocalArchive{root: root.into()}
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding `product`'s files for `day`.
    pub fn day_directory(&self, satellite: Satellite, product: Product,
                         day: &NaiveDate) -> PathBuf {
        self.root
            .join(satellite.archive_name())
            .join(product.level())
            .join("data")
            .join(product.archive_name())
            .join(day.format("%Y").to_string())
            .join(day.format("%m").to_string())
            .join(day.format("%d").to_string())
    }

    // Indexes the regular, non-hidden files directly within `dir`, in name
    // order.
    fn list_directory(dir: &Path, convention: NamingConvention)
                      -> Result<ArchiveIndex, ArchiveError> {
        if !dir.is_dir() {
            return Err(ArchiveError::ArchiveUnavailable(dir.to_path_buf()));
        }
        let dir_str = dir.to_str().ok_or_else(|| ArchiveError::InvalidArgument(
            format!("archive path {:?} is not valid UTF-8", dir)))?;
        let pattern = format!("{}/*", Pattern::escape(dir_str));
        let options = MatchOptions{
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: true,
        };
        let entries = glob_with(&pattern, options).map_err(|e| {
            ArchiveError::InvalidArgument(format!("bad pattern {:?}: {}", pattern, e))
        })?;

        let mut index = ArchiveIndex::new();
        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!("Error listing {:?}: {:?}", e.path(), e.error());
                    continue;
                }
            };
            // Dangling symlinks and entries removed mid-listing land here.
            let metadata = match fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(e) => {
                    warn!("Skipping {:?}: {}", path, e);
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }
            index.push(Self::file_record(path, &metadata, convention)?);
        }
        Ok(index)
    }

    fn file_record(path: PathBuf, metadata: &fs::Metadata,
                   convention: NamingConvention) -> Result<FileRecord, ArchiveError> {
        let file_name = path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let modified = metadata.modified().map_err(|e| ArchiveError::io(&path, e))?;
        let modified_time = DateTime::<Local>::from(modified).naive_local();
        let span = match parse_dates(&file_name, convention) {
            Ok(span) => span,
            Err(e) => {
                warn!("Indexing {:?} without observation times: {}", path, e);
                None
            }
        };
        Ok(FileRecord{
            file_name,
            span,
            modified_time,
            size_bytes: metadata.len(),
            path,
        })
    }
}

impl Retriever for LocalArchive {
    fn search(&self,
              satellite: Satellite,
              product: Product,
              start: &NaiveDateTime,
              end: Option<&NaiveDateTime>)
              -> Result<ArchiveIndex, ArchiveError> {
        let end = match end {
            Some(end) => *end,
            None => end_of_day(start),
        };
        if end < *start {
            return Err(ArchiveError::InvalidArgument(
                format!("search end {} is before start {}", end, start)));
        }
        let convention = product.naming_convention();

        let mut results = ArchiveIndex::new();
        for day in date_range(start, &end) {
            let dir = self.day_directory(satellite, product, &day);
            match Self::list_directory(&dir, convention) {
                Ok(page) => {
                    debug!("Listed {} files in {:?}", page.len(), dir);
                    results.append(page);
                },
                Err(ArchiveError::ArchiveUnavailable(dir)) => {
                    // Gaps in the archive are routine (outages, partial mirrors).
                    debug!("No archive directory {:?}, skipping", dir);
                },
                Err(e) => {
                    return Err(e);
                }
            }
        }
        info!("Found {} {} files for {} from {} to {}",
              results.len(), product, satellite, start, end);
        Ok(results)
    }

    fn retrieve(&self, index: &ArchiveIndex, save_directory: &Path)
                -> Result<Vec<PathBuf>, ArchiveError> {
        fs::create_dir_all(save_directory)
            .map_err(|e| ArchiveError::io(save_directory, e))?;
        // Compare real locations, so that a save directory reached through
        // "..", a symlink or a relative path never copies a file onto itself
        // (which would truncate it).
        let real_save_directory = fs::canonicalize(save_directory)
            .map_err(|e| ArchiveError::io(save_directory, e))?;
        let mut saved = Vec::with_capacity(index.len());
        for record in index {
            let source = fs::canonicalize(&record.path)
                .map_err(|e| ArchiveError::io(&record.path, e))?;
            if real_save_directory.join(&record.file_name) != source {
                fs::copy(&source, save_directory.join(&record.file_name))
                    .map_err(|e| ArchiveError::io(&record.path, e))?;
            } else {
                debug!("{:?} is already in {:?}", record.path, save_directory);
            }
            saved.push(save_directory.join(&record.file_name));
        }
        info!("Retrieved {} files into {:?}", saved.len(), save_directory);
        Ok(saved)
    }
}

// mod tests.
