// Copyright (c) 2025 Steven Rosenthal smr@dt3.org
// See LICENSE file in root directory for license terms.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::archive_index::ArchiveIndex;
use crate::catalog::{Product, Satellite};
use crate::error::ArchiveError;

// A source of archived solar image files. One implementation per data source.
//
// Errors:
//   InvalidArgument: `end` is before `start`.
//   NotFound: retrieve_nearest() found no file with a parseable start time.
//   Io: the underlying storage failed for a reason other than a missing day.
// A day for which the archive holds nothing contributes no records; it is not
// an error.
pub trait Retriever {
    /// Lists the files for `satellite`/`product` on every calendar day from
    /// `start` through `end`. If `end` is None, only `start`'s day is searched.
    fn search(&self,
              satellite: Satellite,
              product: Product,
              start: &NaiveDateTime,
              end: Option<&NaiveDateTime>)
              -> Result<ArchiveIndex, ArchiveError>;

    /// Makes the files of `index` available in `save_directory`, returning
    /// their new paths in index order.
    fn retrieve(&self, index: &ArchiveIndex, save_directory: &Path)
                -> Result<Vec<PathBuf>, ArchiveError>;

    /// Returns the path of the file on `target`'s day whose start time is
    /// closest to `target`.
    fn retrieve_nearest(&self,
                        satellite: Satellite,
                        product: Product,
                        target: &NaiveDateTime)
                        -> Result<PathBuf, ArchiveError> {
        let index = self.search(satellite, product, target, None)?;
        Ok(index.nearest(target)?.path.clone())
    }
}
