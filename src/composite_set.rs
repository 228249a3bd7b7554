// Copyright (c) 2025 Steven Rosenthal smr@dt3.org
// See LICENSE file in root directory for license terms.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use log::info;

use solar_annotator_elements::catalog::{Product, Satellite};
use solar_annotator_elements::error::ArchiveError;
use solar_annotator_elements::retriever_trait::Retriever;

/// The Level 2 composite image nearest a target time, for each of the six SUVI
/// channels. Channels are named by wavelength ("94", "131", ... "304").
#[derive(Debug)]
pub struct CompositeSet {
    // Keyed by wavelength, Angstroms.
    images: BTreeMap<u32, PathBuf>,
}

impl CompositeSet {
    /// Fails with the first channel's error if any channel has no file on
    /// `target`'s day.
    pub fn locate(retriever: &impl Retriever, satellite: Satellite,
                  target: &NaiveDateTime) -> Result<Self, ArchiveError> {
        let mut images = BTreeMap::new();
        for product in Product::COMPOSITES {
            let path = retriever.retrieve_nearest(satellite, product, target)?;
            images.insert(product.wavelength(), path);
        }
        info!("Located {} composites for {} near {}", images.len(), satellite, target);
        Ok(CompositeSet{images})
    }

    /// Ascending wavelength order.
    pub fn channels(&self) -> Vec<String> {
        self.images.keys().map(|w| w.to_string()).collect()
    }

    pub fn get(&self, channel: &str) -> Option<&Path> {
        let wavelength: u32 = channel.trim().parse().ok()?;
        self.images.get(&wavelength).map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (String, &Path)> + '_ {
        self.images.iter().map(|(w, p)| (w.to_string(), p.as_path()))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::{Duration, NaiveDate};
    use solar_annotator_elements::archive_index::{ArchiveIndex, FileRecord};
    use solar_annotator_elements::error::ErrorCode;
    use solar_annotator_elements::name_parser::ObservationSpan;
    use tempfile::TempDir;
    use super::*;
    use crate::local_archive::LocalArchive;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    // Serves two records per product, at 10:00 and 11:00.
    struct FakeRetriever;

    impl Retriever for FakeRetriever {
        fn search(&self, _satellite: Satellite, product: Product,
                  _start: &NaiveDateTime, _end: Option<&NaiveDateTime>)
                  -> Result<ArchiveIndex, ArchiveError> {
            let records = [at(10, 0), at(11, 0)].iter().map(|start| {
                let name = format!("{}_{}", product, start.format("%H%M"));
                FileRecord{
                    file_name: name.clone(),
                    span: Some(ObservationSpan{start: *start,
                                               end: *start + Duration::minutes(4)}),
                    modified_time: *start,
                    size_bytes: 0,
                    path: PathBuf::from("/fake").join(name),
                }
            }).collect::<Vec<_>>();
            Ok(ArchiveIndex::from(records))
        }

        fn retrieve(&self, _index: &ArchiveIndex, _save_directory: &Path)
                    -> Result<Vec<PathBuf>, ArchiveError> {
            Ok(vec![])
        }
    }

    #[test]
    fn test_locate() {
        let set = CompositeSet::locate(&FakeRetriever, Satellite::Goes16, &at(10, 40)).unwrap();
        assert_eq!(set.channels(), ["94", "131", "171", "195", "284", "304"]);
        assert_eq!(set.get("171"), Some(Path::new("/fake/suvi-l2-ci171_1100")));
        assert_eq!(set.get(" 94"), Some(Path::new("/fake/suvi-l2-ci094_1100")));
        assert_eq!(set.get("gong"), None);
        assert_eq!(set.get("1600"), None);
        assert_eq!(set.iter().count(), 6);
    }

    #[test]
    fn test_locate_missing_channel() {
        let tmp = TempDir::new().unwrap();
        let archive = LocalArchive::new(tmp.path());
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        // Mirror every channel except 304.
        for product in &Product::COMPOSITES[..5] {
            let dir = archive.day_directory(Satellite::Goes18, *product, &day);
            fs::create_dir_all(&dir).unwrap();
            let name = format!("dr_{}_g18_s20240601T100000Z_e20240601T100400Z_v1-0-2.fits",
                               product);
            fs::write(dir.join(name), b"").unwrap();
        }
        let err = CompositeSet::locate(&archive, Satellite::Goes18, &at(10, 0)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);

        let dir = archive.day_directory(Satellite::Goes18, Product::SuviL2Ci304, &day);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("dr_suvi-l2-ci304_g18_s20240601T100000Z_e20240601T100400Z_v1-0-2.fits"),
                  b"").unwrap();
        let set = CompositeSet::locate(&archive, Satellite::Goes18, &at(10, 0)).unwrap();
        assert_eq!(set.channels().len(), 6);
        assert!(set.get("304").unwrap().starts_with(tmp.path()));
    }

}  // mod tests.
