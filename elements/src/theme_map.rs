// Copyright (c) 2025 Steven Rosenthal smr@dt3.org
// See LICENSE file in root directory for license terms.

use std::collections::BTreeMap;

use crate::error::ArchiveError;

/// Label value of pixels that belong to no theme.
pub const UNLABELED: u8 = 0;

/// Widest feature name the saved theme table can hold, in bytes.
pub const MAX_THEME_NAME_LEN: usize = 22;

/// Theme index to theme name, e.g. {1: "outer_space", 2: "bright_region"}.
/// Never holds the `UNLABELED` index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThemeMapping {
    themes: BTreeMap<u8, String>,
}

impl ThemeMapping {
    pub fn new() -> Self {
        ThemeMapping{themes: BTreeMap::new()}
    }

    /// Builds a mapping from the rows of a stored theme table. A row for the
    /// `UNLABELED` index is dropped; for duplicate indices the last row wins.
    pub fn from_table<I, S>(rows: I) -> Self
    where I: IntoIterator<Item = (u8, S)>, S: Into<String>
    {
        let themes = rows.into_iter()
            .filter(|(index, _)| *index != UNLABELED)
            .map(|(index, name)| (index, name.into()))
            .collect();
        ThemeMapping{themes}
    }

    /// Adds or replaces a theme. Returns InvalidArgument for the
    /// `UNLABELED` index or a name too wide for the theme table.
    pub fn insert(&mut self, index: u8, name: impl Into<String>)
                  -> Result<(), ArchiveError> {
        let name = name.into();
        if index == UNLABELED {
            return Err(ArchiveError::InvalidArgument(
                format!("theme index {} is reserved for unlabeled pixels", UNLABELED)));
        }
        if name.len() > MAX_THEME_NAME_LEN {
            return Err(ArchiveError::InvalidArgument(
                format!("theme name {:?} is longer than {} bytes",
                        name, MAX_THEME_NAME_LEN)));
        }
        self.themes.insert(index, name);
        Ok(())
    }

    pub fn get(&self, index: u8) -> Option<&str> {
        self.themes.get(&index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// True when both mappings have exactly the same indices, each with the
    /// same name.
    pub fn complies_with(&self, other: &ThemeMapping) -> bool {
        self.themes.len() == other.themes.len() &&
            self.themes.iter().all(|(index, name)| {
                other.themes.get(index) == Some(name)
            })
    }

    /// Rows of the theme table as saved: ascending by index.
    pub fn table_rows(&self) -> impl Iterator<Item = (u8, &str)> {
        self.themes.iter().map(|(index, name)| (*index, name.as_str()))
    }
}

/// A labelled image: one theme index per pixel, row major, plus the header
/// metadata and the theme mapping it was labelled with.
#[derive(Clone, Debug, PartialEq)]
pub struct ThematicMap {
    width: usize,
    height: usize,
    labels: Vec<u8>,
    metadata: BTreeMap<String, String>,
    mapping: ThemeMapping,
}

impl ThematicMap {
    pub fn new(width: usize, height: usize, labels: Vec<u8>,
               metadata: BTreeMap<String, String>, mapping: ThemeMapping)
               -> Result<Self, ArchiveError> {
        if labels.len() != width * height {
            return Err(ArchiveError::InvalidArgument(
                format!("{} labels for a {}x{} map", labels.len(), width, height)));
        }
        Ok(ThematicMap{width, height, labels, metadata, mapping})
    }

    /// An entirely unlabeled map whose header carries only `DATE-OBS`.
    pub fn blank(width: usize, height: usize, date_obs: &str, mapping: ThemeMapping)
                 -> Self {
        let mut metadata = BTreeMap::new();
        metadata.insert("DATE-OBS".to_string(), date_obs.to_string());
        ThematicMap{width, height,
                    labels: vec![UNLABELED; width * height],
                    metadata, mapping}
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    pub fn label(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.labels[y * self.width + x])
    }

    /// Labels the pixel at (x, y) with `theme`, which must be `UNLABELED` or
    /// an index of this map's mapping.
    pub fn set_label(&mut self, x: usize, y: usize, theme: u8)
                     -> Result<(), ArchiveError> {
        if x >= self.width || y >= self.height {
            return Err(ArchiveError::InvalidArgument(
                format!("pixel ({}, {}) is outside the {}x{} map",
                        x, y, self.width, self.height)));
        }
        if theme != UNLABELED && self.mapping.get(theme).is_none() {
            return Err(ArchiveError::InvalidArgument(
                format!("no theme with index {}", theme)));
        }
        self.labels[y * self.width + x] = theme;
        Ok(())
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    pub fn mapping(&self) -> &ThemeMapping {
        &self.mapping
    }

    /// Header entries written on save. `COMMENT` cards are not carried over.
    pub fn header_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.metadata.iter()
            .filter(|(key, _)| key.as_str() != "COMMENT")
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Whether a map labelled under `mapping` can be edited as this one.
    pub fn complies_with_mapping(&self, mapping: &ThemeMapping) -> bool {
        self.mapping.complies_with(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard_mapping() -> ThemeMapping {
        ThemeMapping::from_table([(1, "outer_space"), (3, "bright_region"),
                                  (4, "filament")])
    }

    #[test]
    fn test_from_table_drops_unlabeled() {
        let mapping = ThemeMapping::from_table([(0, "unlabeled"), (2, "corona"),
                                                (1, "outer_space")]);
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get(0), None);
        assert_eq!(mapping.get(2), Some("corona"));
        assert!(ThemeMapping::from_table([(0u8, "unlabeled")]).is_empty());
    }

    #[test]
    fn test_complies_with() {
        let mapping = standard_mapping();
        assert!(mapping.complies_with(&standard_mapping()));
        assert!(mapping.complies_with(&ThemeMapping::from_table(
            [(4, "filament"), (0, "unlabeled"), (1, "outer_space"),
             (3, "bright_region")])));

        // Extra theme on either side.
        let mut bigger = standard_mapping();
        bigger.insert(5, "flare").unwrap();
        assert!(!mapping.complies_with(&bigger));
        assert!(!bigger.complies_with(&mapping));

        // Same indices, different name.
        let renamed = ThemeMapping::from_table([(1, "outer_space"), (3, "bright_region"),
                                                (4, "prominence")]);
        assert!(!mapping.complies_with(&renamed));
        assert!(!renamed.complies_with(&mapping));

        // Same size, different indices.
        let shifted = ThemeMapping::from_table([(1, "outer_space"), (2, "bright_region"),
                                                (4, "filament")]);
        assert!(!mapping.complies_with(&shifted));
        assert!(ThemeMapping::new().complies_with(&ThemeMapping::new()));
    }

    #[test]
    fn test_insert() {
        let mut mapping = ThemeMapping::new();
        assert!(mapping.insert(0, "unlabeled").is_err());
        assert!(mapping.insert(1, "a_name_well_over_the_limit").is_err());
        mapping.insert(1, "x".repeat(MAX_THEME_NAME_LEN)).unwrap();
        mapping.insert(1, "outer_space").unwrap();
        assert_eq!(mapping.get(1), Some("outer_space"));
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn test_table_rows_sorted() {
        let mapping = ThemeMapping::from_table([(9, "a"), (2, "z"), (5, "m")]);
        let rows: Vec<(u8, &str)> = mapping.table_rows().collect();
        assert_eq!(rows, vec![(2, "z"), (5, "m"), (9, "a")]);
    }

    #[test]
    fn test_thematic_map() {
        assert!(ThematicMap::new(3, 2, vec![0; 5], BTreeMap::new(),
                                 standard_mapping()).is_err());

        let mut metadata = BTreeMap::new();
        metadata.insert("DATE-OBS".to_string(), "2024-01-01T10:00:00".to_string());
        metadata.insert("COMMENT".to_string(), "labelled by hand".to_string());
        metadata.insert("TELESCOP".to_string(), "GOES-16".to_string());
        let mut map = ThematicMap::new(3, 2, vec![0, 1, 3, 4, 0, 0], metadata,
                                       standard_mapping()).unwrap();
        assert_eq!(map.label(2, 0), Some(3));
        assert_eq!(map.label(0, 1), Some(4));
        assert_eq!(map.label(3, 0), None);

        map.set_label(1, 1, 4).unwrap();
        assert_eq!(map.label(1, 1), Some(4));
        map.set_label(1, 1, UNLABELED).unwrap();
        assert_eq!(map.label(1, 1), Some(0));
        assert!(map.set_label(1, 1, 2).is_err());
        assert!(map.set_label(0, 2, 1).is_err());

        let header: Vec<(&str, &str)> = map.header_entries().collect();
        assert_eq!(header, vec![("DATE-OBS", "2024-01-01T10:00:00"),
                                ("TELESCOP", "GOES-16")]);
        assert!(map.complies_with_mapping(&standard_mapping()));
        assert!(!map.complies_with_mapping(&ThemeMapping::new()));
    }

    #[test]
    fn test_blank() {
        let map = ThematicMap::blank(4, 4, "2024-01-01", standard_mapping());
        assert_eq!(map.labels().len(), 16);
        assert!(map.labels().iter().all(|l| *l == UNLABELED));
        assert_eq!(map.metadata().get("DATE-OBS").map(String::as_str),
                   Some("2024-01-01"));
        assert_eq!((map.width(), map.height()), (4, 4));
        assert_eq!(map.mapping().len(), 3);
    }

}  // mod tests.
