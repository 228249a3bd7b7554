// Copyright (c) 2025 Steven Rosenthal smr@dt3.org
// See LICENSE file in root directory for license terms.

//! Extraction of observation times from archive file names.
//!
//! SUVI file names carry their observation window in two underscore-separated
//! fields, e.g.
//!
//! `dr_suvi-l2-ci094_g16_s20240101T120000Z_e20240101T120400Z_v1-0-1.fits`
//!
//! `OR_SUVI-L1b-Fe093_G16_s20190011200052_e20190011200062_c20190011200099.fits.gz`
//!
//! The composite form uses calendar dates; the Level 1b form uses the day of
//! the year followed by a tenths-of-second digit, which is ignored. No time
//! zone is applied: the times are taken literally from the name.

use chrono::NaiveDateTime;

use crate::error::ArchiveError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NamingConvention {
    // Level 2 composite image products.
    CompositeImage,
    // Level 1b instrument products.
    Level1Instrument,
    // Anything else; names are not parsed.
    Unrecognized,
}

/// Observation window embedded in a file name. Both ends are always present
/// together.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObservationSpan {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

const FIELD_DELIMITER: char = '_';
const FIELD_COUNT: usize = 6;
const START_FIELD: usize = 3;
const END_FIELD: usize = 4;

const COMPOSITE_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const LEVEL1_FORMAT: &str = "%Y%j%H%M%S";

/// Returns the observation span encoded in `name` under `convention`.
///
/// Returns `Ok(None)` for `NamingConvention::Unrecognized`, without looking at
/// the name. Returns `MalformedName` if the name does not have exactly six
/// underscore-separated fields, or if its start or end field does not match
/// the convention's grammar.
pub fn parse_dates(name: &str, convention: NamingConvention)
                   -> Result<Option<ObservationSpan>, ArchiveError> {
    let (format, strip_tenths) = match convention {
        NamingConvention::CompositeImage => (COMPOSITE_FORMAT, false),
        NamingConvention::Level1Instrument => (LEVEL1_FORMAT, true),
        NamingConvention::Unrecognized => return Ok(None),
    };
    let fields: Vec<&str> = name.split(FIELD_DELIMITER).collect();
    if fields.len() != FIELD_COUNT {
        return Err(ArchiveError::malformed(
            name, format!("expected {} fields, got {}", FIELD_COUNT, fields.len())));
    }
    let (mut start_field, mut end_field) = (fields[START_FIELD], fields[END_FIELD]);
    if strip_tenths {
        start_field = strip_last_char(start_field);
        end_field = strip_last_char(end_field);
    }
    let span = ObservationSpan{
        start: parse_field(name, start_field, 's', format)?,
        end: parse_field(name, end_field, 'e', format)?,
    };
    Ok(Some(span))
}

/// Formats `timestamp` as a composite-image start ('s') or end ('e') field.
pub fn format_composite_field(prefix: char, timestamp: &NaiveDateTime) -> String {
    format!("{}{}", prefix, timestamp.format(COMPOSITE_FORMAT))
}

fn parse_field(name: &str, field: &str, prefix: char, format: &str)
               -> Result<NaiveDateTime, ArchiveError> {
    let body = field.strip_prefix(prefix).ok_or_else(|| ArchiveError::malformed(
        name, format!("field {:?} does not start with '{}'", field, prefix)))?;
    NaiveDateTime::parse_from_str(body, format).map_err(|e| ArchiveError::malformed(
        name, format!("field {:?}: {}", field, e)))
}

fn strip_last_char(field: &str) -> &str {
    let mut chars = field.chars();
    chars.next_back();
    chars.as_str()
}

// mod tests.
