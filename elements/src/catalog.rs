// Copyright (c) 2025 Steven Rosenthal smr@dt3.org
// See LICENSE file in root directory for license terms.

use std::fmt;
use std::str::FromStr;

use crate::error::ArchiveError;
use crate::name_parser::NamingConvention;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Satellite {
    Goes16,
    Goes17,
    Goes18,
}

impl Satellite {
    pub const ALL: [Satellite; 3] =
        [Satellite::Goes16, Satellite::Goes17, Satellite::Goes18];

    /// Directory name used for this satellite in the archive layout.
    pub fn archive_name(&self) -> &'static str {
        match self {
            Satellite::Goes16 => "goes16",
            Satellite::Goes17 => "goes17",
            Satellite::Goes18 => "goes18",
        }
    }
}

impl fmt::Display for Satellite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.archive_name().to_uppercase())
    }
}

impl FromStr for Satellite {
    type Err = ArchiveError;

    // Accepts "GOES16", "goes-16", "g16" and "16".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s.chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        let number = normalized.strip_prefix("goes")
            .or_else(|| normalized.strip_prefix('g'))
            .unwrap_or(normalized.as_str());
        match number {
            "16" => Ok(Satellite::Goes16),
            "17" => Ok(Satellite::Goes17),
            "18" => Ok(Satellite::Goes18),
            _ => Err(ArchiveError::InvalidArgument(
                format!("unknown satellite {:?}", s))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Product {
    SuviL2Ci094,
    SuviL2Ci131,
    SuviL2Ci171,
    SuviL2Ci195,
    SuviL2Ci284,
    SuviL2Ci304,
    SuviL1bFe094,
    SuviL1bFe131,
    SuviL1bFe171,
    SuviL1bFe195,
    SuviL1bFe284,
    SuviL1bHe304,
}

impl Product {
    pub const ALL: [Product; 12] = [
        Product::SuviL2Ci094, Product::SuviL2Ci131, Product::SuviL2Ci171,
        Product::SuviL2Ci195, Product::SuviL2Ci284, Product::SuviL2Ci304,
        Product::SuviL1bFe094, Product::SuviL1bFe131, Product::SuviL1bFe171,
        Product::SuviL1bFe195, Product::SuviL1bFe284, Product::SuviL1bHe304,
    ];

    /// The Level 2 composite products, in ascending wavelength order.
    pub const COMPOSITES: [Product; 6] = [
        Product::SuviL2Ci094, Product::SuviL2Ci131, Product::SuviL2Ci171,
        Product::SuviL2Ci195, Product::SuviL2Ci284, Product::SuviL2Ci304,
    ];

    /// Directory name used for this product in the archive layout, e.g.
    /// "suvi-l2-ci094".
    pub fn archive_name(&self) -> &'static str {
        match self {
            Product::SuviL2Ci094 => "suvi-l2-ci094",
            Product::SuviL2Ci131 => "suvi-l2-ci131",
            Product::SuviL2Ci171 => "suvi-l2-ci171",
            Product::SuviL2Ci195 => "suvi-l2-ci195",
            Product::SuviL2Ci284 => "suvi-l2-ci284",
            Product::SuviL2Ci304 => "suvi-l2-ci304",
            Product::SuviL1bFe094 => "suvi-l1b-fe094",
            Product::SuviL1bFe131 => "suvi-l1b-fe131",
            Product::SuviL1bFe171 => "suvi-l1b-fe171",
            Product::SuviL1bFe195 => "suvi-l1b-fe195",
            Product::SuviL1bFe284 => "suvi-l1b-fe284",
            Product::SuviL1bHe304 => "suvi-l1b-he304",
        }
    }

    /// Processing level, the second field of the archive name ("l2", "l1b").
    pub fn level(&self) -> &'static str {
        self.archive_name().split('-').nth(1).unwrap_or_default()
    }

    /// Angstroms.
    pub fn wavelength(&self) -> u32 {
        match self {
            Product::SuviL2Ci094 | Product::SuviL1bFe094 => 94,
            Product::SuviL2Ci131 | Product::SuviL1bFe131 => 131,
            Product::SuviL2Ci171 | Product::SuviL1bFe171 => 171,
            Product::SuviL2Ci195 | Product::SuviL1bFe195 => 195,
            Product::SuviL2Ci284 | Product::SuviL1bFe284 => 284,
            Product::SuviL2Ci304 | Product::SuviL1bHe304 => 304,
        }
    }

    pub fn naming_convention(&self) -> NamingConvention {
        match self.level() {
            "l2" => NamingConvention::CompositeImage,
            _ => NamingConvention::Level1Instrument,
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.archive_name())
    }
}

impl FromStr for Product {
    type Err = ArchiveError;

    // Accepts the archive name or its underscore form, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase().replace('_', "-");
        Product::ALL.iter()
            .find(|p| p.archive_name() == normalized)
            .copied()
            .ok_or_else(|| ArchiveError::InvalidArgument(
                format!("unknown product {:?}", s)))
    }
}

// mod tests.
