// Copyright (c) 2025 Steven Rosenthal smr@dt3.org
// See LICENSE file in root directory for license terms.

pub mod archive_index;
pub mod catalog;
pub mod date_util;
pub mod error;
pub mod name_parser;
pub mod retriever_trait;
pub mod theme_map;
