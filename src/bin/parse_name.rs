// Copyright (c) 2025 Steven Rosenthal smr@dt3.org
// See LICENSE file in root directory for license terms.

use std::path::Path;

use clap::{Parser, ValueEnum};
use env_logger;
use log::{info, warn};

use solar_annotator_elements::name_parser::{parse_dates, NamingConvention};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Convention {
    Composite,
    Level1,
    Other,
}

impl From<Convention> for NamingConvention {
    fn from(c: Convention) -> Self {
        match c {
            Convention::Composite => NamingConvention::CompositeImage,
            Convention::Level1 => NamingConvention::Level1Instrument,
            Convention::Other => NamingConvention::Unrecognized,
        }
    }
}

/// Test program for extracting observation times from archive file names.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about=None)]
struct Args {
    /// Naming convention to parse with.
    #[arg(short, long, value_enum, default_value_t = Convention::Composite)]
    convention: Convention,

    /// File names or paths; only the final component is parsed.
    #[arg(required = true)]
    names: Vec<String>,
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let convention = NamingConvention::from(args.convention);
    for name in &args.names {
        let file_name = match Path::new(name).file_name() {
            Some(f) => f.to_string_lossy(),
            None => {
                warn!("Skipping {:?}: no file name", name);
                continue;
            },
        };
        match parse_dates(&file_name, convention) {
            Ok(Some(span)) => info!("{}: {} to {}", file_name, span.start, span.end),
            Ok(None) => info!("{}: not parsed under {:?}", file_name, convention),
            Err(e) => warn!("{}", e),
        }
    }
}
