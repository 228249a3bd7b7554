// Copyright (c) 2025 Steven Rosenthal smr@dt3.org
// See LICENSE file in root directory for license terms.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use log::{error, info};

use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, registry, EnvFilter};

use solar_annotator::composite_set::CompositeSet;
use solar_annotator::local_archive::LocalArchive;
use solar_annotator_elements::catalog::{Product, Satellite};
use solar_annotator_elements::error::ArchiveError;
use solar_annotator_elements::retriever_trait::Retriever;

/// Searches a local mirror of the GOES SUVI archive.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about=None)]
struct Args {
    /// Root directory of the local archive mirror.
    #[arg(long)]
    data_dir: PathBuf,

    /// Directory for daily-rotated log files. Logs go only to stdout if unset.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// File name prefix for log files in `log_dir`.
    #[arg(long, default_value = "solar-archive.log")]
    log_file: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the files of a product over a time range.
    Search {
        /// GOES16, GOES17 or GOES18.
        #[arg(long, value_parser = parse_satellite)]
        satellite: Satellite,

        /// e.g. suvi-l2-ci094.
        #[arg(long, value_parser = parse_product)]
        product: Product,

        /// YYYY-MM-DDTHH:MM:SS or YYYY-MM-DD.
        #[arg(long, value_parser = parse_timestamp)]
        start: NaiveDateTime,

        /// Defaults to the end of `start`'s day.
        #[arg(long, value_parser = parse_timestamp)]
        end: Option<NaiveDateTime>,
    },

    /// Print the path of the file whose start time is nearest a given time.
    Nearest {
        #[arg(long, value_parser = parse_satellite)]
        satellite: Satellite,

        #[arg(long, value_parser = parse_product)]
        product: Product,

        #[arg(long, value_parser = parse_timestamp)]
        time: NaiveDateTime,
    },

    /// Print the nearest composite image for every SUVI channel.
    Composites {
        #[arg(long, value_parser = parse_satellite)]
        satellite: Satellite,

        #[arg(long, value_parser = parse_timestamp)]
        time: NaiveDateTime,
    },

    /// Copy the files of a product over a time range into a directory.
    Retrieve {
        #[arg(long, value_parser = parse_satellite)]
        satellite: Satellite,

        #[arg(long, value_parser = parse_product)]
        product: Product,

        #[arg(long, value_parser = parse_timestamp)]
        start: NaiveDateTime,

        #[arg(long, value_parser = parse_timestamp)]
        end: Option<NaiveDateTime>,

        /// Destination directory; created if missing.
        #[arg(long)]
        save_dir: PathBuf,
    },
}

fn parse_satellite(arg: &str) -> Result<Satellite, String> {
    arg.parse().map_err(|e: ArchiveError| e.to_string())
}

fn parse_product(arg: &str) -> Result<Product, String> {
    arg.parse().map_err(|e: ArchiveError| e.to_string())
}

fn parse_timestamp(arg: &str) -> Result<NaiveDateTime, String> {
    if let Ok(ts) = NaiveDateTime::parse_from_str(arg, "%Y-%m-%dT%H:%M:%S") {
        return Ok(ts);
    }
    NaiveDate::parse_from_str(arg, "%Y-%m-%d")
        .map(|d| d.and_time(chrono::NaiveTime::MIN))
        .map_err(|_| format!("expected YYYY-MM-DDTHH:MM:SS or YYYY-MM-DD, got {:?}", arg))
}

// The returned guards must be held until exit so buffered log lines are
// flushed.
fn init_logging(args: &Args) -> Result<Vec<WorkerGuard>, String> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let (non_blocking_stdout, stdout_guard) = NonBlockingBuilder::default()
        .lossy(false)
        .finish(std::io::stdout());
    let mut guards = vec![stdout_guard];

    let file_layer = match &args.log_dir {
        Some(log_dir) => {
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(&args.log_file)
                .max_log_files(10)
                .build(log_dir)
                .map_err(|e| format!("cannot log to {:?}: {}", log_dir, e))?;
            let (non_blocking_file, file_guard) = NonBlockingBuilder::default()
                .lossy(false)
                .finish(file_appender);
            guards.push(file_guard);
            Some(fmt::layer().with_ansi(false).with_writer(non_blocking_file))
        },
        None => None,
    };
    registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking_stdout))
        .with(file_layer)
        .init();
    Ok(guards)
}

fn run(archive: &LocalArchive, command: Command) -> Result<(), ArchiveError> {
    match command {
        Command::Search{satellite, product, start, end} => {
            let index = archive.search(satellite, product, &start, end.as_ref())?;
            for record in &index {
                let format_time = |t: Option<NaiveDateTime>| match t {
                    Some(t) => t.to_string(),
                    None => "-".to_string(),
                };
                println!("{}\t{}\t{}\t{}\t{}\t{}",
                         record.file_name,
                         format_time(record.start_time()),
                         format_time(record.end_time()),
                         record.modified_time,
                         record.size_label(),
                         record.path.display());
            }
        },
        Command::Nearest{satellite, product, time} => {
            let path = archive.retrieve_nearest(satellite, product, &time)?;
            println!("{}", path.display());
        },
        Command::Composites{satellite, time} => {
            let composites = CompositeSet::locate(archive, satellite, &time)?;
            for (channel, path) in composites.iter() {
                println!("{}\t{}", channel, path.display());
            }
        },
        Command::Retrieve{satellite, product, start, end, save_dir} => {
            let index = archive.search(satellite, product, &start, end.as_ref())?;
            for path in archive.retrieve(&index, &save_dir)? {
                println!("{}", path.display());
            }
        },
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let _guards = match init_logging(&args) {
        Ok(guards) => guards,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let archive = LocalArchive::new(&args.data_dir);
    info!("Using archive at {:?}", archive.root());
    match run(&archive, args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
            .and_hms_opt(3, 4, 5).unwrap();
        assert_eq!(parse_timestamp("2024-01-02T03:04:05").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-01-02").unwrap(),
                   NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(0, 0, 0).unwrap());
        assert!(parse_timestamp("02/01/2024").is_err());
    }

    #[test]
    fn test_args() {
        let args = Args::try_parse_from([
            "solar-archive", "--data-dir", "/data", "nearest",
            "--satellite", "goes16", "--product", "suvi-l2-ci171",
            "--time", "2024-01-02T03:04:05"]).unwrap();
        assert_eq!(args.data_dir, PathBuf::from("/data"));
        assert_eq!(args.log_file, "solar-archive.log");
        match args.command {
            Command::Nearest{satellite, product, ..} => {
                assert_eq!(satellite, Satellite::Goes16);
                assert_eq!(product, Product::SuviL2Ci171);
            },
            other => panic!("unexpected command {:?}", other),
        }
        assert!(Args::try_parse_from([
            "solar-archive", "--data-dir", "/data", "nearest",
            "--satellite", "goes99", "--product", "suvi-l2-ci171",
            "--time", "2024-01-02"]).is_err());
    }

}  // mod tests.
