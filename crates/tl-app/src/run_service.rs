//! Processing runs: rig file plus logger CSV to derived records.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tl_series::{DerivedRecord, SeriesSummary, TimeSeriesProcessor};

use crate::config_service;
use crate::error::AppResult;
use crate::log_service::{self, RowError};

/// Which log to process.
#[derive(Debug, Clone, Copy)]
pub enum LogSource<'a> {
    File(&'a Path),
    /// Most recent `data_*.csv` in a directory
    LatestIn(&'a Path),
}

/// Request to process one log.
#[derive(Debug, Clone)]
pub struct ProcessRequest<'a> {
    pub config_path: &'a Path,
    pub log: LogSource<'a>,
    /// Where to write the computed log. `None` skips writing.
    pub output_path: Option<PathBuf>,
    pub parallel: bool,
}

impl<'a> ProcessRequest<'a> {
    /// Read-only run: nothing is written.
    pub fn new(config_path: &'a Path, log: LogSource<'a>) -> Self {
        Self {
            config_path,
            log,
            output_path: None,
            parallel: false,
        }
    }
}

/// Wall-clock timing for a run, in seconds.
#[derive(Debug, Clone, Default)]
pub struct RunTiming {
    pub load_s: f64,
    pub process_s: f64,
    pub write_s: f64,
    pub total_s: f64,
}

/// Result of a processing run.
#[derive(Debug, Clone)]
pub struct ProcessResponse {
    pub config_name: String,
    pub log_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub rows_read: usize,
    pub rejected: Vec<RowError>,
    pub records: Vec<DerivedRecord>,
    pub summary: SeriesSummary,
    pub timing: RunTiming,
}

/// Load the rig, read the log, derive every row and optionally write the
/// computed log.
///
/// Configuration errors are reported before the log is opened.
pub fn process_log(request: &ProcessRequest) -> AppResult<ProcessResponse> {
    let started = Instant::now();

    let (config, profile) = config_service::load_profile(request.config_path)?;
    let processor = TimeSeriesProcessor::new(profile)?;

    let log_path = match request.log {
        LogSource::File(path) => path.to_path_buf(),
        LogSource::LatestIn(dir) => log_service::latest_log(dir)?,
    };
    let log = log_service::read_samples(&log_path)?;
    let load_s = started.elapsed().as_secs_f64();

    let process_start = Instant::now();
    let records = if request.parallel {
        processor.process_par(&log.samples)
    } else {
        processor.process(&log.samples)
    };
    let summary = SeriesSummary::from_records(&records);
    let process_s = process_start.elapsed().as_secs_f64();

    let write_start = Instant::now();
    if let Some(out) = &request.output_path {
        log_service::write_records(out, &records)?;
    }
    let write_s = write_start.elapsed().as_secs_f64();

    let timing = RunTiming {
        load_s,
        process_s,
        write_s,
        total_s: started.elapsed().as_secs_f64(),
    };

    tracing::info!(
        config = %config.name,
        log = %log_path.display(),
        rows = records.len(),
        rejected = log.rejected.len(),
        parallel = request.parallel,
        total_s = timing.total_s,
        "processed log"
    );

    Ok(ProcessResponse {
        config_name: config.name,
        log_path,
        output_path: request.output_path.clone(),
        rows_read: log.rows_read,
        rejected: log.rejected,
        records,
        summary,
        timing,
    })
}
