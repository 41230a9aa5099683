//! Delimited logger files: sample ingestion and derived-record export.
//!
//! Rows that cannot be read are rejected here, at ingestion, and reported
//! alongside the samples that were read. Rejection never reaches the
//! processor: every sample it sees is well-formed.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use csv::StringRecord;
use tl_core::{AdcCode, Channel, Real};
use tl_series::{DerivedRecord, Metric, Sample, TimeMarker};

use crate::error::{AppError, AppResult};

/// Cell spellings the logger uses for "no reading".
const MISSING_MARKERS: [&str; 5] = ["", "none", "nan", "na", "null"];

const ELAPSED_COLUMNS: [&str; 2] = ["seconds", "elapsed_s"];
const TIMESTAMP_COLUMN: &str = "timestamp";

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A row rejected during ingestion.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    /// 1-based file line, header included
    pub line: usize,
    pub message: String,
}

/// Ingestion output: accepted samples in file order plus rejected rows.
#[derive(Debug, Clone, Default)]
pub struct SampleLog {
    pub samples: Vec<Sample>,
    pub rejected: Vec<RowError>,
    pub rows_read: usize,
}

#[derive(Debug, Clone, Copy)]
enum TimeColumn {
    Elapsed(usize),
    Timestamp(usize),
    None,
}

/// Column positions resolved from the header row.
struct Layout {
    time: TimeColumn,
    channels: [Option<usize>; Channel::COUNT],
}

impl Layout {
    fn from_headers(headers: &StringRecord) -> Self {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().trim_start_matches('\u{feff}') == name)
        };

        let time = if let Some(idx) = ELAPSED_COLUMNS.iter().find_map(|c| position(*c)) {
            TimeColumn::Elapsed(idx)
        } else if let Some(idx) = position(TIMESTAMP_COLUMN) {
            TimeColumn::Timestamp(idx)
        } else {
            TimeColumn::None
        };

        Self {
            time,
            channels: Channel::ALL.map(|c| position(c.name())),
        }
    }
}

/// Read a logger CSV into samples.
///
/// Columns may appear in any order; unknown columns are ignored and channels
/// without a column are missing for every row.
pub fn read_samples(path: &Path) -> AppResult<SampleLog> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|source| AppError::LogRead {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    let layout = Layout::from_headers(&headers);

    let mut log = SampleLog::default();
    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2;
        log.rows_read += 1;

        let parsed = result
            .map_err(|e| format!("CSV parse error: {e}"))
            .and_then(|record| parse_row(&record, &layout, idx as u64));
        match parsed {
            Ok(sample) => log.samples.push(sample),
            Err(message) => log.rejected.push(RowError { line, message }),
        }
    }

    if !log.rejected.is_empty() {
        tracing::warn!(
            path = %path.display(),
            rejected = log.rejected.len(),
            "rows rejected at ingestion"
        );
    }
    tracing::debug!(path = %path.display(), rows = log.samples.len(), "read samples");
    Ok(log)
}

fn parse_row(record: &StringRecord, layout: &Layout, ordinal: u64) -> Result<Sample, String> {
    let time = match layout.time {
        TimeColumn::Elapsed(idx) => {
            let cell = record.get(idx).unwrap_or("");
            let secs: Real = cell
                .parse()
                .map_err(|_| format!("Invalid elapsed time '{cell}'"))?;
            if !secs.is_finite() {
                return Err(format!("Invalid elapsed time '{cell}'"));
            }
            TimeMarker::Elapsed(secs)
        }
        TimeColumn::Timestamp(idx) => {
            let cell = record.get(idx).unwrap_or("");
            TimeMarker::Timestamp(parse_timestamp(cell)?)
        }
        TimeColumn::None => TimeMarker::Index(ordinal),
    };

    let mut sample = Sample::new(time);
    for (channel, column) in Channel::ALL.into_iter().zip(layout.channels) {
        let Some(idx) = column else { continue };
        let code = parse_code(record.get(idx).unwrap_or(""))
            .map_err(|e| format!("{channel}: {e}"))?;
        sample.set(channel, code);
    }
    Ok(sample)
}

fn parse_timestamp(cell: &str) -> Result<NaiveDateTime, String> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(cell, fmt).ok())
        .ok_or_else(|| format!("Invalid timestamp '{cell}'"))
}

/// Parse one channel cell. Integral floats such as `512.0` are accepted
/// because some loggers write every column as float.
fn parse_code(cell: &str) -> Result<Option<AdcCode>, String> {
    if MISSING_MARKERS.iter().any(|m| cell.eq_ignore_ascii_case(m)) {
        return Ok(None);
    }
    if let Ok(code) = cell.parse::<AdcCode>() {
        return Ok(Some(code));
    }
    match cell.parse::<f64>() {
        Ok(v)
            if v.is_finite()
                && v.fract() == 0.0
                && v >= AdcCode::MIN as f64
                && v <= AdcCode::MAX as f64 =>
        {
            Ok(Some(v as AdcCode))
        }
        _ => Err(format!("Invalid ADC code '{cell}'")),
    }
}

/// Header of a computed log: time, raw codes, then every derived column.
pub fn record_header() -> Vec<&'static str> {
    std::iter::once("time")
        .chain(Channel::ALL.map(Channel::name))
        .chain(Metric::ALL.map(Metric::column))
        .collect()
}

fn format_value<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Write derived records. Missing values are empty cells.
pub fn write_records(path: &Path, records: &[DerivedRecord]) -> AppResult<()> {
    let write_err = |source| AppError::LogWrite {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(write_err)?;
    writer.write_record(record_header()).map_err(write_err)?;

    for record in records {
        let sample = record.sample();
        let row = std::iter::once(sample.time.to_string())
            .chain(Channel::ALL.map(|c| format_value(sample.code(c))))
            .chain(record.values().map(format_value));
        writer.write_record(row).map_err(write_err)?;
    }
    writer.flush()?;

    tracing::info!(path = %path.display(), rows = records.len(), "wrote computed log");
    Ok(())
}

/// Write a `(time, value)` series with the given value column name to any
/// sink: a file, or stdout.
pub fn write_series<W: Write>(out: W, column: &str, series: &[(TimeMarker, Real)]) -> AppResult<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["time", column])?;
    for (time, value) in series {
        writer.write_record([time.to_string(), value.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Most recently modified `data_*.csv` in `dir`.
pub fn latest_log(dir: &Path) -> AppResult<PathBuf> {
    let mut latest: Option<(std::time::SystemTime, PathBuf)> = None;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !(name.starts_with("data_") && name.ends_with(".csv")) {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        if latest.as_ref().is_none_or(|(t, _)| modified > *t) {
            latest = Some((modified, entry.path()));
        }
    }
    latest
        .map(|(_, path)| path)
        .ok_or_else(|| AppError::LogNotFound {
            dir: dir.to_path_buf(),
        })
}

/// `computed_<name>` beside the input log.
pub fn computed_path(log: &Path) -> PathBuf {
    let name = log
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "log.csv".to_string());
    log.with_file_name(format!("computed_{name}"))
}
