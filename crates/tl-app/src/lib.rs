//! Shared application service layer for thermolog.
//!
//! Sits between the command-line front end and the processing crates:
//! rig configuration loading, delimited-log ingestion and export, processing
//! runs, and queries over the derived records.

pub mod config_service;
pub mod error;
pub mod log_service;
pub mod query;
pub mod run_service;

pub use config_service::{ConfigSummary, load_config, load_profile, summarize_config};
pub use error::{AppError, AppResult};
pub use log_service::{RowError, SampleLog, computed_path, latest_log, read_samples, write_records};
pub use query::{extract_series, headline, tail};
pub use run_service::{LogSource, ProcessRequest, ProcessResponse, RunTiming, process_log};
