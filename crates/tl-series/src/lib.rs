//! tl-series: row-by-row conversion of raw logger samples into derived records.
//!
//! Each [`DerivedRecord`] is a pure function of one [`Sample`] and the shared
//! calibration, so output row `i` depends only on input row `i`. Rows can be
//! processed lazily, sequentially or in parallel with identical results.

pub mod processor;
pub mod record;
pub mod sample;
pub mod summary;

pub use processor::TimeSeriesProcessor;
pub use record::{DerivedRecord, Metric};
pub use sample::{Sample, TimeMarker};
pub use summary::{MetricStats, SeriesSummary};
