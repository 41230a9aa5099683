//! Query helpers over derived records.

use tl_core::Real;
use tl_series::{DerivedRecord, Metric, MetricStats, SeriesSummary, TimeMarker};

use crate::error::{AppError, AppResult};

/// Metrics reported as a run's headline figures.
pub const HEADLINE_METRICS: [Metric; 4] = [
    Metric::QDot,
    Metric::HeaterPower,
    Metric::PumpPowerCalc,
    Metric::Efficiency,
];

/// Extract the present values of one derived column, by column name.
pub fn extract_series(records: &[DerivedRecord], column: &str) -> AppResult<Vec<(TimeMarker, Real)>> {
    let metric = Metric::from_column(column).ok_or_else(|| {
        AppError::InvalidInput(format!("Unknown derived column: {}", column))
    })?;

    Ok(records
        .iter()
        .filter_map(|r| r.get(metric).map(|v| (r.sample().time.clone(), v)))
        .collect())
}

/// The last `n` records, or all of them if there are fewer.
pub fn tail(records: &[DerivedRecord], n: usize) -> &[DerivedRecord] {
    &records[records.len().saturating_sub(n)..]
}

/// Headline statistics, in display order.
pub fn headline(summary: &SeriesSummary) -> Vec<(Metric, MetricStats)> {
    HEADLINE_METRICS
        .iter()
        .map(|&m| (m, *summary.get(m)))
        .collect()
}
