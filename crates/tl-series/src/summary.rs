//! Per-metric summary statistics over a processed run.

use tl_core::Real;

use crate::record::{DerivedRecord, Metric};

/// Statistics over the present values of one metric.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MetricStats {
    pub count: usize,
    pub mean: Option<Real>,
    pub min: Option<Real>,
    pub max: Option<Real>,
}

impl MetricStats {
    fn from_values(values: impl Iterator<Item = Real>) -> Self {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = Real::INFINITY;
        let mut max = Real::NEG_INFINITY;
        for v in values {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }
        if count == 0 {
            return Self::default();
        }
        Self {
            count,
            mean: Some(sum / count as Real),
            min: Some(min),
            max: Some(max),
        }
    }
}

/// Summary of a processed run.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesSummary {
    pub rows: usize,
    stats: [MetricStats; Metric::COUNT],
}

impl SeriesSummary {
    pub fn from_records(records: &[DerivedRecord]) -> Self {
        let stats = Metric::ALL
            .map(|metric| MetricStats::from_values(records.iter().filter_map(|r| r.get(metric))));
        Self {
            rows: records.len(),
            stats,
        }
    }

    pub fn get(&self, metric: Metric) -> &MetricStats {
        &self.stats[metric.index()]
    }

    /// Metrics with at least one present value, in column order.
    pub fn populated(&self) -> impl Iterator<Item = (Metric, &MetricStats)> + '_ {
        Metric::ALL
            .into_iter()
            .map(move |m| (m, self.get(m)))
            .filter(|(_, s)| s.count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(q_dot: Option<Real>) -> DerivedRecord {
        let mut values = [None; Metric::COUNT];
        values[Metric::QDot.index()] = q_dot;
        DerivedRecord::new(
            crate::sample::Sample::new(crate::sample::TimeMarker::Index(0)),
            values,
        )
    }

    #[test]
    fn skips_missing_values() {
        let records = vec![record(Some(10.0)), record(None), record(Some(30.0))];
        let summary = SeriesSummary::from_records(&records);
        assert_eq!(summary.rows, 3);
        let q = summary.get(Metric::QDot);
        assert_eq!(q.count, 2);
        assert_eq!(q.mean, Some(20.0));
        assert_eq!(q.min, Some(10.0));
        assert_eq!(q.max, Some(30.0));
    }

    #[test]
    fn all_missing_column_has_no_stats() {
        let summary = SeriesSummary::from_records(&[record(None)]);
        assert_eq!(*summary.get(Metric::Efficiency), MetricStats::default());
        assert_eq!(summary.populated().count(), 0);
    }

    #[test]
    fn empty_run() {
        let summary = SeriesSummary::from_records(&[]);
        assert_eq!(summary.rows, 0);
        assert_eq!(summary.get(Metric::QDot).mean, None);
    }
}
