//! Aggregated measurement data
//!
//! A view folds every recorded value for one tag combination into a single
//! `AggregationData`. Data is cumulative for the lifetime of the collector.

use serde::Serialize;

/// Aggregated state for one row of a view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AggregationData {
    /// Distribution of every recorded value
    Distribution(DistributionData),
    /// Most recently recorded value
    LastValue(LastValueData),
}

impl AggregationData {
    /// Fold one measurement in
    pub fn add(&mut self, value: f64) {
        match self {
            Self::Distribution(d) => d.add(value),
            Self::LastValue(l) => l.value = value,
        }
    }

    /// Distribution data, if this row aggregates a distribution
    pub fn as_distribution(&self) -> Option<&DistributionData> {
        match self {
            Self::Distribution(d) => Some(d),
            Self::LastValue(_) => None,
        }
    }

    /// Last-value data, if this row aggregates a gauge
    pub fn as_last_value(&self) -> Option<&LastValueData> {
        match self {
            Self::LastValue(l) => Some(l),
            Self::Distribution(_) => None,
        }
    }
}

/// Streaming distribution summary
///
/// Mean and squared deviation are updated incrementally (Welford), so no raw
/// samples are retained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionData {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub sum_of_squared_dev: f64,
    /// Upper-exclusive bucket boundaries
    pub bounds: Vec<f64>,
    /// One more entry than `bounds`; the last bucket is the overflow bucket
    pub bucket_counts: Vec<u64>,
}

impl DistributionData {
    /// Create an empty distribution over the given bucket boundaries
    pub fn new(bounds: &[f64]) -> Self {
        Self {
            count: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            mean: 0.0,
            sum_of_squared_dev: 0.0,
            bounds: bounds.to_vec(),
            bucket_counts: vec![0; bounds.len() + 1],
        }
    }

    /// Record a value
    pub fn add(&mut self, value: f64) {
        self.count += 1;
        self.min = self.min.min(value);
        self.max = self.max.max(value);

        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.sum_of_squared_dev += delta * (value - self.mean);

        let bucket = self.bounds.partition_point(|bound| *bound <= value);
        self.bucket_counts[bucket] += 1;
    }

    /// Sum of all recorded values
    pub fn sum(&self) -> f64 {
        self.mean * self.count as f64
    }
}

/// Last recorded value of a gauge
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LastValueData {
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_stats() {
        let mut d = DistributionData::new(&[10.0, 100.0]);
        for v in [5.0, 15.0, 25.0, 500.0] {
            d.add(v);
        }

        assert_eq!(d.count, 4);
        assert_eq!(d.min, 5.0);
        assert_eq!(d.max, 500.0);
        assert!((d.mean - 136.25).abs() < 1e-9);
        assert!((d.sum() - 545.0).abs() < 1e-9);
        assert_eq!(d.bucket_counts, vec![1, 2, 1]);
    }

    #[test]
    fn test_distribution_bucket_boundary_is_exclusive() {
        let mut d = DistributionData::new(&[10.0]);
        d.add(10.0);
        assert_eq!(d.bucket_counts, vec![0, 1]);
    }

    #[test]
    fn test_squared_deviation() {
        let mut d = DistributionData::new(&[]);
        for v in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            d.add(v);
        }
        // population variance is 4
        assert!((d.sum_of_squared_dev / d.count as f64 - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_last_value_overwrites() {
        let mut data = AggregationData::LastValue(LastValueData { value: 0.0 });
        data.add(3.0);
        data.add(1.5);
        assert_eq!(data.as_last_value().map(|l| l.value), Some(1.5));
        assert!(data.as_distribution().is_none());
    }
}
