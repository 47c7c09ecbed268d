//! Summary statistics over numeric samples.
//!
//! Samples may be missing (`None`) or invalid (NaN, infinite). Those are
//! filtered out before anything is computed, so a group with no valid
//! samples yields no statistic rather than a NaN one.

use serde::{Deserialize, Serialize};

/// Mean, spread and size of one group's valid samples
///
/// **Public** - emitted by the point-estimate layer of distribution charts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistic {
    /// Arithmetic mean
    pub mean: f64,

    /// Population variance (divides by N)
    pub variance: f64,

    /// Square root of the variance
    #[serde(rename = "stdDev")]
    pub std_dev: f64,

    /// Number of valid samples
    pub count: usize,
}

/// Return the sample value if it can take part in aggregation
///
/// **Public** - shared by the chart builders so both layers filter the same way
pub fn valid_sample(sample: Option<f64>) -> Option<f64> {
    sample.filter(|value| value.is_finite())
}

/// Aggregate a sequence of samples
///
/// **Public** - main entry point for statistics
///
/// # Arguments
/// * `samples` - Raw samples; `None`, NaN and infinities are skipped
///
/// # Returns
/// `None` when no valid sample remains, otherwise the population statistic
///
/// # Example
/// ```
/// use heterogeneity_charts::aggregator::aggregate;
///
/// let stat = aggregate(&[Some(0.2), Some(0.8), None]).unwrap();
/// assert_eq!(stat.count, 2);
/// assert!((stat.mean - 0.5).abs() < 1e-12);
/// ```
pub fn aggregate(samples: &[Option<f64>]) -> Option<Statistic> {
    let valid: Vec<f64> = samples.iter().copied().filter_map(valid_sample).collect();

    if valid.is_empty() {
        return None;
    }

    let count = valid.len();
    let n = count as f64;
    let mean = valid.iter().sum::<f64>() / n;
    let variance = valid.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    Some(Statistic {
        mean,
        variance,
        std_dev: variance.sqrt(),
        count,
    })
}
