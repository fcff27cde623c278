//! Metrics source trait

use core::fmt;

use crate::stats::{MetricValue, StatKey};

/// Errors reading a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricError {
    /// The value could not be read right now
    Unavailable,
    /// The platform does not provide this metric at all
    Unsupported,
}

impl fmt::Display for MetricError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricError::Unavailable => f.write_str("metric unavailable"),
            MetricError::Unsupported => f.write_str("metric unsupported on this platform"),
        }
    }
}

impl core::error::Error for MetricError {}

/// Trait for system metric acquisition
///
/// Values come back without their label; the render loop adds the
/// configured prefix.
pub trait MetricsSource {
    /// Host name shown on the top line
    fn hostname(&mut self) -> Result<MetricValue, MetricError>;

    /// Current value of a rotating stat
    fn get_metric(&mut self, key: StatKey) -> Result<MetricValue, MetricError>;
}
