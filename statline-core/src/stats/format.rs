//! Metric value formatting
//!
//! Metrics sources gather raw numbers; these helpers turn them into the
//! compact strings that fit a 128px wide line.

use core::fmt::{self, Write};

use super::{LineText, MetricValue};

/// Byte count in binary units with integer truncation ("512B", "3G", "1T")
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanBytes(pub u64);

impl fmt::Display for HumanBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SYMBOLS: [char; 4] = ['K', 'M', 'G', 'T'];

        for (i, symbol) in SYMBOLS.iter().enumerate().rev() {
            let thresh = 1u64 << ((i + 1) * 10);
            if self.0 >= thresh {
                return write!(f, "{}{}", self.0 / thresh, symbol);
            }
        }
        write!(f, "{}B", self.0)
    }
}

/// Format uptime as total hours and minutes, e.g. "27h4m"
pub fn format_uptime(uptime_s: u64) -> MetricValue {
    let total_min = uptime_s / 60;
    let mut out = MetricValue::new();
    let _ = write!(out, "{}h{}m", total_min / 60, total_min % 60);
    out
}

/// Format a load average with two decimals
pub fn format_load(load: f64) -> MetricValue {
    let mut out = MetricValue::new();
    let _ = write!(out, "{:.2}", load);
    out
}

/// Format a byte count on its own
pub fn format_bytes(bytes: u64) -> MetricValue {
    let mut out = MetricValue::new();
    let _ = write!(out, "{}", HumanBytes(bytes));
    out
}

/// Format used/total storage with a whole percentage, e.g. "412M/3G 13%"
pub fn format_usage(used: u64, total: u64) -> MetricValue {
    let percent = if total == 0 {
        0
    } else {
        (u128::from(used) * 100 / u128::from(total)) as u64
    };
    let mut out = MetricValue::new();
    let _ = write!(
        out,
        "{}/{} {}%",
        HumanBytes(used),
        HumanBytes(total),
        percent
    );
    out
}

/// Join a stat label and value into one display line
///
/// The label is always kept whole; the value is truncated at a character
/// boundary if the combination would not fit.
pub fn compose_line(label: &str, value: &str) -> LineText {
    let mut line = LineText::new();
    let _ = line.push_str(label);
    for ch in value.chars() {
        if line.push(ch).is_err() {
            break;
        }
    }
    line
}
