//! Rotating bottom-line stats
//!
//! Stat identity (keys and labels) plus the value formatting shared by
//! every metrics source.

pub mod descriptor;
pub mod format;

pub use descriptor::{StatDescriptor, StatKey};
pub use format::{compose_line, format_bytes, format_load, format_uptime, format_usage};

use heapless::String;

/// Maximum label length
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum metric value length
pub const MAX_VALUE_LEN: usize = 32;

/// Maximum length of a rendered display line (label + value)
pub const MAX_TEXT_LEN: usize = MAX_LABEL_LEN + MAX_VALUE_LEN;

/// Stat label / placeholder text
pub type Label = String<MAX_LABEL_LEN>;

/// Raw metric value as returned by a metrics source
pub type MetricValue = String<MAX_VALUE_LEN>;

/// Full line of display text
pub type LineText = String<MAX_TEXT_LEN>;
