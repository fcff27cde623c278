//! Collaborator traits
//!
//! These traits define the interface between the render logic and the
//! platform: where metric text comes from, how text is measured and
//! rasterized, and where finished frames go.

pub mod display;
pub mod font;
pub mod metrics;

pub use display::{DisplayError, DisplaySink};
pub use font::{TextMeasure, TextRenderer};
pub use metrics::{MetricError, MetricsSource};
