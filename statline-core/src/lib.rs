//! Board-agnostic core logic for the statline status display
//!
//! This crate contains all application logic that does not depend on
//! specific hardware or operating system services:
//!
//! - Collaborator traits (metrics source, display sink, font)
//! - Stat keys, descriptors and value formatting
//! - Stat rotation (slow cadence)
//! - Per-stat horizontal scroll state machine (fast cadence)
//! - Frame buffer and the per-tick render loop
//! - Configuration type definitions and validation

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod render;
pub mod rotation;
pub mod scroll;
pub mod stats;
pub mod traits;

pub use config::{ConfigError, StatlineConfig};
pub use render::{Frame, RenderLoop, TickReport};
pub use rotation::StatRotator;
pub use scroll::{ScrollEngine, ScrollPhase, Visit};
pub use stats::{StatDescriptor, StatKey};
