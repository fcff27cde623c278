//! Horizontal scrolling of the rotating stat line
//!
//! Each stat key has its own scroll state that survives rotations away
//! from and back to that key. Resets are driven only by the per-key state
//! machine (first visit, or text that starts overflowing after it fit),
//! never by the text content changing: live values such as the load
//! average change every tick and must not restart the scroll.

pub mod engine;
pub mod state;

pub use engine::ScrollEngine;
pub use state::{ScrollParams, ScrollPhase, ScrollState, Visit};
