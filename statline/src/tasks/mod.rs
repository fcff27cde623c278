//! Embassy async tasks
//!
//! One task does all the work; the stop signal comes in from the
//! signal-handler thread through `shutdown::SHUTDOWN`.

pub mod render;

pub use render::render_task;
