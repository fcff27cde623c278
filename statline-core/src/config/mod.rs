//! Configuration types
//!
//! Static configuration built once at startup and passed by reference to
//! the rotator, scroll engine and render loop. There is no runtime
//! reconfiguration.

pub mod types;
pub mod validate;

pub use types::*;
pub use validate::ConfigError;
