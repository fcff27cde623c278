//! Bottom-line stat rotation

pub mod rotator;

pub use rotator::StatRotator;
