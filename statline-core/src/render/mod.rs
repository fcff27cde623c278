//! Frame composition and the per-tick render loop

pub mod frame;
pub mod health;
pub mod render_loop;

pub use frame::{Frame, FRAME_BYTES};
pub use health::LinkHealth;
pub use render_loop::{RenderLoop, TickReport};
