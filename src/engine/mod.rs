pub mod input;
pub mod time;

pub use input::{PointerInput, PointerTracker};
pub use time::FrameTimer;
