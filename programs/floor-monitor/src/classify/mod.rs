pub mod detector;
pub mod window;

pub use detector::*;
pub use window::*;
