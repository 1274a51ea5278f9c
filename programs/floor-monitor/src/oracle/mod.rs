pub mod collect;
pub mod feed;

pub use collect::*;
pub use feed::*;
