pub mod collection_status;
pub mod crash_history;
pub mod monitor_config;
pub mod response;
pub mod snapshot;

pub use collection_status::*;
pub use crash_history::*;
pub use monitor_config::*;
pub use response::*;
pub use snapshot::*;
