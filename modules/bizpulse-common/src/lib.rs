pub mod types;
pub mod areas;
pub mod config;
pub mod error;

pub use types::*;
pub use areas::*;
pub use config::Config;
pub use error::BizPulseError;
