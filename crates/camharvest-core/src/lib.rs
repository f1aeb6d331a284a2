pub mod cache;
pub mod config;
pub mod delay;
pub mod error;
pub mod table;
pub mod types;

pub use cache::CachePolicy;
pub use config::{Credentials, HarvestConfig};
pub use delay::{DelayStrategy, NoDelay, RandomDelay};
pub use error::{HarvestError, HarvestResult};
pub use types::*;
