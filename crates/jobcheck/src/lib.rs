mod call;
mod config;
mod event_log;
mod execution;
mod inventory;
mod job_config;
mod query;
mod sources;
mod status_parser;
mod summary;
mod types;
pub mod utils;

pub use call::*;
pub use config::*;
pub use event_log::*;
pub use execution::*;
pub use inventory::*;
pub use job_config::*;
pub use query::*;
pub use sources::*;
pub use status_parser::*;
pub use summary::*;
pub use types::*;

pub use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Error>;
