mod duration;
mod error;
mod event;
mod metadata;
mod status;

pub use duration::*;
pub use error::*;
pub use event::*;
pub use metadata::*;
pub use status::*;
