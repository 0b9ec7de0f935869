pub mod cache;
pub mod config;
pub mod constants;
pub mod crossref;
pub mod error;
pub mod library;
pub mod logging;
pub mod registry;
pub mod sanitize;
pub mod server;
pub mod source;
pub mod store;
pub mod types;

pub use error::{BibleError, Result};
pub use library::Library;
