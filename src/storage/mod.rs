//! Storage layer for budget-dashboard
//!
//! The budget file itself is read-only input; the only thing written is the
//! disposable parse cache.

pub mod cache;
pub mod file_io;

pub use cache::{CacheKey, TableCache};
pub use file_io::{read_json_optional, write_json_atomic};
