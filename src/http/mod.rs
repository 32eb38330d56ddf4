//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the expense logic.

pub mod query;
pub mod response;

// Re-export commonly used types
pub use query::QueryParams;
pub use response::{build_options_response, json_response};
