//! HTTP protocol layer module
//!
//! Protocol helpers decoupled from the file-serving logic: content types,
//! HTTP dates and response builders.

pub mod date;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_301_response, build_304_response, build_error_response, build_file_response,
    build_html_response, build_preflight_response,
};
