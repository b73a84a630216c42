//! HTTP protocol layer module
//!
//! Response builders and the JSON envelope, independent of routing.

pub mod envelope;
pub mod response;

// Re-export commonly used items
pub use response::{
    apply_common_headers, build_405_response, build_413_response, build_health_response,
    build_html_response, build_json_response, build_options_response,
};
