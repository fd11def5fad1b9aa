//! HTTP protocol layer module
//!
//! Protocol-level helpers shared by the request handler, decoupled from
//! business logic: content types, response builders, cache validators,
//! range parsing, and the response decoration policy.

pub mod cache;
pub mod cors;
pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used functions
pub use range::parse_range_header;
pub use response::{
    build_304_response, build_404_response, build_405_response, build_416_response,
    build_options_response,
};
