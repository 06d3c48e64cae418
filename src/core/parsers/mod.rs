//! File parsers.
//!
//! - `json`: locale resource files (flattened into dotted keys)

pub mod json;
