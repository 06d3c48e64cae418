//! Core data types shared by the engine, the checker and the reporter.
//!
//! - `message`: locale resource tables (LocaleMessages, MessageContext)
//! - `source`: markup location types (SourceContext, SourceLocation)

pub mod message;
pub mod source;

pub use message::{AllLocaleMessages, LocaleMessages, MessageContext, MessageLocation};
pub use source::{SourceContext, SourceLocation};
