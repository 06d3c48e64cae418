//! Core translation pipeline.
//!
//! - `dom`: document abstraction and the HTML tree
//! - `engine`: resource tables, language detection and lookups
//! - `translate`: the page translation pass
//! - `context`: project-level state shared by CLI commands

pub mod context;
pub mod data;
pub mod dom;
pub mod engine;
pub mod file_scanner;
pub mod parsers;
pub mod translate;
pub mod utils;

pub use context::{PageContext, ParsedPage};
pub use data::{
    AllLocaleMessages, LocaleMessages, MessageContext, MessageLocation, SourceContext,
    SourceLocation,
};
pub use translate::{FnContext, TranslateStats, TranslationContext, translate_page};
