//! Rule implementations for `check`.
//!
//! Each rule is a pure function over the inputs it needs, plus a thin
//! wrapper taking the [`PageContext`](crate::core::PageContext).
//!
//! - `helpers`: key references and usage maps shared by the rules
//! - `missing_key`: keys no locale of the lookup chain defines
//! - `untranslated`: keys the fallback has but other locales lack
//! - `empty_title`: empty `data-i18n-title` attributes

pub mod empty_title;
pub mod helpers;
pub mod missing_key;
pub mod untranslated;

pub use helpers::{KeyReference, build_key_usage_map, collect_key_references};
