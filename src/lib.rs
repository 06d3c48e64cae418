//! i18n-page - translate static HTML pages with `data-i18n` attributes
//!
//! Elements opt in to translation with `data-i18n="key"`; optional
//! `data-i18n-placeholder`, `data-i18n-title` and `data-i18n-only-title`
//! attributes control their placeholder and tooltip. The engine detects the
//! visitor language, caches the choice and resolves keys through
//! `[language, base language, fallback]`.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (translate, check, detect, init)
//! - `config`: Configuration file loading and parsing
//! - `core`: Document model, translation engine and page translator
//! - `issues`: Issue type definitions and reporting
//! - `logging`: Diagnostic logging setup
//! - `rules`: Checks run by `check`

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod logging;
pub mod rules;
