//! Issue types for `check` results.
//!
//! Each issue is self-contained with everything the reporter needs to
//! display it.

use enum_dispatch::enum_dispatch;

use crate::core::{MessageContext, SourceContext};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    MissingKey,
    Untranslated,
    EmptyTitleKey,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::MissingKey => write!(f, "missing-key"),
            Rule::Untranslated => write!(f, "untranslated"),
            Rule::EmptyTitleKey => write!(f, "empty-title-key"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

/// Which attribute of an element referenced a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum KeyAttribute {
    Text,
    Placeholder,
    Title,
}

impl std::fmt::Display for KeyAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyAttribute::Text => write!(f, "data-i18n"),
            KeyAttribute::Placeholder => write!(f, "data-i18n-placeholder"),
            KeyAttribute::Title => write!(f, "data-i18n-title"),
        }
    }
}

// ============================================================
// Issue Types - Markup (SourceContext)
// ============================================================

/// Key referenced by markup but found in no locale of the lookup chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingKeyIssue {
    pub context: SourceContext,
    pub key: String,
    pub attribute: KeyAttribute,
}

impl MissingKeyIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MissingKey
    }
}

/// `data-i18n-title` present but empty, so no title is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyTitleKeyIssue {
    pub context: SourceContext,
}

impl EmptyTitleKeyIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::EmptyTitleKey
    }
}

// ============================================================
// Issue Types - Message Files (MessageContext)
// ============================================================

/// Key used by markup, present in the fallback locale, missing elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntranslatedIssue {
    /// The fallback locale's entry.
    pub context: MessageContext,
    pub fallback_lng: String,
    /// Locales where this key is missing.
    pub missing_in: Vec<String>,
    /// Elements using the key.
    pub usages: Vec<SourceContext>,
}

impl UntranslatedIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::Untranslated
    }
}

// ============================================================
// Special Issue Types
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorFileType {
    Markup,
    Message,
}

/// File could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
    pub file_type: ParseErrorFileType,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// An i18n issue found by `check`.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MissingKey(MissingKeyIssue),
    Untranslated(UntranslatedIssue),
    EmptyTitleKey(EmptyTitleKeyIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }

    /// Ordering key: file, line, column, then rule.
    pub fn sort_key(&self) -> (String, usize, usize, Rule) {
        let (file, line, col) = match self.location() {
            ReportLocation::Source(ctx) => (ctx.file_path().to_string(), ctx.line(), ctx.col()),
            ReportLocation::Message(ctx) => (
                ctx.file_path().to_string(),
                ctx.line(),
                ctx.location.col,
            ),
            ReportLocation::File { path } => (path.to_string(), 0, 0),
        };
        (file, line, col, self.rule())
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Markup location (has source_line for context display).
    Source(&'a SourceContext),
    /// Message file location (no source_line, but has key/value).
    Message(&'a MessageContext),
    /// File-level only (for ParseError - no line context).
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types; `enum_dispatch` forwards the `Issue`
/// enum's calls without a vtable.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (key name, error, etc.).
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }

    /// Elements referencing the reported key.
    fn usages(&self) -> &[SourceContext] {
        &[]
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for MissingKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("referenced by {}", self.attribute))
    }
}

impl Report for EmptyTitleKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        "data-i18n-title is empty".to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("the title attribute is left unchanged".to_string())
    }
}

impl Report for UntranslatedIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "(\"{}\") missing in: {}",
            self.context.value,
            self.missing_in.join(", ")
        ))
    }

    fn usages(&self) -> &[SourceContext] {
        &self.usages
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(match self.file_type {
            ParseErrorFileType::Markup => "page skipped".to_string(),
            ParseErrorFileType::Message => "locale file skipped".to_string(),
        })
    }
}
