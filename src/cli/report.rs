//! Report formatting and printing utilities.
//!
//! Issues are displayed in cargo-style format. Kept apart from the core so
//! the crate can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CommandResult, CommandSummary, DetectSummary, InitSummary, TranslateSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::SourceContext;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer. Issues are expected in display order.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let max_line_width = calculate_max_line_width(issues);

    for issue in issues {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(issues, writer);
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(pages: usize, locales: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} {}, {} {} - no issues found",
            pages,
            plural(pages, "page", "pages"),
            locales,
            plural(locales, "locale", "locales")
        )
        .green()
    );
}

/// Print a parse warning to a custom writer.
pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

pub fn print(result: &CommandResult, verbose: bool) {
    let stdout = &mut io::stdout().lock();

    match &result.summary {
        CommandSummary::Check => {
            report_to(&result.issues, stdout);
            if result.issues.is_empty() {
                print_success_to(result.pages_checked, result.locale_files_checked, stdout);
            }
        }
        CommandSummary::Translate(summary) => {
            report_to(&result.issues, stdout);
            print_translate_to(summary, stdout);
        }
        CommandSummary::Detect(summary) => print_detect_to(summary, stdout),
        CommandSummary::Init(summary) => print_init(summary),
    }

    print_parse_warning_to(result.parse_error_count, verbose, &mut io::stderr().lock());
}

// ============================================================
// Command Summaries
// ============================================================

fn print_translate_to<W: Write>(summary: &TranslateSummary, writer: &mut W) {
    let destination = match &summary.out_dir {
        Some(dir) => format!("into {}", dir),
        None => "in place".to_string(),
    };
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Translated {} {} to {} {}",
            summary.pages_written,
            plural(summary.pages_written, "page", "pages"),
            summary.language,
            destination
        )
        .green()
    );

    let stats = &summary.stats;
    let _ = writeln!(
        writer,
        "  {} {}, {} {}, {} {}, {} {}",
        stats.elements,
        plural(stats.elements, "element", "elements"),
        stats.texts,
        plural(stats.texts, "text", "texts"),
        stats.placeholders,
        plural(stats.placeholders, "placeholder", "placeholders"),
        stats.titles,
        plural(stats.titles, "title", "titles"),
    );
}

fn print_detect_to<W: Write>(summary: &DetectSummary, writer: &mut W) {
    let source = match summary.source {
        Some(source) => source.to_string(),
        None => format!("fallback ({})", summary.fallback_lng),
    };

    let _ = writeln!(writer, "{} {}", "language:".bold(), summary.language);
    let _ = writeln!(writer, "{} {}", "chain:".bold(), summary.languages.join(" -> "));
    let _ = writeln!(writer, "{} {}", "source:".bold(), source);
    let _ = writeln!(
        writer,
        "{} {}",
        "resources:".bold(),
        summary.available.join(", ")
    );
}

fn print_init(summary: &InitSummary) {
    if let Some(error) = &summary.error {
        eprintln!("{} {}", "error:".bold().red(), error);
    } else if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let (file_path, line, col, source_line) = extract_location_info(&loc);

    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    // Clickable location: --> path:line:col
    if line > 0 {
        let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);
    } else {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), file_path);
    }

    if let Some(source_line) = source_line {
        let caret_char = match severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // Caret under the column (col is 1-based)
        let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
        );
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    let usages = issue.usages();
    if !usages.is_empty() {
        print_usages(usages, writer, max_line_width);
    }

    let _ = writeln!(writer);
}

fn print_usages<W: Write>(usages: &[SourceContext], writer: &mut W, max_line_width: usize) {
    for usage in usages {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}:{}:{}",
            "",
            "=".blue(),
            "used:".bold(),
            usage.file_path(),
            usage.line(),
            usage.col(),
            width = max_line_width
        );
    }
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Warning)
        .count();
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            plural(total_problems, "problem", "problems"),
            total_errors,
            plural(total_errors, "error", "errors").red(),
            total_warnings,
            plural(total_warnings, "warning", "warnings").yellow()
        );
    }
}

fn extract_location_info<'a>(
    loc: &'a ReportLocation<'a>,
) -> (&'a str, usize, usize, Option<&'a str>) {
    match loc {
        ReportLocation::Source(ctx) => (
            ctx.file_path(),
            ctx.line(),
            ctx.col(),
            Some(&ctx.source_line),
        ),
        ReportLocation::Message(ctx) => (ctx.file_path(), ctx.line(), ctx.location.col, None),
        ReportLocation::File { path } => (path, 0, 0, None),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line()),
            ReportLocation::Message(_) | ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}
