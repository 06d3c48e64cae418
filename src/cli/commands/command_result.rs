use crate::{
    cli::exit_status::ExitStatus,
    core::{TranslateStats, engine::DetectionSource},
    issues::Issue,
};

#[derive(Debug)]
pub enum CommandSummary {
    Translate(TranslateSummary),
    Check,
    Detect(DetectSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct TranslateSummary {
    pub language: String,
    pub pages_written: usize,
    /// `None` when pages were rewritten in place.
    pub out_dir: Option<String>,
    pub stats: TranslateStats,
}

#[derive(Debug)]
pub struct DetectSummary {
    pub language: String,
    pub languages: Vec<String>,
    pub fallback_lng: String,
    /// `None` when nothing matched and the fallback was used.
    pub source: Option<DetectionSource>,
    /// Locale codes with a registered resource table, sorted.
    pub available: Vec<String>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    pub error: Option<String>,
}

/// Result of running a command.
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 is returned when error_count > 0.
    pub exit_on_errors: bool,
    /// Issues found by the command, sorted by location.
    pub issues: Vec<Issue>,
    /// Number of files that failed to parse.
    pub parse_error_count: usize,
    /// Number of HTML pages processed.
    pub pages_checked: usize,
    /// Number of locale tables loaded.
    pub locale_files_checked: usize,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        if self.exit_on_errors && self.error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
