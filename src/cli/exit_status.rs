use std::process::ExitCode;

/// Process exit status.
///
/// - `Success` (0): the command ran and found no errors
/// - `Failure` (1): pages or locales have errors (missing keys, parse errors)
/// - `Error` (2): the command could not run (bad config, no resources, I/O)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
