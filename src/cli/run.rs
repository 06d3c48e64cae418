//! Dispatches to the command handler for the parsed arguments.
//!
//! Returns `Err` when a command cannot run at all (bad config, no
//! resources); issues found while running are part of the result.

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, check::check, detect::detect, init::init, translate::translate,
    },
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Translate(cmd)) => translate(cmd),
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Detect(cmd)) => detect(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
