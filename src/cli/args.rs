//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `translate`: Apply translations to HTML pages
//! - `check`: Report keys that pages reference but locales lack
//! - `detect`: Show which language would be used and why
//! - `init`: Initialize a `.i18npagerc.json` configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use super::commands::check::CheckRule;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Translate(cmd)) => cmd.common.verbose,
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Detect(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Language to use, or a query string such as `?lng=zh`
    #[arg(long)]
    pub lng: Option<String>,

    /// Fallback language (overrides config file)
    #[arg(long)]
    pub fallback_lng: Option<String>,

    /// Project root directory (where the config file is looked up)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Locale files directory (overrides config file)
    #[arg(long)]
    pub messages_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct TranslateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output directory (overrides config file)
    #[arg(long, conflicts_with = "in_place")]
    pub out_dir: Option<PathBuf>,

    /// Rewrite the pages themselves instead of writing to the output directory
    #[arg(long)]
    pub in_place: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Rules to run (default: all)
    #[arg(value_enum)]
    pub checks: Vec<CheckRule>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct DetectCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Translate data-i18n elements of every page
    Translate(TranslateCommand),
    /// Check pages for missing keys, untranslated keys and empty titles
    Check(CheckCommand),
    /// Print the detected language and its lookup chain
    Detect(DetectCommand),
    /// Initialize a new .i18npagerc.json configuration file
    Init,
}
