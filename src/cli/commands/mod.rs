pub mod check;
mod command_result;
pub mod detect;
pub mod helper;
pub mod init;
pub mod translate;

pub use command_result::*;
