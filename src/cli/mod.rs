//! Interactive menu shell.

pub mod core;
pub mod output;
mod shell;

pub use self::core::{
    CliError, CliMode, CommandError, LineSource, LoopControl, MenuChoice, ScriptSource, Session,
};
pub use shell::{run_cli, SCRIPT_ENV};
