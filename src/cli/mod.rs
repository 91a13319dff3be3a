pub mod core;
pub mod output;
mod shell;

pub use core::CliError;
pub use shell::run_cli;
