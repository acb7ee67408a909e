//! Subcommand implementations.

pub mod check;
pub mod init;
pub mod module;
pub mod output;
