//! Core types and parsing engine for the optic command-line toolkit.
//!
//! This crate implements POSIX-style option parsing over a declared command
//! tree: short flags (`-x`), clustered short flags (`-xyz`), glued values
//! (`-xVALUE`), long options (`--name`, `--name=value`) and the `--`
//! terminator. Parsing and dispatch interleave — each command node drains
//! the options it declares, runs its handler, then passes the next token to
//! a subcommand — over a single mutable [`Context`].
//!
//! The engine never touches the process: termination is signaled with
//! [`Error::Exit`] and performed by the embedding binary.

mod arguments;
mod command;
mod context;
mod error;
mod handler;
mod matcher;
mod option;
pub mod usage;

// Re-export core types
pub use arguments::Arguments;
pub use command::{Application, Command};
pub use context::{Context, OptionValue, OptionValues};
pub use error::{Error, Result};
pub use handler::{default_error_handler, Handler};
pub use matcher::{match_option, Flow};
pub use option::{OptionSpec, ValueKind};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
