use std::io;

use thiserror::Error;

use crate::option::ValueKind;

/// Errors produced while parsing options and dispatching commands.
///
/// `Exit` is not a failure: it is the termination signal handlers raise to
/// request a process exit, and it travels the error channel so that it
/// unwinds the recursive dispatch without being intercepted by error
/// handlers along the way. The process exit itself is performed by the
/// embedding binary, never by this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// The token stream is exhausted. Doubles as a control signal: the
    /// executor turns it into the help-on-empty-input path when looking for
    /// a subcommand name.
    #[error("no command-line arguments remain")]
    ArgumentsExhausted,

    #[error("{kind} argument required in option {option}")]
    ValueRequired { option: String, kind: ValueKind },

    #[error("invalid argument type in option {option} (expect {kind})")]
    TypeMismatch { option: String, kind: ValueKind },

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// Option values could not be mapped onto the requested struct.
    #[error("option mapping error: {0}")]
    Mapping(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Termination signal: stop now, exit with this status.
    #[error("exit requested with status {0}")]
    Exit(i32),

    /// Generic application error with a preformatted message.
    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
