use crate::host::os_message;
use std::io;
use thiserror::Error;

/// Errors surfaced by the interpreter outside of builtin output.
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("{command}: {}", os_message(.source))]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("{command}: wait failed: {}", os_message(.source))]
    Wait {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("input error: {0}")]
    Input(#[from] rustyline::error::ReadlineError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type ShellResult<T> = Result<T, ShellError>;
