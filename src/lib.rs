//! A tiny interactive command interpreter.
//!
//! Lines are split into arguments by a quote-aware tokenizer, then either run
//! in-process by one of the builtins (`exit`, `echo`, `type`, `pwd`, `cd`) or
//! resolved against the search path and launched as a child process that the
//! interpreter waits for before prompting again.
//!
//! The main entry point is [`Interpreter`]. Its startup state lives in an
//! [`Environment`] value, and all filesystem access goes through the [`Host`]
//! trait so the dispatch logic can be exercised without touching the disk.

mod builtin;
pub mod command;
pub mod env;
pub mod error;
pub mod external;
pub mod host;
pub mod input;
mod interpreter;
pub mod lexer;
pub mod resolver;

pub use command::{CommandKind, ExitCode, Flow};
pub use env::Environment;
pub use error::{ShellError, ShellResult};
pub use host::{Host, OsHost};
pub use interpreter::{Interpreter, PROMPT};
pub use lexer::split_into_tokens;
pub use resolver::find_executable;
