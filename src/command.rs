use crate::env::Environment;
use crate::host::Host;
use std::io::{self, Write};

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// What the read-eval loop does after a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Prompt for the next line.
    Continue,
    /// Stop the loop and leave the process with this status.
    Exit(ExitCode),
}

/// Every command name resolves to exactly one of these.
///
/// This is the single table of reserved names: dispatch and `type` both go
/// through [`CommandKind::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Exit,
    Echo,
    Type,
    Pwd,
    Cd,
    External,
}

impl CommandKind {
    pub fn lookup(name: &str) -> Self {
        match name {
            "exit" => CommandKind::Exit,
            "echo" => CommandKind::Echo,
            "type" => CommandKind::Type,
            "pwd" => CommandKind::Pwd,
            "cd" => CommandKind::Cd,
            _ => CommandKind::External,
        }
    }

    pub fn is_builtin(self) -> bool {
        self != CommandKind::External
    }
}

/// Everything a command may touch while it runs.
pub struct Context<'a> {
    pub env: &'a Environment,
    pub host: &'a dyn Host,
    pub stdout: &'a mut dyn Write,
    pub stderr: &'a mut dyn Write,
}

/// A command executed in-process.
///
/// `args[0]` is the command name itself. Errors are only returned when writing
/// to one of the output streams fails; command-level failures are reported as
/// text and the loop carries on.
pub trait Builtin {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> io::Result<Flow>;
}
