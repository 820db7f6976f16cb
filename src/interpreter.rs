use crate::builtin::builtin_for;
use crate::command::{CommandKind, Context, ExitCode, Flow};
use crate::env::Environment;
use crate::error::ShellResult;
use crate::external;
use crate::host::{Host, OsHost};
use crate::input::LineSource;
use crate::lexer;
use std::io::{self, Write};
use tracing::debug;

/// Prompt written before every line is read.
pub const PROMPT: &str = "$ ";

/// A minimal interactive interpreter for built-in and external commands.
///
/// The interpreter owns the [`Environment`] captured at startup and the
/// [`Host`] through which it touches the filesystem. Each line is tokenized,
/// dispatched and completed before the next one is read.
///
/// Example
/// ```
/// use minish::{Environment, Flow, Interpreter};
/// let mut sh = Interpreter::new(Environment::default());
/// let mut out = Vec::new();
/// let flow = sh.execute_line("echo 'hello   world'", &mut out, &mut std::io::sink());
/// assert_eq!(flow, Flow::Continue);
/// assert_eq!(out, b"hello   world\n");
/// ```
pub struct Interpreter {
    env: Environment,
    host: Box<dyn Host>,
}

impl Interpreter {
    /// Create an interpreter that works against the real filesystem.
    pub fn new(env: Environment) -> Self {
        Self::with_host(env, Box::new(OsHost))
    }

    /// Create an interpreter with a custom filesystem collaborator.
    pub fn with_host(env: Environment, host: Box<dyn Host>) -> Self {
        Self { env, host }
    }

    /// Read, evaluate and repeat until `exit` or end of input.
    ///
    /// Returns the status the process should exit with. Only a failing line
    /// source ends the loop with an error; output that cannot be written,
    /// prompt included, is reported and the loop goes on.
    pub fn repl(
        &mut self,
        source: &mut dyn LineSource,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> ShellResult<ExitCode> {
        loop {
            let Some(line) = source.read_line(PROMPT, stdout)? else {
                debug!("end of input");
                return Ok(0);
            };
            if let Flow::Exit(code) = self.execute_line(&line, stdout, stderr) {
                return Ok(code);
            }
        }
    }

    /// Tokenize and run one line of input.
    ///
    /// Blank lines and lines whose command name is empty do nothing. Both
    /// streams are flushed before returning.
    pub fn execute_line(
        &mut self,
        line: &str,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Flow {
        let args = lexer::split_into_tokens(line);
        debug!(?args, "tokenized line");
        let Some(name) = args.first() else {
            return Flow::Continue;
        };
        if name.is_empty() {
            return Flow::Continue;
        }

        let kind = CommandKind::lookup(name);
        let mut ctx = Context {
            env: &self.env,
            host: self.host.as_ref(),
            stdout,
            stderr,
        };
        let result = match builtin_for(kind) {
            Some(builtin) => {
                debug!(?kind, "running builtin");
                builtin.execute(&args, &mut ctx)
            }
            None => external::launch(&args, &mut ctx).map(|()| Flow::Continue),
        };

        let flow = match result {
            Ok(flow) => flow,
            Err(e) => {
                report_write_failure(&e, ctx.stderr);
                Flow::Continue
            }
        };
        if let Err(e) = flush(ctx.stdout, ctx.stderr) {
            debug!(error = %e, "failed to flush output");
        }
        flow
    }
}

fn report_write_failure(err: &io::Error, stderr: &mut dyn Write) {
    debug!(error = %err, "command output failed");
    let _ = writeln!(stderr, "minish: write error: {err}");
}

fn flush(stdout: &mut dyn Write, stderr: &mut dyn Write) -> io::Result<()> {
    stdout.flush()?;
    stderr.flush()
}
