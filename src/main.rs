use anyhow::Context;
use argh::FromArgs;
use minish::{Environment, Interpreter, input};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "MINISH_LOG";

#[derive(FromArgs)]
/// A small interactive shell with a handful of builtins.
struct Options {
    #[argh(option)]
    /// search path to use instead of $PATH, in the same delimiter-separated format.
    path: Option<String>,

    #[argh(option)]
    /// home directory to use instead of $HOME.
    home: Option<PathBuf>,

    #[argh(switch)]
    /// read plain lines even when standard input is a terminal.
    plain: bool,

    #[argh(switch, short = 'v')]
    /// log debug diagnostics to standard error.
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let options: Options = argh::from_env();
    init_logging(options.verbose);

    let env = Environment::from_process().with_overrides(options.path.as_deref(), options.home);
    tracing::debug!(?env, "starting interpreter");

    let mut source = input::stdin_source(options.plain).context("failed to open input")?;
    let mut interpreter = Interpreter::new(env);
    let code = interpreter
        .repl(source.as_mut(), &mut io::stdout(), &mut io::stderr())
        .context("interpreter stopped")?;

    std::process::exit(code)
}
