use crate::command::{Builtin, CommandKind, Context, Flow};
use crate::host::os_message;
use crate::resolver::find_executable;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The in-process implementation behind a reserved command, if any.
pub(crate) fn builtin_for(kind: CommandKind) -> Option<&'static dyn Builtin> {
    match kind {
        CommandKind::Exit => Some(&Exit),
        CommandKind::Echo => Some(&Echo),
        CommandKind::Type => Some(&Type),
        CommandKind::Pwd => Some(&Pwd),
        CommandKind::Cd => Some(&Cd),
        CommandKind::External => None,
    }
}

/// Leave the shell, optionally with a status.
///
/// The status is taken modulo 256 like a real process exit status. Arguments
/// after the first are ignored.
pub struct Exit;

impl Builtin for Exit {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> io::Result<Flow> {
        let Some(code) = args.get(1) else {
            return Ok(Flow::Exit(0));
        };
        match code.parse::<i64>() {
            Ok(n) => Ok(Flow::Exit(n.rem_euclid(256) as i32)),
            Err(_) => {
                writeln!(ctx.stderr, "exit: {code}: numeric argument required")?;
                Ok(Flow::Exit(2))
            }
        }
    }
}

/// Write the arguments separated by single spaces, then a newline.
pub struct Echo;

impl Builtin for Echo {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> io::Result<Flow> {
        writeln!(ctx.stdout, "{}", args[1..].join(" "))?;
        Ok(Flow::Continue)
    }
}

/// Describe how each name would be interpreted as a command.
pub struct Type;

impl Builtin for Type {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> io::Result<Flow> {
        for name in &args[1..] {
            if CommandKind::lookup(name).is_builtin() {
                writeln!(ctx.stdout, "{name} is a shell builtin")?;
                continue;
            }
            match find_executable(ctx.host, name, &ctx.env.search_paths) {
                Some(path) => writeln!(ctx.stdout, "{name} is {}", path.display())?,
                None => writeln!(ctx.stdout, "{name}: not found")?,
            }
        }
        Ok(Flow::Continue)
    }
}

/// Print the absolute path of the working directory.
pub struct Pwd;

impl Builtin for Pwd {
    fn execute(&self, _args: &[String], ctx: &mut Context<'_>) -> io::Result<Flow> {
        match ctx.host.current_dir() {
            Ok(dir) => writeln!(ctx.stdout, "{}", dir.display())?,
            Err(e) => writeln!(ctx.stderr, "pwd: {}", os_message(&e))?,
        }
        Ok(Flow::Continue)
    }
}

/// Change the working directory.
///
/// No argument, an empty argument or a bare `~` mean the home directory. Any
/// other argument is used verbatim as a path.
pub struct Cd;

impl Builtin for Cd {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> io::Result<Flow> {
        if args.len() > 2 {
            writeln!(ctx.stdout, "cd: too many arguments")?;
            return Ok(Flow::Continue);
        }

        let target: PathBuf = match args.get(1).map(String::as_str) {
            None | Some("" | "~") => match &ctx.env.home {
                Some(home) => home.clone(),
                None => {
                    writeln!(ctx.stderr, "cd: HOME not set")?;
                    return Ok(Flow::Continue);
                }
            },
            Some(dir) => PathBuf::from(dir),
        };

        change_dir(&target, ctx)?;
        Ok(Flow::Continue)
    }
}

fn change_dir(path: &Path, ctx: &mut Context<'_>) -> io::Result<()> {
    let dir = path.display();
    match ctx.host.is_dir(path) {
        Ok(true) => match ctx.host.set_current_dir(path) {
            Ok(()) => debug!(%dir, "changed working directory"),
            Err(e) => writeln!(ctx.stdout, "cd: {dir}: {}", os_message(&e))?,
        },
        Ok(false) => writeln!(ctx.stdout, "cd: {dir}: No such file or directory")?,
        Err(e) => writeln!(ctx.stdout, "cd: {dir}: {}", os_message(&e))?,
    }
    Ok(())
}
