use crate::command::{Context, ExitCode};
use crate::error::{ShellError, ShellResult};
use crate::resolver::find_executable;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, ExitStatus};
use tracing::debug;

/// Run a command that is not a builtin and wait for it to finish.
///
/// `args[0]` is looked up in the search path. An unknown command is reported
/// on standard output; a failure to start or reap the child is reported on
/// standard error. Neither is an error for the caller: the only `Err` is a
/// failed write to one of the output streams.
pub fn launch(args: &[String], ctx: &mut Context<'_>) -> io::Result<()> {
    let name = &args[0];
    let Some(executable) = find_executable(ctx.host, name, &ctx.env.search_paths) else {
        writeln!(ctx.stdout, "{name}: not found")?;
        return Ok(());
    };

    // The child writes straight to the inherited descriptors.
    ctx.stdout.flush()?;
    ctx.stderr.flush()?;

    match spawn_and_wait(&executable, args) {
        Ok(code) => debug!(command = %name, code, "child exited"),
        Err(e) => writeln!(ctx.stderr, "{e}")?,
    }
    Ok(())
}

/// Start `executable` with `args` as its full argument vector and block until
/// it terminates.
///
/// The child sees `args[0]` (the name as typed) as its own argument 0, not the
/// resolved path. Standard streams, environment and working directory are
/// inherited.
pub fn spawn_and_wait(executable: &Path, args: &[String]) -> ShellResult<ExitCode> {
    let mut cmd = Command::new(executable);
    set_arg0(&mut cmd, &args[0]);
    cmd.args(&args[1..]);

    let mut child = cmd.spawn().map_err(|source| ShellError::Spawn {
        command: args[0].clone(),
        source,
    })?;
    debug!(pid = child.id(), executable = %executable.display(), "spawned child");

    // `Child::wait` retries on EINTR, so an error here means the child could
    // not be waited on at all.
    let exit_status = child.wait().map_err(|source| ShellError::Wait {
        command: args[0].clone(),
        source,
    })?;
    Ok(match exit_status.code() {
        Some(x) => x,
        None => terminated_by_signal(exit_status),
    })
}

#[cfg(unix)]
fn set_arg0(cmd: &mut Command, arg0: &str) {
    use std::os::unix::process::CommandExt;
    cmd.arg0(arg0);
}

#[cfg(not(unix))]
fn set_arg0(_cmd: &mut Command, _arg0: &str) {}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> i32 {
    -1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Environment;
    use crate::host::OsHost;
    use crate::host::fake::FakeHost;
    use std::fs;
    use std::path::PathBuf;

    fn args(line: &[&str]) -> Vec<String> {
        line.iter().map(|s| s.to_string()).collect()
    }

    #[cfg(unix)]
    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_unknown_command_reported_on_stdout() {
        let env = Environment {
            search_paths: vec![PathBuf::from("/bin")],
            home: None,
        };
        let host = FakeHost::new("/");
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut ctx = Context {
            env: &env,
            host: &host,
            stdout: &mut out,
            stderr: &mut err,
        };

        launch(&args(&["nonexistentcmd123", "x"]), &mut ctx).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "nonexistentcmd123: not found\n");
        assert!(err.is_empty());
    }

    #[test]
    #[cfg(unix)]
    fn test_exit_status_is_collected() {
        let tmp = tempfile::tempdir().unwrap();
        let script = write_script(tmp.path(), "fails", "exit 7");
        assert_eq!(spawn_and_wait(&script, &args(&["fails"])).unwrap(), 7);
    }

    #[test]
    #[cfg(unix)]
    fn test_signal_status_maps_above_128() {
        let tmp = tempfile::tempdir().unwrap();
        let script = write_script(tmp.path(), "killed", "kill -9 $$");
        assert_eq!(spawn_and_wait(&script, &args(&["killed"])).unwrap(), 128 + 9);
    }

    #[test]
    #[cfg(unix)]
    fn test_arguments_reach_child_intact() {
        let tmp = tempfile::tempdir().unwrap();
        let out_file = tmp.path().join("out.txt");
        let script = write_script(
            tmp.path(),
            "show_args",
            &format!("printf '[%s]\\n' \"$@\" > '{}'", out_file.display()),
        );

        let code = spawn_and_wait(&script, &args(&["show_args", "hello world", "", "x"])).unwrap();
        assert_eq!(code, 0);
        assert_eq!(
            fs::read_to_string(&out_file).unwrap(),
            "[hello world]\n[]\n[x]\n"
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_spawn_failure_is_reported_not_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        // Executable bit set but not a valid program image.
        let bogus = tmp.path().join("bogus");
        fs::write(&bogus, [0u8, 1, 2, 3]).unwrap();
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&bogus, fs::Permissions::from_mode(0o755)).unwrap();
        }

        let env = Environment {
            search_paths: vec![tmp.path().to_path_buf()],
            home: None,
        };
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut ctx = Context {
            env: &env,
            host: &OsHost,
            stdout: &mut out,
            stderr: &mut err,
        };

        launch(&args(&["bogus"]), &mut ctx).unwrap();
        let err = String::from_utf8(err).unwrap();
        assert!(err.starts_with("bogus: "), "{err:?}");
        assert!(!err.contains("os error"), "{err:?}");
        assert!(out.is_empty());
    }
}
