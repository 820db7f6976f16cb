//! Where input lines come from.
//!
//! An interactive terminal gets a `rustyline` editor; anything else (a pipe, a
//! file) is read line by line with the prompt written to standard output by
//! hand, so transcripts look the same either way.

use crate::error::ShellResult;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, BufRead, IsTerminal, Write};
use tracing::debug;

/// A source of input lines for the read-eval loop.
pub trait LineSource {
    /// Show `prompt` and read one line without its line terminator.
    ///
    /// Returns `Ok(None)` once input is exhausted.
    fn read_line(&mut self, prompt: &str, stdout: &mut dyn Write) -> ShellResult<Option<String>>;
}

/// Line editor for interactive terminals.
///
/// History is never recorded.
pub struct Editor {
    editor: DefaultEditor,
}

impl Editor {
    pub fn new() -> ShellResult<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for Editor {
    fn read_line(&mut self, prompt: &str, stdout: &mut dyn Write) -> ShellResult<Option<String>> {
        if let Err(e) = stdout.flush() {
            debug!(error = %e, "failed to flush output before prompting");
        }
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            // Ctrl-C drops the line being edited.
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Plain buffered reader for non-interactive input.
pub struct Buffered<R> {
    reader: R,
}

impl<R: BufRead> Buffered<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for Buffered<R> {
    fn read_line(&mut self, prompt: &str, stdout: &mut dyn Write) -> ShellResult<Option<String>> {
        // A closed stdout must not end the loop.
        if let Err(e) = write_prompt(prompt, stdout) {
            debug!(error = %e, "failed to write prompt");
        }

        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}

fn write_prompt(prompt: &str, stdout: &mut dyn Write) -> io::Result<()> {
    stdout.write_all(prompt.as_bytes())?;
    stdout.flush()
}

/// Pick the line source for standard input.
///
/// `plain` forces the buffered reader even on a terminal.
pub fn stdin_source(plain: bool) -> ShellResult<Box<dyn LineSource>> {
    let stdin = io::stdin();
    if !plain && stdin.is_terminal() {
        debug!("reading input through the line editor");
        Ok(Box::new(Editor::new()?))
    } else {
        debug!("reading input as plain lines");
        Ok(Box::new(Buffered::new(stdin.lock())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read_all(input: &[u8]) -> (Vec<Option<String>>, String) {
        let mut source = Buffered::new(Cursor::new(input.to_vec()));
        let mut out = Vec::new();
        let mut lines = Vec::new();
        loop {
            let line = source.read_line("$ ", &mut out).unwrap();
            let done = line.is_none();
            lines.push(line);
            if done {
                break;
            }
        }
        (lines, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_prompt_written_before_each_read() {
        let (lines, out) = read_all(b"one\ntwo\n");
        assert_eq!(
            lines,
            vec![Some("one".to_string()), Some("two".to_string()), None]
        );
        assert_eq!(out, "$ $ $ ");
    }

    #[test]
    fn test_line_terminators_are_stripped() {
        let (lines, _) = read_all(b"dos\r\n\nlast");
        assert_eq!(
            lines,
            vec![
                Some("dos".to_string()),
                Some(String::new()),
                Some("last".to_string()),
                None
            ]
        );
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let (lines, _) = read_all(b"echo \xff\n");
        assert_eq!(lines[0].as_deref(), Some("echo \u{FFFD}"));
    }

    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn test_lines_still_read_when_prompt_cannot_be_written() {
        let mut source = Buffered::new(Cursor::new(b"exit 3\n".to_vec()));
        assert_eq!(
            source.read_line("$ ", &mut Closed).unwrap().as_deref(),
            Some("exit 3")
        );
        assert_eq!(source.read_line("$ ", &mut Closed).unwrap(), None);
    }

    #[test]
    fn test_empty_input_is_immediate_eof() {
        let (lines, out) = read_all(b"");
        assert_eq!(lines, vec![None]);
        assert_eq!(out, "$ ");
    }
}
