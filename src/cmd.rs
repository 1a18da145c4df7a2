/*
 * This file is part of sj201-fan.
 *
 * Copyright (C) 2026 sj201-fan contributors
 *
 * sj201-fan is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * sj201-fan is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with sj201-fan. If not, see <https://www.gnu.org/licenses/>.
 */

use std::borrow::Cow;
use std::io;
use std::process::{Command, ExitStatus};

/// One captured stream of a finished command.
///
/// Decoding is best effort: a stream that is valid UTF-8 comes back as
/// `Text`, anything else is kept as the undecoded bytes instead of failing
/// the whole invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputStream {
    Text(String),
    Raw(Vec<u8>),
}

impl OutputStream {
    fn decode(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(s) => OutputStream::Text(s),
            Err(e) => OutputStream::Raw(e.into_bytes()),
        }
    }

    /// Lossy text view, for diagnostics only.
    pub fn to_text_lossy(&self) -> Cow<'_, str> {
        match self {
            OutputStream::Text(s) => Cow::Borrowed(s.as_str()),
            OutputStream::Raw(b) => String::from_utf8_lossy(b),
        }
    }
}

/// Exit status plus both captured streams of a finished command.
#[derive(Debug)]
pub struct CmdOutput {
    pub status: ExitStatus,
    pub stdout: OutputStream,
    pub stderr: OutputStream,
}

/// Run an external command and wait for it to exit, capturing stdout and
/// stderr. Blocking, no timeout, no retry; a hang in the child is a hang
/// in the caller.
pub fn run(cmd: &[&str]) -> io::Result<CmdOutput> {
    let (program, args) = cmd
        .split_first()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command"))?;
    let output = Command::new(program).args(args).output()?;
    Ok(CmdOutput {
        status: output.status,
        stdout: OutputStream::decode(output.stdout),
        stderr: OutputStream::decode(output.stderr),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_captures_stdout() {
        let out = run(&["echo", "hello"]).unwrap();
        assert!(out.status.success());
        assert_eq!(out.stdout, OutputStream::Text("hello\n".to_string()));
        assert_eq!(out.stderr, OutputStream::Text(String::new()));
    }

    #[test]
    fn test_run_captures_stderr() {
        let out = run(&["sh", "-c", "echo oops >&2"]).unwrap();
        assert!(out.status.success());
        assert_eq!(out.stderr, OutputStream::Text("oops\n".to_string()));
    }

    #[test]
    fn test_run_reports_nonzero_exit() {
        let out = run(&["sh", "-c", "exit 3"]).unwrap();
        assert!(!out.status.success());
        assert_eq!(out.status.code(), Some(3));
    }

    #[test]
    fn test_run_keeps_undecodable_output_raw() {
        // 0xFF is not valid UTF-8 on its own
        let out = run(&["sh", "-c", "printf '\\377'"]).unwrap();
        assert_eq!(out.stdout, OutputStream::Raw(vec![0xFF]));
        assert_eq!(out.stdout.to_text_lossy(), "\u{FFFD}");
    }

    #[test]
    fn test_run_empty_command_is_an_error() {
        assert!(run(&[]).is_err());
    }

    #[test]
    fn test_run_missing_binary_is_an_error() {
        assert!(run(&["sj201-fan-definitely-not-a-binary"]).is_err());
    }

    #[test]
    fn test_to_text_lossy_passes_text_through() {
        let s = OutputStream::Text("45000\n".to_string());
        assert_eq!(s.to_text_lossy(), "45000\n");
    }
}
