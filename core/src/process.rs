//! Running external programs.
use std::{
    io,
    process::{Command, Output, Stdio},
};

use crate::Error;

/// Runs a prepared command to completion and returns its output.
///
/// Callers that need deadlines or cancellation provide their own runner, which may kill the child
/// process. A runner that gives up should return an error rather than a made up exit status.
pub trait Runner {
    /// Runs the command.
    fn run(&mut self, command: &mut Command) -> io::Result<Output>;
}

impl<F: FnMut(&mut Command) -> io::Result<Output>> Runner for F {
    fn run(&mut self, command: &mut Command) -> io::Result<Output> {
        self(command)
    }
}

/// The default runner, waiting for the process to exit.
#[derive(Clone, Copy, Default, Debug)]
pub struct Wait;

impl Runner for Wait {
    fn run(&mut self, command: &mut Command) -> io::Result<Output> {
        command.output()
    }
}

/// Runs a command with captured output, returning its exit code.
///
/// A process terminated by a signal is reported as [`Error::ExternalProcedure`].
pub(crate) fn run_captured(runner: &mut dyn Runner, command: &mut Command) -> Result<i32, Error> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    log::trace!("running {command:?}");

    let output = runner.run(command).map_err(|source| Error::Spawn {
        program: command.get_program().to_string_lossy().into_owned(),
        source,
    })?;

    for (stream, bytes) in [("stdout", &output.stdout), ("stderr", &output.stderr)] {
        for line in String::from_utf8_lossy(bytes).lines() {
            log::trace!("{stream}: {line}");
        }
    }

    match output.status.code() {
        Some(code) => {
            log::trace!("exit code {code}");
            Ok(code)
        }
        None => Err(Error::ExternalProcedure { code: None }),
    }
}
