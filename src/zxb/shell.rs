//! External processes: the editor, the update script and `PATH` lookups.

use crate::error::{Result, ZxbError};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

pub trait Shell {
    /// Runs a program attached to the terminal and waits for it. Returns the exit code.
    fn run_interactive(
        &self,
        program: &str,
        args: &[OsString],
        cwd: Option<&Path>,
    ) -> Result<Option<i32>>;

    /// Runs a program with its output captured.
    fn run_capture(
        &self,
        program: &str,
        args: &[OsString],
        cwd: Option<&Path>,
    ) -> Result<ProcessOutput>;

    /// Looks a command up on `PATH`.
    fn which(&self, program: &str) -> Option<PathBuf>;
}

/// Spawns real processes. With `verbose`, captured output is echoed.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemShell {
    pub verbose: bool,
}

impl SystemShell {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

fn command_line(program: &str, args: &[OsString]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}

impl Shell for SystemShell {
    fn run_interactive(
        &self,
        program: &str,
        args: &[OsString],
        cwd: Option<&Path>,
    ) -> Result<Option<i32>> {
        debug!(command = %command_line(program, args), "running interactive");
        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        let status = cmd.status()?;
        Ok(status.code())
    }

    fn run_capture(
        &self,
        program: &str,
        args: &[OsString],
        cwd: Option<&Path>,
    ) -> Result<ProcessOutput> {
        let line = command_line(program, args);
        debug!(command = %line, "running");
        let mut cmd = Command::new(program);
        cmd.args(args).stdout(Stdio::piped()).stderr(Stdio::piped());
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|e| ZxbError::Process {
            command: line.clone(),
            code: None,
            stderr: e.to_string(),
        })?;

        let result = ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if self.verbose {
            print!("{}", result.stdout);
            eprint!("{}", result.stderr);
        }
        debug!(command = %line, code = ?result.code, "finished");
        Ok(result)
    }

    fn which(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}
