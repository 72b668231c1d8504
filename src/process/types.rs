// Copyright 2018-2024 the Deno authors. MIT license.

use nix::errno::Errno;
use nix::sys::signal::Signal;
use thiserror::Error;

/// Interpreter that `shell_run` hands command lines to.
pub const SHELL_PATH: &str = "/bin/sh";

/// Exit code of a child whose image replacement failed.
///
/// Uses the same status bash reports for a command it could not run
/// (https://www.gnu.org/software/bash/manual/bash.html#Exit-Status).
pub const EXEC_FAILED_EXIT_CODE: i32 = 127;

/// Exit code of a child that could not open or rebind its output file.
pub const REDIRECT_FAILED_EXIT_CODE: i32 = 1;

/// How a reaped child process terminated.
///
/// A child that failed to set up its redirection or to replace its image
/// reports through an ordinary exit code, so it can't be told apart from
/// a program that ran and exited with the same code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
  feature = "serialization",
  derive(serde::Serialize, serde::Deserialize),
  serde(rename_all = "camelCase", tag = "kind")
)]
pub enum ChildExit {
  /// The process called `exit` or returned from `main`.
  Exited { code: i32 },
  /// The process was terminated by a signal.
  Signaled { signal: i32 },
}

impl ChildExit {
  /// Whether this was a normal exit with status code 0.
  pub fn success(&self) -> bool {
    matches!(self, ChildExit::Exited { code: 0 })
  }

  /// Exit code, when the process exited normally.
  pub fn code(&self) -> Option<i32> {
    match self {
      ChildExit::Exited { code } => Some(*code),
      ChildExit::Signaled { .. } => None,
    }
  }

  /// Terminating signal, when the process was killed by one.
  pub fn signal(&self) -> Option<Signal> {
    match self {
      ChildExit::Exited { .. } => None,
      ChildExit::Signaled { signal } => Signal::try_from(*signal).ok(),
    }
  }
}

impl std::fmt::Display for ChildExit {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ChildExit::Exited { code } => write!(f, "exited with code {}", code),
      ChildExit::Signaled { signal } => match Signal::try_from(*signal) {
        Ok(signal) => write!(f, "terminated by {}", signal),
        Err(_) => write!(f, "terminated by signal {}", signal),
      },
    }
  }
}

/// Errors detected by the calling process while launching or
/// reaping a child.
#[derive(Error, Debug, PartialEq)]
pub enum ExecError {
  #[error("command was empty")]
  CommandEmpty,
  #[error("argument {index} contains an interior nul byte")]
  ArgumentContainsNul { index: usize },
  #[error("output path contains an interior nul byte")]
  OutputPathContainsNul,
  #[error("failed to create child process: {0}")]
  Fork(Errno),
  #[error("failed waiting for child process {pid}: {source}")]
  Wait { pid: i32, source: Errno },
}
