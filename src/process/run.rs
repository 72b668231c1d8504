// Copyright 2018-2024 the Deno authors. MIT license.

use std::ffi::OsStr;
use std::path::Path;

use super::argv::PreparedArgv;
use super::argv::path_to_cstring;
use super::spawn::spawn_and_wait;
use super::types::ChildExit;
use super::types::ExecError;
use super::types::SHELL_PATH;

/// Runs `command_line` with the system shell and waits for it to finish.
///
/// Returns `true` only when the shell exited normally with status 0.
///
/// Unlike `system(3)`, SIGINT and SIGQUIT are not ignored in the calling
/// process while the shell runs, so they still reach the caller.
pub fn shell_run(command_line: &str) -> bool {
  collapse("shell_run", shell_status(command_line))
}

/// Same as [`shell_run`], but reports how the shell terminated.
pub fn shell_status(command_line: &str) -> Result<ChildExit, ExecError> {
  let argv = PreparedArgv::new([SHELL_PATH, "-c", command_line])?;
  spawn_and_wait(&argv, None)
}

/// Runs the program at `argv[0]` with `argv` as its argument vector and
/// waits for it to finish.
///
/// The arguments are passed verbatim. There is no `PATH` lookup, so the
/// program must be given as a path. Returns `true` only when the program
/// exited normally with status 0.
pub fn exec_run<I, S>(argv: I) -> bool
where
  I: IntoIterator<Item = S>,
  S: AsRef<OsStr>,
{
  collapse("exec_run", exec_status(argv))
}

/// Same as [`exec_run`], but reports how the program terminated.
///
/// A program that could not be started shows up as
/// [`EXEC_FAILED_EXIT_CODE`](super::EXEC_FAILED_EXIT_CODE).
pub fn exec_status<I, S>(argv: I) -> Result<ChildExit, ExecError>
where
  I: IntoIterator<Item = S>,
  S: AsRef<OsStr>,
{
  let argv = PreparedArgv::new(argv)?;
  spawn_and_wait(&argv, None)
}

/// Like [`exec_run`], but the program's stdout is written to `output_path`.
///
/// The file is created if missing and truncated otherwise. The caller's
/// own stdout is left alone.
pub fn exec_run_redirect<P, I, S>(output_path: P, argv: I) -> bool
where
  P: AsRef<Path>,
  I: IntoIterator<Item = S>,
  S: AsRef<OsStr>,
{
  collapse("exec_run_redirect", exec_redirect_status(output_path, argv))
}

/// Same as [`exec_run_redirect`], but reports how the program terminated.
///
/// A file that could not be opened shows up as
/// [`REDIRECT_FAILED_EXIT_CODE`](super::REDIRECT_FAILED_EXIT_CODE).
pub fn exec_redirect_status<P, I, S>(
  output_path: P,
  argv: I,
) -> Result<ChildExit, ExecError>
where
  P: AsRef<Path>,
  I: IntoIterator<Item = S>,
  S: AsRef<OsStr>,
{
  let argv = PreparedArgv::new(argv)?;
  let output_path = path_to_cstring(output_path.as_ref())?;
  spawn_and_wait(&argv, Some(output_path.as_c_str()))
}

fn collapse(name: &str, result: Result<ChildExit, ExecError>) -> bool {
  match result {
    Ok(exit) => exit.success(),
    Err(err) => {
      log::warn!("{}: {}", name, err);
      false
    }
  }
}
