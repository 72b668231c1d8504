// Copyright 2018-2024 the Deno authors. MIT license.

use std::ffi::CStr;

use nix::errno::Errno;
use nix::fcntl::OFlag;
use nix::fcntl::open;
use nix::libc;
use nix::sys::signal::SaFlags;
use nix::sys::signal::SigAction;
use nix::sys::signal::SigHandler;
use nix::sys::signal::SigSet;
use nix::sys::signal::SigmaskHow;
use nix::sys::signal::Signal;
use nix::sys::signal::sigaction;
use nix::sys::signal::sigprocmask;
use nix::sys::stat::Mode;
use nix::sys::wait::WaitStatus;
use nix::sys::wait::waitpid;
use nix::unistd::ForkResult;
use nix::unistd::Pid;
use nix::unistd::close;
use nix::unistd::dup2;
use nix::unistd::fork;

use super::argv::PreparedArgv;
use super::types::ChildExit;
use super::types::EXEC_FAILED_EXIT_CODE;
use super::types::ExecError;
use super::types::REDIRECT_FAILED_EXIT_CODE;

/// Forks, replaces the child's image with `argv`, and blocks until the
/// child has been reaped.
///
/// When `stdout_path` is provided the child opens that file (creating or
/// truncating it, mode 0644) and rebinds its stdout to it before replacing
/// its image. Descriptors other than stdout are inherited as they are.
/// SIGPIPE is reset to its default disposition and the signal mask is
/// cleared in the child.
pub fn spawn_and_wait(
  argv: &PreparedArgv,
  stdout_path: Option<&CStr>,
) -> Result<ChildExit, ExecError> {
  // SAFETY: between fork and execv/_exit the child only makes
  // async-signal-safe system calls on memory prepared before the fork
  let child = match unsafe { fork() } {
    Ok(ForkResult::Parent { child }) => child,
    Ok(ForkResult::Child) => run_child(argv, stdout_path),
    Err(errno) => return Err(ExecError::Fork(errno)),
  };
  log::debug!("Spawned child {} for: {}", child, argv.display());
  let exit = wait_for_exit(child)?;
  log::debug!("Child {} {}", child, exit);
  Ok(exit)
}

fn run_child(argv: &PreparedArgv, stdout_path: Option<&CStr>) -> ! {
  if reset_signals().is_err() {
    exit_child(EXEC_FAILED_EXIT_CODE);
  }
  if let Some(path) = stdout_path
    && redirect_stdout(path).is_err()
  {
    exit_child(REDIRECT_FAILED_EXIT_CODE);
  }
  // SAFETY: both pointers come from `argv`, which outlives this call, and
  // the argument array is null terminated
  unsafe {
    libc::execv(argv.program().as_ptr(), argv.as_ptr());
  }
  // only reached when the image could not be replaced
  exit_child(EXEC_FAILED_EXIT_CODE)
}

/// Restores the signal state a freshly started program expects.
///
/// The Rust runtime ignores SIGPIPE and an ignored disposition survives
/// `execv`. The calling thread's blocked mask would be inherited too.
fn reset_signals() -> nix::Result<()> {
  let default =
    SigAction::new(SigHandler::SigDfl, SaFlags::empty(), SigSet::empty());
  // SAFETY: installs the default disposition, no handler code is involved
  unsafe { sigaction(Signal::SIGPIPE, &default) }?;
  sigprocmask(SigmaskHow::SIG_SETMASK, Some(&SigSet::empty()), None)
}

fn redirect_stdout(path: &CStr) -> nix::Result<()> {
  let fd = open(
    path,
    OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC,
    Mode::S_IRUSR | Mode::S_IWUSR | Mode::S_IRGRP | Mode::S_IROTH,
  )?;
  // stdout was closed, so open already handed out its slot
  if fd == libc::STDOUT_FILENO {
    return Ok(());
  }
  dup2(fd, libc::STDOUT_FILENO)?;
  close(fd)
}

fn exit_child(code: i32) -> ! {
  // SAFETY: _exit skips atexit handlers and stdio flushing, which belong
  // to the parent's image
  unsafe { libc::_exit(code) }
}

fn wait_for_exit(child: Pid) -> Result<ChildExit, ExecError> {
  loop {
    match waitpid(child, None) {
      Ok(WaitStatus::Exited(_, code)) => {
        return Ok(ChildExit::Exited { code });
      }
      Ok(WaitStatus::Signaled(_, signal, _)) => {
        return Ok(ChildExit::Signaled {
          signal: signal as i32,
        });
      }
      // stop and continue notifications aren't terminal
      Ok(_) => continue,
      Err(Errno::EINTR) => continue,
      Err(source) => {
        return Err(ExecError::Wait {
          pid: child.as_raw(),
          source,
        });
      }
    }
  }
}
