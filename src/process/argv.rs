// Copyright 2018-2024 the Deno authors. MIT license.

use std::ffi::CStr;
use std::ffi::CString;
use std::ffi::OsStr;
use std::os::raw::c_char;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use super::types::ExecError;

/// An argument vector converted to the layout `execv` expects.
///
/// Everything is allocated up front so that a forked child can hand the
/// vector to `execv` without touching the allocator.
pub struct PreparedArgv {
  args: Vec<CString>,
  // points into `args`; the CString buffers don't move when the Vec does
  ptrs: Vec<*const c_char>,
}

impl PreparedArgv {
  pub fn new<I, S>(argv: I) -> Result<Self, ExecError>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
  {
    let args = argv
      .into_iter()
      .enumerate()
      .map(|(index, arg)| {
        CString::new(arg.as_ref().as_bytes())
          .map_err(|_| ExecError::ArgumentContainsNul { index })
      })
      .collect::<Result<Vec<_>, _>>()?;
    if args.is_empty() {
      return Err(ExecError::CommandEmpty);
    }
    let ptrs = args
      .iter()
      .map(|arg| arg.as_ptr())
      .chain(std::iter::once(std::ptr::null()))
      .collect();
    Ok(Self { args, ptrs })
  }

  /// Path of the executable (element 0).
  pub fn program(&self) -> &CStr {
    &self.args[0]
  }

  /// Null terminated array of pointers to the arguments.
  pub fn as_ptr(&self) -> *const *const c_char {
    self.ptrs.as_ptr()
  }

  pub fn display(&self) -> String {
    self
      .args
      .iter()
      .map(|arg| arg.to_string_lossy())
      .collect::<Vec<_>>()
      .join(" ")
  }
}

pub fn path_to_cstring(path: &Path) -> Result<CString, ExecError> {
  CString::new(path.as_os_str().as_bytes())
    .map_err(|_| ExecError::OutputPathContainsNul)
}
