// Copyright 2018-2024 the Deno authors. MIT license.

#![deny(clippy::print_stderr)]
#![deny(clippy::print_stdout)]

#[cfg(all(unix, feature = "process"))]
mod process;

#[cfg(all(unix, feature = "process"))]
pub use process::*;
