// Copyright 2018-2024 the Deno authors. MIT license.

mod argv;
mod run;
mod spawn;
mod types;

pub use run::*;
pub use types::*;
