//! # nars
//!
//! Driver for the `nars-core` reasoning engine: the HTTP API and the CLI.
//! The binary in `main.rs` only installs logging and dispatches to [`cli`].

pub mod api;
pub mod cli;
