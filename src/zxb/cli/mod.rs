//! # CLI Behavior
//!
//! One UI client for zxb. The CLI is the only place that knows about terminal
//! I/O, exit codes, and output formatting.
//!
//! For the overall architecture, see the crate-level documentation of `zxb`.
//!
//! ## Invocation
//!
//! `zxb [OPTIONS] [COMMAND] [ARGUMENT]`
//!
//! - No command, `help` or `-h` prints the command list.
//! - `ls`, `rm` and `new` are aliases of `list`, `remove` and `create`.
//! - Any other word that is not a command is a script name: `zxb deploy` is
//!   `zxb create deploy`, which offers to edit `deploy` if it already exists.
//!
//! ## Exit Codes
//!
//! Errors raised by a command are printed and the process still exits 0, with
//! one exception: creating a script whose name is already a command on `PATH`
//! exits 1.
//!
//! ## Module Structure
//!
//! - `commands`: Dispatch, session setup and per-command handlers
//! - `render`: Output formatting (messages, script listings)
//! - `setup`: Argument parsing via clap, the command table and help text

mod commands;
mod render;
pub mod setup;

pub use commands::run;
