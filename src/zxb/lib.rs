//! # zxb Architecture
//!
//! zxb manages a personal collection of [zx](https://github.com/google/zx)
//! scripts and keeps a directory of executables, the "bins", in sync with them.
//! Every script `<slug>.mjs` in a source directory gets an entry named `<slug>`
//! in `<home>/bin`, so putting that one directory on `PATH` makes every script
//! a command.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders results, decides exit codes    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns config, tool home and capabilities                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per command, returns CmdResult                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (resolver, bins, config, model)                       │
//! │  Capabilities (shell, prompt, remote, editor)               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward returns data. Terminal output and
//! `std::process::exit` only happen in the CLI layer. Questions to the user
//! go through [`prompt::Prompter`], child processes through [`shell::Shell`]
//! and HTTP through [`remote::Fetcher`], so commands are tested with the
//! doubles in `test_utils`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each command
//! - [`resolver`]: Slug to script file and bin entry
//! - [`bins`]: Bin directory reconciliation
//! - [`config`]: `config.json` and tool home layout
//! - [`init`]: Locating the tool home and first-run setup
//! - [`model`]: Script and listing types
//! - [`editor`]: `$EDITOR` integration
//! - [`error`]: Error types
//! - `cli`: Argument parsing, help and printing for the binary (not part of the lib API)

pub mod api;
pub mod bins;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod init;
pub mod model;
pub mod prompt;
pub mod remote;
pub mod resolver;
pub mod shell;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
