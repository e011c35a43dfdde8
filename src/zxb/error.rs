use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZxbError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),

    #[error("Command \"{slug}\" is already aliased to \"{}\"", .path.display())]
    Collision { slug: String, path: PathBuf },

    #[error("No source directory configured. Add one with `zxb add_source <dir>`")]
    NoSourceDirectory,

    #[error("No directory selected")]
    NoDirectorySelected,

    #[error(
        "Editor missing! Tried to use \"{editor}\" to open {}. Set the $EDITOR environment variable to your editor command.",
        .path.display()
    )]
    Editor { editor: String, path: PathBuf },

    #[error("`{command}` failed with exit code {code:?}: {stderr}")]
    Process {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Request to {url} failed: {reason}")]
    Network { url: String, reason: String },

    #[error("Could not download script from {url} (status {status})")]
    Status { url: String, status: u16 },

    #[error("Can't install a script that's missing the zx shebang.")]
    MissingShebang,
}

impl ZxbError {
    /// Exit code the CLI should report for this error, when it must not be swallowed.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ZxbError::Collision { .. } => Some(1),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ZxbError>;
