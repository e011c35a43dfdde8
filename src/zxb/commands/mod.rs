use crate::bins::SyncReport;
use crate::config::{ZxbConfig, ZxbPaths};
use crate::error::{Result, ZxbError};
use crate::model::SourceListing;
use crate::prompt::Prompter;
use crate::remote::Fetcher;
use crate::shell::Shell;
use std::path::PathBuf;

pub mod add_source;
pub mod clean;
pub mod create;
pub mod edit;
pub mod install;
pub mod link;
pub mod list;
pub mod remove;
pub mod update;

/// Everything a command may touch: the loaded config, the tool home and the
/// capabilities used for external effects.
pub struct CmdContext<'a> {
    pub config: &'a mut ZxbConfig,
    pub paths: &'a ZxbPaths,
    pub shell: &'a dyn Shell,
    pub prompt: &'a dyn Prompter,
    pub fetcher: &'a dyn Fetcher,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub messages: Vec<CmdMessage>,
    /// Files and bin entries written or deleted
    pub affected_paths: Vec<PathBuf>,
    pub listings: Vec<SourceListing>,
    pub sync: Option<SyncReport>,
    /// Script written by `create` or `install`
    pub created: Option<PathBuf>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_listings(mut self, listings: Vec<SourceListing>) -> Self {
        self.listings = listings;
        self
    }

    /// Adds an error message for each bin entry a sync could not update.
    pub fn add_sync_failures(&mut self, report: &SyncReport) {
        for (name, reason) in &report.failed {
            self.add_message(CmdMessage::error(format!("Could not update {}: {}", name, reason)));
        }
    }

    pub fn with_sync(mut self, report: SyncReport) -> Self {
        self.sync = Some(report);
        self
    }
}

/// Returns the trimmed argument, or a validation error showing `usage`.
pub(crate) fn require_arg<'v>(value: Option<&'v str>, usage: &str) -> Result<&'v str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ZxbError::Validation(format!("Usage: zxb {}", usage)))
}

/// Slugs name files and bin entries, so they can't be paths or hidden names.
pub(crate) fn require_slug<'v>(value: Option<&'v str>, usage: &str) -> Result<&'v str> {
    let slug = require_arg(value, usage)?;
    if slug.starts_with('.') || slug.contains('/') || slug.contains('\\') {
        return Err(ZxbError::Validation(format!(
            "\"{}\" is not a valid script name",
            slug
        )));
    }
    Ok(slug)
}
