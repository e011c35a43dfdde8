use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_EXTENSION: &str = "mjs";
pub const DEFAULT_RELEASE_URL: &str =
    "https://raw.githubusercontent.com/pyronaur/zxb/main/package.json";

/// Configuration for zxb, stored in `<home>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ZxbConfig {
    /// Version of the installed zxb scripts, updated by `zxb update`
    #[serde(default)]
    pub version: Option<String>,

    /// Directories scanned for scripts, in lookup order
    #[serde(default)]
    pub sources: Vec<PathBuf>,

    /// Extensions recognised as scripts; new scripts use the first one
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// JSON document whose `version` field names the latest release
    #[serde(default = "default_release_url")]
    pub release_url: String,
}

fn default_extensions() -> Vec<String> {
    vec![DEFAULT_EXTENSION.to_string()]
}

fn default_release_url() -> String {
    DEFAULT_RELEASE_URL.to_string()
}

impl Default for ZxbConfig {
    fn default() -> Self {
        Self {
            version: None,
            sources: Vec::new(),
            extensions: default_extensions(),
            release_url: default_release_url(),
        }
    }
}

impl ZxbConfig {
    /// Config used on first run: a single `scripts/` source inside the tool home.
    pub fn first_run(paths: &ZxbPaths) -> Self {
        Self {
            sources: vec![paths.default_source()],
            ..Self::default()
        }
    }

    /// Load config from the given directory, or return `None` if there is none yet
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Option<Self>> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&config_path)?;
        let config: ZxbConfig = serde_json::from_str(&content)?;
        Ok(Some(config))
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir)?;

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Extension for newly created scripts, without the leading dot
    pub fn script_extension(&self) -> &str {
        self.extensions
            .first()
            .map(|ext| ext.trim_start_matches('.'))
            .unwrap_or(DEFAULT_EXTENSION)
    }

    pub fn is_script_extension(&self, ext: &str) -> bool {
        self.extension_rank(ext).is_some()
    }

    /// Position of `ext` in the configured extensions. Lower ranks win when a
    /// directory holds the same slug under several extensions.
    pub fn extension_rank(&self, ext: &str) -> Option<usize> {
        self.extensions
            .iter()
            .position(|known| known.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }

    /// Registers a source directory. Returns false if it was already known.
    pub fn add_source(&mut self, dir: PathBuf) -> bool {
        if self.sources.contains(&dir) {
            return false;
        }
        self.sources.push(dir);
        true
    }
}

/// Well-known locations inside the tool home.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZxbPaths {
    pub home: PathBuf,
    pub bin: PathBuf,
    pub sources: PathBuf,
    pub inc: PathBuf,
}

impl ZxbPaths {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Self {
            bin: home.join("bin"),
            sources: home.join("sources"),
            inc: home.join("inc"),
            home,
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.home.join(CONFIG_FILENAME)
    }

    pub fn default_source(&self) -> PathBuf {
        self.home.join("scripts")
    }
}
