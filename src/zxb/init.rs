use crate::api::ZxbApi;
use crate::config::{ZxbConfig, ZxbPaths};
use crate::error::{Result, ZxbError};
use crate::prompt::StdinPrompter;
use crate::remote::UreqFetcher;
use crate::shell::SystemShell;
use directories::BaseDirs;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const HOME_ENV: &str = "ZXB_HOME";
const HOME_DIR_NAME: &str = ".zxb";

pub type SystemApi = ZxbApi<SystemShell, StdinPrompter, UreqFetcher>;

pub struct ZxbContext {
    pub api: SystemApi,
    /// The config did not exist before this run
    pub first_run: bool,
    /// Whether the bin directory is listed on `PATH`
    pub bin_on_path: bool,
}

/// Tool home: `$ZXB_HOME` if set, otherwise `~/.zxb`.
pub fn resolve_home() -> Result<PathBuf> {
    home_from(
        env::var_os(HOME_ENV),
        BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()),
    )
}

fn home_from(explicit: Option<OsString>, user_home: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(home) = explicit.filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    user_home
        .map(|home| home.join(HOME_DIR_NAME))
        .ok_or_else(|| {
            ZxbError::Validation(format!(
                "Could not determine the home directory. Set ${} instead.",
                HOME_ENV
            ))
        })
}

/// Loads the config from `home`, writing a first-run config if there is none,
/// and makes sure the bin directory and default source exist.
pub fn load_or_create(paths: &ZxbPaths) -> Result<(ZxbConfig, bool)> {
    let (config, first_run) = match ZxbConfig::load(&paths.home)? {
        Some(config) => (config, false),
        None => {
            let config = ZxbConfig::first_run(paths);
            fs::create_dir_all(paths.default_source())?;
            config.save(&paths.home)?;
            info!(home = %paths.home.display(), "created zxb home");
            (config, true)
        }
    };

    fs::create_dir_all(&paths.bin)?;
    Ok((config, first_run))
}

/// True when `dir` is one of the entries of a `PATH`-style value.
pub fn is_on_path(dir: &Path, path_var: Option<OsString>) -> bool {
    path_var
        .map(|value| env::split_paths(&value).any(|entry| entry == dir))
        .unwrap_or(false)
}

pub fn initialize(home: PathBuf, verbose: bool) -> Result<ZxbContext> {
    let paths = ZxbPaths::new(home);
    let (config, first_run) = load_or_create(&paths)?;
    let bin_on_path = is_on_path(&paths.bin, env::var_os("PATH"));
    debug!(
        home = %paths.home.display(),
        sources = config.sources.len(),
        bin_on_path,
        "initialized"
    );

    let api = ZxbApi::new(
        config,
        paths,
        SystemShell::new(verbose),
        StdinPrompter,
        UreqFetcher,
    );

    Ok(ZxbContext {
        api,
        first_run,
        bin_on_path,
    })
}
