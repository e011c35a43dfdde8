//! HTTP access for `install` and `update`.

use crate::error::{Result, ZxbError};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

pub trait Fetcher {
    /// GETs `url`. Non-2xx statuses are returned, not raised; transport failures are errors.
    fn get(&self, url: &str) -> Result<FetchResponse>;
}

/// Blocking client backed by `ureq`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UreqFetcher;

impl Fetcher for UreqFetcher {
    fn get(&self, url: &str) -> Result<FetchResponse> {
        let user_agent = concat!("zxb/", env!("CARGO_PKG_VERSION"));
        match ureq::get(url).set("User-Agent", user_agent).call() {
            Ok(resp) => {
                let status = resp.status();
                let body = resp.into_string().map_err(|e| ZxbError::Network {
                    url: url.to_string(),
                    reason: e.to_string(),
                })?;
                Ok(FetchResponse { status, body })
            }
            Err(ureq::Error::Status(status, resp)) => Ok(FetchResponse {
                status,
                body: resp.into_string().unwrap_or_default(),
            }),
            Err(e) => Err(ZxbError::Network {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

#[derive(Deserialize)]
struct ReleaseManifest {
    version: String,
}

/// Reads the published version from a `package.json`-like document.
pub fn latest_version(fetcher: &dyn Fetcher, url: &str) -> Result<String> {
    let resp = fetcher.get(url)?;
    if resp.status != 200 {
        return Err(ZxbError::Status {
            url: url.to_string(),
            status: resp.status,
        });
    }
    let manifest: ReleaseManifest = serde_json::from_str(&resp.body)?;
    Ok(manifest.version.trim().to_string())
}

/// Slug for a script downloaded from `url`: the last path segment up to the first dot.
pub fn slug_from_url(url: &str) -> Result<String> {
    let parsed = url::Url::parse(url)
        .map_err(|e| ZxbError::Validation(format!("Invalid URL {}: {}", url, e)))?;

    parsed
        .path_segments()
        .and_then(|segments| segments.last())
        .and_then(|name| name.split('.').next())
        .filter(|slug| !slug.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ZxbError::Validation(format!("Can't derive a script name from {}", url)))
}
