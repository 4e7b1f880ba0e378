//! Client configuration and endpoint templating

use anyhow::{bail, Context as _, Result};
use std::time::Duration;

use crate::SpaceId;

pub const ENV_SERVER_URL: &str = "SPACECOUNTER_SERVER_URL";
pub const ENV_NAMESPACE: &str = "SPACECOUNTER_NAMESPACE";
pub const ENV_CLIENT_NAME: &str = "SPACECOUNTER_CLIENT_NAME";
pub const ENV_LICENSE_KEY: &str = "SPACECOUNTER_LICENSE_KEY";
pub const ENV_PATH_PREFIX: &str = "SPACECOUNTER_PATH_PREFIX";

pub const DEFAULT_SERVER_URL: &str = "https://replicache-counter-pr-6.onrender.com";
pub const DEFAULT_NAMESPACE: &str = "replicache";
pub const DEFAULT_CLIENT_NAME: &str = "alice";
/// Sub-path the static build is hosted under
pub const DEFAULT_PATH_PREFIX: &str = "/replicache-test/";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_POKE_RETRY: Duration = Duration::from_secs(3);

/// Everything needed to talk to the space/sync server
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Base URL without trailing slash
    pub server_url: String,
    /// API namespace segment (`/api/<namespace>/...`)
    pub namespace: String,
    /// Name the sync client is constructed with
    pub client_name: String,
    /// License key passed through to the sync client
    pub license_key: String,
    /// Deployment prefix stripped from incoming routes
    pub path_prefix: String,
    pub request_timeout: Duration,
    /// Delay before the poke stream reconnects, unless the server sends `retry:`
    pub poke_retry: Duration,
}

impl SyncConfig {
    /// Config with defaults for everything but the server URL
    pub fn new(server_url: &str) -> Result<Self> {
        Ok(Self {
            server_url: normalize_server_url(server_url)?,
            namespace: DEFAULT_NAMESPACE.to_string(),
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            license_key: String::new(),
            path_prefix: DEFAULT_PATH_PREFIX.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            poke_retry: DEFAULT_POKE_RETRY,
        })
    }

    /// Load from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (environment, test map, ...)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_url = lookup(ENV_SERVER_URL).unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        let mut config = Self::new(&server_url)?;

        if let Some(namespace) = lookup(ENV_NAMESPACE) {
            let namespace = namespace.trim_matches('/').to_string();
            if namespace.is_empty() {
                bail!("{} must not be empty", ENV_NAMESPACE);
            }
            config.namespace = namespace;
        }
        if let Some(name) = lookup(ENV_CLIENT_NAME) {
            config.client_name = name;
        }
        if let Some(key) = lookup(ENV_LICENSE_KEY) {
            config.license_key = key;
        }
        if let Some(prefix) = lookup(ENV_PATH_PREFIX) {
            config.path_prefix = prefix;
        }

        if config.license_key.is_empty() {
            tracing::warn!("[Config] {} is not set, sync client gets an empty key", ENV_LICENSE_KEY);
        }

        Ok(config)
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_poke_retry(mut self, retry: Duration) -> Self {
        self.poke_retry = retry;
        self
    }

    /// `<server>/api/<namespace>/<operation>`
    pub fn api_url(&self, operation: &str) -> String {
        format!("{}/api/{}/{}", self.server_url, self.namespace, operation)
    }

    pub fn push_url(&self, space_id: &SpaceId) -> String {
        self.space_url("push", space_id)
    }

    pub fn pull_url(&self, space_id: &SpaceId) -> String {
        self.space_url("pull", space_id)
    }

    pub fn poke_url(&self, space_id: &SpaceId) -> String {
        self.space_url("poke", space_id)
    }

    fn space_url(&self, operation: &str, space_id: &SpaceId) -> String {
        format!(
            "{}?spaceID={}",
            self.api_url(operation),
            urlencoding::encode(space_id.as_str())
        )
    }
}

fn normalize_server_url(raw: &str) -> Result<String> {
    let parsed =
        url::Url::parse(raw).with_context(|| format!("Invalid server URL: {}", raw))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("Server URL must be http or https: {}", raw);
    }
    Ok(raw.trim_end_matches('/').to_string())
}
