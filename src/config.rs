//! Process configuration
//!
//! Settings are read once at startup, validated, and then passed by
//! reference to whatever needs them. Nothing else in the crate reads the
//! environment.

use crate::error::{Error, Result};
use std::path::Path;
use tracing::debug;
use url::Url;

/// Environment variable holding the store endpoint
pub const ENDPOINT_VAR: &str = "SUPABASE_URL";

/// Environment variable holding the privileged service key
pub const SERVICE_KEY_VAR: &str = "SUPABASE_SERVICE_KEY";

/// Characters of the endpoint shown in console output
const ENDPOINT_PREVIEW_LEN: usize = 40;

// ============================================================================
// Service Key
// ============================================================================

/// Privileged access credential. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceKey(String);

impl ServiceKey {
    /// Wrap a non-empty key
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(Error::missing_field(SERVICE_KEY_VAR));
        }
        Ok(Self(key))
    }

    /// The raw key, for building request headers
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ServiceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ServiceKey(***)")
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Remote store settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// Project endpoint, e.g. `https://abc.supabase.co`
    pub endpoint: Url,
    /// Service role key used for both `apikey` and bearer auth
    pub service_key: ServiceKey,
}

impl Settings {
    /// Build settings from explicit values
    pub fn new(endpoint: &str, service_key: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return Err(Error::missing_field(ENDPOINT_VAR));
        }

        let endpoint = Url::parse(endpoint)
            .map_err(|e| Error::invalid_value(ENDPOINT_VAR, e.to_string()))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                ENDPOINT_VAR,
                format!("unsupported scheme '{}'", endpoint.scheme()),
            ));
        }

        Ok(Self {
            endpoint,
            service_key: ServiceKey::new(service_key)?,
        })
    }

    /// Read settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through a lookup function
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup(ENDPOINT_VAR).ok_or_else(|| Error::missing_field(ENDPOINT_VAR))?;
        let service_key =
            lookup(SERVICE_KEY_VAR).ok_or_else(|| Error::missing_field(SERVICE_KEY_VAR))?;
        Self::new(&endpoint, service_key)
    }

    /// Endpoint truncated for console output
    pub fn endpoint_preview(&self) -> String {
        let full = self.endpoint.as_str();
        if full.chars().count() <= ENDPOINT_PREVIEW_LEN {
            full.to_string()
        } else {
            let head: String = full.chars().take(ENDPOINT_PREVIEW_LEN).collect();
            format!("{head}…")
        }
    }
}

/// Load a `.env` file into the process environment.
///
/// With `path` set the file must exist. Without it, a `.env` in the
/// working directory or any parent is used if present.
pub fn load_dotenv(path: Option<&Path>) -> Result<()> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };

    match loaded {
        Ok(path) => {
            debug!("Loaded environment from {}", path.display());
            Ok(())
        }
        Err(e) if e.not_found() && path.is_none() => Ok(()),
        Err(e) => Err(Error::config(format!("Failed to load .env: {e}"))),
    }
}
