use std::any::Any;

use bookshelf_states::{State, assign_impl};
use log::info;
use serde::Deserialize;
use thiserror::Error;
use ustr::Ustr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    /// Origin of the authentication service without a trailing slash.
    /// Empty means same-origin (wasm32 builds).
    pub api_base_url: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("failed to read configuration from environment: {0}")]
    Env(String),
    #[error("BOOKSHELF_API_BASE_URL must be an http(s) URL, got {0:?}")]
    InvalidBaseUrl(String),
}

// Environment overrides, all optional.
#[derive(Debug, Deserialize)]
struct RawConfig {
    bookshelf_api_base_url: Option<String>,
}

impl BusinessConfig {
    pub fn new(base_url: String) -> Self {
        Self {
            api_base_url: base_url,
        }
    }

    /// Defaults for this build, overridden by `BOOKSHELF_API_BASE_URL` when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let vars: Vec<(String, String)> = vars
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
            .collect();
        let raw: RawConfig =
            serde_env::from_iter(vars).map_err(|e| ConfigError::Env(e.to_string()))?;

        match raw.bookshelf_api_base_url {
            Some(url) => {
                let url = url.trim().trim_end_matches('/').to_string();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ConfigError::InvalidBaseUrl(url));
                }
                info!("BusinessConfig: API base URL overridden to {url}");
                Ok(Self::new(url))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn api_url(&self) -> Ustr {
        if self.api_base_url.is_empty() {
            Ustr::from("/api")
        } else {
            Ustr::from(&format!("{}/api", self.api_base_url))
        }
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            api_base_url: if cfg!(target_arch = "wasm32") {
                String::new()
            } else if cfg!(feature = "env_local") {
                "http://127.0.0.1:8080".to_string()
            } else if cfg!(feature = "env_test") {
                "https://bookshelf-test.example.com".to_string()
            } else {
                "https://bookshelf.example.com".to_string()
            },
        }
    }
}

impl State for BusinessConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}
