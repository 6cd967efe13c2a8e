use crate::fail_action::Options;
use crate::i18n::DEFAULT_LANG;
use crate::overrides::RouteOverrides;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,

    // Messages
    pub default_lang: String,

    /// Route path -> override rules, loaded from `OVERRIDES_FILE`
    pub routes: HashMap<String, RouteOverrides>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let routes = match std::env::var("OVERRIDES_FILE") {
            Ok(path) => load_overrides(&path)?,
            Err(_) => HashMap::new(),
        };

        Ok(Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),

            default_lang: std::env::var("DEFAULT_LANG")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LANG.to_string()),

            routes,
        })
    }

    /// Global options handed to every route registration.
    pub fn options(&self) -> Options {
        Options {
            default_lang: self.default_lang.clone(),
        }
    }

    /// Overrides configured for `route`, or an empty set.
    pub fn overrides_for(&self, route: &str) -> RouteOverrides {
        self.routes.get(route).cloned().unwrap_or_default()
    }
}

/// Read a JSON file mapping route paths to their override rules.
pub fn load_overrides(path: impl AsRef<Path>) -> Result<HashMap<String, RouteOverrides>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read overrides file {}", path.display()))?;

    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse overrides file {}", path.display()))
}
