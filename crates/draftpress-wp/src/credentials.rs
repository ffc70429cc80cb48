//! WordPress credential resolution.
//!
//! Credentials come from three required environment variables, optionally
//! pre-populated from dotenv-style files in the working directory:
//!
//! - `WORDPRESS_URL` — site base URL
//! - `WORDPRESS_USERNAME` — account username
//! - `WORDPRESS_APP_PASSWORD` — application password (not the login one)
//!
//! `.env.local` is read before `.env` and the first definition of a key
//! wins; a value already set in the process environment always takes
//! priority over file values. Any missing value is a hard precondition
//! failure, raised before any network call.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};

const ENV_URL: &str = "WORDPRESS_URL";
const ENV_USERNAME: &str = "WORDPRESS_USERNAME";
const ENV_APP_PASSWORD: &str = "WORDPRESS_APP_PASSWORD";

const DOTENV_FILES: [&str; 2] = [".env.local", ".env"];

/// Resolved WordPress credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Site base URL with any trailing slash removed.
    pub base_url: String,
    /// Account username.
    pub username: String,
    /// Application password.
    pub app_password: String,
}

impl Credentials {
    /// Resolve credentials from the process environment, falling back to
    /// dotenv files in the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Credentials`] naming every missing variable.
    pub fn resolve() -> Result<Self> {
        let fallback = load_dotenv_files(Path::new("."));
        Self::from_lookup(|key| std::env::var(key).ok(), &fallback)
    }

    fn from_lookup(
        env: impl Fn(&str) -> Option<String>,
        fallback: &HashMap<String, String>,
    ) -> Result<Self> {
        let get = |key: &str| {
            env(key)
                .or_else(|| fallback.get(key).cloned())
                .filter(|v| !v.is_empty())
        };

        let url = get(ENV_URL);
        let username = get(ENV_USERNAME);
        let password = get(ENV_APP_PASSWORD);

        let missing: Vec<&str> = [
            (ENV_URL, &url),
            (ENV_USERNAME, &username),
            (ENV_APP_PASSWORD, &password),
        ]
        .iter()
        .filter(|(_, v)| v.is_none())
        .map(|(k, _)| *k)
        .collect();

        if !missing.is_empty() {
            return Err(Error::credentials(missing.join(", ")));
        }

        Ok(Self {
            base_url: url
                .unwrap_or_default()
                .trim_end_matches('/')
                .to_string(),
            username: username.unwrap_or_default(),
            app_password: password.unwrap_or_default(),
        })
    }
}

/// Read dotenv files from `dir`, earlier files winning on duplicate keys.
fn load_dotenv_files(dir: &Path) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for name in DOTENV_FILES {
        let path = dir.join(name);
        if let Ok(contents) = std::fs::read_to_string(&path) {
            for (key, value) in parse_dotenv(&contents) {
                map.entry(key).or_insert(value);
            }
        }
    }
    map
}

/// Parse `KEY=value` lines, skipping blanks and `#` comments. Values are
/// stripped of surrounding single or double quotes.
fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let (key, value) = line.split_once('=')?;
            let value = value.trim_matches('"').trim_matches('\'');
            Some((key.trim().to_string(), value.to_string()))
        })
        .collect()
}
