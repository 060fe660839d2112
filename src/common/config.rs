//! Configuration file handling

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use super::paths::config_path;
use super::Result;
use crate::api::types::{NewPost, Post};

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Remote service settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Progress output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Literal ids and payloads used by the checks
    #[serde(default)]
    pub fixtures: Fixtures,
}

/// Remote service settings
#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    /// Base URL the `/posts` collection hangs off
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout; unset leaves the HTTP client default in place
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

impl ServiceConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn default_base_url() -> String {
    "https://jsonplaceholder.typicode.com".to_string()
}

/// Where progress lines go
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Human-readable lines on stdout
    #[default]
    Console,
    /// Structured tracing events
    Log,
}

/// Output settings
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub mode: OutputMode,

    /// Colorize console output
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mode: OutputMode::default(),
            color: default_color(),
        }
    }
}

fn default_color() -> bool {
    true
}

/// Fixed ids and payloads the checks send and expect
#[derive(Debug, Clone, Deserialize)]
pub struct Fixtures {
    /// Post fetched by the get-one check
    #[serde(default = "default_get_id")]
    pub get_id: u64,

    /// Substring the fetched post's title must contain
    #[serde(default = "default_expected_title")]
    pub expected_title: String,

    /// Payload for the create check
    #[serde(default = "default_create")]
    pub create: NewPost,

    /// Full record for the replace check; its `id` is the target
    #[serde(default = "default_replace")]
    pub replace: Post,

    /// Post patched by the partial-update check
    #[serde(default = "default_patch_id")]
    pub patch_id: u64,

    /// Body sent by the partial-update check
    #[serde(default = "default_patch_body")]
    pub patch_body: String,

    /// Post removed by the delete check
    #[serde(default = "default_delete_id")]
    pub delete_id: u64,
}

impl Default for Fixtures {
    fn default() -> Self {
        Self {
            get_id: default_get_id(),
            expected_title: default_expected_title(),
            create: default_create(),
            replace: default_replace(),
            patch_id: default_patch_id(),
            patch_body: default_patch_body(),
            delete_id: default_delete_id(),
        }
    }
}

fn default_get_id() -> u64 {
    1
}
fn default_expected_title() -> String {
    "sunt aut facere repellat provident occaecati excepturi optio reprehenderit".to_string()
}
fn default_create() -> NewPost {
    NewPost {
        title: "my new test post".to_string(),
        body: "this is the content of my new test post.".to_string(),
        user_id: 101,
    }
}
fn default_replace() -> Post {
    Post {
        id: 2,
        user_id: 1,
        title: "updated test post title".to_string(),
        body: "this is the updated content for the test post.".to_string(),
    }
}
fn default_patch_id() -> u64 {
    3
}
fn default_patch_body() -> String {
    "bla bla bla!".to_string()
}
fn default_delete_id() -> u64 {
    4
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from an explicit path, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| super::Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values the types alone cannot guarantee
    pub fn validate(&self) -> Result<()> {
        let base = &self.service.base_url;
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(super::Error::Config(format!(
                "base_url must start with http:// or https://, got '{}'",
                base
            )));
        }
        Ok(())
    }
}
