//! Configuration management for chainfind.
//!
//! Loads configuration from ${CHAINFIND_HOME}/config.toml with sensible
//! defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Which backend the blog post store talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostsBackend {
    /// Posts persisted as a JSON file under CHAINFIND_HOME.
    #[default]
    Local,
    /// Posts served by the chainfind HTTP API.
    Http,
}

impl PostsBackend {
    pub fn display_name(&self) -> &'static str {
        match self {
            PostsBackend::Local => "local",
            PostsBackend::Http => "http",
        }
    }
}

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
/// To update, edit default_config.toml directly.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// This ensures new comments/sections from the template are always present,
/// while preserving user's customized values.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;

    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for chainfind configuration and data directories.
    //!
    //! CHAINFIND_HOME resolution order:
    //! 1. CHAINFIND_HOME environment variable (if set)
    //! 2. ~/.config/chainfind (default)

    use std::path::PathBuf;

    /// Returns the chainfind home directory.
    ///
    /// Checks CHAINFIND_HOME env var first, falls back to
    /// ~/.config/chainfind
    pub fn chainfind_home() -> PathBuf {
        if let Ok(home) = std::env::var("CHAINFIND_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("chainfind"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        chainfind_home().join("config.toml")
    }

    /// Returns the path to the local blog post store.
    pub fn posts_path() -> PathBuf {
        chainfind_home().join("posts.json")
    }
}

/// Gemini channel settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    /// Model used for the CHAIN_CORE conversation.
    pub model: String,
    /// Upper bound on streamed reply length, in tokens.
    pub max_output_tokens: u32,
    /// Optional API base URL (for proxies). GEMINI_BASE_URL wins over this.
    pub base_url: Option<String>,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            model: Config::DEFAULT_MODEL.to_string(),
            max_output_tokens: Config::DEFAULT_MAX_OUTPUT_TOKENS,
            base_url: None,
        }
    }
}

impl GeminiSettings {
    /// Returns the effective base URL if set and non-empty.
    pub fn effective_base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Blog post store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PostsSettings {
    /// Which store implementation to use.
    pub backend: PostsBackend,
    /// Base URL of the HTTP backend, e.g. `http://127.0.0.1:8080/api/v1`.
    pub base_url: String,
}

impl Default for PostsSettings {
    fn default() -> Self {
        Self {
            backend: PostsBackend::default(),
            base_url: Config::DEFAULT_POSTS_BASE_URL.to_string(),
        }
    }
}

/// Post API server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Address `chainfind serve` binds to.
    pub listen_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen_addr: Config::DEFAULT_LISTEN_ADDR.to_string(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Optional inline system prompt overriding the built-in persona
    pub system_prompt: Option<String>,

    /// Gemini channel settings.
    #[serde(default)]
    pub gemini: GeminiSettings,

    /// Blog post store settings.
    #[serde(default)]
    pub posts: PostsSettings,

    /// Post API server settings.
    #[serde(default)]
    pub server: ServerSettings,
}

impl Config {
    const DEFAULT_MODEL: &str = "gemini-2.5-flash";
    const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 500;
    const DEFAULT_POSTS_BASE_URL: &str = "http://127.0.0.1:8080/api/v1";
    const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Saves only the gemini model field to a specific config file path.
    ///
    /// Creates the file with default template if it doesn't exist.
    /// If file exists, merges user values into the latest template.
    pub fn save_model_to(path: &Path, model: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        doc["gemini"]["model"] = value(model);

        Self::write_config(path, &doc.to_string())
    }

    /// Saves only the posts backend field to a specific config file path.
    pub fn save_posts_backend_to(path: &Path, backend: PostsBackend) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        doc["posts"]["backend"] = value(backend.display_name());

        Self::write_config(path, &doc.to_string())
    }

    /// Returns the effective system prompt, falling back to the built-in
    /// CHAIN_CORE persona when no override is configured.
    pub fn effective_system_prompt(&self) -> String {
        let trimmed = self.system_prompt.as_deref().unwrap_or("").trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }

        crate::prompts::SYSTEM_INSTRUCTION.to_string()
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            system_prompt: None,
            gemini: GeminiSettings::default(),
            posts: PostsSettings::default(),
            server: ServerSettings::default(),
        }
    }
}
