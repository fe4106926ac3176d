use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file. Defaults to ~/.yt-archive/archive.db when unset.
    pub path: Option<PathBuf>,
    /// Caption segments stored per transcription_data row.
    pub segments_per_part: usize,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            segments_per_part: 100,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    /// `file` or `db`
    pub sink: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            sink: "file".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ProviderConfig {
    pub yt_dlp: String,
    pub timeout_secs: u64,
    pub language: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            yt_dlp: "yt-dlp".to_string(),
            timeout_secs: 30,
            language: "en".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub word_list: PathBuf,
    pub top_n: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            word_list: PathBuf::from("words_alpha.txt"),
            top_n: 50,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct InputConfig {
    pub max_attempts: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

/// Top-level config file structure.
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
#[serde(default)]
pub struct ArchiveConfig {
    pub database: DatabaseConfig,
    pub output: OutputConfig,
    pub provider: ProviderConfig,
    pub analytics: AnalyticsConfig,
    pub input: InputConfig,
}

impl ArchiveConfig {
    /// Load config from `path`, or ~/.yt-archive/config.toml. Returns defaults
    /// if the file doesn't exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => config_path()?,
        };
        if !path.exists() {
            return Ok(ArchiveConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Path to the config file: ~/.yt-archive/config.toml
pub fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".yt-archive").join("config.toml"))
}

/// Default config template content.
pub fn default_config_template() -> &'static str {
    r#"# ~/.yt-archive/config.toml
# Precedence: CLI flag > env var > this file > built-in default

[database]
# path = "/home/you/.yt-archive/archive.db"
segments_per_part = 100

[output]
dir = "."
sink = "file"     # file | db
format = "text"   # text | json

[provider]
yt_dlp = "yt-dlp"
timeout_secs = 30
language = "en"

[analytics]
word_list = "words_alpha.txt"
top_n = 50

[input]
max_attempts = 3
"#
}

/// Create the default config file if it doesn't already exist.
pub fn init_config(path: Option<&Path>) -> Result<bool> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, default_config_template())?;
    Ok(true)
}
