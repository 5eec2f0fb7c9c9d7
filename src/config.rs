use crate::domain::TagPattern;
use crate::error::{Result, TaggerError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the repository's working tree
pub const LOCAL_CONFIG_FILE: &str = "gittagger.toml";

/// File name looked up in the user config directory
pub const USER_CONFIG_FILE: &str = ".gittagger.toml";

/// Represents the complete configuration for git-easy-tagger.
///
/// Contains the remote, tag naming, release branches and behavior options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Naming pattern for new tags, must contain `{version}`
    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,

    /// Annotation message; `{tag}` and `{version}` are substituted
    #[serde(default = "default_tag_message")]
    pub tag_message: String,

    /// Branches that are expected to be tagged. Tagging elsewhere only warns.
    #[serde(default = "default_release_branches")]
    pub release_branches: Vec<String>,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_tag_pattern() -> String {
    TagPattern::PLACEHOLDER.to_string()
}

fn default_tag_message() -> String {
    "Release {tag}".to_string()
}

fn default_release_branches() -> Vec<String> {
    vec!["main".to_string(), "master".to_string()]
}

/// Configuration for behavior customization.
///
/// Each flag turns on the matching command-line switch by default.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BehaviorConfig {
    #[serde(default)]
    pub pull_before_tag: bool,

    #[serde(default)]
    pub push_by_default: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            tag_pattern: default_tag_pattern(),
            tag_message: default_tag_message(),
            release_branches: default_release_branches(),
            behavior: BehaviorConfig::default(),
        }
    }
}

impl Config {
    /// Validated tag pattern
    pub fn tag_pattern(&self) -> Result<TagPattern> {
        TagPattern::new(self.tag_pattern.clone())
    }

    /// Render the annotation message for a new tag
    pub fn render_message(&self, tag: &str, version: &str) -> String {
        self.tag_message
            .replace("{tag}", tag)
            .replace("{version}", version)
    }

    /// Parse and validate a configuration document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.tag_pattern()?;
        if config.remote.trim().is_empty() {
            return Err(TaggerError::config("remote must not be empty"));
        }
        Ok(config)
    }
}

/// Path of the config file that [load_config_from] would read, if any.
fn resolve_config_path(config_path: Option<&str>, workdir: &Path) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(PathBuf::from(path));
    }

    let local = workdir.join(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|path| path.exists())
}

/// Loads configuration, looking for `gittagger.toml` in the current directory.
///
/// See [load_config_from].
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    load_config_from(config_path, Path::new("."))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gittagger.toml` in `workdir` (the repository being tagged)
/// 3. `.gittagger.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed, or a custom path is missing
pub fn load_config_from(config_path: Option<&str>, workdir: &Path) -> Result<Config> {
    let Some(path) = resolve_config_path(config_path, workdir) else {
        tracing::debug!("no config file found, using defaults");
        return Ok(Config::default());
    };

    let content = fs::read_to_string(&path)?;

    tracing::debug!(path = %path.display(), "loaded config file");
    Config::from_toml(&content)
}
