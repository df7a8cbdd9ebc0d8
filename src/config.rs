use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_CHECK_URL: &str = "https://www.filosoft.ee/html_speller_et/html_spell.cgi";
const DEFAULT_SUGGEST_URL: &str = "https://www.filosoft.ee/html_speller_et/html_suggest.cgi";
const DEFAULT_REFERER: &str = "https://www.filosoft.ee/html_speller_et/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_check_url")]
    pub check_url: String,

    #[serde(default = "default_suggest_url")]
    pub suggest_url: String,

    /// The service rejects requests that don't come from its own page
    #[serde(default = "default_referer")]
    pub referer: String,
}

fn default_check_url() -> String {
    DEFAULT_CHECK_URL.to_string()
}

fn default_suggest_url() -> String {
    DEFAULT_SUGGEST_URL.to_string()
}

fn default_referer() -> String {
    DEFAULT_REFERER.to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            check_url: default_check_url(),
            suggest_url: default_suggest_url(),
            referer: default_referer(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightStyle {
    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_hover_message")]
    pub hover_message: String,
}

fn default_color() -> String {
    "red".to_string()
}

fn default_hover_message() -> String {
    "Possibly incorrect word".to_string()
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            color: default_color(),
            hover_message: default_hover_message(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub highlight: HighlightStyle,

    #[serde(default = "default_latex_extensions")]
    pub latex_extensions: Vec<String>,
}

fn default_latex_extensions() -> Vec<String> {
    ["tex", "latex", "ltx", "sty", "cls"]
        .iter()
        .map(|e| e.to_string())
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            highlight: HighlightStyle::default(),
            latex_extensions: default_latex_extensions(),
        }
    }
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(config_file: Option<PathBuf>, check_url: Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                log::debug!("Loading global config from {}", global_path.display());
                config = config.merge(Self::from_file(&global_path)?);
            }
        }

        // An explicit file replaces the local lookup and must exist
        match config_file {
            Some(path) => {
                log::debug!("Loading config from {}", path.display());
                config = config.merge(Self::from_file(&path)?);
            }
            None => {
                let local_path = PathBuf::from(".speller.toml");
                if local_path.exists() {
                    log::debug!("Loading local config from {}", local_path.display());
                    config = config.merge(Self::from_file(&local_path)?);
                }
            }
        }

        if let Some(url) = check_url {
            config.service.check_url = url;
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, other: Self) -> Self {
        // Merge logic: other's values override self's if they differ from defaults
        let defaults = Self::default();
        if other.service.check_url != defaults.service.check_url {
            self.service.check_url = other.service.check_url;
        }
        if other.service.suggest_url != defaults.service.suggest_url {
            self.service.suggest_url = other.service.suggest_url;
        }
        if other.service.referer != defaults.service.referer {
            self.service.referer = other.service.referer;
        }
        if other.highlight.color != defaults.highlight.color {
            self.highlight.color = other.highlight.color;
        }
        if other.highlight.hover_message != defaults.highlight.hover_message {
            self.highlight.hover_message = other.highlight.hover_message;
        }
        if other.latex_extensions != defaults.latex_extensions {
            self.latex_extensions = other.latex_extensions;
        }
        self
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "speller").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.service.check_url, DEFAULT_CHECK_URL);
        assert_eq!(config.service.referer, DEFAULT_REFERER);
        assert_eq!(config.highlight.hover_message, "Possibly incorrect word");
        assert!(config.latex_extensions.contains(&"tex".to_string()));
    }

    #[test]
    fn test_partial_file() {
        let config: Config = toml::from_str(
            r#"
            [highlight]
            color = "yellow"
            "#,
        )
        .unwrap();
        assert_eq!(config.highlight.color, "yellow");
        assert_eq!(config.highlight.hover_message, "Possibly incorrect word");
        assert_eq!(config.service, ServiceConfig::default());
    }

    #[test]
    fn test_merge_configs() {
        let base = Config {
            latex_extensions: vec!["tex".to_string()],
            ..Default::default()
        };
        let override_config = Config {
            service: ServiceConfig {
                check_url: "http://localhost:8080/spell".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = base.merge(override_config);
        assert_eq!(merged.service.check_url, "http://localhost:8080/spell");
        assert_eq!(merged.service.referer, DEFAULT_REFERER);
        assert_eq!(merged.latex_extensions, vec!["tex".to_string()]);
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("speller.toml");
        fs::write(&path, "latex_extensions = [\"tex\"]\n").unwrap();

        let config = Config::load(Some(path), Some("http://127.0.0.1:1/".to_string())).unwrap();
        assert_eq!(config.latex_extensions, vec!["tex".to_string()]);
        assert_eq!(config.service.check_url, "http://127.0.0.1:1/");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typo.toml");

        let err = Config::load(Some(path.clone()), None).unwrap_err();
        assert!(err
            .to_string()
            .contains(&format!("Failed to read config file: {}", path.display())));
    }
}
