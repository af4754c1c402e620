use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

pub const KEY_MAP_ORIGINAL: &str = "original";
pub const KEY_MAP_NONE: &str = "none";

fn default_enabled() -> bool {
    true
}

fn default_languages() -> Vec<String> {
    ["clojure", "hy", "lisp", "scheme"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_key_map() -> String {
    KEY_MAP_ORIGINAL.to_string()
}

fn default_indent_width() -> usize {
    2
}

fn default_extensions() -> BTreeMap<String, String> {
    [
        ("clj", "clojure"),
        ("cljs", "clojure"),
        ("cljc", "clojure"),
        ("edn", "clojure"),
        ("hy", "hy"),
        ("lisp", "lisp"),
        ("cl", "lisp"),
        ("el", "lisp"),
        ("scm", "scheme"),
        ("ss", "scheme"),
        ("rkt", "scheme"),
    ]
    .into_iter()
    .map(|(ext, lang)| (ext.to_string(), lang.to_string()))
    .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Language ids structural editing applies to.
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    /// `"original"` for the standard key bindings, `"none"` for none.
    #[serde(default = "default_key_map")]
    pub default_key_map: String,
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
    /// File extension (without the dot) to language id.
    #[serde(default = "default_extensions")]
    pub extensions: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            languages: default_languages(),
            default_key_map: default_key_map(),
            indent_width: default_indent_width(),
            extensions: default_extensions(),
            log_file: None,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the log path
        config.log_file = config
            .log_file
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// The config file's contents, or the defaults when there is none.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/paredit");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Language id for a file, from its extension.
    pub fn language_for_path(&self, path: &Path) -> Option<&str> {
        let ext = path.extension()?.to_str()?;
        self.extensions.get(ext).map(String::as_str)
    }

    pub fn uses_default_key_map(&self) -> bool {
        self.default_key_map != KEY_MAP_NONE
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/paredit/config.toml"));
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.enabled);
        assert_eq!(config.indent_width, 2);
        assert_eq!(config.default_key_map, "original");
        assert_eq!(config.languages, vec!["clojure", "hy", "lisp", "scheme"]);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
enabled = false
languages = ["scheme"]

[extensions]
sld = "scheme"
"#,
        )
        .unwrap();

        assert!(!config.enabled);
        assert_eq!(config.languages, vec!["scheme"]);
        assert_eq!(config.indent_width, 2);
        // a table replaces the default mapping entirely
        assert_eq!(config.extensions.len(), 1);
        assert_eq!(config.language_for_path(Path::new("lib.sld")), Some("scheme"));
        assert_eq!(config.language_for_path(Path::new("core.clj")), None);
    }

    #[test]
    fn test_language_for_path() {
        let config = Config::default();
        assert_eq!(
            config.language_for_path(Path::new("src/core.cljs")),
            Some("clojure")
        );
        assert_eq!(config.language_for_path(Path::new("init.el")), Some("lisp"));
        assert_eq!(config.language_for_path(Path::new("main.rkt")), Some("scheme"));
        assert_eq!(config.language_for_path(Path::new("README")), None);
        assert_eq!(config.language_for_path(Path::new("main.rs")), None);
    }

    #[test]
    fn test_key_map_none_disables_bindings() {
        let config: Config = toml::from_str(r#"default_key_map = "none""#).unwrap();
        assert!(!config.uses_default_key_map());
        assert!(Config::default().uses_default_key_map());
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "indent_width = \"wide\"").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/dir/config.toml");
        let test_config = Config {
            indent_width: 4,
            languages: vec!["clojure".to_string()],
            ..Config::default()
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_log_file_env_var_is_expanded_on_load() {
        unsafe {
            env::set_var("PAREDIT_TEST_LOG_ROOT", "/custom/logs");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            r#"log_file = "$PAREDIT_TEST_LOG_ROOT/paredit.log""#,
        )
        .unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(
            config.log_file,
            Some(PathBuf::from("/custom/logs/paredit.log"))
        );

        unsafe {
            env::remove_var("PAREDIT_TEST_LOG_ROOT");
        }
    }
}
