use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::engine::{DetectionOptions, InterpolationOptions, canonicalize};

pub const CONFIG_FILE_NAME: &str = ".i18npagerc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
    /// Directory of `<locale>.json` files; the bundled tables are used when unset.
    #[serde(default)]
    pub messages_root: Option<String>,
    #[serde(default = "default_fallback_lng")]
    pub fallback_lng: String,
    #[serde(default)]
    pub interpolation: InterpolationOptions,
    #[serde(default)]
    pub detection: DetectionOptions,
    #[serde(default = "default_cache_file")]
    pub cache_file: String,
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_out_dir() -> String {
    "./dist".to_string()
}

fn default_fallback_lng() -> String {
    "en".to_string()
}

fn default_cache_file() -> String {
    ".i18n-page-cache.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            includes: Vec::new(),
            ignores: Vec::new(),
            source_root: default_source_root(),
            out_dir: default_out_dir(),
            messages_root: None,
            fallback_lng: default_fallback_lng(),
            interpolation: InterpolationOptions::default(),
            detection: DetectionOptions::default(),
            cache_file: default_cache_file(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Rejects invalid glob patterns, an unusable fallback language and
    /// HTML-escaping interpolation.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Patterns without wildcards are literal directory paths, so
        // `pages/[lang]` is valid without escaping.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if canonicalize(&self.fallback_lng).is_none() {
            bail!(
                "Invalid 'fallbackLng': \"{}\" is not a language tag",
                self.fallback_lng
            );
        }

        if self.interpolation.escape_value {
            bail!("'interpolation.escapeValue' must be false");
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use crate::core::engine::{CacheTarget, DetectionSource};
    use pretty_assertions::assert_eq;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.ignores.is_empty());
        assert!(config.includes.is_empty());
        assert_eq!(config.fallback_lng, "en");
        assert_eq!(config.messages_root, None);
        assert!(!config.interpolation.escape_value);
        assert_eq!(
            config.detection.order,
            vec![
                DetectionSource::QueryString,
                DetectionSource::LocalStorage,
                DetectionSource::Navigator
            ]
        );
        assert_eq!(config.detection.caches, vec![CacheTarget::LocalStorage]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
              "ignores": ["**/drafts/**"],
              "includes": ["site"],
              "fallbackLng": "zh",
              "interpolation": { "escapeValue": false },
              "detection": { "order": ["navigator"], "caches": [] }
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.ignores, vec!["**/drafts/**"]);
        assert_eq!(config.includes, vec!["site"]);
        assert_eq!(config.fallback_lng, "zh");
        assert_eq!(config.detection.order, vec![DetectionSource::Navigator]);
        assert!(config.detection.caches.is_empty());
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{ "outDir": "./public" }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.out_dir, "./public");
        assert_eq!(config.source_root, default_source_root());
        assert_eq!(config.cache_file, default_cache_file());
        assert_eq!(config.detection, DetectionOptions::default());
    }

    #[test]
    fn test_unknown_detection_source_is_rejected() {
        let json = r#"{ "detection": { "order": ["cookie"] } }"#;
        assert!(serde_json::from_str::<Config>(json).is_err());
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("site").join("blog");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        assert!(find_config_file(dir.path()).is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "ignores": ["**/test/**"] }"#,
        )
        .unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(result.from_file);
        assert_eq!(result.config.ignores, vec!["**/test/**"]);
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(!result.from_file);
        assert_eq!(result.config.fallback_lng, "en");
    }

    #[test]
    fn test_validate_invalid_ignore_pattern() {
        let config = Config {
            ignores: vec!["[invalid".to_string()], // unclosed bracket
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("ignores"));
    }

    #[test]
    fn test_validate_literal_bracket_include_is_valid() {
        let config = Config {
            includes: vec!["pages/[lang]".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_include_pattern() {
        let config = Config {
            includes: vec!["site/**/[invalid".to_string()],
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("includes"));
    }

    #[test]
    fn test_validate_fallback_lng() {
        let config = Config {
            fallback_lng: "".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_escape_value() {
        let config = Config {
            interpolation: InterpolationOptions { escape_value: true },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_with_invalid_pattern_fails() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "ignores": ["[invalid"] }"#,
        )
        .unwrap();

        assert!(load_config(dir.path()).is_err());
    }

    #[test]
    fn test_default_config_json_round_trips() {
        let json = default_config_json().unwrap();
        assert!(json.contains("fallbackLng"));
        assert!(json.contains("\"escapeValue\": false"));
        let config: Config = serde_json::from_str(&json).unwrap();
        assert!(config.validate().is_ok());
    }
}
