use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

fn default_cooldown_ms() -> u64 {
    10_000
}

/// Session settings. Loaded from JSON; every field is optional.
///
/// ```json
/// { "cooldown_ms": 10000, "seed": 42 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Minimum gap between accepted analyses. Zero disables the cooldown.
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
    /// Seed for the random blend; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cooldown_ms: default_cooldown_ms(),
            seed: None,
        }
    }
}

impl Config {
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    pub fn from_json(json: &str, origin: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let shown = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: shown.clone(),
            source,
        })?;
        let config = Self::from_json(&content, &shown)?;
        tracing::debug!(path = %shown, ?config, "loaded config");
        Ok(config)
    }

    /// Defaults, then the file if given, then explicit overrides.
    pub fn load(
        path: Option<&Path>,
        cooldown_ms: Option<u64>,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(cooldown_ms) = cooldown_ms {
            config.cooldown_ms = cooldown_ms;
        }
        if seed.is_some() {
            config.seed = seed;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn empty_object_gives_defaults() {
        let config = Config::from_json("{}", "inline").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.cooldown(), Duration::from_secs(10));
    }

    #[test]
    fn fields_are_read() {
        let config = Config::from_json(r#"{"cooldown_ms": 0, "seed": 9}"#, "inline").unwrap();
        assert_eq!(
            config,
            Config {
                cooldown_ms: 0,
                seed: Some(9)
            }
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Config::from_json(r#"{"cooldown": 5}"#, "inline").unwrap_err();
        assert!(err.to_string().starts_with("invalid config inline"));
    }

    #[test]
    fn overrides_win_over_defaults() {
        let config = Config::load(None, Some(1_000), Some(3)).unwrap();
        assert_eq!(config.cooldown_ms, 1_000);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let path = Path::new("/nonexistent/plagcheck.json");
        let err = Config::load(Some(path), None, None).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn file_is_loaded_and_overridden() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"cooldown_ms": 2500, "seed": 11}}"#).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(
            config,
            Config {
                cooldown_ms: 2_500,
                seed: Some(11)
            }
        );

        let config = Config::load(Some(file.path()), Some(0), None).unwrap();
        assert_eq!(config.cooldown_ms, 0);
        assert_eq!(config.seed, Some(11));
    }
}
