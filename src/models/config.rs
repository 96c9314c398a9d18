use std::fs;
use std::path::Path;
use std::time::Duration;
use serde::Deserialize;
use crate::error::{Error, Result};

/// Point size the sample text is rendered at
pub const DEFAULT_POINT_SIZE: f32 = 30.0;

/// Fonts known to crash or hang the rasterizer; any file name containing one
/// of these is left out of the batch.
pub const DEFAULT_BLOCKLIST: [&str; 11] = [
    "KumarOne",
    "Rubik-BlackItalic",
    "Rubik-Black",
    "Rubik-BoldItalic",
    "Rubik-Bold",
    "Rubik-Italic",
    "Rubik-LightItalic",
    "Rubik-Light",
    "Rubik-MediumItalic",
    "Rubik-Medium",
    "Rubik-Regular",
];

/// Configuration for a classification run
#[derive(Debug, Clone)]
pub struct Config {
    /// Enable debug output
    pub debug_mode: bool,
    /// Point size used for both render passes
    pub point_size: f32,
    /// Substrings of font file names to exclude from measurement
    pub blocklist: Vec<String>,
    /// Number of measurement workers
    pub jobs: usize,
    /// Upper bound on a single font's render time
    pub render_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug_mode: false,
            point_size: DEFAULT_POINT_SIZE,
            blocklist: DEFAULT_BLOCKLIST.iter().map(|s| s.to_string()).collect(),
            jobs: 1,
            render_timeout: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    debug: Option<bool>,
    point_size: Option<f32>,
    blocklist: Option<Vec<String>>,
    jobs: Option<usize>,
    render_timeout_secs: Option<u64>,
}

impl Config {
    /// Load the defaults, overlaid with the TOML file at `path` if one is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(path) = path {
            if !path.is_file() {
                return Err(Error::InvalidPath(path.to_path_buf()));
            }
            let content = fs::read_to_string(path)?;
            config.merge_toml(&content)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Overlay settings from TOML text onto this configuration
    pub fn merge_toml(&mut self, content: &str) -> Result<()> {
        let parsed: ConfigFile = toml::from_str(content)
            .map_err(|e| Error::Config(format!("invalid config file: {}", e)))?;

        if let Some(debug) = parsed.debug {
            self.debug_mode = debug;
        }
        if let Some(size) = parsed.point_size {
            self.point_size = size;
        }
        if let Some(blocklist) = parsed.blocklist {
            self.blocklist = blocklist;
        }
        if let Some(jobs) = parsed.jobs {
            self.jobs = jobs;
        }
        if let Some(secs) = parsed.render_timeout_secs {
            self.render_timeout = Some(Duration::from_secs(secs));
        }
        Ok(())
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if !self.point_size.is_finite() || self.point_size <= 0.0 {
            return Err(Error::Config(format!(
                "point size must be positive, got {}",
                self.point_size
            )));
        }
        if self.jobs == 0 {
            return Err(Error::Config("jobs must be at least 1".to_string()));
        }
        if self.render_timeout == Some(Duration::ZERO) {
            return Err(Error::Config("render timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_builtin_blocklist() {
        let config = Config::default();
        assert_eq!(config.point_size, 30.0);
        assert_eq!(config.jobs, 1);
        assert!(config.blocklist.iter().any(|b| b == "KumarOne"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn toml_overrides_defaults() {
        let mut config = Config::default();
        config
            .merge_toml(
                r#"
                point_size = 24.0
                blocklist = ["Padauk"]
                jobs = 4
                render_timeout_secs = 10
                "#,
            )
            .unwrap();

        assert_eq!(config.point_size, 24.0);
        assert_eq!(config.blocklist, vec!["Padauk".to_string()]);
        assert_eq!(config.jobs, 4);
        assert_eq!(config.render_timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut config = Config::default();
        let err = config.merge_toml("pointsize = 12").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn zero_jobs_fails_validation() {
        let config = Config {
            jobs: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn missing_config_file_is_invalid_path() {
        let err = Config::load(Some(Path::new("/nonexistent/fontbands.toml"))).unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));
    }
}
