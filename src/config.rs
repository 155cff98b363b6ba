use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::data::filter::{MASS_CEILING_MAX, MASS_CEILING_MIN};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "penguins-dashboard.toml";
/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "PENGUINS_DASHBOARD_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// A sidebar hyperlink.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Link {
    fn new(label: &str, url: &str) -> Self {
        Link {
            label: label.to_string(),
            url: url.to_string(),
        }
    }
}

/// Start-up settings. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// External penguin table; the bundled one is used when absent.
    pub data_path: Option<PathBuf>,
    pub title: String,
    pub window_size: [f32; 2],
    pub point_radius: f32,
    /// Slider position for new sessions, clamped into the slider range.
    pub initial_mass_ceiling: f64,
    pub links: Vec<Link>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            data_path: None,
            title: "Penguins Dashboard".to_string(),
            window_size: [1280.0, 820.0],
            point_radius: 3.0,
            initial_mass_ceiling: MASS_CEILING_MAX,
            links: default_links(),
        }
    }
}

fn default_links() -> Vec<Link> {
    vec![
        Link::new(
            "GitHub Repository: Source Code",
            "https://github.com/denisecase/cintel-07-tdash",
        ),
        Link::new(
            "Live App Deployment",
            "https://denisecase.github.io/cintel-07-tdash/",
        ),
        Link::new(
            "Report Issues",
            "https://github.com/denisecase/cintel-07-tdash/issues",
        ),
        Link::new("Learn egui", "https://docs.rs/egui/"),
        Link::new(
            "Dashboard Template",
            "https://shiny.posit.co/py/templates/dashboard/",
        ),
        Link::new(
            "Penguins Dashboard Express Example",
            "https://github.com/denisecase/pyshiny-penguins-dashboard-express",
        ),
    ]
}

impl DashboardConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = toml::from_str(s)?;
        config.validated()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Resolve and load the configuration for this process.
    ///
    /// Lookup order: explicit path (first CLI argument), then
    /// [`CONFIG_ENV_VAR`], then [`DEFAULT_CONFIG_FILE`] if it exists, then
    /// built-in defaults. An explicitly named file must exist.
    pub fn resolve(cli_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let explicit = cli_path.or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));
        if let Some(path) = explicit {
            log::info!("Loading configuration from {}", path.display());
            return Self::load(path);
        }
        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            log::info!("Loading configuration from {DEFAULT_CONFIG_FILE}");
            return Self::load(fallback);
        }
        log::info!("No configuration file, using defaults");
        Ok(Self::default())
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        if !self.initial_mass_ceiling.is_finite() {
            return Err(ConfigError::Invalid(
                "initial_mass_ceiling must be a finite number".to_string(),
            ));
        }
        let clamped = self
            .initial_mass_ceiling
            .clamp(MASS_CEILING_MIN, MASS_CEILING_MAX);
        if clamped != self.initial_mass_ceiling {
            log::warn!(
                "initial_mass_ceiling {} outside [{MASS_CEILING_MIN}, {MASS_CEILING_MAX}], using {clamped}",
                self.initial_mass_ceiling
            );
            self.initial_mass_ceiling = clamped;
        }
        if self.point_radius <= 0.0 || !self.point_radius.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "point_radius must be positive, got {}",
                self.point_radius
            )));
        }
        if self.window_size.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "window_size must be positive, got {:?}",
                self.window_size
            )));
        }
        Ok(self)
    }
}
