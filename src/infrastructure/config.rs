use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use color_eyre::eyre::Result;
use config::ConfigError;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

use crate::{
    domain::chart::{ChartOrder, DEFAULT_CHART_LEN},
    presentation::config::{keybindings, styles},
    utils,
};

const CONFIG: &str = include_str!("../../.config/config.json5");

/// Prefix of environment variables overriding configuration keys,
/// e.g. `NUMDASH_API__TOKEN` or `NUMDASH_DASHBOARD__PAGE_SIZE`
pub const ENV_PREFIX: &str = "NUMDASH";

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub _data_dir: PathBuf,
    #[serde(default)]
    pub _config_dir: PathBuf,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default, deserialize_with = "deserialize_token")]
    pub token: Option<SecretString>,
}

fn default_timeout_secs() -> u64 {
    10
}

fn deserialize_token<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let token = Option::<String>::deserialize(deserializer)?;
    Ok(token
        .filter(|t| !t.trim().is_empty())
        .map(SecretString::from))
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: default_timeout_secs(),
            token: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct DashboardConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,
    #[serde(default = "default_chart_len")]
    pub chart_len: usize,
    #[serde(default)]
    pub chart_order: ChartOrder,
}

fn default_page_size() -> usize {
    10
}

fn default_page_size_options() -> Vec<usize> {
    vec![5, 10, 25, 50]
}

fn default_chart_len() -> usize {
    DEFAULT_CHART_LEN
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page_size_options: default_page_size_options(),
            chart_len: default_chart_len(),
            chart_order: ChartOrder::default(),
        }
    }
}

impl DashboardConfig {
    /// Reject unusable values and make sure the configured page size is selectable
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Message(
                "dashboard.page_size must be greater than zero".to_string(),
            ));
        }
        if self.chart_len == 0 {
            return Err(ConfigError::Message(
                "dashboard.chart_len must be greater than zero".to_string(),
            ));
        }
        self.page_size_options.retain(|size| *size > 0);
        if !self.page_size_options.contains(&self.page_size) {
            self.page_size_options.push(self.page_size);
        }
        self.page_size_options.sort_unstable();
        self.page_size_options.dedup();
        Ok(self)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub keybindings: keybindings::KeyBindings,
    #[serde(default)]
    pub styles: styles::Styles,
}

impl Config {
    /// Load configuration from the embedded defaults, the user's config directory
    /// and `NUMDASH_*` environment variables, in increasing precedence
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(
            &utils::get_config_dir(),
            &utils::get_data_dir(),
            Some(std::env::vars().collect()),
        )
    }

    /// Same as [`Config::new`] with explicit directories and environment, used by tests
    pub fn load(
        config_dir: &Path,
        data_dir: &Path,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let default_config: Config = json5::from_str(CONFIG)
            .map_err(|e| ConfigError::Message(format!("Failed to load default config: {e}")))?;

        let mut builder = config::Config::builder()
            .set_default("_data_dir", data_dir.to_string_lossy().to_string())?
            .set_default("_config_dir", config_dir.to_string_lossy().to_string())?
            .add_source(config::File::from_str(CONFIG, config::FileFormat::Json5));

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.json", config::FileFormat::Json),
            ("config.yaml", config::FileFormat::Yaml),
            ("config.toml", config::FileFormat::Toml),
            ("config.ini", config::FileFormat::Ini),
        ];
        for (file, format) in &config_files {
            let path = config_dir.join(file);
            if path.exists() {
                log::info!("Loading configuration from {}", path.display());
            }
            builder = builder.add_source(config::File::from(path).format(*format).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let mut cfg: Self = builder.build()?.try_deserialize()?;

        // Keys the user did not rebind keep their default action
        for (keyseq, action) in default_config.keybindings.iter() {
            cfg.keybindings.entry(keyseq.clone()).or_insert(*action);
        }
        for (style_key, style) in default_config.styles.iter() {
            cfg.styles
                .entry(style_key.clone())
                .or_insert_with(|| *style);
        }

        if cfg.api.token.is_none() {
            return Err(ConfigError::NotFound(String::from("api.token")));
        }

        cfg.dashboard = cfg.dashboard.validate()?;

        Ok(cfg)
    }

    /// Apply command-line overrides on top of the loaded configuration
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        page_size: Option<usize>,
        chart_order: Option<ChartOrder>,
    ) -> Result<Self, ConfigError> {
        if let Some(base_url) = base_url {
            self.api.base_url = base_url;
        }
        if let Some(page_size) = page_size {
            self.dashboard.page_size = page_size;
        }
        if let Some(chart_order) = chart_order {
            self.dashboard.chart_order = chart_order;
        }
        self.dashboard = self.dashboard.validate()?;
        Ok(self)
    }
}
