//! Runtime configuration and logger setup.
//!
//! Values come from the environment, optionally seeded from a `.env` file.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::{Path, PathBuf};

pub const ENV_LOG_CONFIG: &str = "SUBNET_PLANNER_LOG_CONFIG";
pub const ENV_DISPLAY_LIMIT: &str = "SUBNET_PLANNER_DISPLAY_LIMIT";

pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";
pub const DEFAULT_DISPLAY_LIMIT: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// log4rs YAML file, used when it exists.
    pub log_config: PathBuf,
    /// Maximum subnet rows printed unless `--all` is given.
    pub display_limit: usize,
    /// Problems found while reading the environment, logged by [`init_logging`]
    /// once a logger exists.
    pub warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_config: PathBuf::from(DEFAULT_LOG_CONFIG),
            display_limit: DEFAULT_DISPLAY_LIMIT,
            warnings: Vec::new(),
        }
    }
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Config {
        dotenv::dotenv().ok();
        Config::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a config from a variable lookup, falling back to defaults.
    pub fn from_vars<V>(var: V) -> Config
    where
        V: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(path) = var(ENV_LOG_CONFIG).filter(|p| !p.trim().is_empty()) {
            config.log_config = PathBuf::from(path.trim());
        }

        if let Some(limit) = var(ENV_DISPLAY_LIMIT) {
            match limit.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.display_limit = n,
                _ => config.warnings.push(format!(
                    "{ENV_DISPLAY_LIMIT}={limit} is not a positive number, using {DEFAULT_DISPLAY_LIMIT}"
                )),
            }
        }

        config
    }
}

/// Initialise log4rs from the configured YAML file, or log warnings to stderr
/// when the file does not exist. Warnings collected by [`Config::from_vars`]
/// are logged once the logger is up.
pub fn init_logging(config: &Config) -> Result<(), Box<dyn Error>> {
    if Path::new(&config.log_config).exists() {
        log4rs::init_file(&config.log_config, Default::default())?;
        log::debug!("Logging configured from {}", config.log_config.display());
    } else {
        log4rs::init_config(stderr_config()?)?;
    }
    for warning in &config.warnings {
        log::warn!("{warning}");
    }
    Ok(())
}

fn stderr_config() -> Result<LogConfig, Box<dyn Error>> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{h({l})} {t} - {m}{n}")))
        .build();
    let log_config = LogConfig::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))?;
    Ok(log_config)
}
