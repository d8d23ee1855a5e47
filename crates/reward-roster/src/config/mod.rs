use std::env;
use std::fmt;
use std::path::PathBuf;

/// Number of consecutive days covered by one reward slate.
pub const DEFAULT_WINDOW_DAYS: usize = 8;
/// Number of reward slots per category per day.
pub const DEFAULT_SLOTS_PER_DAY: usize = 5;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for a reward run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub slate: SlateConfig,
    pub output: OutputConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("REWARD_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let window_days = positive_from_env("REWARD_WINDOW_DAYS", DEFAULT_WINDOW_DAYS)?;
        let slots_per_day = positive_from_env("REWARD_SLOTS_PER_DAY", DEFAULT_SLOTS_PER_DAY)?;

        let directory = env::var("REWARD_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let log_level = env::var("REWARD_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            slate: SlateConfig {
                window_days,
                slots_per_day,
            },
            output: OutputConfig { directory },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn positive_from_env(key: &'static str, default: usize) -> Result<usize, ConfigError> {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<usize>() {
            Ok(value) if value > 0 => Ok(value),
            _ => Err(ConfigError::InvalidNumber { key, value: raw }),
        },
        Err(_) => Ok(default),
    }
}

/// Shape of the slot grid: how many days and how many rewards per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlateConfig {
    pub window_days: usize,
    pub slots_per_day: usize,
}

impl Default for SlateConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            slots_per_day: DEFAULT_SLOTS_PER_DAY,
        }
    }
}

/// Where report files land when the caller does not pick a directory.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a positive integer (found '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("REWARD_ENV");
        env::remove_var("REWARD_WINDOW_DAYS");
        env::remove_var("REWARD_SLOTS_PER_DAY");
        env::remove_var("REWARD_OUTPUT_DIR");
        env::remove_var("REWARD_LOG_LEVEL");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.slate, SlateConfig::default());
        assert_eq!(config.slate.window_days, 8);
        assert_eq!(config.slate.slots_per_day, 5);
        assert_eq!(config.output.directory, PathBuf::from("."));
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn reads_overrides_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("REWARD_ENV", "prod");
        env::set_var("REWARD_SLOTS_PER_DAY", "3");
        env::set_var("REWARD_OUTPUT_DIR", "/tmp/rewards");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.slate.slots_per_day, 3);
        assert_eq!(config.slate.window_days, 8);
        assert_eq!(config.output.directory, PathBuf::from("/tmp/rewards"));
        reset_env();
    }

    #[test]
    fn rejects_zero_and_non_numeric_slate_values() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("REWARD_WINDOW_DAYS", "0");
        let err = AppConfig::load().expect_err("zero window rejected");
        assert!(err.to_string().contains("REWARD_WINDOW_DAYS"));

        env::set_var("REWARD_WINDOW_DAYS", "eight");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidNumber { key: "REWARD_WINDOW_DAYS", .. })
        ));
        reset_env();
    }
}
