use anyhow::{Context, Result, ensure};
use std::{env, path::PathBuf, sync::OnceLock, time::Duration};

/// Application configuration loaded and validated at startup
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Directory holding the persisted settings
    pub data_dir: PathBuf,

    /// Request timeouts towards the device
    pub timeouts: TimeoutConfig,

    /// Endpoint values taken from the environment instead of the settings store
    pub endpoint_override: EndpointOverride,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeoutConfig {
    pub connect: Duration,
    pub request: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(TimeoutConfig::DEFAULT_SECS),
            request: Duration::from_secs(TimeoutConfig::DEFAULT_SECS),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EndpointOverride {
    pub host: Option<String>,
    pub port: Option<String>,
}

impl AppConfig {
    /// Load the configuration from environment variables
    ///
    /// The first successful load is cached; subsequent calls return the
    /// cached instance.
    pub fn load() -> Result<&'static Self> {
        if let Some(config) = Self::cell().get() {
            return Ok(config);
        }

        let config = Self::load_from(|key| env::var(key).ok())?;
        Ok(Self::cell().get_or_init(|| config))
    }

    fn cell() -> &'static OnceLock<AppConfig> {
        static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();
        &APP_CONFIG
    }

    /// Load and validate the configuration from a variable lookup
    pub fn load_from(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data_dir = Self::data_dir(&var);
        let timeouts = TimeoutConfig::load(&var)?;
        let endpoint_override = EndpointOverride::load(&var);

        Ok(Self {
            data_dir,
            timeouts,
            endpoint_override,
        })
    }

    fn data_dir(var: &impl Fn(&str) -> Option<String>) -> PathBuf {
        let non_empty = |key| var(key).filter(|v: &String| !v.is_empty());

        if let Some(dir) = non_empty("SOCKET_REMOTE_DATA_DIR") {
            return PathBuf::from(dir);
        }
        if let Some(dir) = non_empty("XDG_CONFIG_HOME") {
            return PathBuf::from(dir).join(env!("CARGO_PKG_NAME"));
        }
        if let Some(home) = non_empty("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join(env!("CARGO_PKG_NAME"));
        }

        PathBuf::from(concat!(".", env!("CARGO_PKG_NAME")))
    }
}

impl TimeoutConfig {
    const DEFAULT_SECS: u64 = 15;

    fn load(var: &impl Fn(&str) -> Option<String>) -> Result<Self> {
        let connect = Self::secs(var, "SOCKET_REMOTE_CONNECT_TIMEOUT_SECS")?;
        let request = Self::secs(var, "SOCKET_REMOTE_REQUEST_TIMEOUT_SECS")?;

        Ok(Self { connect, request })
    }

    fn secs(var: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Duration> {
        let Some(value) = var(key) else {
            return Ok(Duration::from_secs(Self::DEFAULT_SECS));
        };

        let secs = value
            .trim()
            .parse::<u64>()
            .with_context(|| format!("failed to parse {key}: invalid format"))?;
        ensure!(secs > 0, "failed to parse {key}: timeout must be positive");

        Ok(Duration::from_secs(secs))
    }
}

impl EndpointOverride {
    fn load(var: &impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key| var(key).filter(|v: &String| !v.trim().is_empty());

        Self {
            host: non_empty("SOCKET_REMOTE_HOST"),
            port: non_empty("SOCKET_REMOTE_PORT"),
        }
    }
}
