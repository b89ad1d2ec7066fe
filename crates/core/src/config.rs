use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub transport: Transport,
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProviderConfig {
    pub backend: ProviderBackend,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transport {
    Stdio,
    StreamableHttp,
}

/// Booking backends the process can serve. `Mock` is the only one
/// shipped today; real reservation networks slot in as new variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderBackend {
    Mock,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub transport: Option<Transport>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub provider_backend: Option<ProviderBackend>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                transport: Transport::StreamableHttp,
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            provider: ProviderConfig { backend: ProviderBackend::Mock },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for Transport {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stdio" => Ok(Self::Stdio),
            "streamable-http" => Ok(Self::StreamableHttp),
            other => Err(ConfigError::Validation(format!(
                "unsupported transport `{other}` (expected stdio|streamable-http)"
            ))),
        }
    }
}

impl std::str::FromStr for ProviderBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            other => Err(ConfigError::Validation(format!(
                "unsupported reservation backend `{other}` (expected mock)"
            ))),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    /// Defaults, then the config file, then `TABLY_*` environment
    /// variables, then explicit overrides; validation runs last over
    /// the merged result.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("tably.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(server) = patch.server {
            if let Some(transport) = server.transport {
                self.server.transport = transport;
            }
            if let Some(host) = server.host {
                self.server.host = host;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
        }

        if let Some(provider) = patch.provider {
            if let Some(backend) = provider.backend {
                self.provider.backend = backend;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("TABLY_SERVER_TRANSPORT") {
            self.server.transport = value.parse()?;
        }
        if let Some(value) = read_env("TABLY_SERVER_HOST") {
            self.server.host = value;
        }
        if let Some(value) = read_env("TABLY_SERVER_PORT") {
            self.server.port = parse_u16("TABLY_SERVER_PORT", &value)?;
        }

        if let Some(value) = read_env("TABLY_PROVIDER_BACKEND") {
            self.provider.backend = value.parse()?;
        }

        let log_level = read_env("TABLY_LOGGING_LEVEL").or_else(|| read_env("TABLY_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format = read_env("TABLY_LOGGING_FORMAT").or_else(|| read_env("TABLY_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(transport) = overrides.transport {
            self.server.transport = transport;
        }
        if let Some(host) = overrides.host {
            self.server.host = host;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(backend) = overrides.provider_backend {
            self.provider.backend = backend;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_server(&self.server)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("tably.toml"), PathBuf::from("config/tably.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
    if server.host.trim().is_empty() {
        return Err(ConfigError::Validation("server.host must not be empty".to_string()));
    }

    if server.port == 0 {
        return Err(ConfigError::Validation(
            "server.port must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u16(key: &str, value: &str) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    server: Option<ServerPatch>,
    provider: Option<ProviderPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    transport: Option<Transport>,
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct ProviderPatch {
    backend: Option<ProviderBackend>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::sync::{Mutex, OnceLock};

    use tempfile::TempDir;

    use super::{
        AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat, ProviderBackend,
        Transport,
    };

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    #[test]
    fn defaults_match_the_documented_baseline() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let config = AppConfig::load(LoadOptions::default())
            .map_err(|err| format!("config load failed: {err}"))?;

        ensure(
            config.server.transport == Transport::StreamableHttp,
            "default transport should be streamable-http",
        )?;
        ensure(config.server.bind_address() == "0.0.0.0:8000", "default bind address")?;
        ensure(
            config.provider.backend == ProviderBackend::Mock,
            "default backend should be mock",
        )?;
        ensure(config.logging.level == "info", "default log level should be info")?;
        ensure(
            matches!(config.logging.format, LogFormat::Compact),
            "default log format should be compact",
        )
    }

    #[test]
    fn file_values_override_defaults() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = dir.path().join("tably.toml");
        fs::write(
            &path,
            r#"
[server]
transport = "stdio"
port = 9000

[logging]
level = "debug"
"#,
        )
        .map_err(|err| err.to_string())?;

        let config =
            AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                .map_err(|err| format!("config load failed: {err}"))?;

        ensure(config.server.transport == Transport::Stdio, "transport should come from file")?;
        ensure(config.server.port == 9000, "port should come from file")?;
        ensure(config.server.host == "0.0.0.0", "host should keep its default")?;
        ensure(config.logging.level == "debug", "log level should come from file")
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_TABLY_HOST", "127.0.0.1");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("tably.toml");
            fs::write(
                &path,
                r#"
[server]
host = "${TEST_TABLY_HOST}"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.server.host == "127.0.0.1",
                "host should be interpolated from the environment",
            )
        })();

        clear_vars(&["TEST_TABLY_HOST"]);
        result
    }

    #[test]
    fn precedence_runs_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TABLY_SERVER_PORT", "7777");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("tably.toml");
            fs::write(
                &path,
                r#"
[server]
port = 9000

[logging]
level = "warn"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.server.port == 7777, "env port should win over the file")?;
            ensure(config.logging.level == "debug", "explicit override should win over the file")
        })();

        clear_vars(&["TABLY_SERVER_PORT"]);
        result
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TABLY_LOG_LEVEL", "warn");
        env::set_var("TABLY_LOG_FORMAT", "pretty");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "log level should come from the alias")?;
            ensure(
                matches!(config.logging.format, LogFormat::Pretty),
                "log format should come from the alias",
            )
        })();

        clear_vars(&["TABLY_LOG_LEVEL", "TABLY_LOG_FORMAT"]);
        result
    }

    #[test]
    fn invalid_port_env_is_rejected() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TABLY_SERVER_PORT", "banana");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => return Err("expected load to fail on a bad port".to_string()),
                Err(error) => error,
            };
            ensure(
                matches!(
                    error,
                    ConfigError::InvalidEnvOverride { ref key, .. } if key == "TABLY_SERVER_PORT"
                ),
                "error should name the offending variable",
            )
        })();

        clear_vars(&["TABLY_SERVER_PORT"]);
        result
    }

    #[test]
    fn unsupported_enum_values_are_rejected() {
        let error = "carrier-pigeon".parse::<Transport>().expect_err("bad transport");
        assert!(error.to_string().contains("expected stdio|streamable-http"));

        let error = "opentable".parse::<ProviderBackend>().expect_err("bad backend");
        assert!(error.to_string().contains("expected mock"));

        let error = "yaml".parse::<LogFormat>().expect_err("bad format");
        assert!(error.to_string().contains("expected compact|pretty|json"));
    }

    #[test]
    fn validation_rejects_port_zero_and_blank_host() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = AppConfig::default();
        config.server.host = "   ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let error = AppConfig::load(LoadOptions {
            config_path: Some("definitely-missing-tably.toml".into()),
            require_file: true,
            ..LoadOptions::default()
        })
        .expect_err("missing required file");

        assert!(matches!(error, ConfigError::MissingConfigFile(_)));
    }
}
