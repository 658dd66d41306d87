//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `EBAY_TRADING_EMAIL`: Account email
//! - `EBAY_TRADING_USER_ID`: Seller user id
//! - `EBAY_TRADING_TOKEN`: User token (optional here, required by the
//!   credential)
//! - `EBAY_TRADING_AUTH_TYPE`: `oauth` or `authnauth`
//! - `EBAY_TRADING_EXPIRE`: Token expiry, RFC 3339
//! - `EBAY_TRADING_ENVIRONMENT`: `sandbox` or `production`
//! - `EBAY_TRADING_CLIENT_ID`, `EBAY_TRADING_DEV_ID`, `EBAY_TRADING_CERT_ID`:
//!   Application keys for `authnauth` (optional)
//! - `EBAY_TRADING_HTTP_TIMEOUT_SECS`: Request timeout (optional, default 30)
//! - `EBAY_TRADING_USER_AGENT`: User agent (optional)
//! - `EBAY_TRADING_ENDPOINT`: Endpoint override (optional)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./ebay-trading.json` or `./ebay-trading.toml` (current working
//!    directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names in the parent and grandparent directories
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use ebay_trading_domain::constants::DEFAULT_HTTP_TIMEOUT_SECS;
use ebay_trading_domain::{AppConfig, ClientConfig, CredentialConfig, HttpConfig, Result, TradingError};

const CONFIG_FILE_NAMES: [&str; 4] =
    ["ebay-trading.json", "ebay-trading.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `TradingError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Environment Variables
/// See module documentation for the complete list.
///
/// # Errors
/// Returns `TradingError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<ClientConfig> {
    let email = env_var("EBAY_TRADING_EMAIL")?;
    let user_id = env_var("EBAY_TRADING_USER_ID")?;
    let auth_type = env_var("EBAY_TRADING_AUTH_TYPE")?;
    let environment = env_var("EBAY_TRADING_ENVIRONMENT")?;
    let expire = env_var("EBAY_TRADING_EXPIRE").and_then(|s| parse_expire(&s))?;
    let token = env_opt("EBAY_TRADING_TOKEN");

    let client_id = env_opt("EBAY_TRADING_CLIENT_ID");
    let dev_id = env_opt("EBAY_TRADING_DEV_ID");
    let cert_id = env_opt("EBAY_TRADING_CERT_ID");
    let app_config = if client_id.is_none() && dev_id.is_none() && cert_id.is_none() {
        None
    } else {
        Some(AppConfig {
            client_id: client_id.unwrap_or_default(),
            dev_id: dev_id.unwrap_or_default(),
            cert_id: cert_id.unwrap_or_default(),
        })
    };

    let timeout_secs = match env_opt("EBAY_TRADING_HTTP_TIMEOUT_SECS") {
        Some(value) => value.parse::<u64>().map_err(|e| {
            TradingError::Config(format!("Invalid HTTP timeout '{value}': {e}"))
        })?,
        None => DEFAULT_HTTP_TIMEOUT_SECS,
    };

    Ok(ClientConfig {
        credentials: CredentialConfig {
            email,
            user_id,
            token,
            auth_type,
            expire,
            environment,
            app_config,
        },
        http: HttpConfig { timeout_secs, user_agent: env_opt("EBAY_TRADING_USER_AGENT") },
        endpoint: env_opt("EBAY_TRADING_ENDPOINT"),
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `TradingError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(TradingError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            TradingError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| TradingError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content; format follows the extension.
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| TradingError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| TradingError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(TradingError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its parent and grandparent, then
/// the executable's directory and its parents.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.extend([exe_dir.to_path_buf(), exe_dir.join(".."), exe_dir.join("../..")]);
        }
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

fn parse_expire(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| TradingError::Config(format!("Invalid expire timestamp '{value}': {e}")))
}

/// Get required environment variable
///
/// # Errors
/// Returns `TradingError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        TradingError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Optional environment variable; blank counts as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::TimeZone;
    use once_cell::sync::Lazy;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const VARS: [&str; 12] = [
        "EBAY_TRADING_EMAIL",
        "EBAY_TRADING_USER_ID",
        "EBAY_TRADING_TOKEN",
        "EBAY_TRADING_AUTH_TYPE",
        "EBAY_TRADING_EXPIRE",
        "EBAY_TRADING_ENVIRONMENT",
        "EBAY_TRADING_CLIENT_ID",
        "EBAY_TRADING_DEV_ID",
        "EBAY_TRADING_CERT_ID",
        "EBAY_TRADING_HTTP_TIMEOUT_SECS",
        "EBAY_TRADING_USER_AGENT",
        "EBAY_TRADING_ENDPOINT",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    fn set_required() {
        std::env::set_var("EBAY_TRADING_EMAIL", "seller@example.com");
        std::env::set_var("EBAY_TRADING_USER_ID", "test-seller");
        std::env::set_var("EBAY_TRADING_AUTH_TYPE", "oauth");
        std::env::set_var("EBAY_TRADING_EXPIRE", "2030-01-01T00:00:00Z");
        std::env::set_var("EBAY_TRADING_ENVIRONMENT", "sandbox");
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        set_required();
        std::env::set_var("EBAY_TRADING_TOKEN", "v^1.1#token");
        std::env::set_var("EBAY_TRADING_HTTP_TIMEOUT_SECS", "12");
        std::env::set_var("EBAY_TRADING_USER_AGENT", "seller-tools/1.0");
        std::env::set_var("EBAY_TRADING_ENDPOINT", "http://localhost:8080/ws/api.dll");

        let result = load_from_env();
        clear_env();

        let config = result.expect("config from env");
        assert_eq!(config.credentials.email, "seller@example.com");
        assert_eq!(config.credentials.user_id, "test-seller");
        assert_eq!(config.credentials.token.as_deref(), Some("v^1.1#token"));
        assert_eq!(config.credentials.auth_type, "oauth");
        assert_eq!(config.credentials.expire, Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap());
        assert!(config.credentials.app_config.is_none());
        assert_eq!(config.http.timeout_secs, 12);
        assert_eq!(config.http.user_agent.as_deref(), Some("seller-tools/1.0"));
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:8080/ws/api.dll"));
    }

    #[test]
    fn test_load_from_env_collects_app_keys() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        set_required();
        std::env::set_var("EBAY_TRADING_AUTH_TYPE", "authnauth");
        std::env::set_var("EBAY_TRADING_CLIENT_ID", "app");
        std::env::set_var("EBAY_TRADING_DEV_ID", "dev");

        let result = load_from_env();
        clear_env();

        let app = result.expect("config from env").credentials.app_config.expect("app config");
        assert_eq!(app.client_id, "app");
        assert_eq!(app.dev_id, "dev");
        assert_eq!(app.cert_id, "");
    }

    #[test]
    fn test_load_from_env_missing_var() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        set_required();
        std::env::remove_var("EBAY_TRADING_ENVIRONMENT");

        let result = load_from_env();
        clear_env();

        match result {
            Err(TradingError::Config(msg)) => assert!(msg.contains("EBAY_TRADING_ENVIRONMENT")),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_env_invalid_values() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        for (var, value) in
            [("EBAY_TRADING_EXPIRE", "tomorrow"), ("EBAY_TRADING_HTTP_TIMEOUT_SECS", "soon")]
        {
            clear_env();
            set_required();
            std::env::set_var(var, value);

            let result = load_from_env();
            assert!(matches!(result, Err(TradingError::Config(_))), "{var}={value}");
        }
        clear_env();
    }

    #[test]
    fn test_parse_config_json() {
        let json_content = r#"{
            "credentials": {
                "email": "seller@example.com",
                "userId": "test-seller",
                "token": "abc",
                "authType": "oauth",
                "expire": "2030-01-01T00:00:00Z",
                "environment": "production"
            }
        }"#;

        let config = parse_config(json_content, Path::new("test.json")).expect("valid JSON");
        assert_eq!(config.credentials.environment, "production");
        assert_eq!(config.http, HttpConfig::default());
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn test_parse_config_toml() {
        let toml_content = r#"
endpoint = "http://localhost:8080/ws/api.dll"

[credentials]
userId = "test-seller"
token = "abc"
authType = "authnauth"
expire = "2030-01-01T00:00:00Z"
environment = "sandbox"

[credentials.appConfig]
clientId = "app"
devId = "dev"
certId = "cert"

[http]
timeout_secs = 5
"#;

        let config = parse_config(toml_content, Path::new("test.toml")).expect("valid TOML");
        assert_eq!(config.credentials.email, "");
        assert_eq!(config.credentials.app_config.expect("app config").cert_id, "cert");
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:8080/ws/api.dll"));
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("some content", Path::new("test.yaml"));
        assert!(matches!(result, Err(TradingError::Config(_))));
    }

    #[test]
    fn test_parse_config_missing_credentials() {
        let result = parse_config(r#"{"endpoint": "http://localhost"}"#, Path::new("test.json"));
        assert!(matches!(result, Err(TradingError::Config(_))));
    }
}
