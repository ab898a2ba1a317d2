//! Configuration loading
//!
//! [`AppConfig`] is built once at startup, either from environment variables
//! ([`AppConfig::from_env`]) or from a YAML file
//! ([`AppConfig::from_yaml_file`]), and handed to the server builder. Nothing
//! reads the environment after that.
//!
//! | Variable          | Default               |
//! |-------------------|-----------------------|
//! | `HOST`            | `0.0.0.0`             |
//! | `PORT`            | `3000`                |
//! | `ORDERS_FILE`     | `orders.txt`          |
//! | `STATIC_DIR`      | `public`              |
//! | `SMTP_HOST`       | `smtp.gmail.com`      |
//! | `SMTP_PORT`       | `587`                 |
//! | `SMTP_USER`       | (notifications off)   |
//! | `SMTP_PASS`       | (notifications off)   |
//! | `EMAIL_TO`        | value of `SMTP_USER`  |
//! | `EMAIL_FROM_NAME` | `Fish Parque Orders`  |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_ORDERS_FILE: &str = "orders.txt";
const DEFAULT_STATIC_DIR: &str = "public";
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_SENDER_NAME: &str = "Fish Parque Orders";
const DEFAULT_SEND_TIMEOUT_SECS: u64 = 15;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors raised while building the configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,
}

/// Listening address and static assets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding `index.html` and the form's script and styles
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl ServerConfig {
    /// `host:port`, ready for `TcpListener::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where orders are appended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_orders_file")]
    pub orders_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            orders_file: default_orders_file(),
        }
    }
}

/// Whether new orders are emailed to the merchant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationConfig {
    /// No credentials: orders are only written to the log
    #[default]
    Disabled,

    /// Send through an SMTP relay
    Smtp(SmtpConfig),
}

impl NotificationConfig {
    pub fn is_enabled(&self) -> bool {
        matches!(self, NotificationConfig::Smtp(_))
    }
}

/// SMTP relay settings
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub host: String,

    #[serde(default = "default_smtp_port")]
    pub port: u16,

    pub username: String,

    pub password: String,

    /// Destination mailbox; the SMTP username when absent
    #[serde(default)]
    pub recipient: Option<String>,

    #[serde(default = "default_sender_name")]
    pub sender_name: String,

    /// Upper bound on a whole send, connection included
    #[serde(default = "default_send_timeout_secs")]
    pub send_timeout_secs: u64,

    /// Socket-level timeout handed to the SMTP transport
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl SmtpConfig {
    /// Settings for `username`/`password` with every other field defaulted
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: username.into(),
            password: password.into(),
            recipient: None,
            sender_name: default_sender_name(),
            send_timeout_secs: default_send_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }

    pub fn recipient(&self) -> &str {
        self.recipient.as_deref().unwrap_or(&self.username)
    }

    pub fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.send_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("recipient", &self.recipient())
            .field("sender_name", &self.sender_name)
            .field("send_timeout_secs", &self.send_timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Empty values count as unset. Notifications are enabled only when both
    /// `SMTP_USER` and `SMTP_PASS` are present.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let server = ServerConfig {
            host: get("HOST").unwrap_or_else(default_host),
            port: parse_or(get("PORT"), "PORT", DEFAULT_PORT)?,
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_static_dir),
        };

        let storage = StorageConfig {
            orders_file: get("ORDERS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(default_orders_file),
        };

        let notifications = match (get("SMTP_USER"), get("SMTP_PASS")) {
            (Some(username), Some(password)) => {
                let mut smtp = SmtpConfig::new(username, password);
                if let Some(host) = get("SMTP_HOST") {
                    smtp.host = host;
                }
                smtp.port = parse_or(get("SMTP_PORT"), "SMTP_PORT", DEFAULT_SMTP_PORT)?;
                smtp.recipient = get("EMAIL_TO");
                if let Some(name) = get("EMAIL_FROM_NAME") {
                    smtp.sender_name = name;
                }
                NotificationConfig::Smtp(smtp)
            }
            _ => NotificationConfig::Disabled,
        };

        Ok(Self {
            server,
            storage,
            notifications,
        })
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

fn parse_or<T: FromStr>(value: Option<String>, key: &str, default: T) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
            }),
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_static_dir() -> PathBuf {
    PathBuf::from(DEFAULT_STATIC_DIR)
}

fn default_orders_file() -> PathBuf {
    PathBuf::from(DEFAULT_ORDERS_FILE)
}

fn default_smtp_host() -> String {
    DEFAULT_SMTP_HOST.to_string()
}

fn default_smtp_port() -> u16 {
    DEFAULT_SMTP_PORT
}

fn default_sender_name() -> String {
    DEFAULT_SENDER_NAME.to_string()
}

fn default_send_timeout_secs() -> u64 {
    DEFAULT_SEND_TIMEOUT_SECS
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}
