use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be a number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("BIND_ADDR is not a socket address: {0:?}")]
    InvalidBindAddr(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Empty when unset; the completion call reports it.
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub temperature: f32,
    pub request_timeout: Option<Duration>,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let openai_api_key = lookup("OPENAI_API_KEY").unwrap_or_default();
        let openai_base_url = lookup("OPENAI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let openai_model = lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let temperature = match lookup("OPENAI_TEMPERATURE") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidNumber {
                name: "OPENAI_TEMPERATURE",
                value,
            })?,
            None => DEFAULT_TEMPERATURE,
        };

        let request_timeout = match lookup("OPENAI_TIMEOUT_SECS") {
            Some(value) => Some(Duration::from_secs(value.parse().map_err(|_| {
                ConfigError::InvalidNumber {
                    name: "OPENAI_TIMEOUT_SECS",
                    value,
                }
            })?)),
            None => None,
        };

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_addr))?;

        Ok(Self {
            openai_api_key,
            openai_base_url,
            openai_model,
            temperature,
            request_timeout,
            bind_addr,
        })
    }
}
