//! Gateway settings and validation.
//!
//! Settings are read from environment variables once at startup and are
//! immutable afterwards.

use std::env;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default listen address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Chat model used when the client asks for a foreign (e.g. `gpt-*`) model.
pub const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-3-7-sonnet-20250219-v1:0";

/// Embedding model used when the client asks for a foreign embedding model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "cohere.embed-multilingual-v3";

/// Region assumed when neither the environment nor the SDK config has one.
pub const FALLBACK_REGION: &str = "us-east-1";

/// Runtime configuration of the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewaySettings {
    pub host: String,
    pub port: u16,
    pub default_model_id: String,
    pub default_embedding_model: String,
    /// Region from `AWS_REGION`; the bootstrap fills it from the SDK config
    /// when unset.
    pub region: Option<String>,
    /// Static API key; takes precedence over `api_key_secret_arn`.
    pub api_key: Option<String>,
    pub api_key_secret_arn: Option<String>,
    pub auth_disabled: bool,
    /// Verbose diagnostics (request and response bodies at debug level).
    pub debug: bool,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            default_model_id: DEFAULT_MODEL_ID.to_string(),
            default_embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            region: None,
            api_key: None,
            api_key_secret_arn: None,
            auth_disabled: false,
            debug: false,
        }
    }
}

impl GatewaySettings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| SettingsError::InvalidPort(raw))?,
            None => defaults.port,
        };

        let settings = Self {
            host: non_empty("HOST").unwrap_or(defaults.host),
            port,
            default_model_id: non_empty("DEFAULT_MODEL_ID").unwrap_or(defaults.default_model_id),
            default_embedding_model: non_empty("DEFAULT_EMBEDDING_MODEL")
                .unwrap_or(defaults.default_embedding_model),
            region: non_empty("AWS_REGION").or_else(|| non_empty("AWS_DEFAULT_REGION")),
            api_key: non_empty("API_KEY"),
            api_key_secret_arn: non_empty("API_KEY_SECRET_ARN"),
            auth_disabled: non_empty("IS_TEST").is_some(),
            debug: non_empty("DEBUG").is_some_and(|v| v == "true"),
        };

        validate_settings(&settings)?;
        Ok(settings)
    }

    /// Region used for inference-profile prefixes: the configured one,
    /// else the region the AWS SDK resolved, else [`FALLBACK_REGION`].
    pub fn effective_region(&self, sdk_region: Option<&str>) -> String {
        self.region
            .as_deref()
            .or(sdk_region)
            .unwrap_or(FALLBACK_REGION)
            .to_string()
    }

    /// Socket address string to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("PORT must be a number between 1 and 65535, got {0:?}")]
    InvalidPort(String),

    #[error("{0} cannot be empty")]
    EmptyValue(&'static str),

    #[error("Authentication is enabled but neither API_KEY nor API_KEY_SECRET_ARN is set")]
    MissingCredentialSource,
}

/// Validate gateway settings.
pub fn validate_settings(settings: &GatewaySettings) -> Result<(), SettingsError> {
    if settings.port == 0 {
        return Err(SettingsError::InvalidPort("0".to_string()));
    }
    if settings.default_model_id.trim().is_empty() {
        return Err(SettingsError::EmptyValue("DEFAULT_MODEL_ID"));
    }
    if settings.default_embedding_model.trim().is_empty() {
        return Err(SettingsError::EmptyValue("DEFAULT_EMBEDDING_MODEL"));
    }
    if !settings.auth_disabled
        && settings.api_key.is_none()
        && settings.api_key_secret_arn.is_none()
    {
        return Err(SettingsError::MissingCredentialSource);
    }
    Ok(())
}
