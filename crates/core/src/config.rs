use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `OUTREACH__` and optional TOML config files.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_node_id")]
    pub node_id: String,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub sms: SmsConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

/// Content generator (LLM) client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_generator_model")]
    pub model: String,
    #[serde(default = "default_generator_api_key")]
    pub api_key: String,
    #[serde(default = "default_max_length")]
    pub default_max_length: usize,
    #[serde(default = "default_generator_timeout_ms")]
    pub timeout_ms: u64,
}

/// SendGrid email dispatch configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    #[serde(default = "default_from_email")]
    pub from_email: String,
    #[serde(default = "default_from_name")]
    pub from_name: String,
    #[serde(default = "default_sendgrid_api_key")]
    pub api_key: String,
}

/// Twilio SMS dispatch configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SmsConfig {
    #[serde(default = "default_account_sid")]
    pub account_sid: String,
    #[serde(default = "default_auth_token")]
    pub auth_token: String,
    #[serde(default = "default_from_number")]
    pub from_number: String,
}

/// Identity verification configuration. Development tokens are
/// "token:user_id" pairs seeded into the static verifier.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_dev_tokens")]
    pub dev_tokens: Vec<String>,
}

// Default functions
fn default_node_id() -> String {
    "outreach-01".to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8080
}
fn default_metrics_port() -> u16 {
    9091
}
fn default_generator_model() -> String {
    "gpt-4o-mini".to_string()
}
fn default_generator_api_key() -> String {
    "dev-generator-key".to_string()
}
fn default_max_length() -> usize {
    1200
}
fn default_generator_timeout_ms() -> u64 {
    30_000
}
fn default_from_email() -> String {
    "outreach@example.com".to_string()
}
fn default_from_name() -> String {
    "Outreach Express".to_string()
}
fn default_sendgrid_api_key() -> String {
    "dev-sendgrid-key".to_string()
}
fn default_account_sid() -> String {
    "ACdev".to_string()
}
fn default_auth_token() -> String {
    "dev-twilio-token".to_string()
}
fn default_from_number() -> String {
    "+15550100".to_string()
}
fn default_dev_tokens() -> Vec<String> {
    vec!["ox_dev_token:dev-user".to_string()]
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            port: default_metrics_port(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: default_generator_model(),
            api_key: default_generator_api_key(),
            default_max_length: default_max_length(),
            timeout_ms: default_generator_timeout_ms(),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            from_email: default_from_email(),
            from_name: default_from_name(),
            api_key: default_sendgrid_api_key(),
        }
    }
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            account_sid: default_account_sid(),
            auth_token: default_auth_token(),
            from_number: default_from_number(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            dev_tokens: default_dev_tokens(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            node_id: default_node_id(),
            api: ApiConfig::default(),
            metrics: MetricsConfig::default(),
            generator: GeneratorConfig::default(),
            email: EmailConfig::default(),
            sms: SmsConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and optional config file.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("OUTREACH")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
