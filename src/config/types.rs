// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    /// Listen backlog passed to `listen(2)`
    #[serde(default = "default_backlog")]
    pub backlog: i32,
}

#[allow(clippy::missing_const_for_fn)]
fn default_backlog() -> i32 {
    128
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Minimum severity: error, warn, info or debug
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub enable_cors: bool,
    pub max_body_size: u64,
    /// Wrap successful payloads in `{success, data, timestamp}`
    pub envelope: bool,
}

/// Schedule data location
#[derive(Debug, Deserialize, Clone)]
pub struct ScheduleConfig {
    /// Directory holding `schedule_numerator.json` and `schedule_denominator.json`
    pub data_dir: String,
}

/// Routes configuration
#[derive(Debug, Deserialize, Clone)]
pub struct RoutesConfig {
    /// Prefix followed by the parity, e.g. `/api/schedule/numerator`
    #[serde(default = "default_schedule_prefix")]
    pub schedule_prefix: String,
    #[serde(default = "default_groups_path")]
    pub groups_path: String,
    /// Paths serving the endpoint overview page
    #[serde(default = "default_docs_paths")]
    pub docs_paths: Vec<String>,
    /// Health check configuration
    #[serde(default)]
    pub health: HealthConfig,
}

fn default_schedule_prefix() -> String {
    "/api/schedule/".to_string()
}

fn default_groups_path() -> String {
    "/api/groups".to_string()
}

fn default_docs_paths() -> Vec<String> {
    vec!["/".to_string(), "/docs".to_string()]
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            schedule_prefix: default_schedule_prefix(),
            groups_path: default_groups_path(),
            docs_paths: default_docs_paths(),
            health: HealthConfig::default(),
        }
    }
}

/// Health check configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HealthConfig {
    /// Enable health check endpoints
    #[serde(default = "default_health_enabled")]
    pub enabled: bool,
    /// Liveness probe path (default: /healthz)
    #[serde(default = "default_healthz_path")]
    pub liveness_path: String,
    /// Readiness probe path (default: /readyz)
    #[serde(default = "default_readyz_path")]
    pub readiness_path: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_health_enabled() -> bool {
    true
}

fn default_healthz_path() -> String {
    "/healthz".to_string()
}

fn default_readyz_path() -> String {
    "/readyz".to_string()
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: default_health_enabled(),
            liveness_path: default_healthz_path(),
            readiness_path: default_readyz_path(),
        }
    }
}
