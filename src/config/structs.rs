use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CombError, Result};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 环境变量前缀，例如 `COMB__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "COMB";

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - server: 监听地址、端口、worker 数量
/// - database: 数据库连接与重试
/// - logging: 日志输出
/// - visits: 访问计数策略
/// - tracing: OTLP span 导出（默认关闭）
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub visits: VisitsConfig,
    #[serde(default)]
    pub tracing: TracingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > TOML 文件 > 默认值。文件不存在时不报错。
    pub fn load(path: Option<&str>) -> Result<Self> {
        Self::load_with_env(path, ENV_PREFIX)
    }

    /// Same as [`StaticConfig::load`] with a caller-chosen env prefix
    pub fn load_with_env(path: Option<&str>, env_prefix: &str) -> Result<Self> {
        use config::{Config, Environment, File};

        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(env_prefix)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: StaticConfig = settings.try_deserialize()?;
        config.validate()?;

        if Path::new(path).exists() {
            eprintln!("[INFO] Configuration loaded from: {}", path);
        }

        Ok(config)
    }

    /// 校验取值范围
    pub fn validate(&self) -> Result<()> {
        if self.database.database_url.trim().is_empty() {
            return Err(CombError::configuration("database.database_url is empty"));
        }
        if self.database.pool_size == 0 {
            return Err(CombError::configuration(
                "database.pool_size must be at least 1",
            ));
        }
        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(CombError::configuration(format!(
                "Invalid logging.format '{}'. Valid: text, json",
                self.logging.format
            )));
        }
        if self.tracing.enabled {
            let endpoint = self.tracing.otlp_endpoint.as_str();
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(CombError::configuration(format!(
                    "Invalid tracing.otlp_endpoint '{}'. Expected an http(s) URL",
                    endpoint
                )));
            }
            if self.tracing.service_name.trim().is_empty() {
                return Err(CombError::configuration("tracing.service_name is empty"));
            }
        }
        Ok(())
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

/// 数据库连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    /// 连接 / 获取连接超时（秒）
    #[serde(default = "default_database_timeout")]
    pub timeout: u64,
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "text" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Empty string means stdout
    #[serde(default)]
    pub file: String,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

/// 访问计数配置
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VisitsConfig {
    /// true: `visits = visits + 1` in one statement.
    /// false: read the row, write back `visits + 1` (concurrent reads can lose increments).
    #[serde(default = "default_atomic_increment")]
    pub atomic_increment: bool,
}

/// 分布式追踪配置
///
/// When enabled, request and `db-call` spans are exported over OTLP/gRPC and
/// incoming `traceparent` / `baggage` headers become the parent context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracingConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_otlp_endpoint")]
    pub otlp_endpoint: String,
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_database_url() -> String {
    "sqlite://combs.db?mode=rwc".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_database_timeout() -> u64 {
    30
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    100
}

fn default_retry_max_delay_ms() -> u64 {
    2000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

fn default_atomic_increment() -> bool {
    true
}

fn default_otlp_endpoint() -> String {
    "http://localhost:4317".to_string()
}

fn default_service_name() -> String {
    "combs-of-honey".to_string()
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            timeout: default_database_timeout(),
            retry_count: default_retry_count(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: String::new(),
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

impl Default for VisitsConfig {
    fn default() -> Self {
        Self {
            atomic_increment: default_atomic_increment(),
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            otlp_endpoint: default_otlp_endpoint(),
            service_name: default_service_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = StaticConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.database_url, "sqlite://combs.db?mode=rwc");
        assert_eq!(config.logging.format, "text");
        assert!(config.logging.file.is_empty());
        assert!(config.visits.atomic_increment);
        assert!(!config.tracing.enabled);
        assert_eq!(config.tracing.otlp_endpoint, "http://localhost:4317");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        let config =
            StaticConfig::load_with_env(path.to_str(), "COMB_TEST_MISSING").unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9001\n\n[visits]\natomic_increment = false\n",
        )
        .unwrap();

        let config = StaticConfig::load_with_env(path.to_str(), "COMB_TEST_PARTIAL").unwrap();
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(!config.visits.atomic_increment);
        assert_eq!(config.database.retry_count, 3);
    }

    #[test]
    fn test_invalid_log_format_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nformat = \"xml\"\n").unwrap();

        let err = StaticConfig::load_with_env(path.to_str(), "COMB_TEST_BADFMT").unwrap_err();
        assert!(matches!(err, CombError::Configuration(_)));
    }

    #[test]
    fn test_tracing_section_loaded_and_validated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[tracing]\nenabled = true\notlp_endpoint = \"http://collector:4317\"\n",
        )
        .unwrap();

        let config = StaticConfig::load_with_env(path.to_str(), "COMB_TEST_TRACING").unwrap();
        assert!(config.tracing.enabled);
        assert_eq!(config.tracing.otlp_endpoint, "http://collector:4317");
        assert_eq!(config.tracing.service_name, "combs-of-honey");

        std::fs::write(
            &path,
            "[tracing]\nenabled = true\notlp_endpoint = \"collector:4317\"\n",
        )
        .unwrap();
        let err =
            StaticConfig::load_with_env(path.to_str(), "COMB_TEST_TRACING_BAD").unwrap_err();
        assert!(matches!(err, CombError::Configuration(_)));
    }

    #[test]
    fn test_sample_config_round_trips_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("sample.toml");

        StaticConfig::default().save_to_file(&path).unwrap();
        let loaded = StaticConfig::load_with_env(path.to_str(), "COMB_TEST_SAMPLE").unwrap();
        assert_eq!(loaded.database.pool_size, 10);

        let sample = std::fs::read_to_string(&path).unwrap();
        assert!(sample.contains("[visits]"));
        assert!(sample.contains("atomic_increment = true"));
    }
}
