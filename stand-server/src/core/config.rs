/// 服务器配置 - 柠檬水摊后端的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖 (启动时先加载 `.env`)：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_PATH | lemonade_stand.db | SQLite 文件 (`:memory:` 可用) |
/// | DB_MAX_CONNECTIONS | 5 | 连接池大小 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | production 时为 true | JSON 日志 |
/// | LOG_DIR | - | 按天滚动的日志目录 |
/// | CONFIRMATION_PREFIX | LS | 确认号前缀 |
/// | CONFIRMATION_MAX_ATTEMPTS | 5 | 确认号冲突重试次数 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | 关闭超时(毫秒) |
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 DATABASE_PATH=/data/stand.db cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// SQLite 数据库路径
    pub database_path: String,
    /// 连接池最大连接数
    pub db_max_connections: u32,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// 确认号前缀 (`LS-<millis>-<RANDOM8>`)
    pub confirmation_prefix: String,
    /// 确认号唯一约束冲突时的最大尝试次数
    pub confirmation_max_attempts: u32,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 关闭超时时间 (毫秒)
    pub shutdown_timeout_ms: u64,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let log_json = env_or("LOG_JSON", environment == "production");

        Self {
            http_port: env_or("HTTP_PORT", 3000),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "lemonade_stand.db".into()),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 5),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json,
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            confirmation_prefix: std::env::var("CONFIRMATION_PREFIX")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| "LS".into()),
            confirmation_max_attempts: env_or("CONFIRMATION_MAX_ATTEMPTS", 5u32).max(1),
            request_timeout_ms: env_or("REQUEST_TIMEOUT_MS", 30000),
            shutdown_timeout_ms: env_or("SHUTDOWN_TIMEOUT_MS", 10000),
            environment,
        }
    }

    /// 测试配置：内存数据库，不读取环境变量
    pub fn for_test() -> Self {
        Self {
            http_port: 0,
            database_path: ":memory:".into(),
            db_max_connections: 1,
            environment: "test".into(),
            log_level: "debug".into(),
            log_json: false,
            log_dir: None,
            confirmation_prefix: "LS".into(),
            confirmation_max_attempts: 5,
            request_timeout_ms: 30000,
            shutdown_timeout_ms: 1000,
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.request_timeout_ms)
    }

    pub fn shutdown_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.shutdown_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_test_uses_memory_db() {
        let config = Config::for_test();
        assert_eq!(config.database_path, ":memory:");
        assert_eq!(config.confirmation_prefix, "LS");
        assert!(!config.is_production());
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        // Not set
        assert_eq!(env_or("STAND_SERVER_TEST_UNSET_VAR", 42u16), 42);
    }

    #[test]
    fn test_timeouts() {
        let mut config = Config::for_test();
        config.request_timeout_ms = 1500;
        assert_eq!(config.request_timeout().as_millis(), 1500);
        assert_eq!(config.shutdown_timeout().as_millis(), 1000);
    }
}
