use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppResult;

/// 服务器状态 - 配置 + 数据库连接池
///
/// 所有 handler 通过 `State<ServerState>` 获取；克隆成本很低
/// (`SqlitePool` 内部是 Arc)。handler 本身无状态。
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        Self { config, pool }
    }

    /// 打开数据库并执行迁移
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = DbService::new(&config.database_path, config.db_max_connections).await?;
        Ok(Self::new(config.clone(), db.pool))
    }
}
