//! Lemonade Stand Server - 柠檬水摊订单后端
//!
//! # 架构概述
//!
//! 管理员维护饮品目录 (饮品 + 规格/价格)，顾客提交由 "饮品-规格" 行组成的订单；
//! 服务端计算总价、签发确认号，并在单个事务中落库。
//!
//! # 模块结构
//!
//! ```text
//! stand-server/src/
//! ├── core/          # 配置、状态、服务器启动
//! ├── db/            # SQLite 连接池、迁移、仓储
//! ├── orders/        # 下单核心：快照、金额、确认号
//! ├── api/           # HTTP 路由和处理器
//! ├── middleware/    # 请求日志
//! └── utils/         # 错误桥接、日志、校验
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod middleware;
pub mod orders;
pub mod utils;

// Re-export 公共类型
pub use api::{build_app, build_router};
pub use self::core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// Initialize logging from the loaded configuration
pub fn setup_environment(config: &Config) -> anyhow::Result<()> {
    init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())
}

pub fn print_banner() {
    println!(
        r#"
    __                                    __
   / /   ___  ____ ___  ____  ____  ____ _/ /__
  / /   / _ \/ __ `__ \/ __ \/ __ \/ __ `/ / _ \
 / /___/  __/ / / / / / /_/ / / / / /_/ / /  __/
/_____/\___/_/ /_/ /_/\____/_/ /_/\__,_/_/\___/
                 stand server
    "#
    );
}
