use stand_server::{Config, Server, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 加载 .env (不存在则忽略)
    let _ = dotenv::dotenv();

    // 2. 加载配置 + 初始化日志
    let config = Config::from_env();
    setup_environment(&config)?;

    if !config.is_production() {
        print_banner();
    }
    tracing::info!(
        environment = %config.environment,
        database = %config.database_path,
        "🍋 Lemonade stand server starting..."
    );

    // 3. 启动 HTTP 服务器 (打开数据库并执行迁移)
    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {:#}", e);
        return Err(e);
    }

    Ok(())
}
