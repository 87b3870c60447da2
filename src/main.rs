//! 社区物业管理后台主入口

use community_admin::{config::AppConfig, db, handlers::health, middleware::AppState, routes, telemetry};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ===== CLI 参数处理 =====
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" => {
                println!("community-admin {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            other => {
                eprintln!("未知参数: {}", other);
                print_help();
                std::process::exit(1);
            }
        }
    }

    // 按优先级加载：.env.<COMMUNITY_ENV>，否则 .env.local > .env.development > .env
    if let Ok(env_name) = std::env::var("COMMUNITY_ENV") {
        dotenv::from_filename(format!(".env.{}", env_name)).ok();
    } else {
        dotenv::from_filename(".env.local").ok();
        dotenv::from_filename(".env.development").ok();
        dotenv::dotenv().ok();
    }

    health::set_start_time();

    // 1. 加载配置
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    // 2. 初始化日志
    telemetry::init_telemetry(&config);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Community admin starting...");

    // 3. 数据库连接池 + 迁移 + 自检
    let db_pool = db::create_pool(&config.database).await?;
    if config.database.run_migrations {
        db::run_migrations(&db_pool).await?;
    } else {
        tracing::info!("Skipping database migrations");
    }
    db::check_tables(&db_pool).await;
    db::record_pool_metrics(&db_pool);

    // 4. 构建应用状态与路由
    let app_state = Arc::new(AppState::new(config.clone(), db_pool)?);
    let app = routes::create_router(app_state);

    // 5. 启动服务器
    let addr = &config.server.addr;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.graceful_shutdown_timeout_secs))
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// 优雅关闭信号处理
///
/// 收到信号后立即返回，开始排空请求；超过时限仍未结束则强制退出。
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Terminate signal received, starting graceful shutdown");
        },
    }

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(timeout_secs)).await;
        tracing::warn!(timeout_secs, "Graceful shutdown timeout reached, forcing exit");
        std::process::exit(1);
    });
}

/// 打印帮助信息
fn print_help() {
    println!("community-admin {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("用法: community-admin [选项]");
    println!();
    println!("选项:");
    println!("  --version     打印版本信息并退出");
    println!("  --help        打印此帮助信息并退出");
    println!();
    println!("环境变量:");
    println!("  COMMUNITY_DATABASE__URL          PostgreSQL 连接串（必填）");
    println!("  COMMUNITY_SECURITY__JWT_SECRET   令牌签名密钥，至少 32 个字符");
    println!("  COMMUNITY_SERVER__ADDR           监听地址，默认 0.0.0.0:3000");
    println!("  COMMUNITY_ENV                    指定加载的 .env.<名称> 文件");
    println!("  可用选项请参考 .env.example");
}
