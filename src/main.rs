// ==========================================
// 施工材料台账系统 - HTTP 服务主入口
// ==========================================
// 技术栈: Axum + Rust + SQLite
// 系统定位: 工地材料登记与台账汇总服务
// ==========================================

use std::sync::Arc;

use construction_ledger::app::{create_router, get_default_db_path, AppState};

#[tokio::main]
async fn main() {
    // 初始化日志系统
    construction_ledger::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", construction_ledger::APP_NAME);
    tracing::info!("系统版本: {}", construction_ledger::VERSION);
    tracing::info!("==================================================");

    // 获取数据库路径
    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    // 创建AppState
    tracing::info!("正在初始化AppState...");
    let app_state = AppState::new(db_path)
        .expect("无法初始化AppState");

    tracing::info!("AppState初始化成功");

    let app = create_router(Arc::new(app_state));

    // 监听端口（默认3000，可用PORT覆盖）
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .expect("无法绑定监听端口");

    tracing::info!("HTTP服务已启动: http://0.0.0.0:{}", port);

    axum::serve(listener, app)
        .await
        .expect("HTTP服务运行失败");
}
