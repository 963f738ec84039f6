// ==========================================
// 施工材料台账系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{CatalogApi, LedgerApi, SiteApi};
use crate::db;
use crate::repository::{
    catalog_repo::MaterialCatalogRepository, site_repo::SiteRepository,
    transaction_repo::MaterialTransactionRepository,
};

/// 应用状态
///
/// 包含所有API实例和共享资源
/// 作为 axum 路由的全局状态注入
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 材料目录API
    pub catalog_api: Arc<CatalogApi>,

    /// 工地API
    pub site_api: Arc<SiteApi>,

    /// 材料流水API
    pub ledger_api: Arc<LedgerApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开共享数据库连接并初始化 schema（幂等）
    /// 2. 初始化所有Repository（共享同一连接）
    /// 3. 创建所有API实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        // 创建数据库连接（共享连接）
        let mut conn =
            db::open_sqlite_connection(&db_path).map_err(|e| format!("无法打开数据库: {}", e))?;
        db::init_schema(&conn).map_err(|e| format!("初始化数据库schema失败: {}", e))?;
        crate::perf::install_sqlite_tracing(&mut conn);

        // schema 版本只提示不迁移
        match db::read_schema_version(&conn) {
            Ok(Some(version)) if version != db::CURRENT_SCHEMA_VERSION => {
                tracing::warn!(
                    "数据库schema版本不匹配: 期望 {}, 实际 {}",
                    db::CURRENT_SCHEMA_VERSION,
                    version
                );
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("读取schema版本失败(将继续启动): {}", e);
            }
        }

        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层（共享同一连接）
        // ==========================================
        let catalog_repo = Arc::new(MaterialCatalogRepository::from_connection(conn.clone()));
        let site_repo = Arc::new(SiteRepository::from_connection(conn.clone()));
        let transaction_repo = Arc::new(MaterialTransactionRepository::from_connection(conn));

        // ==========================================
        // 初始化API层
        // ==========================================
        let catalog_api = Arc::new(CatalogApi::new(catalog_repo));
        let site_api = Arc::new(SiteApi::new(site_repo.clone()));
        let ledger_api = Arc::new(LedgerApi::new(site_repo, transaction_repo));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            catalog_api,
            site_api,
            ledger_api,
        })
    }

    /// 获取数据库路径
    pub fn get_db_path(&self) -> &str {
        &self.db_path
    }
}

// ==========================================
// 默认数据库路径辅助函数
// ==========================================

/// 获取默认数据库路径
///
/// # 返回
/// - 开发环境: 用户数据目录/construction-ledger-dev/construction_ledger.db（首次运行会从项目根目录的 ./construction_ledger.db 复制一份作为初始数据）
/// - 生产环境: 用户数据目录/construction-ledger/construction_ledger.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var("CONSTRUCTION_LEDGER_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    // 先给一个默认回退值，后续如果能拿到 data_dir 再覆盖
    let mut path = PathBuf::from("./construction_ledger.db");

    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录，避免污染生产数据
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("construction-ledger-dev");
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("construction-ledger");
        }

        // 确保目录存在
        std::fs::create_dir_all(&path).ok();
        path = path.join("construction_ledger.db");

        // 开发环境：如果目标 DB 不存在，但项目根目录有初始 DB，则复制一份作为种子数据
        #[cfg(debug_assertions)]
        {
            if !path.exists() {
                let seed = PathBuf::from("./construction_ledger.db");
                if seed.exists() {
                    // 复制失败不阻塞启动，后续会自动创建空库并建表
                    let _ = std::fs::copy(seed, &path);
                }
            }
        }
    }

    path.to_string_lossy().to_string()
}
