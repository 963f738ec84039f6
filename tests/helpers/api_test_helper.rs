// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 提供API层集成测试的通用辅助函数
// ==========================================

#[path = "../test_helpers.rs"]
mod test_helpers;

use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

use construction_ledger::api::{ApiError, CatalogApi, LedgerApi, SiteApi};
use construction_ledger::db::open_sqlite_connection;
use construction_ledger::repository::{
    MaterialCatalogRepository, MaterialTransactionRepository, SiteRepository,
};

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
///
/// 包含所有API实例和必要的依赖
pub struct ApiTestEnv {
    pub db_path: String,
    pub catalog_api: Arc<CatalogApi>,
    pub site_api: Arc<SiteApi>,
    pub ledger_api: Arc<LedgerApi>,

    // Repository层（用于测试数据准备与落库断言）
    pub catalog_repo: Arc<MaterialCatalogRepository>,
    pub site_repo: Arc<SiteRepository>,
    pub transaction_repo: Arc<MaterialTransactionRepository>,

    // 临时文件（确保生命周期）
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    /// 创建新的API测试环境
    ///
    /// # 说明
    /// - 使用临时数据库文件
    /// - 所有Repository共享同一个连接
    pub fn new() -> Result<Self, String> {
        let (temp_file, db_path) = test_helpers::create_test_db()
            .map_err(|e| format!("创建测试数据库失败: {}", e))?;

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        let catalog_repo = Arc::new(MaterialCatalogRepository::from_connection(conn.clone()));
        let site_repo = Arc::new(SiteRepository::from_connection(conn.clone()));
        let transaction_repo = Arc::new(MaterialTransactionRepository::from_connection(conn));

        let catalog_api = Arc::new(CatalogApi::new(catalog_repo.clone()));
        let site_api = Arc::new(SiteApi::new(site_repo.clone()));
        let ledger_api = Arc::new(LedgerApi::new(site_repo.clone(), transaction_repo.clone()));

        Ok(Self {
            db_path,
            catalog_api,
            site_api,
            ledger_api,
            catalog_repo,
            site_repo,
            transaction_repo,
            _temp_file: temp_file,
        })
    }

    /// 统计流水表行数（用于验证"工地不存在时不落库"）
    pub fn count_transactions(&self) -> usize {
        let conn = open_sqlite_connection(&self.db_path).expect("无法打开数据库");
        let c: i64 = conn
            .query_row("SELECT COUNT(*) FROM site_material_txn", [], |row| row.get(0))
            .expect("查询流水行数失败");
        c as usize
    }
}

// ==========================================
// 错误断言辅助函数
// ==========================================

/// 验证是否为无效输入错误，并校验文案
pub fn assert_invalid_input(result: Result<impl std::fmt::Debug, ApiError>, expected_msg: &str) {
    match result {
        Err(ApiError::InvalidInput(msg)) => {
            assert_eq!(msg, expected_msg, "错误文案不一致");
        }
        Ok(val) => panic!("预期InvalidInput错误，但操作成功: {:?}", val),
        Err(e) => panic!("预期InvalidInput错误，但得到: {:?}", e),
    }
}

/// 验证是否为未找到错误，并校验文案
pub fn assert_not_found(result: Result<impl std::fmt::Debug, ApiError>, expected_msg: &str) {
    match result {
        Err(ApiError::NotFound(msg)) => {
            assert_eq!(msg, expected_msg, "错误文案不一致");
        }
        Ok(val) => panic!("预期NotFound错误，但操作成功: {:?}", val),
        Err(e) => panic!("预期NotFound错误，但得到: {:?}", e),
    }
}

/// 验证是否为校验错误，并校验文案
pub fn assert_validation_error(result: Result<impl std::fmt::Debug, ApiError>, expected_msg: &str) {
    match result {
        Err(ApiError::ValidationError(msg)) => {
            assert_eq!(msg, expected_msg, "错误文案不一致");
        }
        Ok(val) => panic!("预期ValidationError错误，但操作成功: {:?}", val),
        Err(e) => panic!("预期ValidationError错误，但得到: {:?}", e),
    }
}

/// 验证是否为业务冲突错误，并校验文案
pub fn assert_conflict(result: Result<impl std::fmt::Debug, ApiError>, expected_msg: &str) {
    match result {
        Err(ApiError::Conflict(msg)) => {
            assert_eq!(msg, expected_msg, "错误文案不一致");
        }
        Ok(val) => panic!("预期Conflict错误，但操作成功: {:?}", val),
        Err(e) => panic!("预期Conflict错误，但得到: {:?}", e),
    }
}
