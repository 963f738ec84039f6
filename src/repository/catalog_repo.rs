// ==========================================
// 施工材料台账系统 - 材料目录仓储
// ==========================================
// 职责: 管理 material_catalog 表（全局单行目录）
// 红线: Repository 不含业务逻辑，只负责数据访问
// 说明: 目录固定使用单例主键 GLOBAL_CATALOG_ID，
//       名称/单位两个数组以 JSON 文本落库
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::material::MaterialCatalog;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

pub use crate::domain::material::GLOBAL_CATALOG_ID;

// ==========================================
// MaterialCatalogRepository - 材料目录仓储
// ==========================================
pub struct MaterialCatalogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MaterialCatalogRepository {
    /// 创建新的 MaterialCatalogRepository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 返回
    /// - Result<Self, RepositoryError>
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询全局目录
    ///
    /// # 返回
    /// - Ok(Some(MaterialCatalog)): 目录已存在
    /// - Ok(None): 目录尚未创建
    /// - Err: 数据库错误
    pub fn find_global(&self) -> RepositoryResult<Option<MaterialCatalog>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT catalog_id, material_names, material_units, created_at, updated_at
            FROM material_catalog
            WHERE catalog_id = ?1
            "#,
        )?;

        let result = stmt.query_row(params![GLOBAL_CATALOG_ID], |row| self.map_row(row));

        match result {
            Ok(catalog) => Ok(Some(catalog)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 插入全局目录（仅首次注册时调用一次）
    pub fn insert_global(&self, catalog: &MaterialCatalog) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO material_catalog (
                catalog_id, material_names, material_units, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                catalog.catalog_id,
                Self::to_json(&catalog.material_names)?,
                Self::to_json(&catalog.material_units)?,
                catalog.created_at.to_rfc3339(),
                catalog.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// 覆盖更新全局目录的名称/单位数组
    pub fn update_global(&self, catalog: &MaterialCatalog) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE material_catalog
            SET material_names = ?1, material_units = ?2, updated_at = ?3
            WHERE catalog_id = ?4
            "#,
            params![
                Self::to_json(&catalog.material_names)?,
                Self::to_json(&catalog.material_units)?,
                catalog.updated_at.to_rfc3339(),
                catalog.catalog_id,
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "MaterialCatalog".to_string(),
                id: catalog.catalog_id.clone(),
            });
        }
        Ok(())
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 将数据库行映射为 MaterialCatalog 实体
    fn map_row(&self, row: &Row) -> rusqlite::Result<MaterialCatalog> {
        let catalog_id: String = row.get(0)?;
        let names_json: String = row.get(1)?;
        let units_json: String = row.get(2)?;

        // 解析 JSON 数组字段
        let material_names: Vec<String> = serde_json::from_str(&names_json).unwrap_or_default();
        let material_units: Vec<String> = serde_json::from_str(&units_json).unwrap_or_default();

        Ok(MaterialCatalog {
            catalog_id,
            material_names,
            material_units,
            created_at: row
                .get::<_, String>(3)?
                .parse::<chrono::DateTime<chrono::Utc>>()
                .unwrap_or_else(|_| chrono::Utc::now()),
            updated_at: row
                .get::<_, String>(4)?
                .parse::<chrono::DateTime<chrono::Utc>>()
                .unwrap_or_else(|_| chrono::Utc::now()),
        })
    }

    fn to_json(values: &[String]) -> RepositoryResult<String> {
        serde_json::to_string(values)
            .map_err(|e| RepositoryError::InternalError(format!("序列化目录数组失败: {}", e)))
    }
}
