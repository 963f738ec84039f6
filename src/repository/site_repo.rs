// ==========================================
// 施工材料台账系统 - 工地仓储
// ==========================================
// 职责: 管理 site 表的 CRUD 操作
// 红线: Repository 不含业务逻辑，只负责数据访问
// 说明: site_material 与 material_refs 两个数组以 JSON 文本落库，
//       列表查询按 rowid 升序即入库顺序返回
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::site::Site;
use crate::domain::types::SiteType;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// SiteRepository - 工地仓储
// ==========================================
pub struct SiteRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SiteRepository {
    /// 创建新的 SiteRepository 实例
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

    /// 插入工地记录
    pub fn insert(&self, site: &Site) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO site (
                site_id, owner_name, location, site_type, contact_number,
                date_of_creation, site_material, material_refs, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                site.site_id,
                site.owner_name,
                site.location,
                site.site_type.as_str(),
                site.contact_number,
                site.date_of_creation.to_string(),
                Self::to_json(&site.site_material)?,
                Self::to_json(&site.material_refs)?,
                site.created_at.to_rfc3339(),
                site.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// 按 site_id 查询工地
    ///
    /// # 返回
    /// - Ok(Some(Site)): 找到记录
    /// - Ok(None): 未找到记录
    /// - Err: 数据库错误
    pub fn find_by_id(&self, site_id: &str) -> RepositoryResult<Option<Site>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT site_id, owner_name, location, site_type, contact_number,
                   date_of_creation, site_material, material_refs, created_at, updated_at
            FROM site
            WHERE site_id = ?1
            "#,
        )?;

        let result = stmt.query_row(params![site_id], |row| self.map_row(row));

        match result {
            Ok(site) => Ok(Some(site)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 查询全部工地（按入库顺序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Site>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT site_id, owner_name, location, site_type, contact_number,
                   date_of_creation, site_material, material_refs, created_at, updated_at
            FROM site
            ORDER BY rowid
            "#,
        )?;

        let sites = stmt
            .query_map([], |row| self.map_row(row))?
            .collect::<SqliteResult<Vec<Site>>>()?;

        Ok(sites)
    }

    /// 覆盖更新工地的两个材料数组（site_material 与 material_refs）
    ///
    /// # 说明
    /// - 其余字段不动，同时刷新 updated_at
    pub fn update_material_lists(&self, site: &Site) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE site
            SET site_material = ?1, material_refs = ?2, updated_at = ?3
            WHERE site_id = ?4
            "#,
            params![
                Self::to_json(&site.site_material)?,
                Self::to_json(&site.material_refs)?,
                site.updated_at.to_rfc3339(),
                site.site_id,
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Site".to_string(),
                id: site.site_id.clone(),
            });
        }
        Ok(())
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 将数据库行映射为 Site 实体
    fn map_row(&self, row: &Row) -> rusqlite::Result<Site> {
        let site_id: String = row.get(0)?;
        let owner_name: String = row.get(1)?;
        let location: String = row.get(2)?;
        let site_type_str: String = row.get(3)?;
        let contact_number: String = row.get(4)?;
        let date_str: String = row.get(5)?;
        let site_material_json: String = row.get(6)?;
        let material_refs_json: String = row.get(7)?;

        // 解析工地类型
        let site_type = SiteType::parse(&site_type_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                rusqlite::types::Type::Text,
                format!("无效的工地类型: {}", site_type_str).into(),
            )
        })?;

        // 解析开工日期
        let date_of_creation = chrono::NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    5,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;

        // 解析 JSON 数组字段
        let site_material: Vec<String> =
            serde_json::from_str(&site_material_json).unwrap_or_default();
        let material_refs: Vec<String> =
            serde_json::from_str(&material_refs_json).unwrap_or_default();

        Ok(Site {
            site_id,
            owner_name,
            location,
            site_type,
            contact_number,
            date_of_creation,
            site_material,
            material_refs,
            created_at: row
                .get::<_, String>(8)?
                .parse::<chrono::DateTime<chrono::Utc>>()
                .unwrap_or_else(|_| chrono::Utc::now()),
            updated_at: row
                .get::<_, String>(9)?
                .parse::<chrono::DateTime<chrono::Utc>>()
                .unwrap_or_else(|_| chrono::Utc::now()),
        })
    }

    fn to_json(values: &[String]) -> RepositoryResult<String> {
        serde_json::to_string(values)
            .map_err(|e| RepositoryError::InternalError(format!("序列化工地数组失败: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::site::NewSite;

    fn setup_test_repo() -> SiteRepository {
        let repo = SiteRepository::new(":memory:").expect("Failed to create test repository");

        let conn = repo.conn.lock().expect("Failed to lock connection");
        crate::db::init_schema(&conn).expect("Failed to init schema");
        drop(conn);

        repo
    }

    fn make_site(owner_name: &str) -> Site {
        Site::new(NewSite {
            owner_name: owner_name.to_string(),
            location: "Pune".to_string(),
            site_type: SiteType::Solo,
            contact_number: "9876543210".to_string(),
            date_of_creation: chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        })
    }

    #[test]
    fn test_insert_and_find_by_id() {
        let repo = setup_test_repo();
        let site = make_site("Ramesh");

        repo.insert(&site).expect("Failed to insert");

        let found = repo
            .find_by_id(&site.site_id)
            .expect("Failed to query")
            .expect("Site not found");
        assert_eq!(found.site_id, site.site_id);
        assert_eq!(found.owner_name, "Ramesh");
        assert_eq!(found.site_type, SiteType::Solo);
        assert_eq!(found.date_of_creation.to_string(), "2024-03-15");
        assert!(found.site_material.is_empty());
        assert!(found.material_refs.is_empty());
    }

    #[test]
    fn test_find_by_id_未找到() {
        let repo = setup_test_repo();
        let found = repo.find_by_id("no-such-id").expect("Failed to query");
        assert!(found.is_none());
    }

    #[test]
    fn test_list_all_按入库顺序() {
        let repo = setup_test_repo();
        let first = make_site("Ramesh");
        let second = make_site("Suresh");
        let third = make_site("Mahesh");

        repo.insert(&first).expect("Failed to insert first");
        repo.insert(&second).expect("Failed to insert second");
        repo.insert(&third).expect("Failed to insert third");

        let sites = repo.list_all().expect("Failed to list");
        assert_eq!(sites.len(), 3);
        assert_eq!(sites[0].owner_name, "Ramesh");
        assert_eq!(sites[1].owner_name, "Suresh");
        assert_eq!(sites[2].owner_name, "Mahesh");
    }

    #[test]
    fn test_update_material_lists() {
        let repo = setup_test_repo();
        let mut site = make_site("Ramesh");
        repo.insert(&site).expect("Failed to insert");

        site.site_material.push("Cement".to_string());
        site.material_refs.push("txn-001".to_string());
        site.updated_at = chrono::Utc::now();
        repo.update_material_lists(&site).expect("Failed to update");

        let found = repo
            .find_by_id(&site.site_id)
            .expect("Failed to query")
            .expect("Site not found");
        assert_eq!(found.site_material, vec!["Cement"]);
        assert_eq!(found.material_refs, vec!["txn-001"]);
    }

    #[test]
    fn test_update_material_lists_工地不存在() {
        let repo = setup_test_repo();
        let site = make_site("Ramesh");

        let result = repo.update_material_lists(&site);
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }
}
