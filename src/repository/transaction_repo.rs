// ==========================================
// 施工材料台账系统 - 材料流水仓储
// ==========================================
// 职责: 管理 site_material_txn 表（只追加的事实表）
// 红线: Repository 不含业务逻辑，只负责数据访问
// 说明: 流水不提供更新/删除，按 rowid 升序即写入顺序返回
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::material::MaterialTransaction;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// MaterialTransactionRepository - 材料流水仓储
// ==========================================
pub struct MaterialTransactionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MaterialTransactionRepository {
    /// 创建新的 MaterialTransactionRepository 实例
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

    /// 追加一条材料流水
    ///
    /// # 说明
    /// - site_id 受外键约束，引用不存在的工地会返回 ForeignKeyViolation
    pub fn insert(&self, txn: &MaterialTransaction) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO site_material_txn (
                txn_id, site_id, material_name, received_quantity, unit,
                rate_of_material, total_money_amount,
                total_required_money_amount, total_required_material_amount,
                transaction_date, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
            params![
                txn.txn_id,
                txn.site_id,
                txn.material_name,
                txn.received_quantity,
                txn.unit,
                txn.rate_of_material,
                txn.total_money_amount,
                txn.total_required_money_amount,
                txn.total_required_material_amount,
                txn.transaction_date.to_rfc3339(),
                txn.created_at.to_rfc3339(),
                txn.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// 查询指定工地的全部流水（按写入顺序）
    pub fn find_by_site(&self, site_id: &str) -> RepositoryResult<Vec<MaterialTransaction>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT txn_id, site_id, material_name, received_quantity, unit,
                   rate_of_material, total_money_amount,
                   total_required_money_amount, total_required_material_amount,
                   transaction_date, created_at, updated_at
            FROM site_material_txn
            WHERE site_id = ?1
            ORDER BY rowid
            "#,
        )?;

        let txns = stmt
            .query_map(params![site_id], |row| self.map_row(row))?
            .collect::<SqliteResult<Vec<MaterialTransaction>>>()?;

        Ok(txns)
    }

    /// 查询指定工地的全部流水 ID（按写入顺序，用于重建反向索引）
    pub fn list_ids_by_site(&self, site_id: &str) -> RepositoryResult<Vec<String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT txn_id FROM site_material_txn WHERE site_id = ?1 ORDER BY rowid",
        )?;

        let ids = stmt
            .query_map(params![site_id], |row| row.get::<_, String>(0))?
            .collect::<SqliteResult<Vec<String>>>()?;

        Ok(ids)
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 将数据库行映射为 MaterialTransaction 实体
    fn map_row(&self, row: &Row) -> rusqlite::Result<MaterialTransaction> {
        Ok(MaterialTransaction {
            txn_id: row.get(0)?,
            site_id: row.get(1)?,
            material_name: row.get(2)?,
            received_quantity: row.get(3)?,
            unit: row.get(4)?,
            rate_of_material: row.get(5)?,
            total_money_amount: row.get(6)?,
            total_required_money_amount: row.get(7)?,
            total_required_material_amount: row.get(8)?,
            transaction_date: row
                .get::<_, String>(9)?
                .parse::<chrono::DateTime<chrono::Utc>>()
                .unwrap_or_else(|_| chrono::Utc::now()),
            created_at: row
                .get::<_, String>(10)?
                .parse::<chrono::DateTime<chrono::Utc>>()
                .unwrap_or_else(|_| chrono::Utc::now()),
            updated_at: row
                .get::<_, String>(11)?
                .parse::<chrono::DateTime<chrono::Utc>>()
                .unwrap_or_else(|_| chrono::Utc::now()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::material::NewMaterialTransaction;

    fn setup_test_repo() -> MaterialTransactionRepository {
        let repo = MaterialTransactionRepository::new(":memory:")
            .expect("Failed to create test repository");

        // 建表并插入外键依赖的工地记录
        let conn = repo.conn.lock().expect("Failed to lock connection");
        crate::db::init_schema(&conn).expect("Failed to init schema");
        conn.execute_batch(
            r#"
            INSERT INTO site (site_id, owner_name, location, site_type, contact_number,
                              date_of_creation, created_at, updated_at)
            VALUES ('S001', 'Ramesh', 'Pune', 'solo', '9876543210',
                    '2024-03-15', '2024-03-15T00:00:00+00:00', '2024-03-15T00:00:00+00:00');
            "#,
        )
        .expect("Failed to insert test site");
        drop(conn);

        repo
    }

    fn make_txn(site_id: &str, material_name: &str, qty: f64, rate: f64) -> MaterialTransaction {
        MaterialTransaction::new(
            NewMaterialTransaction {
                site_id: site_id.to_string(),
                material_name: material_name.to_string(),
                received_quantity: qty,
                unit: "Bags".to_string(),
                rate_of_material: rate,
                total_required_money_amount: 0.0,
                total_required_material_amount: 0.0,
            },
            qty * rate,
        )
    }

    #[test]
    fn test_insert_and_find_by_site() {
        let repo = setup_test_repo();
        let txn = make_txn("S001", "Cement", 10.0, 50.0);

        repo.insert(&txn).expect("Failed to insert");

        let txns = repo.find_by_site("S001").expect("Failed to query");
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].txn_id, txn.txn_id);
        assert_eq!(txns[0].material_name, "Cement");
        assert_eq!(txns[0].received_quantity, 10.0);
        assert_eq!(txns[0].total_money_amount, 500.0);
    }

    #[test]
    fn test_insert_外键约束() {
        let repo = setup_test_repo();
        let txn = make_txn("no-such-site", "Cement", 10.0, 50.0);

        let result = repo.insert(&txn);
        assert!(matches!(
            result,
            Err(RepositoryError::ForeignKeyViolation(_))
        ));
    }

    #[test]
    fn test_find_by_site_按写入顺序() {
        let repo = setup_test_repo();
        repo.insert(&make_txn("S001", "Cement", 10.0, 50.0))
            .expect("Failed to insert first");
        repo.insert(&make_txn("S001", "Sand", 5.0, 20.0))
            .expect("Failed to insert second");
        repo.insert(&make_txn("S001", "Cement", 2.0, 55.0))
            .expect("Failed to insert third");

        let txns = repo.find_by_site("S001").expect("Failed to query");
        assert_eq!(txns.len(), 3);
        assert_eq!(txns[0].material_name, "Cement");
        assert_eq!(txns[1].material_name, "Sand");
        assert_eq!(txns[2].material_name, "Cement");
    }

    #[test]
    fn test_find_by_site_无流水() {
        let repo = setup_test_repo();
        let txns = repo.find_by_site("S001").expect("Failed to query");
        assert!(txns.is_empty());
    }

    #[test]
    fn test_list_ids_by_site() {
        let repo = setup_test_repo();
        let first = make_txn("S001", "Cement", 10.0, 50.0);
        let second = make_txn("S001", "Sand", 5.0, 20.0);
        repo.insert(&first).expect("Failed to insert first");
        repo.insert(&second).expect("Failed to insert second");

        let ids = repo.list_ids_by_site("S001").expect("Failed to query");
        assert_eq!(ids, vec![first.txn_id, second.txn_id]);
    }
}
