// ==========================================
// 施工材料台账系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为，避免“部分模块外键开启/部分不开启”
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 建表语句集中在此处，服务启动与测试共用同一份 schema
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
///
/// 说明：
/// - 建表采用 CREATE TABLE IF NOT EXISTS，首次启动自动初始化
/// - 版本号用于提示/告警（不做自动迁移），避免静默在旧库上运行导致隐性错误
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化数据库 schema（幂等）
///
/// 表结构：
/// - material_catalog: 全局材料目录（单行，catalog_id='global'，数组列存 JSON）
/// - site: 工地主数据（site_material/material_refs 为派生索引，存 JSON 数组）
/// - site_material_txn: 材料流水（事实表，material_refs 可由此重建）
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS material_catalog (
            catalog_id TEXT PRIMARY KEY,
            material_names TEXT NOT NULL,
            material_units TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS site (
            site_id TEXT PRIMARY KEY,
            owner_name TEXT NOT NULL,
            location TEXT NOT NULL,
            site_type TEXT NOT NULL,
            contact_number TEXT NOT NULL,
            date_of_creation TEXT NOT NULL,
            site_material TEXT NOT NULL DEFAULT '[]',
            material_refs TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS site_material_txn (
            txn_id TEXT PRIMARY KEY,
            site_id TEXT NOT NULL REFERENCES site(site_id),
            material_name TEXT NOT NULL,
            received_quantity REAL NOT NULL,
            unit TEXT NOT NULL,
            rate_of_material REAL NOT NULL,
            total_money_amount REAL NOT NULL,
            total_required_money_amount REAL NOT NULL DEFAULT 0,
            total_required_material_amount REAL NOT NULL DEFAULT 0,
            transaction_date TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_txn_site ON site_material_txn(site_id);

        INSERT OR IGNORE INTO schema_version (version) VALUES (1);
        "#,
    )?;
    Ok(())
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}
