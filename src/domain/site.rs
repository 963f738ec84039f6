// ==========================================
// 施工材料台账系统 - 工地领域模型
// ==========================================
// 对齐: db.rs site 表
// ==========================================

use crate::domain::types::SiteType;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// Site - 工地主数据
// ==========================================
// site_material / material_refs 为派生索引（读取侧），
// 事实数据在 site_material_txn 表，两者不做事务级同步
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    // ===== 主键 =====
    #[serde(rename = "id")]
    pub site_id: String, // 工地唯一标识

    // ===== 基础信息 =====
    pub owner_name: String, // 业主姓名（至少 3 个字符）
    pub location: String,   // 工地位置
    #[serde(rename = "type")]
    pub site_type: SiteType, // 工地类型（gov/solo/private）
    pub contact_number: String, // 联系电话
    pub date_of_creation: NaiveDate, // 开工日期（ISO DATE）

    // ===== 材料关联（派生索引）=====
    pub site_material: Vec<String>, // 本工地登记过的材料名（仅追加，不去重写入）
    #[serde(rename = "materialID")]
    pub material_refs: Vec<String>, // 材料流水 ID 反向索引（尽力维护，可重建）

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 记录创建时间
    pub updated_at: DateTime<Utc>, // 记录更新时间
}

impl Site {
    /// 由创建请求构造新工地（生成 ID 与审计时间戳，索引置空）
    pub fn new(input: NewSite) -> Self {
        let now = Utc::now();
        Self {
            site_id: Uuid::new_v4().to_string(),
            owner_name: input.owner_name,
            location: input.location,
            site_type: input.site_type,
            contact_number: input.contact_number,
            date_of_creation: input.date_of_creation,
            site_material: Vec::new(),
            material_refs: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

// ==========================================
// NewSite - 工地创建输入
// ==========================================
// 经 API 层校验后的合法输入（字段已 trim、类型已解析）
#[derive(Debug, Clone)]
pub struct NewSite {
    pub owner_name: String,
    pub location: String,
    pub site_type: SiteType,
    pub contact_number: String,
    pub date_of_creation: NaiveDate,
}
