// ==========================================
// 施工材料台账系统 - 材料领域模型
// ==========================================
// 对齐: db.rs material_catalog / site_material_txn 表
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 材料目录条目上限（超出则拒绝写入）
pub const MAX_CATALOG_ENTRIES: usize = 100;

/// 全局目录单例主键
pub const GLOBAL_CATALOG_ID: &str = "global";

// ==========================================
// MaterialCatalog - 全局材料目录
// ==========================================
// 红线: 全局单例文档（catalog_id 固定），只追加不删除
// 两个数组平行对应: material_names[i] 的计量单位是 material_units[i]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialCatalog {
    #[serde(rename = "id")]
    pub catalog_id: String, // 固定单例键
    pub material_names: Vec<String>, // 材料名（精确匹配去重，保序）
    pub material_units: Vec<String>, // 计量单位（与材料名同下标对应）
    #[serde(skip, default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(skip, default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl MaterialCatalog {
    /// 以固定单例键创建目录
    pub fn new(material_names: Vec<String>, material_units: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            catalog_id: GLOBAL_CATALOG_ID.to_string(),
            material_names,
            material_units,
            created_at: now,
            updated_at: now,
        }
    }
}

// ==========================================
// MaterialTransaction - 材料流水
// ==========================================
// 红线: 写入后不可变（无更新/删除入口）
// total_money_amount 恒等于 round(received_quantity * rate_of_material, 2)，
// 由服务端计算，客户端提交值一律忽略
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialTransaction {
    // ===== 主键与归属 =====
    #[serde(rename = "id")]
    pub txn_id: String, // 流水唯一标识
    #[serde(rename = "siteId")]
    pub site_id: String, // 归属工地（必填）

    // ===== 流水内容 =====
    pub material_name: String,  // 材料名（已 trim）
    pub received_quantity: f64, // 收货数量（非负）
    pub unit: String,           // 计量单位
    pub rate_of_material: f64,  // 单价（非负）

    // ===== 金额字段 =====
    pub total_money_amount: f64, // 实收金额（服务端派生，2 位小数）
    pub total_required_money_amount: f64, // 需求金额（用户输入，缺省 0）
    pub total_required_material_amount: f64, // 需求数量（用户输入，缺省 0）

    // ===== 时间字段 =====
    pub transaction_date: DateTime<Utc>, // 流水时间（写入时刻）
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl MaterialTransaction {
    /// 由校验后的输入构造流水记录
    ///
    /// # 参数
    /// - input: 已完成必填校验与数值归一化的输入
    /// - total_money_amount: 服务端派生的实收金额
    pub fn new(input: NewMaterialTransaction, total_money_amount: f64) -> Self {
        let now = Utc::now();
        Self {
            txn_id: Uuid::new_v4().to_string(),
            site_id: input.site_id,
            material_name: input.material_name,
            received_quantity: input.received_quantity,
            unit: input.unit,
            rate_of_material: input.rate_of_material,
            total_money_amount,
            total_required_money_amount: input.total_required_money_amount,
            total_required_material_amount: input.total_required_material_amount,
            transaction_date: now,
            created_at: now,
            updated_at: now,
        }
    }
}

// ==========================================
// NewMaterialTransaction - 流水追加输入
// ==========================================
// 经 API 层校验后的合法输入（必填项齐全、数值已解析、可选项已取缺省值）
#[derive(Debug, Clone)]
pub struct NewMaterialTransaction {
    pub site_id: String,
    pub material_name: String,
    pub received_quantity: f64,
    pub unit: String,
    pub rate_of_material: f64,
    pub total_required_money_amount: f64,
    pub total_required_material_amount: f64,
}
