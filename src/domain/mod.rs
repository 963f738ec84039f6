// ==========================================
// 施工材料台账系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含台账计算逻辑
// ==========================================

pub mod material;
pub mod site;
pub mod types;

// 重导出核心类型
pub use material::{
    MaterialCatalog, MaterialTransaction, NewMaterialTransaction, GLOBAL_CATALOG_ID,
    MAX_CATALOG_ENTRIES,
};
pub use site::{NewSite, Site};
pub use types::{ProfitLossType, SiteType};
