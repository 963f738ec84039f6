// ==========================================
// 施工材料台账系统 - API 层
// ==========================================
// 职责: 参数校验 + 业务编排,供 HTTP 适配层调用
// ==========================================

pub mod catalog_api;
pub mod error;
pub mod ledger_api;
pub mod site_api;

// 重导出核心类型
pub use catalog_api::CatalogApi;
pub use error::{ApiError, ApiResult};
pub use ledger_api::{AppendTransactionRequest, LedgerApi};
pub use site_api::{CreateSiteRequest, SiteApi};
