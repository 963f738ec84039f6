// ==========================================
// 施工材料台账系统 - 应用层
// ==========================================
// 职责: 状态装配 + HTTP 适配,连接外部调用方与 API 层
// ==========================================

pub mod http;
pub mod state;

// 重导出
pub use http::create_router;
pub use state::{get_default_db_path, AppState};
