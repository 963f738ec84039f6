// ==========================================
// 施工材料台账系统 - 核心库
// ==========================================
// 技术栈: Axum + Rust + SQLite
// 系统定位: 工地材料登记与台账汇总服务
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 台账计算规则
pub mod engine;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// 性能统计
pub mod perf;

// API 层 - 业务接口
pub mod api;

// 应用层 - HTTP 集成
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ProfitLossType, SiteType};

// 领域实体
pub use domain::{MaterialCatalog, MaterialTransaction, NewSite, Site};

// 引擎
pub use engine::{LedgerAggregator, LedgerTotals};

// API
pub use api::{CatalogApi, LedgerApi, SiteApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "施工材料台账系统";

// 数据库版本
pub const DB_VERSION: &str = "v0.1";

// ==========================================
// 预编译检查
// ==========================================
