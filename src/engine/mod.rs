// ==========================================
// 施工材料台账系统 - 引擎层
// ==========================================
// 职责: 实现台账计算规则,不拼 SQL
// 红线: Engine 不拼 SQL, 所有方法为纯函数
// ==========================================

pub mod aggregator;
pub mod numeric;

// 重导出核心引擎
pub use aggregator::{LedgerAggregator, LedgerTotals};
pub use numeric::{parse_number, parse_number_or_default, round2};
