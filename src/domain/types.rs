// ==========================================
// 施工材料台账系统 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 工地类型 (Site Type)
// ==========================================
// 序列化格式: 小写 (与存量数据一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteType {
    Gov,     // 政府项目
    Solo,    // 个人项目
    Private, // 私营项目
}

impl SiteType {
    /// 解析工地类型（大小写不敏感，前后空白忽略）
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "gov" => Some(SiteType::Gov),
            "solo" => Some(SiteType::Solo),
            "private" => Some(SiteType::Private),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SiteType::Gov => "gov",
            SiteType::Solo => "solo",
            SiteType::Private => "private",
        }
    }
}

impl fmt::Display for SiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 盈亏分类 (Profit/Loss Type)
// ==========================================
// 规则: profitLoss >= 0 为 profit，否则为 loss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfitLossType {
    Profit,
    Loss,
}

impl ProfitLossType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfitLossType::Profit => "profit",
            ProfitLossType::Loss => "loss",
        }
    }
}

impl fmt::Display for ProfitLossType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
