// ==========================================
// 施工材料台账系统 - 台账汇总引擎
// ==========================================
// 职责: 对一组材料流水计算运行合计、差额与盈亏
// 输入: 任意流水切片（已落库或未落库均可）
// 输出: LedgerTotals
// ==========================================
// 红线: 无状态引擎,所有方法都是纯函数
// 同一实现须可分别作用于"已有"、"新增"与两者拼接，
// 四个求和字段满足拼接可加性
// ==========================================

use crate::domain::material::MaterialTransaction;
use crate::domain::types::ProfitLossType;
use serde::{Deserialize, Serialize};

// ==========================================
// LedgerTotals - 台账汇总结果
// ==========================================
// 不落库，按查询即时计算
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTotals {
    pub total_received_qty: f64,      // 收货数量合计
    pub total_amount: f64,            // 实收金额合计
    pub total_required_material: f64, // 需求数量合计
    pub total_required_amount: f64,   // 需求金额合计
    pub balance_material: f64,        // 差额数量 = 需求数量 - 收货数量（负数表示超收）
    pub profit_loss: f64,             // 盈亏 = 需求金额 - 实收金额
    pub profit_loss_type: ProfitLossType, // 盈亏分类（>= 0 为 profit）
}

// ==========================================
// LedgerAggregator - 台账汇总引擎
// ==========================================
#[derive(Debug, Default)]
pub struct LedgerAggregator;

impl LedgerAggregator {
    /// 创建新的台账汇总引擎
    pub fn new() -> Self {
        Self
    }

    /// 对流水集合计算台账汇总
    ///
    /// # 参数
    /// - transactions: 流水切片（空切片合法，产出全零 + profit）
    ///
    /// # 返回
    /// - LedgerTotals
    pub fn aggregate(&self, transactions: &[MaterialTransaction]) -> LedgerTotals {
        let mut total_received_qty = 0.0;
        let mut total_amount = 0.0;
        let mut total_required_material = 0.0;
        let mut total_required_amount = 0.0;

        for txn in transactions {
            total_received_qty += txn.received_quantity;
            total_amount += txn.total_money_amount;
            total_required_material += txn.total_required_material_amount;
            total_required_amount += txn.total_required_money_amount;
        }

        let balance_material = total_required_material - total_received_qty;
        let profit_loss = total_required_amount - total_amount;
        let profit_loss_type = if profit_loss >= 0.0 {
            ProfitLossType::Profit
        } else {
            ProfitLossType::Loss
        };

        LedgerTotals {
            total_received_qty,
            total_amount,
            total_required_material,
            total_required_amount,
            balance_material,
            profit_loss,
            profit_loss_type,
        }
    }
}
