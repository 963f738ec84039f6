// ==========================================
// 施工材料台账系统 - 材料流水 API
// ==========================================
// 职责: 材料流水登记、查询、汇总，工地反向索引维护
// 红线: 实收金额一律服务端计算，客户端提交值忽略
// 红线: 先写流水再更新工地索引，两步不在同一事务内；
//       第二步失败时流水保留，接口返回 500，索引可重建
// ==========================================

use std::sync::Arc;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::material::{MaterialTransaction, NewMaterialTransaction};
use crate::engine::aggregator::{LedgerAggregator, LedgerTotals};
use crate::engine::numeric::{parse_number, parse_number_or_default, round2};
use crate::repository::site_repo::SiteRepository;
use crate::repository::transaction_repo::MaterialTransactionRepository;

/// 必填字段缺失时的统一文案
const REQUIRED_FIELDS_MSG: &str =
    "All required fields must be provided: material_name, received_quantity, unit, rate_of_material, siteId";

// ==========================================
// AppendTransactionRequest - 流水登记请求
// ==========================================
/// 流水登记请求体（字段名与前端一致）
///
/// 数值字段同时接受 JSON 数字与数字字符串，统一走 engine::numeric 解析
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppendTransactionRequest {
    pub material_name: Option<String>,
    pub received_quantity: Option<serde_json::Value>,
    pub unit: Option<String>,
    pub rate_of_material: Option<serde_json::Value>,
    // 客户端可能提交，但服务端始终重新计算，提交值忽略
    pub total_money_amount: Option<serde_json::Value>,
    pub total_required_money_amount: Option<serde_json::Value>,
    pub total_required_material_amount: Option<serde_json::Value>,
    #[serde(rename = "siteId")]
    pub site_id: Option<String>,
}

// ==========================================
// LedgerApi - 材料流水 API
// ==========================================

/// 材料流水API
///
/// 职责：
/// 1. 流水登记（校验 + 金额派生 + 两步写入）
/// 2. 流水查询（可按材料名过滤）
/// 3. 台账汇总（聚合引擎）
/// 4. 工地反向索引重建
pub struct LedgerApi {
    site_repo: Arc<SiteRepository>,
    transaction_repo: Arc<MaterialTransactionRepository>,
    aggregator: LedgerAggregator,
}

impl LedgerApi {
    /// 创建新的LedgerApi实例
    pub fn new(
        site_repo: Arc<SiteRepository>,
        transaction_repo: Arc<MaterialTransactionRepository>,
    ) -> Self {
        Self {
            site_repo,
            transaction_repo,
            aggregator: LedgerAggregator::new(),
        }
    }

    /// 登记一条材料流水，并更新工地反向索引
    ///
    /// # 参数
    /// - req: 流水登记请求体
    ///
    /// # 返回
    /// - Ok(MaterialTransaction): 已落库的完整流水（含服务端派生金额）
    /// - Err(ApiError::InvalidInput): 必填字段缺失
    /// - Err(ApiError::ValidationError): 必填数值字段非数值
    /// - Err(ApiError::NotFound): 工地不存在（拒绝后不产生任何写入）
    ///
    /// # 校验规则
    /// - 必填: material_name / received_quantity / unit / rate_of_material / siteId
    /// - 数值字段"有值"即算提供，0 是合法取值
    /// - 可选的 total_required_* 非数值时取 0
    pub fn append_transaction(
        &self,
        req: AppendTransactionRequest,
    ) -> ApiResult<MaterialTransaction> {
        let material_name = req.material_name.as_deref().unwrap_or("").trim().to_string();
        let unit = req.unit.as_deref().unwrap_or("").trim().to_string();
        let site_id = req.site_id.as_deref().unwrap_or("").to_string();

        if material_name.is_empty()
            || unit.is_empty()
            || site_id.trim().is_empty()
            || Self::numeric_field_missing(&req.received_quantity)
            || Self::numeric_field_missing(&req.rate_of_material)
        {
            return Err(ApiError::InvalidInput(REQUIRED_FIELDS_MSG.to_string()));
        }

        let received_quantity =
            Self::parse_required_number(req.received_quantity.as_ref(), "received_quantity")?;
        let rate_of_material =
            Self::parse_required_number(req.rate_of_material.as_ref(), "rate_of_material")?;
        let total_required_money_amount =
            parse_number_or_default(req.total_required_money_amount.as_ref(), 0.0);
        let total_required_material_amount =
            parse_number_or_default(req.total_required_material_amount.as_ref(), 0.0);

        // 工地先校验，校验不过不写任何数据
        let mut site = self
            .site_repo
            .find_by_id(&site_id)?
            .ok_or_else(|| ApiError::NotFound("Site not found.".to_string()))?;

        // 实收金额服务端派生
        let total_money_amount = round2(received_quantity * rate_of_material);

        let txn = MaterialTransaction::new(
            NewMaterialTransaction {
                site_id: site_id.clone(),
                material_name,
                received_quantity,
                unit,
                rate_of_material,
                total_required_money_amount,
                total_required_material_amount,
            },
            total_money_amount,
        );

        // 第一步：写流水
        self.transaction_repo.insert(&txn)?;

        // 第二步：更新工地反向索引（失败时流水保留，可通过 rebuild 恢复）
        site.material_refs.push(txn.txn_id.clone());
        site.updated_at = chrono::Utc::now();
        if let Err(e) = self.site_repo.update_material_lists(&site) {
            warn!(
                error = %e,
                site_id = %site.site_id,
                txn_id = %txn.txn_id,
                "流水已写入但工地反向索引更新失败"
            );
            return Err(e.into());
        }

        debug!(
            txn_id = %txn.txn_id,
            site_id = %txn.site_id,
            amount = txn.total_money_amount,
            "材料流水登记完成"
        );
        Ok(txn)
    }

    /// 查询工地的材料流水（可选按材料名大小写不敏感子串过滤）
    ///
    /// # 返回
    /// - Ok(Vec<MaterialTransaction>): 按写入顺序，非空
    /// - Err(ApiError::NotFound): 工地不存在，或过滤后结果为空
    pub fn query_transactions(
        &self,
        site_id: &str,
        material_name: Option<&str>,
    ) -> ApiResult<Vec<MaterialTransaction>> {
        self.ensure_site_exists(site_id)?;

        let mut txns = self.transaction_repo.find_by_site(site_id)?;
        Self::apply_name_filter(&mut txns, material_name);

        if txns.is_empty() {
            return Err(ApiError::NotFound("No matching materials found.".to_string()));
        }
        Ok(txns)
    }

    /// 台账汇总（与 query_transactions 同一取数路径，空集合产出全零）
    pub fn summarize(
        &self,
        site_id: &str,
        material_name: Option<&str>,
    ) -> ApiResult<LedgerTotals> {
        self.ensure_site_exists(site_id)?;

        let mut txns = self.transaction_repo.find_by_site(site_id)?;
        Self::apply_name_filter(&mut txns, material_name);

        Ok(self.aggregator.aggregate(&txns))
    }

    /// 以流水表为准重建工地的反向索引
    ///
    /// # 返回
    /// - Ok(Vec<String>): 重建后的流水 ID 列表（写入顺序）
    pub fn rebuild_material_refs(&self, site_id: &str) -> ApiResult<Vec<String>> {
        let mut site = self
            .site_repo
            .find_by_id(site_id)?
            .ok_or_else(|| ApiError::NotFound("Site not found.".to_string()))?;

        let ids = self.transaction_repo.list_ids_by_site(site_id)?;
        site.material_refs = ids.clone();
        site.updated_at = chrono::Utc::now();
        self.site_repo.update_material_lists(&site)?;

        info!(site_id = %site.site_id, count = ids.len(), "工地反向索引已重建");
        Ok(ids)
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    fn ensure_site_exists(&self, site_id: &str) -> ApiResult<()> {
        self.site_repo
            .find_by_id(site_id)?
            .map(|_| ())
            .ok_or_else(|| ApiError::NotFound("Site not found.".to_string()))
    }

    /// 必填数值字段是否缺失（不存在或为空白字符串）
    fn numeric_field_missing(value: &Option<serde_json::Value>) -> bool {
        match value {
            None => true,
            Some(serde_json::Value::Null) => true,
            Some(serde_json::Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        }
    }

    /// 解析必填数值字段（非数值 → ValidationError）
    fn parse_required_number(
        value: Option<&serde_json::Value>,
        field: &str,
    ) -> ApiResult<f64> {
        value.and_then(parse_number).ok_or_else(|| {
            ApiError::ValidationError(format!("{} must be a numeric value.", field))
        })
    }

    /// 按材料名过滤（大小写不敏感子串匹配；None 或空串不过滤）
    fn apply_name_filter(txns: &mut Vec<MaterialTransaction>, material_name: Option<&str>) {
        if let Some(filter) = material_name {
            if !filter.is_empty() {
                let needle = filter.to_lowercase();
                txns.retain(|txn| txn.material_name.to_lowercase().contains(&needle));
            }
        }
    }
}
