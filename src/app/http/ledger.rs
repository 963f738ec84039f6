// ==========================================
// 材料流水相关端点
// ==========================================

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::api::error::{ApiError, ApiResult};
use crate::api::ledger_api::AppendTransactionRequest;
use crate::app::state::AppState;

/// 流水查询参数
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct MaterialDetailsQuery {
    #[serde(rename = "siteId")]
    pub site_id: Option<String>,
    pub material_name: Option<String>,
}

/// 登记材料流水（写流水 + 更新工地反向索引）
pub(super) async fn add_material_details_to_site(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AppendTransactionRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let ledger_api = state.ledger_api.clone();

    let txn = tokio::task::spawn_blocking(move || {
        let _perf = crate::perf::PerfGuard::new("http.addMaterialDetailsToSite");
        ledger_api.append_transaction(req)
    })
    .await
    .map_err(|e| ApiError::InternalError(format!("任务执行失败: {}", e)))??;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": crate::i18n::t("api.transaction.created"),
            "material": txn,
        })),
    ))
}

/// 查询工地材料流水（可按材料名过滤）
pub(super) async fn get_material_details(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MaterialDetailsQuery>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let site_id = query.site_id.as_deref().unwrap_or("").trim().to_string();
    if site_id.is_empty() {
        return Err(ApiError::InvalidInput("Site ID is required.".to_string()));
    }

    let ledger_api = state.ledger_api.clone();
    let material_name = query.material_name;

    let txns = tokio::task::spawn_blocking(move || {
        let _perf = crate::perf::PerfGuard::new("http.getMaterialDetails");
        ledger_api.query_transactions(&site_id, material_name.as_deref())
    })
    .await
    .map_err(|e| ApiError::InternalError(format!("任务执行失败: {}", e)))??;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "message": crate::i18n::t("api.transaction.retrieved"),
            "materials": txns,
        })),
    ))
}
