// ==========================================
// 材料目录相关端点
// ==========================================

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::api::error::{ApiError, ApiResult};
use crate::app::state::AppState;

/// 目录注册请求体（字段名与前端一致）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RegisterMaterialsRequest {
    #[serde(rename = "materialNames")]
    pub material_names: Option<Vec<String>>,
    #[serde(rename = "materialUnits")]
    pub material_units: Option<Vec<String>>,
}

/// 注册材料目录（首次创建 201，追加合并 200）
pub(super) async fn add_material_list(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterMaterialsRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let catalog_api = state.catalog_api.clone();
    let names = req.material_names.unwrap_or_default();
    let units = req.material_units.unwrap_or_default();

    let (catalog, created) = tokio::task::spawn_blocking(move || {
        let _perf = crate::perf::PerfGuard::new("http.addMaterialList");
        catalog_api.register_materials(names, units)
    })
    .await
    .map_err(|e| ApiError::InternalError(format!("任务执行失败: {}", e)))??;

    let (status, message_key) = if created {
        (StatusCode::CREATED, "api.material_list.created")
    } else {
        (StatusCode::OK, "api.material_list.updated")
    };

    Ok((
        status,
        Json(serde_json::json!({
            "message": crate::i18n::t(message_key),
            "materialList": catalog,
        })),
    ))
}

/// 查询材料目录
pub(super) async fn get_all_material_list(
    State(state): State<Arc<AppState>>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let catalog_api = state.catalog_api.clone();

    let catalog = tokio::task::spawn_blocking(move || {
        let _perf = crate::perf::PerfGuard::new("http.getAllMaterialList");
        catalog_api.list_materials()
    })
    .await
    .map_err(|e| ApiError::InternalError(format!("任务执行失败: {}", e)))??;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "message": crate::i18n::t("api.material_list.retrieved"),
            "materialList": catalog,
        })),
    ))
}
