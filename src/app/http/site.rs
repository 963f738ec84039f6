// ==========================================
// 工地相关端点
// ==========================================

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::api::error::{ApiError, ApiResult};
use crate::api::site_api::CreateSiteRequest;
use crate::app::state::AppState;
use crate::domain::site::Site;

/// 工地材料名登记请求体（字段名与前端一致）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct AddMaterialToSiteRequest {
    #[serde(rename = "siteId")]
    pub site_id: Option<String>,
    pub material_name: Option<String>,
}

/// 子路由存活探针
pub(super) async fn site_root() -> String {
    crate::i18n::t("server.site_api_running")
}

/// 工地建档
pub(super) async fn create_site(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateSiteRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let site_api = state.site_api.clone();

    let site = tokio::task::spawn_blocking(move || {
        let _perf = crate::perf::PerfGuard::new("http.create-site");
        site_api.create_site(req)
    })
    .await
    .map_err(|e| ApiError::InternalError(format!("任务执行失败: {}", e)))??;

    // 建档响应不含 id（与前端约定一致）
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": crate::i18n::t("api.site.created"),
            "site": {
                "ownerName": site.owner_name,
                "location": site.location,
                "type": site.site_type,
                "contactNumber": site.contact_number,
                "dateOfCreation": site.date_of_creation,
            },
        })),
    ))
}

/// 查询全部工地
pub(super) async fn get_sites(
    State(state): State<Arc<AppState>>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let site_api = state.site_api.clone();

    let sites = tokio::task::spawn_blocking(move || {
        let _perf = crate::perf::PerfGuard::new("http.get-sites");
        site_api.list_sites()
    })
    .await
    .map_err(|e| ApiError::InternalError(format!("任务执行失败: {}", e)))??;

    let sites: Vec<serde_json::Value> = sites.iter().map(site_list_entry).collect();

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "message": crate::i18n::t("api.site.list_retrieved"),
            "sites": sites,
        })),
    ))
}

/// 向工地登记材料名
pub(super) async fn add_material_to_site(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddMaterialToSiteRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let site_api = state.site_api.clone();

    let site_material = tokio::task::spawn_blocking(move || {
        let _perf = crate::perf::PerfGuard::new("http.addMaterialToSite");
        site_api.attach_material_name(
            req.site_id.as_deref().unwrap_or(""),
            req.material_name.as_deref().unwrap_or(""),
        )
    })
    .await
    .map_err(|e| ApiError::InternalError(format!("任务执行失败: {}", e)))??;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "message": crate::i18n::t("api.site_material.added"),
            "siteMaterial": site_material,
        })),
    ))
}

/// 查询工地已登记的材料名
pub(super) async fn get_site_material(
    State(state): State<Arc<AppState>>,
    Path(site_id): Path<String>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let site_api = state.site_api.clone();

    let site_material = tokio::task::spawn_blocking(move || {
        let _perf = crate::perf::PerfGuard::new("http.getSiteMaterial");
        site_api.list_material_names(&site_id)
    })
    .await
    .map_err(|e| ApiError::InternalError(format!("任务执行失败: {}", e)))??;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "message": crate::i18n::t("api.site_material.fetched"),
            "siteMaterial": site_material,
        })),
    ))
}

/// 列表视图字段投影（含 id）
fn site_list_entry(site: &Site) -> serde_json::Value {
    serde_json::json!({
        "id": site.site_id,
        "ownerName": site.owner_name,
        "location": site.location,
        "type": site.site_type,
        "contactNumber": site.contact_number,
        "dateOfCreation": site.date_of_creation,
    })
}
