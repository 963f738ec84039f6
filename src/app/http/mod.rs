// ==========================================
// 施工材料台账系统 - HTTP 适配层
// ==========================================
// 职责: 路由注册、请求/响应编解码，业务全部委托 API 层
// 说明: 路径与响应文案对齐既有前端，/api/sites 下混挂
//       目录、工地、流水三类端点（历史约定，不按资源拆分）
// ==========================================

mod catalog;
mod common;
mod ledger;
mod site;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app::state::AppState;

/// 构建完整路由
pub fn create_router(state: Arc<AppState>) -> Router {
    let sites = Router::new()
        .route("/", get(site::site_root))
        .route("/create-site", post(site::create_site))
        .route("/get-sites", get(site::get_sites))
        .route("/addMaterialList", post(catalog::add_material_list))
        .route("/getAllMaterialList", get(catalog::get_all_material_list))
        .route("/addMaterialToSite", post(site::add_material_to_site))
        .route("/getSiteMaterial/{siteId}", get(site::get_site_material))
        .route(
            "/addMaterialDetailsToSite",
            post(ledger::add_material_details_to_site),
        )
        .route("/getMaterialDetails", get(ledger::get_material_details));

    Router::new()
        .route("/", get(common::root))
        .nest("/api/sites", sites)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
