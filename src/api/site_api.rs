// ==========================================
// 施工材料台账系统 - 工地 API
// ==========================================
// 职责: 工地建档、列表查询、工地材料名登记
// 说明: siteMaterial 是"该工地登记过哪些材料名"的只追加清单，
//       与材料流水（ledger_api）互不替代
// ==========================================

use std::sync::Arc;
use serde::Deserialize;
use tracing::debug;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::site::{NewSite, Site};
use crate::domain::types::SiteType;
use crate::repository::site_repo::SiteRepository;

// ==========================================
// CreateSiteRequest - 建档请求
// ==========================================
/// 建档请求体（字段名与前端一致）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateSiteRequest {
    #[serde(rename = "ownerName")]
    pub owner_name: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub site_type: Option<String>,
    #[serde(rename = "contactNumber")]
    pub contact_number: Option<String>,
    #[serde(rename = "dateOfCreation")]
    pub date_of_creation: Option<String>,
}

// ==========================================
// SiteApi - 工地 API
// ==========================================

/// 工地API
///
/// 职责：
/// 1. 工地建档（字段校验 + 落库）
/// 2. 工地列表查询
/// 3. 工地材料名登记与查询（siteMaterial 数组）
pub struct SiteApi {
    site_repo: Arc<SiteRepository>,
}

impl SiteApi {
    /// 创建新的SiteApi实例
    pub fn new(site_repo: Arc<SiteRepository>) -> Self {
        Self { site_repo }
    }

    /// 工地建档
    ///
    /// # 参数
    /// - req: 建档请求体
    ///
    /// # 返回
    /// - Ok(Site): 新建的工地记录（siteMaterial/materialID 为空数组）
    /// - Err(ApiError::InvalidInput): 字段校验失败
    ///
    /// # 校验顺序
    /// 1. dateOfCreation 可解析（缺失视同无效日期）
    /// 2. 其余必填字段非空
    /// 3. ownerName 去空格后至少 3 个字符
    /// 4. type 取值 gov/solo/private（大小写不敏感）
    pub fn create_site(&self, req: CreateSiteRequest) -> ApiResult<Site> {
        // 日期最先校验
        let date_of_creation = req
            .date_of_creation
            .as_deref()
            .and_then(Self::parse_date_of_creation)
            .ok_or_else(|| {
                ApiError::InvalidInput(
                    "Invalid date format. Please provide a valid date.".to_string(),
                )
            })?;

        let owner_name = req.owner_name.as_deref().unwrap_or("").trim();
        let location = req.location.as_deref().unwrap_or("").trim();
        let site_type_raw = req.site_type.as_deref().unwrap_or("").trim();
        let contact_number = req.contact_number.as_deref().unwrap_or("");

        if owner_name.is_empty()
            || location.is_empty()
            || site_type_raw.is_empty()
            || contact_number.trim().is_empty()
        {
            return Err(ApiError::InvalidInput(
                "All required fields must be provided: ownerName, location, type, contactNumber, dateOfCreation"
                    .to_string(),
            ));
        }

        if owner_name.chars().count() < 3 {
            return Err(ApiError::InvalidInput(
                "ownerName must be at least 3 characters long.".to_string(),
            ));
        }

        let site_type = SiteType::parse(site_type_raw).ok_or_else(|| {
            ApiError::InvalidInput("type must be one of: gov, solo, private.".to_string())
        })?;

        let site = Site::new(NewSite {
            owner_name: owner_name.to_string(),
            location: location.to_string(),
            site_type,
            contact_number: contact_number.to_string(),
            date_of_creation,
        });
        self.site_repo.insert(&site)?;

        debug!(site_id = %site.site_id, owner = %site.owner_name, "工地建档完成");
        Ok(site)
    }

    /// 查询全部工地（按建档顺序）
    ///
    /// # 返回
    /// - Ok(Vec<Site>): 至少一条
    /// - Err(ApiError::NotFound): 尚无任何工地
    pub fn list_sites(&self) -> ApiResult<Vec<Site>> {
        let sites = self.site_repo.list_all()?;
        if sites.is_empty() {
            return Err(ApiError::NotFound("No sites found.".to_string()));
        }
        Ok(sites)
    }

    /// 向工地登记一个材料名（精确匹配去重）
    ///
    /// # 参数
    /// - site_id: 工地 ID
    /// - material_name: 材料名（按原样存储）
    ///
    /// # 返回
    /// - Ok(Vec<String>): 更新后的完整 siteMaterial 数组
    /// - Err(ApiError::Conflict): 该材料名已登记过
    pub fn attach_material_name(
        &self,
        site_id: &str,
        material_name: &str,
    ) -> ApiResult<Vec<String>> {
        if site_id.trim().is_empty() || material_name.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "siteId and material_name are required.".to_string(),
            ));
        }

        let mut site = self
            .site_repo
            .find_by_id(site_id)?
            .ok_or_else(|| ApiError::NotFound("Site not found.".to_string()))?;

        if site.site_material.iter().any(|name| name == material_name) {
            return Err(ApiError::Conflict(
                "Material already exists in the siteMaterial array.".to_string(),
            ));
        }

        site.site_material.push(material_name.to_string());
        site.updated_at = chrono::Utc::now();
        self.site_repo.update_material_lists(&site)?;

        debug!(site_id = %site.site_id, material = %material_name, "工地材料名登记完成");
        Ok(site.site_material)
    }

    /// 查询工地已登记的材料名（登记顺序）
    pub fn list_material_names(&self, site_id: &str) -> ApiResult<Vec<String>> {
        let site = self
            .site_repo
            .find_by_id(site_id)?
            .ok_or_else(|| ApiError::NotFound("Site not found.".to_string()))?;
        Ok(site.site_material)
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 解析 dateOfCreation（ISO 日期或带时间的 RFC3339）
    fn parse_date_of_creation(value: &str) -> Option<chrono::NaiveDate> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        if let Ok(date) = chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return Some(date);
        }
        chrono::DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|dt| dt.date_naive())
    }
}
