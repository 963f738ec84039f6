// ==========================================
// 施工材料台账系统 - 材料目录 API
// ==========================================
// 职责: 全局材料目录的注册与查询
// 说明: 目录是全局单行文档，注册即"首次建单 / 追加合并"
// ==========================================

use std::sync::Arc;
use tracing::debug;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::material::{MaterialCatalog, MAX_CATALOG_ENTRIES};
use crate::repository::catalog_repo::MaterialCatalogRepository;

// ==========================================
// CatalogApi - 材料目录 API
// ==========================================

/// 材料目录API
///
/// 职责：
/// 1. 首次注册时创建全局目录
/// 2. 再次注册时按"集合差"合并追加（保持名称/单位下标对应）
/// 3. 目录查询
pub struct CatalogApi {
    catalog_repo: Arc<MaterialCatalogRepository>,
}

impl CatalogApi {
    /// 创建新的CatalogApi实例
    pub fn new(catalog_repo: Arc<MaterialCatalogRepository>) -> Self {
        Self { catalog_repo }
    }

    /// 注册材料（首次创建目录，或向已有目录追加）
    ///
    /// # 参数
    /// - names: 材料名数组
    /// - units: 计量单位数组（与 names 同下标对应）
    ///
    /// # 返回
    /// - Ok((MaterialCatalog, true)): 首次创建
    /// - Ok((MaterialCatalog, false)): 追加合并（目录已存在）
    /// - Err(ApiError): 校验失败或数据库错误
    ///
    /// # 合并规则
    /// - 仅追加"目录中不存在"的名称，保持入参顺序
    /// - 单位取该名称在入参中首次出现位置对应的单位
    /// - 同批次内的重复名称不做去重（与既有行为一致）
    /// - 已存在的名称保留原单位，入参单位被忽略
    pub fn register_materials(
        &self,
        names: Vec<String>,
        units: Vec<String>,
    ) -> ApiResult<(MaterialCatalog, bool)> {
        // 参数验证
        if names.is_empty() || units.is_empty() {
            return Err(ApiError::InvalidInput(
                "Both material names and units are required.".to_string(),
            ));
        }
        if names.len() != units.len() {
            return Err(ApiError::InvalidInput(
                "The number of material names must match the number of units.".to_string(),
            ));
        }

        match self.catalog_repo.find_global()? {
            None => {
                // 首次注册：直接建单
                let catalog = MaterialCatalog::new(names, units);
                Self::check_catalog_limit(&catalog)?;
                self.catalog_repo.insert_global(&catalog)?;

                debug!(total = catalog.material_names.len(), "材料目录首次创建");
                Ok((catalog, true))
            }
            Some(mut catalog) => {
                // 追加合并
                let appended = Self::append_new_entries(&mut catalog, &names, &units);
                Self::check_catalog_limit(&catalog)?;

                catalog.updated_at = chrono::Utc::now();
                self.catalog_repo.update_global(&catalog)?;

                debug!(
                    appended,
                    total = catalog.material_names.len(),
                    "材料目录追加合并"
                );
                Ok((catalog, false))
            }
        }
    }

    /// 查询全局目录
    ///
    /// # 返回
    /// - Ok(MaterialCatalog): 目录快照
    /// - Err(ApiError::NotFound): 目录尚未创建
    pub fn list_materials(&self) -> ApiResult<MaterialCatalog> {
        match self.catalog_repo.find_global()? {
            Some(catalog) => Ok(catalog),
            None => Err(ApiError::NotFound("No materials found.".to_string())),
        }
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 向目录追加入参中的新名称，返回追加条数
    ///
    /// 只过滤"目录已有"的名称；单位按名称在入参中首次出现的下标取值
    fn append_new_entries(
        catalog: &mut MaterialCatalog,
        names: &[String],
        units: &[String],
    ) -> usize {
        let existing: std::collections::HashSet<&String> =
            catalog.material_names.iter().collect();

        let new_names: Vec<String> = names
            .iter()
            .filter(|name| !existing.contains(name))
            .cloned()
            .collect();

        let new_units: Vec<String> = new_names
            .iter()
            .map(|name| {
                let index = names.iter().position(|n| n == name).unwrap_or(0);
                units[index].clone()
            })
            .collect();

        let appended = new_names.len();
        catalog.material_names.extend(new_names);
        catalog.material_units.extend(new_units);
        appended
    }

    /// 目录容量校验（上限 100 项）
    fn check_catalog_limit(catalog: &MaterialCatalog) -> ApiResult<()> {
        if catalog.material_names.len() > MAX_CATALOG_ENTRIES {
            return Err(ApiError::ValidationError(format!(
                "materialNames exceeds the limit of {} materials",
                MAX_CATALOG_ENTRIES
            )));
        }
        Ok(())
    }
}
