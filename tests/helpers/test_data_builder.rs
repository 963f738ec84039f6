// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use construction_ledger::api::{AppendTransactionRequest, CreateSiteRequest};
use serde_json::json;

// ==========================================
// CreateSiteRequest 构建器
// ==========================================

pub struct SiteRequestBuilder {
    owner_name: Option<String>,
    location: Option<String>,
    site_type: Option<String>,
    contact_number: Option<String>,
    date_of_creation: Option<String>,
}

impl SiteRequestBuilder {
    pub fn new(owner_name: &str) -> Self {
        Self {
            owner_name: Some(owner_name.to_string()),
            location: Some("Sector 21, Gurugram".to_string()),
            site_type: Some("private".to_string()),
            contact_number: Some("9876543210".to_string()),
            date_of_creation: Some("2024-01-15".to_string()),
        }
    }

    pub fn location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }

    pub fn site_type(mut self, site_type: &str) -> Self {
        self.site_type = Some(site_type.to_string());
        self
    }

    pub fn contact(mut self, contact_number: &str) -> Self {
        self.contact_number = Some(contact_number.to_string());
        self
    }

    pub fn date(mut self, date_of_creation: &str) -> Self {
        self.date_of_creation = Some(date_of_creation.to_string());
        self
    }

    pub fn build(self) -> CreateSiteRequest {
        CreateSiteRequest {
            owner_name: self.owner_name,
            location: self.location,
            site_type: self.site_type,
            contact_number: self.contact_number,
            date_of_creation: self.date_of_creation,
        }
    }
}

// ==========================================
// AppendTransactionRequest 构建器
// ==========================================

pub struct TxnRequestBuilder {
    site_id: Option<String>,
    material_name: Option<String>,
    received_quantity: Option<serde_json::Value>,
    unit: Option<String>,
    rate_of_material: Option<serde_json::Value>,
    total_money_amount: Option<serde_json::Value>,
    total_required_money_amount: Option<serde_json::Value>,
    total_required_material_amount: Option<serde_json::Value>,
}

impl TxnRequestBuilder {
    pub fn new(site_id: &str) -> Self {
        Self {
            site_id: Some(site_id.to_string()),
            material_name: Some("Cement".to_string()),
            received_quantity: Some(json!(10)),
            unit: Some("Bags".to_string()),
            rate_of_material: Some(json!(50)),
            total_money_amount: None,
            total_required_money_amount: None,
            total_required_material_amount: None,
        }
    }

    pub fn material(mut self, material_name: &str) -> Self {
        self.material_name = Some(material_name.to_string());
        self
    }

    pub fn quantity(mut self, quantity: f64) -> Self {
        self.received_quantity = Some(json!(quantity));
        self
    }

    /// 直接塞原始 JSON 值（用于字符串数字、非法值等场景）
    pub fn quantity_raw(mut self, quantity: serde_json::Value) -> Self {
        self.received_quantity = Some(quantity);
        self
    }

    pub fn unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    pub fn rate(mut self, rate: f64) -> Self {
        self.rate_of_material = Some(json!(rate));
        self
    }

    pub fn rate_raw(mut self, rate: serde_json::Value) -> Self {
        self.rate_of_material = Some(rate);
        self
    }

    /// 客户端提交的实收金额（服务端应忽略）
    pub fn client_total(mut self, total: f64) -> Self {
        self.total_money_amount = Some(json!(total));
        self
    }

    pub fn required_money(mut self, amount: f64) -> Self {
        self.total_required_money_amount = Some(json!(amount));
        self
    }

    pub fn required_material(mut self, amount: f64) -> Self {
        self.total_required_material_amount = Some(json!(amount));
        self
    }

    pub fn build(self) -> AppendTransactionRequest {
        AppendTransactionRequest {
            material_name: self.material_name,
            received_quantity: self.received_quantity,
            unit: self.unit,
            rate_of_material: self.rate_of_material,
            total_money_amount: self.total_money_amount,
            total_required_money_amount: self.total_required_money_amount,
            total_required_material_amount: self.total_required_material_amount,
            site_id: self.site_id,
        }
    }
}
