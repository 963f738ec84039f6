// ==========================================
// SiteApi 集成测试
// ==========================================
// 测试范围:
// 1. 工地建档: 校验顺序、字段清洗、落库
// 2. 工地列表: 空表404、列出顺序
// 3. 工地材料名登记: 精确去重、原样存储
// ==========================================

mod helpers;

use construction_ledger::domain::types::SiteType;
use helpers::api_test_helper::*;
use helpers::test_data_builder::SiteRequestBuilder;

// ==========================================
// 工地建档测试
// ==========================================

#[test]
fn test_create_site_正常建档() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let site = env
        .site_api
        .create_site(
            SiteRequestBuilder::new("  Rajesh Kumar  ")
                .location("  Sector 21  ")
                .site_type("Private")
                .contact("9876543210")
                .date("2024-01-15")
                .build(),
        )
        .expect("建档失败");

    // 姓名与位置去空格，类型大小写不敏感，电话原样保留
    assert_eq!(site.owner_name, "Rajesh Kumar");
    assert_eq!(site.location, "Sector 21");
    assert_eq!(site.site_type, SiteType::Private);
    assert_eq!(site.contact_number, "9876543210");
    assert_eq!(site.date_of_creation.to_string(), "2024-01-15");
    assert!(site.site_material.is_empty());
    assert!(site.material_refs.is_empty());

    // 落库验证
    let stored = env
        .site_repo
        .find_by_id(&site.site_id)
        .expect("查询失败")
        .expect("工地应已落库");
    assert_eq!(stored.owner_name, "Rajesh Kumar");
}

#[test]
fn test_create_site_带时间日期() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let site = env
        .site_api
        .create_site(
            SiteRequestBuilder::new("Amit Sharma")
                .date("2024-03-15T10:30:00+05:30")
                .build(),
        )
        .expect("建档失败");

    assert_eq!(site.date_of_creation.to_string(), "2024-03-15");
}

#[test]
fn test_create_site_日期最先校验() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    // 日期非法
    assert_invalid_input(
        env.site_api
            .create_site(SiteRequestBuilder::new("Rajesh").date("15/03/2024").build()),
        "Invalid date format. Please provide a valid date.",
    );

    // 日期缺失也走日期文案
    let mut req = SiteRequestBuilder::new("Rajesh").build();
    req.date_of_creation = None;
    assert_invalid_input(
        env.site_api.create_site(req),
        "Invalid date format. Please provide a valid date.",
    );

    // 其他字段同时缺失时，仍然先报日期
    let req = construction_ledger::api::CreateSiteRequest::default();
    assert_invalid_input(
        env.site_api.create_site(req),
        "Invalid date format. Please provide a valid date.",
    );
}

#[test]
fn test_create_site_必填字段校验() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let expected =
        "All required fields must be provided: ownerName, location, type, contactNumber, dateOfCreation";

    let mut req = SiteRequestBuilder::new("Rajesh").build();
    req.location = None;
    assert_invalid_input(env.site_api.create_site(req), expected);

    // 纯空格等同缺失
    let req = SiteRequestBuilder::new("   ").build();
    assert_invalid_input(env.site_api.create_site(req), expected);

    let req = SiteRequestBuilder::new("Rajesh").contact("   ").build();
    assert_invalid_input(env.site_api.create_site(req), expected);
}

#[test]
fn test_create_site_姓名长度与类型枚举() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    assert_invalid_input(
        env.site_api.create_site(SiteRequestBuilder::new("Ab").build()),
        "ownerName must be at least 3 characters long.",
    );

    assert_invalid_input(
        env.site_api
            .create_site(SiteRequestBuilder::new("Rajesh").site_type("company").build()),
        "type must be one of: gov, solo, private.",
    );
}

// ==========================================
// 工地列表测试
// ==========================================

#[test]
fn test_list_sites_空表() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    assert_not_found(env.site_api.list_sites(), "No sites found.");
}

#[test]
fn test_list_sites_按建档顺序() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    for owner in ["First Owner", "Second Owner", "Third Owner"] {
        env.site_api
            .create_site(SiteRequestBuilder::new(owner).build())
            .expect("建档失败");
    }

    let sites = env.site_api.list_sites().expect("查询失败");
    let owners: Vec<&str> = sites.iter().map(|s| s.owner_name.as_str()).collect();
    assert_eq!(owners, vec!["First Owner", "Second Owner", "Third Owner"]);
}

// ==========================================
// 工地材料名登记测试
// ==========================================

#[test]
fn test_attach_material_name_正常登记() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let site = env
        .site_api
        .create_site(SiteRequestBuilder::new("Rajesh Kumar").build())
        .expect("建档失败");

    let list = env
        .site_api
        .attach_material_name(&site.site_id, "Cement")
        .expect("登记失败");
    assert_eq!(list, vec!["Cement"]);

    let list = env
        .site_api
        .attach_material_name(&site.site_id, "Steel")
        .expect("登记失败");
    assert_eq!(list, vec!["Cement", "Steel"]);

    // 查询接口返回同样顺序
    let names = env
        .site_api
        .list_material_names(&site.site_id)
        .expect("查询失败");
    assert_eq!(names, vec!["Cement", "Steel"]);
}

#[test]
fn test_attach_material_name_精确去重() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let site = env
        .site_api
        .create_site(SiteRequestBuilder::new("Rajesh Kumar").build())
        .expect("建档失败");

    env.site_api
        .attach_material_name(&site.site_id, "Cement")
        .expect("登记失败");

    // 完全相同的名称被拒绝
    assert_conflict(
        env.site_api.attach_material_name(&site.site_id, "Cement"),
        "Material already exists in the siteMaterial array.",
    );

    // 名称原样存储，带空格视为不同条目
    let list = env
        .site_api
        .attach_material_name(&site.site_id, " Cement ")
        .expect("登记失败");
    assert_eq!(list, vec!["Cement", " Cement "]);
}

#[test]
fn test_attach_material_name_参数与工地校验() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    assert_invalid_input(
        env.site_api.attach_material_name("", "Cement"),
        "siteId and material_name are required.",
    );
    assert_invalid_input(
        env.site_api.attach_material_name("some-site", "   "),
        "siteId and material_name are required.",
    );
    assert_not_found(
        env.site_api.attach_material_name("missing-site", "Cement"),
        "Site not found.",
    );
}

#[test]
fn test_list_material_names_工地不存在() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    assert_not_found(
        env.site_api.list_material_names("missing-site"),
        "Site not found.",
    );
}
