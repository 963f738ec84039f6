use chrono::Local;
use std::error::Error;
use std::fs;
use std::path::Path;

use construction_ledger::api::{AppendTransactionRequest, CreateSiteRequest};
use construction_ledger::app::{get_default_db_path, AppState};
use construction_ledger::db::open_sqlite_connection;

fn main() -> Result<(), Box<dyn Error>> {
    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(get_default_db_path);

    backup_and_reset_db(&db_path)?;

    // AppState 负责建库、PRAGMA 与 API 装配
    let state = AppState::new(db_path.clone())?;

    seed_demo_data(&state)?;
    print_quick_counts(&db_path)?;

    Ok(())
}

fn backup_and_reset_db(db_path: &str) -> Result<(), Box<dyn Error>> {
    let path = Path::new(db_path);
    if !path.exists() {
        return Ok(());
    }

    let ts = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let backup_path = format!("{}.bak.{}", db_path, ts);
    fs::copy(path, &backup_path)?;
    fs::remove_file(path)?;

    eprintln!("Backed up {} -> {}", db_path, backup_path);
    Ok(())
}

fn seed_demo_data(state: &AppState) -> Result<(), Box<dyn Error>> {
    // 全局材料目录
    let (catalog, created) = state.catalog_api.register_materials(
        vec![
            "Cement".to_string(),
            "Steel".to_string(),
            "Sand".to_string(),
            "Bricks".to_string(),
            "Paint".to_string(),
        ],
        vec![
            "Bags".to_string(),
            "Kg".to_string(),
            "Cft".to_string(),
            "Nos".to_string(),
            "Litre".to_string(),
        ],
    )?;
    eprintln!(
        "Material catalog {}: {} entries",
        if created { "created" } else { "updated" },
        catalog.material_names.len()
    );

    // 工地（覆盖三种类型）
    let site_specs = [
        ("Rajesh Kumar", "Sector 21, Gurugram", "private", "9876543210", "2024-01-15"),
        ("PWD Haryana", "NH-48, Manesar", "gov", "01242340000", "2023-11-01"),
        ("Amit Sharma", "DLF Phase 3, Gurugram", "solo", "9812012345", "2024-03-05"),
    ];

    let mut site_ids: Vec<String> = Vec::new();
    for (owner, location, site_type, contact, date) in site_specs {
        let site = state.site_api.create_site(CreateSiteRequest {
            owner_name: Some(owner.to_string()),
            location: Some(location.to_string()),
            site_type: Some(site_type.to_string()),
            contact_number: Some(contact.to_string()),
            date_of_creation: Some(date.to_string()),
        })?;
        site_ids.push(site.site_id);
    }

    // 工地材料名清单
    for name in ["Cement", "Steel", "Sand"] {
        state.site_api.attach_material_name(&site_ids[0], name)?;
    }
    state.site_api.attach_material_name(&site_ids[1], "Cement")?;

    // 材料流水（实收金额由服务端派生）
    let txn_specs: [(usize, &str, f64, &str, f64, f64, f64); 6] = [
        (0, "Cement", 100.0, "Bags", 350.0, 40000.0, 110.0),
        (0, "Steel", 500.0, "Kg", 62.5, 35000.0, 520.0),
        (0, "Sand", 30.0, "Cft", 55.0, 2000.0, 35.0),
        (1, "Cement", 250.0, "Bags", 345.0, 90000.0, 260.0),
        (1, "Cement", 150.0, "Bags", 348.0, 0.0, 0.0),
        (2, "Bricks", 5000.0, "Nos", 8.0, 45000.0, 5500.0),
    ];

    for (site_idx, name, qty, unit, rate, req_money, req_material) in txn_specs {
        state.ledger_api.append_transaction(AppendTransactionRequest {
            material_name: Some(name.to_string()),
            received_quantity: Some(serde_json::json!(qty)),
            unit: Some(unit.to_string()),
            rate_of_material: Some(serde_json::json!(rate)),
            total_money_amount: None,
            total_required_money_amount: Some(serde_json::json!(req_money)),
            total_required_material_amount: Some(serde_json::json!(req_material)),
            site_id: Some(site_ids[site_idx].clone()),
        })?;
    }

    eprintln!("Seeded {} sites, {} transactions", site_ids.len(), txn_specs.len());
    Ok(())
}

fn print_quick_counts(db_path: &str) -> Result<(), Box<dyn Error>> {
    let conn = open_sqlite_connection(db_path)?;
    let tables = ["material_catalog", "site", "site_material_txn"];

    eprintln!("Row counts:");
    for t in tables {
        let sql = format!("SELECT COUNT(*) FROM {}", t);
        let c: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
        eprintln!("  {:<20} {}", t, c);
    }
    Ok(())
}
