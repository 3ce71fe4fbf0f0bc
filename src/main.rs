// ==========================================
// 库存预测与补货决策系统 - 命令行入口
// ==========================================
// 用法: inventory-dss [db_path] [sku]
// 行为: 打开(或创建)数据库,空库时写入演示数据,
//       对指定 SKU 全量重算并打印决策摘要
// ==========================================

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use inventory_dss::config::strategy_config::{StrategyConfig, SupplierInfo};
use inventory_dss::domain::record::{
    month_key_minus_months, InTransitBatch, KpiSnapshot, MonthlyRecord,
};
use inventory_dss::domain::types::RecordKind;
use inventory_dss::repository::SalesRepository;
use inventory_dss::{db, logging, ForecastApi};
use std::sync::{Arc, Mutex};
use tracing::info;

fn main() -> Result<()> {
    logging::init();

    info!("==================================================");
    info!("{}", inventory_dss::APP_NAME);
    info!("系统版本: {}", inventory_dss::VERSION);
    info!("==================================================");

    let mut args = std::env::args().skip(1);
    let db_path = args.next().unwrap_or_else(|| "inventory_dss.db".to_string());
    let sku = args.next().unwrap_or_else(|| "SKU-DEMO".to_string());

    info!("使用数据库: {}", db_path);
    let conn = db::open_sqlite_connection(&db_path)
        .with_context(|| format!("无法打开数据库: {}", db_path))?;
    db::init_schema(&conn).context("建表失败")?;
    let conn = Arc::new(Mutex::new(conn));

    let today = Utc::now().date_naive();
    seed_demo_data_if_empty(conn.clone(), &sku, today)?;

    let api = ForecastApi::new(conn);

    // "计算"语义: 刷新未来月份的基线预测并落库
    let config = api.calculate_forecasts(&sku, "cli")?;
    info!(
        "策略配置: 基准={}, 安全库存={}个月, 交期={}, EOQ={}",
        config.benchmark, config.safety_stock_months, config.lead_time_mode, config.eoq
    );

    let view = api.get_product_view(&sku, today)?;
    let policy = &view.policy;

    info!("-------------------- 决策摘要 --------------------");
    info!("安全库存: {}", policy.safety_stock_qty);
    info!("再订货点(ROP): {}", policy.rop);
    match policy.turnover_days {
        Some(days) => info!("周转天数: {:.1}", days),
        None => info!("周转天数: 无消耗,不适用"),
    }
    info!("缺货风险: {}", policy.risk);
    if policy.restock_immediately {
        info!("建议: 立即补货 {} 件", policy.suggested_restock_qty);
    } else if let Some(date) = policy.suggested_restock_date {
        info!("建议: {} 前补货 {} 件", date, policy.suggested_restock_qty);
    } else {
        info!("建议: 暂无补货需求");
    }

    let restocks = view.simulation.iter().filter(|p| p.restock_event).count();
    info!(
        "模拟: {} 天视野内触发 {} 次自动补货",
        view.simulation.len(),
        restocks
    );
    info!(
        "序列: 月度 {} 点 / 年度 {} 点",
        view.monthly.len(),
        view.yearly.len()
    );

    Ok(())
}

/// 空库时写入一套可运行的演示数据
fn seed_demo_data_if_empty(
    conn: Arc<Mutex<rusqlite::Connection>>,
    sku: &str,
    today: chrono::NaiveDate,
) -> Result<()> {
    let sales_repo = SalesRepository::new(conn.clone());
    if !sales_repo.list_series(sku)?.is_empty() {
        return Ok(());
    }
    info!("空数据库,写入演示数据: {}", sku);

    let this_month = today.format("%Y-%m").to_string();

    // 过去 12 个月 + 未来 3 个月
    for back in (1..=12).rev() {
        let month = month_key_minus_months(&this_month, back).context("月份键计算失败")?;
        let qty = 800.0 + (back as f64 * 17.0) % 240.0;
        sales_repo.upsert_monthly_record(
            sku,
            &MonthlyRecord {
                month,
                kind: RecordKind::Past,
                actual_qty: qty,
                actual_amount: qty * 12.5,
                actual_customers: qty / 6.0,
                base_forecast_qty: qty * 0.95,
                base_forecast_amount: qty * 0.95 * 12.5,
                base_forecast_customers: qty * 0.95 / 6.0,
            },
        )?;
    }
    for ahead in 0..3 {
        let month = shift_forward(&this_month, ahead).context("月份键计算失败")?;
        sales_repo.upsert_monthly_record(
            sku,
            &MonthlyRecord {
                month,
                kind: RecordKind::Future,
                actual_qty: 0.0,
                actual_amount: 0.0,
                actual_customers: 0.0,
                base_forecast_qty: 880.0,
                base_forecast_amount: 880.0 * 12.5,
                base_forecast_customers: 880.0 / 6.0,
            },
        )?;
    }

    sales_repo.upsert_kpi(
        sku,
        &KpiSnapshot {
            in_stock_qty: 2600.0,
            in_transit_qty: 400.0,
            sales_30d: 900.0,
        },
    )?;
    sales_repo.insert_in_transit(
        sku,
        &InTransitBatch {
            batch_id: "B-SEED-1".to_string(),
            arrival_date: today + Duration::days(12),
            qty: 400.0,
            overdue: false,
            overdue_days: 0,
        },
    )?;

    // 初始策略配置(带供应商快照,便于直接演示下单)
    let api = ForecastApi::new(conn);
    let config = StrategyConfig {
        safety_stock_months: 2.0,
        eoq: 1200,
        supplier: SupplierInfo {
            name: "演示供应商".to_string(),
            code: "SUP-001".to_string(),
            rating: 4.5,
            price: 12.5,
        },
        ..StrategyConfig::default()
    };
    api.save_strategy_config(sku, &config, "cli", Some("初始化演示配置"))?;
    Ok(())
}

/// 月份键前推 n 个月
fn shift_forward(key: &str, n: u32) -> Option<String> {
    let (year, month) = inventory_dss::domain::record::parse_month_key(key)?;
    let total = year as i64 * 12 + (month as i64 - 1) + n as i64;
    let y = total.div_euclid(12);
    let m = total.rem_euclid(12) + 1;
    Some(format!("{:04}-{:02}", y, m))
}
