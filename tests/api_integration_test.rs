// ==========================================
// ForecastApi 集成测试
// ==========================================
// 测试目标: 业务接口端到端行为
// 覆盖范围: 计算落库 / 视图获取 / 采购下单 / 审计 / 错误口径
// ==========================================


use inventory_dss::api::{ApiError, ForecastApi};
use inventory_dss::config::strategy_config::StrategyConfig;
use inventory_dss::domain::action_log::ActionType;
use inventory_dss::repository::PurchaseOrderRepository;
use test_helpers::{config_with_supplier, create_test_db, seed_standard_sku, today, TEST_SKU};

#[test]
fn test_get_product_view_end_to_end() {
    let (_db, conn) = create_test_db();
    seed_standard_sku(&conn);
    let api = ForecastApi::new(conn);

    api.save_strategy_config(TEST_SKU, &config_with_supplier(), "tester", None)
        .unwrap();

    let view = api.get_product_view(TEST_SKU, today()).unwrap();
    assert_eq!(view.monthly.len(), 9);
    assert_eq!(view.simulation.len(), 365);
    assert_eq!(view.policy.suggested_restock_qty, 1200);
}

#[test]
fn test_view_with_unsaved_config_uses_defaults() {
    let (_db, conn) = create_test_db();
    seed_standard_sku(&conn);
    let api = ForecastApi::new(conn);

    // 未保存过配置也能出视图(默认配置)
    let view = api.get_product_view(TEST_SKU, today()).unwrap();
    let default_cfg = StrategyConfig::default();
    assert_eq!(view.policy.suggested_restock_qty, default_cfg.eoq);
}

#[test]
fn test_missing_kpi_is_not_found() {
    let (_db, conn) = create_test_db();
    let api = ForecastApi::new(conn);
    let err = api.get_product_view("SKU-MISSING", today()).unwrap_err();
    match err {
        ApiError::NotFound(msg) => assert!(msg.contains("SKU-MISSING")),
        other => panic!("应为 NotFound, 实际: {:?}", other),
    }
}

#[test]
fn test_calculate_forecasts_persists_calculated_map() {
    let (_db, conn) = create_test_db();
    seed_standard_sku(&conn);
    let api = ForecastApi::new(conn);

    api.save_strategy_config(TEST_SKU, &config_with_supplier(), "tester", None)
        .unwrap();
    let config = api.calculate_forecasts(TEST_SKU, "tester").unwrap();

    // 两个未来月份都有计算值
    assert_eq!(config.calculated.len(), 2);
    assert!(config.calculated.contains_key("2026-09"));
    assert!(config.calculated.contains_key("2026-10"));

    // 落库后的配置与返回值一致
    let loaded = api.get_strategy_config(TEST_SKU).unwrap();
    assert_eq!(loaded.calculated, config.calculated);

    // 计算值进入展示预测(优先于后端基线)
    let view = api.get_product_view(TEST_SKU, today()).unwrap();
    let sept = view.monthly.iter().find(|p| p.month == "2026-09").unwrap();
    assert_eq!(sept.forecast_qty, *config.calculated.get("2026-09").unwrap());
}

#[test]
fn test_override_beats_calculated_through_api() {
    let (_db, conn) = create_test_db();
    seed_standard_sku(&conn);
    let api = ForecastApi::new(conn);

    api.save_strategy_config(TEST_SKU, &config_with_supplier(), "tester", None)
        .unwrap();
    let mut config = api.calculate_forecasts(TEST_SKU, "tester").unwrap();

    config.overrides.insert("2026-09".to_string(), 1500.0);
    api.save_strategy_config(TEST_SKU, &config, "tester", Some("人工覆盖9月"))
        .unwrap();

    let view = api.get_product_view(TEST_SKU, today()).unwrap();
    let sept = view.monthly.iter().find(|p| p.month == "2026-09").unwrap();
    assert_eq!(sept.forecast_qty, 1500.0);
}

#[test]
fn test_create_purchase_order_uses_eoq_and_supplier() {
    let (_db, conn) = create_test_db();
    seed_standard_sku(&conn);
    let api = ForecastApi::new(conn.clone());

    api.save_strategy_config(TEST_SKU, &config_with_supplier(), "tester", None)
        .unwrap();
    let order = api.create_purchase_order(TEST_SKU, "tester").unwrap();
    assert_eq!(order.qty, 1200);
    assert_eq!(order.supplier_code, "SUP-001");

    let orders = PurchaseOrderRepository::new(conn)
        .list_by_sku(TEST_SKU)
        .unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order_id, order.order_id);

    // 下单留审计
    let logs = api.list_action_logs(TEST_SKU).unwrap();
    assert!(logs
        .iter()
        .any(|l| l.action_type == ActionType::CreatePurchaseOrder));
}

#[test]
fn test_create_purchase_order_without_supplier_rejected() {
    let (_db, conn) = create_test_db();
    seed_standard_sku(&conn);
    let api = ForecastApi::new(conn);

    // 默认配置无供应商快照
    let err = api.create_purchase_order(TEST_SKU, "tester").unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}
