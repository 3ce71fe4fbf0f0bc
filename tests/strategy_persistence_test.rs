// ==========================================
// 策略配置持久化集成测试
// ==========================================
// 测试目标: 整体替换保存 / 读取回放 / 保存即审计 / 入库前归一化
// ==========================================


use inventory_dss::config::strategy_config::StrategyConfig;
use inventory_dss::domain::action_log::ActionType;
use inventory_dss::repository::{ActionLogRepository, StrategyRepository};
use test_helpers::{config_with_supplier, create_test_db, TEST_SKU};

#[test]
fn test_load_before_save_returns_none() {
    let (_db, conn) = create_test_db();
    let repo = StrategyRepository::new(conn);
    assert!(repo.load(TEST_SKU).unwrap().is_none());
}

#[test]
fn test_save_then_load_roundtrip() {
    let (_db, conn) = create_test_db();
    let repo = StrategyRepository::new(conn);

    let mut cfg = config_with_supplier();
    cfg.overrides.insert("2026-09".to_string(), 950.0);
    cfg.calculated.insert("2026-10".to_string(), 880.0);

    let saved = repo.save(TEST_SKU, &cfg, "tester", Some("首次保存")).unwrap();
    let loaded = repo.load(TEST_SKU).unwrap().expect("应能读到配置");
    assert_eq!(loaded, saved);
    assert_eq!(loaded.overrides.get("2026-09"), Some(&950.0));
    assert_eq!(loaded.supplier.code, "SUP-001");
}

#[test]
fn test_save_replaces_whole_object() {
    // 最后写入生效,无字段级合并
    let (_db, conn) = create_test_db();
    let repo = StrategyRepository::new(conn);

    let mut first = config_with_supplier();
    first.overrides.insert("2026-09".to_string(), 950.0);
    repo.save(TEST_SKU, &first, "tester", None).unwrap();

    let second = StrategyConfig {
        eoq: 500,
        ..StrategyConfig::default()
    };
    repo.save(TEST_SKU, &second, "tester", None).unwrap();

    let loaded = repo.load(TEST_SKU).unwrap().unwrap();
    assert_eq!(loaded.eoq, 500);
    // 第一版的覆盖值与供应商不保留
    assert!(loaded.overrides.is_empty());
    assert!(loaded.supplier.code.is_empty());
}

#[test]
fn test_every_save_appends_audit_entry() {
    let (_db, conn) = create_test_db();
    let repo = StrategyRepository::new(conn.clone());
    let logs = ActionLogRepository::new(conn);

    let cfg = config_with_supplier();
    repo.save(TEST_SKU, &cfg, "alice", Some("调整安全库存")).unwrap();
    repo.save(TEST_SKU, &cfg, "bob", None).unwrap();
    repo.save(TEST_SKU, &cfg, "alice", Some("再次调整")).unwrap();

    let entries = logs.list_by_sku(TEST_SKU).unwrap();
    assert_eq!(entries.len(), 3);
    assert!(entries
        .iter()
        .all(|e| e.action_type == ActionType::SaveStrategy));
    // 审计负载里能还原保存的配置
    let payload = entries[0].payload_json.as_ref().expect("应有负载");
    let replayed: StrategyConfig = serde_json::from_value(payload.clone()).unwrap();
    assert_eq!(replayed.eoq, cfg.eoq);
    // 说明文字原样入档
    assert!(entries.iter().any(|e| e.detail.as_deref() == Some("调整安全库存")));
}

#[test]
fn test_save_normalizes_slider_pairs() {
    // 上游不校验滑块,入库前统一收口
    let (_db, conn) = create_test_db();
    let repo = StrategyRepository::new(conn);

    let cfg = StrategyConfig {
        safety_stock_months: 99.0,
        mom_split_pct: (80.0, 20.0),
        yoy_range: 7,
        ..config_with_supplier()
    };
    let saved = repo.save(TEST_SKU, &cfg, "tester", None).unwrap();
    assert_eq!(saved.safety_stock_months, 12.0);
    assert_eq!(saved.mom_split_pct, (80.0, 80.0));
    assert_eq!(saved.yoy_range, 3);

    let loaded = repo.load(TEST_SKU).unwrap().unwrap();
    assert_eq!(loaded, saved);
}
