// ==========================================
// 引擎管线集成测试
// ==========================================
// 测试目标: 仓储取数 → 编排器全量重算的端到端行为
// 覆盖范围: 合成序列不变量 / 策略指标 / 模拟输出 / 年度汇总
// ==========================================


use inventory_dss::domain::types::LeadTimeMode;
use inventory_dss::engine::ForecastOrchestrator;
use inventory_dss::repository::SalesRepository;
use test_helpers::{config_with_supplier, create_test_db, seed_standard_sku, today, TEST_SKU};

#[test]
fn test_full_pipeline_from_repository() {
    let (_db, conn) = create_test_db();
    seed_standard_sku(&conn);

    let repo = SalesRepository::new(conn);
    let series = repo.list_series(TEST_SKU).unwrap();
    let batches = repo.list_in_transit(TEST_SKU).unwrap();
    let kpi = repo.get_kpi(TEST_SKU).unwrap();

    assert_eq!(series.len(), 9);
    assert_eq!(batches.len(), 1);

    let orch = ForecastOrchestrator::new();
    let cfg = config_with_supplier();
    let view = orch
        .derive_view(&series, &cfg, &batches, &kpi, today())
        .unwrap();

    // 月度序列与输入同长,月份升序
    assert_eq!(view.monthly.len(), 9);
    for pair in view.monthly.windows(2) {
        assert!(pair[0].month < pair[1].month);
    }

    // 不变量: 展示预测恒不低于实际
    for p in &view.monthly {
        assert!(p.forecast_qty >= p.actual_qty, "month {}", p.month);
    }

    // 策略指标: 安全库存 = round(900×2) = 1800
    // ROP = 1800 + 30×30 − 400(在途) = 2300
    assert_eq!(view.policy.safety_stock_qty, 1800.0);
    assert_eq!(view.policy.rop, 2300.0);

    // 模拟: 365 点, 参考线冻结为起点值
    assert_eq!(view.simulation.len(), 365);
    assert!(view.simulation.iter().all(|p| p.rop_ref == 2300.0));

    // 在途批次在第 10 天入库
    let arrival = view
        .simulation
        .iter()
        .find(|p| p.inbound_qty > 0.0)
        .expect("应有到货点");
    assert_eq!(arrival.date, today() + chrono::Duration::days(10));
    assert_eq!(arrival.inbound_qty, 400.0);

    // 持续消耗下必然出现自动补货事件
    assert!(view.simulation.iter().any(|p| p.restock_event));

    // 年度汇总: 全部落在 2026
    assert_eq!(view.yearly.len(), 1);
    let y = &view.yearly[0];
    assert_eq!(y.year, 2026);
    let monthly_actual_sum: f64 = view.monthly.iter().map(|p| p.actual_qty).sum();
    assert!((y.actual_qty - monthly_actual_sum).abs() < 1e-6);
    assert_eq!(y.rop_ref, 0.0);
    assert_eq!(y.safety_ref, 0.0);
}

#[test]
fn test_recompute_is_stable_across_calls() {
    // "参数每变一次全量重算"前提: 相同输入多次调用结果一致
    let (_db, conn) = create_test_db();
    seed_standard_sku(&conn);

    let repo = SalesRepository::new(conn);
    let series = repo.list_series(TEST_SKU).unwrap();
    let batches = repo.list_in_transit(TEST_SKU).unwrap();
    let kpi = repo.get_kpi(TEST_SKU).unwrap();

    let orch = ForecastOrchestrator::new();
    let cfg = config_with_supplier();
    let a = orch
        .derive_view(&series, &cfg, &batches, &kpi, today())
        .unwrap();
    let b = orch
        .derive_view(&series, &cfg, &batches, &kpi, today())
        .unwrap();

    assert_eq!(a.policy.rop, b.policy.rop);
    assert_eq!(a.simulation.len(), b.simulation.len());
    for (x, y) in a.simulation.iter().zip(&b.simulation) {
        assert_eq!(x.stock_level, y.stock_level);
    }
}

#[test]
fn test_lead_time_mode_changes_rop() {
    let (_db, conn) = create_test_db();
    seed_standard_sku(&conn);

    let repo = SalesRepository::new(conn);
    let series = repo.list_series(TEST_SKU).unwrap();
    let batches = repo.list_in_transit(TEST_SKU).unwrap();
    let kpi = repo.get_kpi(TEST_SKU).unwrap();

    let orch = ForecastOrchestrator::new();
    let mut cfg = config_with_supplier();
    cfg.lead_time_mode = LeadTimeMode::Fast;
    let view = orch
        .derive_view(&series, &cfg, &batches, &kpi, today())
        .unwrap();

    // ROP = 1800 + 30×7 − 400 = 1610
    assert_eq!(view.policy.rop, 1610.0);
}
