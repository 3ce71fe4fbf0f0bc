// ==========================================
// 库存预测与补货决策系统 - 引擎编排器
// ==========================================
// 职责: f(历史序列, 策略配置, 在途批次, KPI, 今日) → DerivedView
// 数据流: 基线预测 → 调整层 → 合成序列 → 策略计算 + 补货模拟(并列)
//         年度汇总独立消费合成序列
// 红线: 无状态纯计算,参数每变一次整体重算一次
// ==========================================

use crate::config::strategy_config::StrategyConfig;
use crate::domain::record::{parse_month_key, InTransitBatch, KpiSnapshot, MonthlyRecord};
use crate::domain::types::RecordKind;
use crate::domain::view::{DerivedView, MonthlyViewPoint, SimulationDayPoint};
use crate::engine::adjustment::{AdjustmentLayer, SeriesRatios};
use crate::engine::aggregator::YearlyAggregator;
use crate::engine::forecast::ForecastEngine;
use crate::engine::policy::PolicyCalculator;
use crate::engine::simulator::{ReplenishmentSimulator, SimulationInput, SimulatorError};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use tracing::instrument;

// ==========================================
// ForecastOrchestrator - 引擎编排器
// ==========================================
pub struct ForecastOrchestrator {
    forecast: ForecastEngine,
    adjustment: AdjustmentLayer,
    policy: PolicyCalculator,
    simulator: ReplenishmentSimulator,
    aggregator: YearlyAggregator,
}

impl ForecastOrchestrator {
    pub fn new() -> Self {
        Self {
            forecast: ForecastEngine::new(),
            adjustment: AdjustmentLayer::new(),
            policy: PolicyCalculator::new(),
            simulator: ReplenishmentSimulator::new(),
            aggregator: YearlyAggregator::new(),
        }
    }

    /// 为全部未来月份计算基线预测
    ///
    /// 结果由调用方决定是否写入 config.calculated("计算"按钮语义);
    /// 编排器自身不落任何状态
    pub fn calculate_baselines(
        &self,
        series: &[MonthlyRecord],
        config: &StrategyConfig,
    ) -> BTreeMap<String, f64> {
        series
            .iter()
            .filter(|r| r.kind == RecordKind::Future)
            .map(|r| {
                let qty = self.forecast.compute_baseline(&r.month, config, series) as f64;
                (r.month.clone(), qty)
            })
            .collect()
    }

    /// 产品详情派生视图
    #[instrument(skip_all, fields(months = series.len(), batches = batches.len()))]
    pub fn derive_view(
        &self,
        series: &[MonthlyRecord],
        config: &StrategyConfig,
        batches: &[InTransitBatch],
        kpi: &KpiSnapshot,
        today: NaiveDate,
    ) -> Result<DerivedView, SimulatorError> {
        let cfg = config.normalized();
        let ratios = SeriesRatios::from_series(series);

        // 策略计算与补货模拟
        let policy = self.policy.evaluate(kpi, &cfg, today);
        let sim_input = SimulationInput {
            in_stock_qty: kpi.in_stock_qty,
            daily_sales_rate: kpi.daily_sales_rate(),
            rop_ref: policy.rop,
            safety_ref: policy.safety_stock_qty,
            eoq: cfg.eoq,
        };
        let simulation = self.simulator.simulate(&sim_input, batches, today)?;

        // 合成月度序列(调整后预测 + 当月模拟库存均值)
        let monthly: Vec<MonthlyViewPoint> = series
            .iter()
            .map(|record| {
                let adjusted = self.adjustment.apply(record, &cfg, ratios);
                MonthlyViewPoint {
                    month: record.month.clone(),
                    actual_qty: record.actual_qty,
                    actual_amount: record.actual_amount,
                    actual_customers: record.actual_customers,
                    forecast_qty: adjusted.forecast_qty,
                    forecast_amount: adjusted.forecast_amount,
                    forecast_customers: adjusted.forecast_customers,
                    stock_level: monthly_stock_average(&simulation, &record.month),
                    rop_ref: policy.rop,
                    safety_ref: policy.safety_stock_qty,
                }
            })
            .collect();

        let yearly = self.aggregator.group_by_year(&monthly);

        Ok(DerivedView {
            monthly,
            yearly,
            policy,
            simulation,
        })
    }
}

impl Default for ForecastOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

/// 某自然月内模拟库存均值; 该月无模拟点(视野之外)时为 0
fn monthly_stock_average(simulation: &[SimulationDayPoint], month: &str) -> f64 {
    let Some((year, m)) = parse_month_key(month) else {
        return 0.0;
    };
    let mut sum = 0.0;
    let mut count = 0u32;
    for point in simulation {
        if point.date.year() == year && point.date.month() == m {
            sum += point.stock_level as f64;
            count += 1;
        }
    }
    if count > 0 {
        sum / count as f64
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{BenchmarkType, LeadTimeMode};

    fn record(month: &str, kind: RecordKind, actual: f64, baseline: f64) -> MonthlyRecord {
        MonthlyRecord {
            month: month.to_string(),
            kind,
            actual_qty: actual,
            actual_amount: actual * 5.0,
            actual_customers: actual / 5.0,
            base_forecast_qty: baseline,
            base_forecast_amount: baseline * 5.0,
            base_forecast_customers: baseline / 5.0,
        }
    }

    fn series() -> Vec<MonthlyRecord> {
        vec![
            record("2026-03", RecordKind::Past, 600.0, 550.0),
            record("2026-04", RecordKind::Past, 620.0, 600.0),
            record("2026-05", RecordKind::Past, 580.0, 610.0),
            record("2026-06", RecordKind::Past, 640.0, 630.0),
            record("2026-07", RecordKind::Past, 660.0, 640.0),
            record("2026-08", RecordKind::Past, 610.0, 650.0),
            record("2026-09", RecordKind::Future, 0.0, 630.0),
            record("2026-10", RecordKind::Future, 0.0, 620.0),
        ]
    }

    fn kpi() -> KpiSnapshot {
        KpiSnapshot {
            in_stock_qty: 2000.0,
            in_transit_qty: 0.0,
            sales_30d: 600.0,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 28).unwrap()
    }

    #[test]
    fn test_derive_view_shape() {
        let orch = ForecastOrchestrator::new();
        let cfg = StrategyConfig {
            safety_stock_months: 1.0,
            lead_time_mode: LeadTimeMode::Fast,
            ..StrategyConfig::default()
        };
        let view = orch
            .derive_view(&series(), &cfg, &[], &kpi(), today())
            .unwrap();

        assert_eq!(view.monthly.len(), 8);
        assert_eq!(view.simulation.len(), 365);
        assert_eq!(view.yearly.len(), 1);
        assert_eq!(view.yearly[0].year, 2026);

        // 展示预测恒不低于实际
        for p in &view.monthly {
            assert!(p.forecast_qty >= p.actual_qty, "month {}", p.month);
        }
        // 月度参考线与策略一致
        assert!(view.monthly.iter().all(|p| p.rop_ref == view.policy.rop));
    }

    #[test]
    fn test_monthly_stock_average_within_horizon() {
        let orch = ForecastOrchestrator::new();
        let cfg = StrategyConfig::default();
        let view = orch
            .derive_view(&series(), &cfg, &[], &kpi(), today())
            .unwrap();

        // 2026-09 完整落在模拟视野内 → 有均值
        let sept = view.monthly.iter().find(|p| p.month == "2026-09").unwrap();
        assert!(sept.stock_level > 0.0);
        // 2026-03 在模拟起点之前 → 均值为 0
        let march = view.monthly.iter().find(|p| p.month == "2026-03").unwrap();
        assert_eq!(march.stock_level, 0.0);
    }

    #[test]
    fn test_calculate_baselines_only_future_months() {
        let orch = ForecastOrchestrator::new();
        let cfg = StrategyConfig {
            benchmark: BenchmarkType::Mom,
            mom_range: 6,
            ..StrategyConfig::default()
        };
        let calculated = orch.calculate_baselines(&series(), &cfg);
        assert_eq!(calculated.len(), 2);
        assert!(calculated.contains_key("2026-09"));
        assert!(calculated.contains_key("2026-10"));
        assert!(calculated.values().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_derive_view_is_idempotent() {
        let orch = ForecastOrchestrator::new();
        let cfg = StrategyConfig::default();
        let a = orch
            .derive_view(&series(), &cfg, &[], &kpi(), today())
            .unwrap();
        let b = orch
            .derive_view(&series(), &cfg, &[], &kpi(), today())
            .unwrap();
        assert_eq!(a.policy.rop, b.policy.rop);
        for (x, y) in a.monthly.iter().zip(&b.monthly) {
            assert_eq!(x.forecast_qty, y.forecast_qty);
            assert_eq!(x.stock_level, y.stock_level);
        }
    }
}
