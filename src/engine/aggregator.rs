// ==========================================
// 库存预测与补货决策系统 - 年度汇总引擎
// ==========================================
// 职责: 月度合成序列 → 年度序列(切换视图粒度)
// 规则: 数量/金额/客户数求和; 模拟库存取均值;
//       ROP/安全库存在年粒度无意义,置 0
// ==========================================

use crate::domain::record::month_key_year;
use crate::domain::view::{MonthlyViewPoint, YearlyViewPoint};
use std::collections::BTreeMap;

// ==========================================
// YearlyAggregator - 年度汇总引擎
// ==========================================
pub struct YearlyAggregator;

impl YearlyAggregator {
    pub fn new() -> Self {
        Self
    }

    /// 按年份汇总月度序列,输出按年份升序
    ///
    /// 月份键非法的点跳过,不中断整体汇总
    pub fn group_by_year(&self, monthly: &[MonthlyViewPoint]) -> Vec<YearlyViewPoint> {
        let mut buckets: BTreeMap<i32, (YearlyViewPoint, u32)> = BTreeMap::new();

        for point in monthly {
            let Some(year) = month_key_year(&point.month) else {
                continue;
            };
            let (acc, count) = buckets.entry(year).or_insert_with(|| {
                (
                    YearlyViewPoint {
                        year,
                        actual_qty: 0.0,
                        actual_amount: 0.0,
                        actual_customers: 0.0,
                        forecast_qty: 0.0,
                        forecast_amount: 0.0,
                        forecast_customers: 0.0,
                        stock_level: 0.0,
                        rop_ref: 0.0,
                        safety_ref: 0.0,
                    },
                    0,
                )
            });
            acc.actual_qty += point.actual_qty;
            acc.actual_amount += point.actual_amount;
            acc.actual_customers += point.actual_customers;
            acc.forecast_qty += point.forecast_qty;
            acc.forecast_amount += point.forecast_amount;
            acc.forecast_customers += point.forecast_customers;
            acc.stock_level += point.stock_level;
            *count += 1;
        }

        buckets
            .into_values()
            .map(|(mut acc, count)| {
                if count > 0 {
                    acc.stock_level /= count as f64;
                }
                acc
            })
            .collect()
    }
}

impl Default for YearlyAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(month: &str, qty: f64, stock: f64) -> MonthlyViewPoint {
        MonthlyViewPoint {
            month: month.to_string(),
            actual_qty: qty,
            actual_amount: qty * 2.0,
            actual_customers: qty / 2.0,
            forecast_qty: qty + 10.0,
            forecast_amount: (qty + 10.0) * 2.0,
            forecast_customers: (qty + 10.0) / 2.0,
            stock_level: stock,
            rop_ref: 300.0,
            safety_ref: 150.0,
        }
    }

    #[test]
    fn test_sums_quantities_and_averages_stock() {
        let agg = YearlyAggregator::new();
        let monthly = vec![
            point("2025-11", 100.0, 400.0),
            point("2025-12", 200.0, 600.0),
            point("2026-01", 50.0, 900.0),
        ];
        let yearly = agg.group_by_year(&monthly);
        assert_eq!(yearly.len(), 2);

        let y2025 = &yearly[0];
        assert_eq!(y2025.year, 2025);
        assert_eq!(y2025.actual_qty, 300.0);
        assert_eq!(y2025.forecast_qty, 320.0);
        assert_eq!(y2025.actual_amount, 600.0);
        // 库存取均值而非求和
        assert_eq!(y2025.stock_level, 500.0);

        let y2026 = &yearly[1];
        assert_eq!(y2026.year, 2026);
        assert_eq!(y2026.actual_qty, 50.0);
        assert_eq!(y2026.stock_level, 900.0);
    }

    #[test]
    fn test_reference_lines_zeroed_at_year_granularity() {
        let agg = YearlyAggregator::new();
        let yearly = agg.group_by_year(&[point("2026-03", 10.0, 100.0)]);
        assert_eq!(yearly[0].rop_ref, 0.0);
        assert_eq!(yearly[0].safety_ref, 0.0);
    }

    #[test]
    fn test_malformed_month_key_skipped() {
        let agg = YearlyAggregator::new();
        let monthly = vec![point("not-a-month", 10.0, 1.0), point("2026-05", 20.0, 2.0)];
        let yearly = agg.group_by_year(&monthly);
        assert_eq!(yearly.len(), 1);
        assert_eq!(yearly[0].actual_qty, 20.0);
    }

    #[test]
    fn test_empty_input() {
        let agg = YearlyAggregator::new();
        assert!(agg.group_by_year(&[]).is_empty());
    }
}
