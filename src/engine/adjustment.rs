// ==========================================
// 库存预测与补货决策系统 - 预测调整层
// ==========================================
// 职责: 在基线之上应用人工覆盖/已计算值/全局比例调整
// 优先级: 覆盖值 > 计算值 > 后端基线(仅正值生效)
// 红线: 展示预测量恒不低于已实现销量
// ==========================================

use crate::config::strategy_config::StrategyConfig;
use crate::domain::record::MonthlyRecord;
use crate::domain::types::RecordKind;

// ==========================================
// AdjustedForecast - 单月调整输出
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustedForecast {
    pub forecast_qty: f64,
    pub forecast_amount: f64,
    pub forecast_customers: f64,
}

// ==========================================
// SeriesRatios - 序列级均值兜底
// ==========================================
// 当月自身单价/客户比无定义时回退到序列均值
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesRatios {
    pub avg_unit_price: f64,
    pub avg_customer_ratio: f64,
}

impl SeriesRatios {
    /// 按整段序列的实际值计算均价与客户比; 总量为 0 时两者降级为 0
    pub fn from_series(series: &[MonthlyRecord]) -> Self {
        let total_qty: f64 = series.iter().map(|r| r.actual_qty).sum();
        if total_qty <= 0.0 {
            return Self::default();
        }
        let total_amount: f64 = series.iter().map(|r| r.actual_amount).sum();
        let total_customers: f64 = series.iter().map(|r| r.actual_customers).sum();
        Self {
            avg_unit_price: total_amount / total_qty,
            avg_customer_ratio: total_customers / total_qty,
        }
    }
}

// ==========================================
// AdjustmentLayer - 预测调整层
// ==========================================
// 纯函数,无副作用,可任意次重入
pub struct AdjustmentLayer;

impl AdjustmentLayer {
    pub fn new() -> Self {
        Self
    }

    /// 对单月记录应用调整规则
    ///
    /// 规则:
    /// 1) 基值 = 正覆盖值 > 正计算值 > 后端基线
    /// 2) ratio≠0 且 (未来月 或 存在覆盖/计算值) → 基值 × (1+ratio/100) 取整
    /// 3) 余量 = max(0, 基值 − 实际), 展示预测 = 实际 + 余量
    /// 4) 基值为未触碰的后端基线时,金额/客户数直接沿用后端数字;
    ///    否则按当月单价/客户比推算,缺失时回退序列均值
    pub fn apply(
        &self,
        record: &MonthlyRecord,
        config: &StrategyConfig,
        ratios: SeriesRatios,
    ) -> AdjustedForecast {
        let stored = config.stored_value(&record.month);
        let mut base = stored.unwrap_or(record.base_forecast_qty);

        let ratio_applies = config.ratio_adjust_pct != 0.0
            && (record.kind == RecordKind::Future || stored.is_some());
        if ratio_applies {
            base = (base * (1.0 + config.ratio_adjust_pct / 100.0)).round();
        }

        let remainder = (base - record.actual_qty).max(0.0);
        let forecast_qty = record.actual_qty + remainder;

        // 未触碰的后端基线: 金额/客户数沿用后端口径
        if stored.is_none() && !ratio_applies {
            return AdjustedForecast {
                forecast_qty,
                forecast_amount: record.base_forecast_amount,
                forecast_customers: record.base_forecast_customers,
            };
        }

        let unit_price = record.unit_price().unwrap_or(ratios.avg_unit_price);
        let customer_ratio = record.customer_ratio().unwrap_or(ratios.avg_customer_ratio);

        AdjustedForecast {
            forecast_qty,
            forecast_amount: forecast_qty * unit_price,
            forecast_customers: forecast_qty * customer_ratio,
        }
    }
}

impl Default for AdjustmentLayer {
    fn default() -> Self {
        Self::new()
    }
}
