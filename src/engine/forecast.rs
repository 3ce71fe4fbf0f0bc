// ==========================================
// 库存预测与补货决策系统 - 基线预测引擎
// ==========================================
// 职责: 按环比(MoM)或同比(YoY)模型计算单个未来月份的基线预测量
// 输入: 目标月份 + 策略配置 + 历史月度序列
// 输出: 非负整数预测量
// 红线: 数据缺失按 0 计,引擎不因数据质量抛错
// ==========================================

use crate::config::strategy_config::{three_way_weights, StrategyConfig};
use crate::domain::record::{month_key_minus_months, month_key_minus_years, MonthlyRecord};
use crate::domain::types::BenchmarkType;
use std::collections::HashMap;
use tracing::instrument;

// ==========================================
// ForecastEngine - 基线预测引擎
// ==========================================
pub struct ForecastEngine;

impl ForecastEngine {
    pub fn new() -> Self {
        Self
    }

    /// 计算目标月份的基线预测量
    ///
    /// 模型选择由 config.benchmark 决定; 配置先统一归一化,
    /// 滑块乱序/越界在此收口(上游不校验)。
    #[instrument(skip(self, config, series), fields(month = target_month, benchmark = %config.benchmark))]
    pub fn compute_baseline(
        &self,
        target_month: &str,
        config: &StrategyConfig,
        series: &[MonthlyRecord],
    ) -> i64 {
        let cfg = config.normalized();
        let actuals: HashMap<&str, f64> = series
            .iter()
            .map(|r| (r.month.as_str(), r.actual_qty))
            .collect();

        let raw = match cfg.benchmark {
            BenchmarkType::Mom => self.mom_baseline(target_month, &cfg, &actuals),
            BenchmarkType::Yoy => self.yoy_baseline(target_month, &cfg, &actuals),
        };

        raw.round().max(0.0) as i64
    }

    // ==========================================
    // 环比模型 (MoM)
    // ==========================================

    /// 最近 R 个月按两个时间分段点切成三段,段内求均值,再加权合成
    ///
    /// 规则:
    /// 1) 窗口 = 目标月之前的 R 个自然月,最近月在前,缺失月按 0 计
    /// 2) 分段边界 = round(R × 分段点 / 100)
    /// 3) 权重 = (w1, w2−w1, 100−w2)/100
    /// 4) 归一化分母只累加非空段的权重,避免空段拉偏
    fn mom_baseline(
        &self,
        target_month: &str,
        cfg: &StrategyConfig,
        actuals: &HashMap<&str, f64>,
    ) -> f64 {
        let r = cfg.mom_range as usize;

        // 窗口取数: 最近月在前
        let mut window = Vec::with_capacity(r);
        for back in 1..=r {
            let qty = month_key_minus_months(target_month, back as u32)
                .and_then(|m| actuals.get(m.as_str()).copied())
                .unwrap_or(0.0);
            window.push(qty);
        }

        let (t1, t2) = cfg.mom_split_pct;
        let idx1 = ((r as f64 * t1 / 100.0).round() as usize).min(r);
        let idx2 = ((r as f64 * t2 / 100.0).round() as usize).clamp(idx1, r);

        let segments = [&window[..idx1], &window[idx1..idx2], &window[idx2..]];
        let weights = three_way_weights(cfg.mom_weight_pct);
        let weights = [weights.0, weights.1, weights.2];

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (seg, w) in segments.iter().zip(weights) {
            if seg.is_empty() {
                continue;
            }
            let avg = seg.iter().sum::<f64>() / seg.len() as f64;
            numerator += avg * w;
            denominator += w;
        }

        if denominator > 0.0 {
            numerator / denominator
        } else {
            0.0
        }
    }

    // ==========================================
    // 同比模型 (YoY)
    // ==========================================

    /// 回看 1~3 年同一自然月
    ///
    /// 规则:
    /// - range=1: 去年同月值原样返回(权重滑块不参与)
    /// - range=2: v1·w1 + v2·(1−w1)
    /// - range=3: 按 (w1, w2−w1, 100−w2)/100 三项合成
    /// - 缺失年份按 0 计
    fn yoy_baseline(
        &self,
        target_month: &str,
        cfg: &StrategyConfig,
        actuals: &HashMap<&str, f64>,
    ) -> f64 {
        let value_at = |years_back: u32| -> f64 {
            month_key_minus_years(target_month, years_back)
                .and_then(|m| actuals.get(m.as_str()).copied())
                .unwrap_or(0.0)
        };

        match cfg.yoy_range {
            1 => value_at(1),
            2 => {
                let w = (cfg.yoy_weight_pct.0).clamp(0.0, 100.0) / 100.0;
                value_at(1) * w + value_at(2) * (1.0 - w)
            }
            _ => {
                let (a, b, c) = three_way_weights(cfg.yoy_weight_pct);
                value_at(1) * a + value_at(2) * b + value_at(3) * c
            }
        }
    }
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self::new()
    }
}
