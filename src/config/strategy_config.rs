// ==========================================
// 库存预测与补货决策系统 - 补货策略配置
// ==========================================
// 职责: 产品维度的策略配置(持久化对象)
// 存储: strategy_config 表, 按 SKU 整体替换
// 红线: 保存即审计(每次保存追加 action_log)
// ==========================================

use crate::domain::types::{BenchmarkType, LeadTimeMode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 安全库存月数下限
pub const SAFETY_STOCK_MONTHS_MIN: f64 = 0.5;
/// 安全库存月数上限
pub const SAFETY_STOCK_MONTHS_MAX: f64 = 12.0;

// ==========================================
// SupplierInfo - 供应商快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SupplierInfo {
    pub name: String,
    pub code: String,
    pub rating: f64,
    pub price: f64,
}

// ==========================================
// StrategyConfig - 补货策略配置
// ==========================================
// 不可变值对象: 引擎只读取,修改走整体替换
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// 安全库存月数(0.5~12)
    pub safety_stock_months: f64,

    /// 交期模式(fast=7天 / economic=30天)
    pub lead_time_mode: LeadTimeMode,

    /// 经济订货批量(固定批量,来源见 DESIGN.md 开放问题)
    pub eoq: i64,

    /// 预测基准类型
    pub benchmark: BenchmarkType,

    // ===== 环比(MoM)参数 =====
    /// 环比回看月数(3/6/12)
    pub mom_range: u32,
    /// 时间分段点(占 R 的百分比,递增对)
    pub mom_split_pct: (f64, f64),
    /// 权重分段点(百分比,递增对): 权重 = (w1, w2−w1, 100−w2)/100
    pub mom_weight_pct: (f64, f64),

    // ===== 同比(YoY)参数 =====
    /// 同比回看年数(1~3)
    pub yoy_range: u32,
    /// 同比权重分段点(range=2 只用第一个)
    pub yoy_weight_pct: (f64, f64),

    /// 全局比例调整(百分比,可为负)
    pub ratio_adjust_pct: f64,

    /// 人工覆盖值(月份 → 数量), 仅正值生效
    #[serde(default)]
    pub overrides: BTreeMap<String, f64>,

    /// 已计算预测值(月份 → 数量), 仅正值生效
    #[serde(default)]
    pub calculated: BTreeMap<String, f64>,

    /// 供应商快照
    #[serde(default)]
    pub supplier: SupplierInfo,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            safety_stock_months: 1.0,
            lead_time_mode: LeadTimeMode::Economic,
            eoq: 1000,
            benchmark: BenchmarkType::Mom,
            mom_range: 6,
            mom_split_pct: (33.0, 66.0),
            mom_weight_pct: (60.0, 90.0),
            yoy_range: 1,
            yoy_weight_pct: (50.0, 80.0),
            ratio_adjust_pct: 0.0,
            overrides: BTreeMap::new(),
            calculated: BTreeMap::new(),
            supplier: SupplierInfo::default(),
        }
    }
}

impl StrategyConfig {
    /// 规范化配置(上游不校验滑块输入,使用前统一收口)
    ///
    /// 规则:
    /// - 安全库存月数收敛到 [0.5, 12]
    /// - mom_range 吸附到 {3, 6, 12} 中最近值
    /// - yoy_range 收敛到 [1, 3]
    /// - 百分比对收敛到 [0, 100] 且非递减
    pub fn normalized(&self) -> Self {
        let mut cfg = self.clone();
        cfg.safety_stock_months = cfg
            .safety_stock_months
            .clamp(SAFETY_STOCK_MONTHS_MIN, SAFETY_STOCK_MONTHS_MAX);
        cfg.mom_range = snap_mom_range(cfg.mom_range);
        cfg.yoy_range = cfg.yoy_range.clamp(1, 3);
        cfg.mom_split_pct = normalize_pct_pair(cfg.mom_split_pct);
        cfg.mom_weight_pct = normalize_pct_pair(cfg.mom_weight_pct);
        cfg.yoy_weight_pct = normalize_pct_pair(cfg.yoy_weight_pct);
        cfg
    }

    /// 指定月份的生效预测来源: 覆盖值 > 计算值 > None
    ///
    /// 仅正值参与优先级(存量 0/负值视为未设置)
    pub fn stored_value(&self, month: &str) -> Option<f64> {
        if let Some(&v) = self.overrides.get(month) {
            if v > 0.0 {
                return Some(v);
            }
        }
        if let Some(&v) = self.calculated.get(month) {
            if v > 0.0 {
                return Some(v);
            }
        }
        None
    }
}

/// MoM 回看月数吸附到合法档位 {3, 6, 12}
fn snap_mom_range(r: u32) -> u32 {
    const ALLOWED: [u32; 3] = [3, 6, 12];
    ALLOWED
        .into_iter()
        .min_by_key(|a| a.abs_diff(r))
        .unwrap_or(6)
}

/// 百分比对收敛到 [0,100] 且非递减
fn normalize_pct_pair(pair: (f64, f64)) -> (f64, f64) {
    let a = pair.0.clamp(0.0, 100.0);
    let b = pair.1.clamp(0.0, 100.0);
    if b < a {
        (a, a)
    } else {
        (a, b)
    }
}

/// 两个分段点展开为三段权重 (w1, w2−w1, 100−w2)/100
///
/// 输入须已规范化(非递减, ≤100)
pub fn three_way_weights(pair: (f64, f64)) -> (f64, f64, f64) {
    let (w1, w2) = normalize_pct_pair(pair);
    (w1 / 100.0, (w2 - w1) / 100.0, (100.0 - w2) / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_clamps_ranges() {
        let cfg = StrategyConfig {
            safety_stock_months: 20.0,
            mom_range: 5,
            yoy_range: 9,
            ..StrategyConfig::default()
        };
        let n = cfg.normalized();
        assert_eq!(n.safety_stock_months, 12.0);
        assert_eq!(n.mom_range, 6);
        assert_eq!(n.yoy_range, 3);
    }

    #[test]
    fn test_normalize_pct_pair_non_decreasing() {
        assert_eq!(normalize_pct_pair((80.0, 30.0)), (80.0, 80.0));
        assert_eq!(normalize_pct_pair((150.0, 160.0)), (100.0, 100.0));
        assert_eq!(normalize_pct_pair((33.0, 66.0)), (33.0, 66.0));
    }

    #[test]
    fn test_three_way_weights() {
        let (a, b, c) = three_way_weights((60.0, 90.0));
        assert!((a - 0.6).abs() < 1e-9);
        assert!((b - 0.3).abs() < 1e-9);
        assert!((c - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_stored_value_precedence() {
        let mut cfg = StrategyConfig::default();
        cfg.calculated.insert("2026-09".to_string(), 120.0);
        assert_eq!(cfg.stored_value("2026-09"), Some(120.0));

        cfg.overrides.insert("2026-09".to_string(), 200.0);
        assert_eq!(cfg.stored_value("2026-09"), Some(200.0));

        // 覆盖值清零后回落到计算值
        cfg.overrides.insert("2026-09".to_string(), 0.0);
        assert_eq!(cfg.stored_value("2026-09"), Some(120.0));

        // 两者都清零回落到 None(即后端基线)
        cfg.calculated.insert("2026-09".to_string(), 0.0);
        assert_eq!(cfg.stored_value("2026-09"), None);
    }

    #[test]
    fn test_config_json_roundtrip() {
        let mut cfg = StrategyConfig::default();
        cfg.overrides.insert("2026-10".to_string(), 88.0);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: StrategyConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
