// ==========================================
// 库存预测与补货决策系统 - 报表导出
// ==========================================
// 职责: 两表导出("month" 月度明细 / "day" 占位表)
// 说明: csv 无多 sheet 容器,两表落为同名前缀的两个文件,
//       "day" 表仅保留占位行以维持两表格式兼容
// ==========================================

use crate::domain::view::MonthlyViewPoint;
use csv::Writer;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// 导出错误
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("写入 CSV 失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("文件 IO 失败: {0}")]
    Io(#[from] std::io::Error),
}

// ==========================================
// ReportExporter - 报表导出器
// ==========================================
pub struct ReportExporter;

impl ReportExporter {
    pub fn new() -> Self {
        Self
    }

    /// 导出 SKU 的两表报表,返回 (month 表路径, day 表路径)
    pub fn export(
        &self,
        sku: &str,
        monthly: &[MonthlyViewPoint],
        dir: &Path,
    ) -> Result<(PathBuf, PathBuf), ExportError> {
        std::fs::create_dir_all(dir)?;

        let month_path = dir.join(format!("{}_month.csv", sku));
        let day_path = dir.join(format!("{}_day.csv", sku));

        self.write_month_sheet(monthly, &month_path)?;
        self.write_day_sheet(&day_path)?;

        info!(sku, months = monthly.len(), "报表已导出");
        Ok((month_path, day_path))
    }

    /// "month" 表: 每月实际/预测的数量、金额、客户数
    fn write_month_sheet(
        &self,
        monthly: &[MonthlyViewPoint],
        path: &Path,
    ) -> Result<(), ExportError> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record([
            "月份",
            "实际数量",
            "实际金额",
            "实际客户数",
            "预测数量",
            "预测金额",
            "预测客户数",
        ])?;
        for point in monthly {
            writer.write_record([
                point.month.clone(),
                format_num(point.actual_qty),
                format_num(point.actual_amount),
                format_num(point.actual_customers),
                format_num(point.forecast_qty),
                format_num(point.forecast_amount),
                format_num(point.forecast_customers),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }

    /// "day" 表: 占位,不提供按日明细
    fn write_day_sheet(&self, path: &Path) -> Result<(), ExportError> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record(["说明"])?;
        writer.write_record(["按日明细暂不提供"])?;
        writer.flush()?;
        Ok(())
    }
}

impl Default for ReportExporter {
    fn default() -> Self {
        Self::new()
    }
}

fn format_num(v: f64) -> String {
    format!("{:.2}", v)
}
