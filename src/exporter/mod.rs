// ==========================================
// 库存预测与补货决策系统 - 导出层
// ==========================================

pub mod report_exporter;

pub use report_exporter::{ExportError, ReportExporter};
