// ==========================================
// 库存预测与补货决策系统 - API 层
// ==========================================
// 职责: 面向调用方的业务接口与错误口径
// ==========================================

pub mod error;
pub mod forecast_api;

pub use error::{ApiError, ApiResult};
pub use forecast_api::ForecastApi;
