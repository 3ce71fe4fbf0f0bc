// ==========================================
// 库存预测与补货决策系统 - 数据仓储层
// ==========================================
// 职责: SQLite 数据访问,按实体分仓储
// 红线: 不含引擎逻辑; 写操作必须留审计痕迹
// ==========================================

pub mod action_log_repo;
pub mod error;
pub mod purchase_order_repo;
pub mod sales_repo;
pub mod strategy_repo;

pub use action_log_repo::ActionLogRepository;
pub use error::{RepoResult, RepositoryError};
pub use purchase_order_repo::PurchaseOrderRepository;
pub use sales_repo::SalesRepository;
pub use strategy_repo::StrategyRepository;
