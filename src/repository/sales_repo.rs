// ==========================================
// 库存预测与补货决策系统 - 销售数据仓储
// ==========================================
// 职责: 按 SKU 读取月度序列 / 在途批次 / KPI 快照
// 红线: 引擎视角只读; 写入口仅供数据同步与测试种子
// ==========================================

use crate::domain::record::{InTransitBatch, KpiSnapshot, MonthlyRecord};
use crate::domain::types::RecordKind;
use crate::repository::error::{RepoResult, RepositoryError};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// SalesRepository - 销售数据仓储
// ==========================================
pub struct SalesRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SalesRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按月份升序读取 SKU 的月度序列
    pub fn list_series(&self, sku: &str) -> RepoResult<Vec<MonthlyRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT month, kind, actual_qty, actual_amount, actual_customers,
                    base_forecast_qty, base_forecast_amount, base_forecast_customers
             FROM monthly_sales WHERE sku = ?1 ORDER BY month ASC",
        )?;
        let rows = stmt.query_map(params![sku], |row| {
            let kind: String = row.get(1)?;
            Ok(MonthlyRecord {
                month: row.get(0)?,
                kind: if kind == "FUTURE" {
                    RecordKind::Future
                } else {
                    RecordKind::Past
                },
                actual_qty: row.get(2)?,
                actual_amount: row.get(3)?,
                actual_customers: row.get(4)?,
                base_forecast_qty: row.get(5)?,
                base_forecast_amount: row.get(6)?,
                base_forecast_customers: row.get(7)?,
            })
        })?;
        let mut records = Vec::new();
        for r in rows {
            records.push(r?);
        }
        Ok(records)
    }

    /// 读取 SKU 的在途批次(按到货日升序)
    pub fn list_in_transit(&self, sku: &str) -> RepoResult<Vec<InTransitBatch>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT batch_id, arrival_date, qty, overdue, overdue_days
             FROM in_transit_batch WHERE sku = ?1 ORDER BY arrival_date ASC",
        )?;
        let rows = stmt.query_map(params![sku], |row| {
            Ok(InTransitBatch {
                batch_id: row.get(0)?,
                arrival_date: row.get(1)?,
                qty: row.get(2)?,
                overdue: row.get::<_, i64>(3)? != 0,
                overdue_days: row.get(4)?,
            })
        })?;
        let mut batches = Vec::new();
        for b in rows {
            batches.push(b?);
        }
        Ok(batches)
    }

    /// 读取 SKU 的 KPI 快照
    pub fn get_kpi(&self, sku: &str) -> RepoResult<KpiSnapshot> {
        let conn = self.lock()?;
        let result = conn.query_row(
            "SELECT in_stock_qty, in_transit_qty, sales_30d FROM kpi_snapshot WHERE sku = ?1",
            params![sku],
            |row| {
                Ok(KpiSnapshot {
                    in_stock_qty: row.get(0)?,
                    in_transit_qty: row.get(1)?,
                    sales_30d: row.get(2)?,
                })
            },
        );
        match result {
            Ok(kpi) => Ok(kpi),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(RepositoryError::NotFound {
                entity: "KpiSnapshot".to_string(),
                id: sku.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    // ==========================================
    // 写入口(数据同步 / 测试种子)
    // ==========================================

    pub fn upsert_monthly_record(&self, sku: &str, record: &MonthlyRecord) -> RepoResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO monthly_sales
               (sku, month, kind, actual_qty, actual_amount, actual_customers,
                base_forecast_qty, base_forecast_amount, base_forecast_customers)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(sku, month) DO UPDATE SET
               kind = excluded.kind,
               actual_qty = excluded.actual_qty,
               actual_amount = excluded.actual_amount,
               actual_customers = excluded.actual_customers,
               base_forecast_qty = excluded.base_forecast_qty,
               base_forecast_amount = excluded.base_forecast_amount,
               base_forecast_customers = excluded.base_forecast_customers",
            params![
                sku,
                record.month,
                record.kind.to_string(),
                record.actual_qty,
                record.actual_amount,
                record.actual_customers,
                record.base_forecast_qty,
                record.base_forecast_amount,
                record.base_forecast_customers,
            ],
        )?;
        Ok(())
    }

    pub fn upsert_kpi(&self, sku: &str, kpi: &KpiSnapshot) -> RepoResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO kpi_snapshot (sku, in_stock_qty, in_transit_qty, sales_30d)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(sku) DO UPDATE SET
               in_stock_qty = excluded.in_stock_qty,
               in_transit_qty = excluded.in_transit_qty,
               sales_30d = excluded.sales_30d",
            params![sku, kpi.in_stock_qty, kpi.in_transit_qty, kpi.sales_30d],
        )?;
        Ok(())
    }

    pub fn insert_in_transit(&self, sku: &str, batch: &InTransitBatch) -> RepoResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO in_transit_batch (batch_id, sku, arrival_date, qty, overdue, overdue_days)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                batch.batch_id,
                sku,
                batch.arrival_date,
                batch.qty,
                batch.overdue as i64,
                batch.overdue_days,
            ],
        )?;
        Ok(())
    }
}
