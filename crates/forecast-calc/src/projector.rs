//! 預測投影主流程

use forecast_core::{ForecastError, PlanningWindow, Result, SkuRecord};

use crate::depletion::DepletionSimulator;
use crate::transit::TransitSchedule;
use crate::{ProjectedSku, ProjectionBatchResult, ProjectionWarning};

/// 預測投影器
///
/// 對一份 SKU 快照逐筆計算今日可售天數與 5 個月逐日覆蓋投影。
/// 計算為純函數：相同視窗與相同快照必得相同結果。
pub struct ForecastProjector {
    /// 計劃視窗
    window: PlanningWindow,
}

impl ForecastProjector {
    /// 創建新的投影器
    pub fn new(window: PlanningWindow) -> Self {
        Self { window }
    }

    /// 主投影入口：逐 SKU 計算
    ///
    /// 單筆 SKU 失敗只記錄警告並略過，不中斷整批計算。
    /// 空輸入回傳空結果。
    pub fn project_batch(&self, skus: &[SkuRecord]) -> ProjectionBatchResult {
        tracing::info!("開始預測投影：SKU {} 筆", skus.len());
        let start_time = std::time::Instant::now();

        let mut result = ProjectionBatchResult::empty();

        for sku in skus {
            match self.project_sku(sku) {
                Ok(projected) => result.skus.push(projected),
                Err(err) => {
                    tracing::warn!("SKU {} 投影失敗，略過: {}", sku.id, err);
                    result.add_warning(ProjectionWarning::skipped(
                        sku.id.clone(),
                        err.to_string(),
                    ));
                }
            }
        }

        result.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!(
            "預測投影完成，耗時 {:?}，成功 {} 筆，略過 {} 筆",
            start_time.elapsed(),
            result.skus.len(),
            result.warnings.len()
        );

        result
    }

    /// 單一 SKU 投影
    ///
    /// 視窗不含任何月份期間時回傳錯誤，由批次邊界轉為警告，
    /// 不得 panic 中斷整批。
    pub fn project_sku(&self, sku: &SkuRecord) -> Result<ProjectedSku> {
        let current = self.window.current_month().ok_or_else(|| {
            ForecastError::InvalidWindow("計劃視窗不含任何月份期間".to_string())
        })?;
        let days_of_stock = DepletionSimulator::days_of_stock_today(
            sku.stock,
            sku.forecast_for(0),
            current.days_in_month,
        );

        let transits = TransitSchedule::build(&sku.purchase_orders, self.window.today);
        tracing::debug!(
            "SKU {} 在途到貨日 {} 個，總量 {}",
            sku.id,
            transits.len(),
            transits.total_quantity()
        );

        let projections =
            DepletionSimulator::simulate(sku.stock, &self.window, &sku.forecasts, &transits)?;

        Ok(ProjectedSku {
            record: sku.clone(),
            days_of_stock,
            projections,
        })
    }

    /// 取得計劃視窗引用
    pub fn window(&self) -> &PlanningWindow {
        &self.window
    }
}
