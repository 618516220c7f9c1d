//! # Forecast Calculation Engine
//!
//! 庫存投影計算引擎：在途到貨排程、逐日耗竭模擬與分組彙總

pub mod depletion;
pub mod grouping;
pub mod projector;
pub mod transit;

// Re-export 主要類型
pub use depletion::{DaysOfStock, DepletionSimulator, MonthCoverage};
pub use grouping::{coverage_progress, group_rows, GroupBy, GroupedRow, ProgressRow};
pub use projector::ForecastProjector;
pub use transit::TransitSchedule;

use forecast_core::SkuRecord;
use serde::{Deserialize, Serialize};

/// 單一 SKU 的投影結果
///
/// 原始欄位原樣保留，外加今日可售天數與 5 個月逐月覆蓋。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedSku {
    /// 原始 SKU 記錄
    #[serde(flatten)]
    pub record: SkuRecord,

    /// 今日庫存可售天數
    #[serde(rename = "dias_stock_hoy")]
    pub days_of_stock: DaysOfStock,

    /// 逐月覆蓋結果（索引 0 為當前月）
    pub projections: Vec<MonthCoverage>,
}

impl ProjectedSku {
    /// 視窗內總覆蓋天數
    pub fn covered_days(&self) -> u32 {
        self.projections.iter().map(|p| p.count).sum()
    }

    /// 視窗內總模擬天數
    pub fn simulated_days(&self) -> u32 {
        self.projections.iter().map(|p| p.days_in_month).sum()
    }

    /// 是否存在缺貨風險（任一月份覆蓋不足）
    pub fn has_projected_stockout(&self) -> bool {
        self.projections.iter().any(|p| p.count < p.days_in_month)
    }
}

/// 批次投影結果
#[derive(Debug, Clone)]
pub struct ProjectionBatchResult {
    /// 成功投影的 SKU
    pub skus: Vec<ProjectedSku>,

    /// 警告信息（被略過的 SKU 等）
    pub warnings: Vec<ProjectionWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl ProjectionBatchResult {
    /// 創建空的計算結果
    pub fn empty() -> Self {
        Self {
            skus: Vec::new(),
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: ProjectionWarning) {
        self.warnings.push(warning);
    }
}

/// 投影警告
#[derive(Debug, Clone)]
pub struct ProjectionWarning {
    pub sku_id: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl ProjectionWarning {
    pub fn new(sku_id: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            sku_id,
            message,
            severity,
        }
    }

    pub fn info(sku_id: String, message: String) -> Self {
        Self::new(sku_id, message, WarningSeverity::Info)
    }

    /// 單筆 SKU 計算失敗而被略過
    pub fn skipped(sku_id: String, message: String) -> Self {
        Self::new(sku_id, message, WarningSeverity::Warning)
    }

    pub fn error(sku_id: String, message: String) -> Self {
        Self::new(sku_id, message, WarningSeverity::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}
