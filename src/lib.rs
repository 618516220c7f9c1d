//! # Forecast
//!
//! 庫存預測與可售天數投影引擎。
//!
//! 輸入為一份 SKU 快照（庫存、逐月預測、在途採購訂單）與一個
//! 計劃視窗（從「今天」起連續 5 個月）；輸出為逐 SKU 的今日可售
//! 天數與逐月覆蓋投影，以及品牌／類別／負責人層級的彙總。

pub use forecast_calc::{
    coverage_progress, group_rows, DaysOfStock, DepletionSimulator, ForecastProjector, GroupBy,
    GroupedRow, MonthCoverage, ProgressRow, ProjectedSku, ProjectionBatchResult,
    ProjectionWarning, TransitSchedule, WarningSeverity,
};
pub use forecast_core::{
    clean_number, days_in_month, ForecastError, MonthPeriod, PlanningWindow, PurchaseOrder,
    Result, SkuRecord, WINDOW_MONTHS,
};
