//! # Forecast Core
//!
//! 核心資料模型與類型定義

pub mod calendar;
pub mod numeric;
pub mod sku;

// Re-export 主要類型
pub use calendar::{days_in_month, MonthPeriod, PlanningWindow, WINDOW_MONTHS};
pub use numeric::clean_number;
pub use sku::{PurchaseOrder, SkuRecord};

/// 預測引擎錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("無效的日期: {0}")]
    InvalidDate(String),

    #[error("無效的計劃視窗: {0}")]
    InvalidWindow(String),
}

pub type Result<T> = std::result::Result<T, ForecastError>;
