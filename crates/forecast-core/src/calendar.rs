//! 計劃視窗模型

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{ForecastError, Result};

/// 投影視窗涵蓋的月份數
pub const WINDOW_MONTHS: usize = 5;

/// 單一月份期間
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthPeriod {
    /// 年份
    pub year: i32,

    /// 月份索引（0 = 一月）
    pub month_index: u32,

    /// 該月的日曆天數
    pub days_in_month: u32,

    /// 顯示標籤（如 "JAN"）
    pub label: String,
}

impl MonthPeriod {
    /// 取得該月指定日的日曆日期
    pub fn date_of(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month_index + 1, day)
    }

    /// 該月第一天
    pub fn first_day(&self) -> Option<NaiveDate> {
        self.date_of(1)
    }
}

/// 計劃視窗：從「今天」起連續 5 個月份期間
///
/// 索引 0 為當前月份。視窗是所有投影計算共用的純輸入，
/// 不在核心內讀取系統時鐘，以便測試時注入任意日期。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningWindow {
    /// 視窗起算日（當天，不含時間成分）
    pub today: NaiveDate,

    /// 連續月份期間，長度固定為 WINDOW_MONTHS
    pub periods: Vec<MonthPeriod>,
}

impl PlanningWindow {
    /// 以指定日期建立計劃視窗
    ///
    /// 正確處理跨年（如 11 月起算會產生 12 月與次年 1 月）。
    pub fn starting_at(today: NaiveDate) -> Result<Self> {
        let mut periods = Vec::with_capacity(WINDOW_MONTHS);
        let mut year = today.year();
        let mut month_index = today.month0();

        for _ in 0..WINDOW_MONTHS {
            let days = days_in_month(year, month_index + 1).ok_or_else(|| {
                ForecastError::InvalidDate(format!("{}-{:02}", year, month_index + 1))
            })?;
            let first = NaiveDate::from_ymd_opt(year, month_index + 1, 1).ok_or_else(|| {
                ForecastError::InvalidDate(format!("{}-{:02}-01", year, month_index + 1))
            })?;
            let label = first.format("%b").to_string().to_uppercase();

            periods.push(MonthPeriod {
                year,
                month_index,
                days_in_month: days,
                label,
            });

            month_index += 1;
            if month_index == 12 {
                month_index = 0;
                year += 1;
            }
        }

        Ok(Self { today, periods })
    }

    /// 以系統時鐘建立計劃視窗
    pub fn current() -> Result<Self> {
        Self::starting_at(chrono::Local::now().date_naive())
    }

    /// 當前月份期間
    ///
    /// 欄位為公開欄位，視窗可能被建構為不含任何期間，
    /// 故回傳 Option 而非直接索引。
    pub fn current_month(&self) -> Option<&MonthPeriod> {
        self.periods.first()
    }

    /// 當前月份剩餘的模擬天數（今天到月底，含當天）；空視窗為 0
    pub fn remaining_days_in_current_month(&self) -> u32 {
        self.periods
            .first()
            .map(|p| p.days_in_month - self.today.day() + 1)
            .unwrap_or(0)
    }
}

/// 計算指定年月的天數
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((next - first).num_days() as u32)
}
