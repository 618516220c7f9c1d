//! 庫存耗竭模擬
//!
//! 核心演算法：對單一 SKU 在 5 個月視窗內逐日模擬庫存餘額，
//! 每日先計入在途到貨、再檢查是否足以覆蓋當日需求、最後扣除
//! 當日銷量（餘額不得為負）。月底餘額結轉至下一個月。

use chrono::Datelike;
use forecast_core::{ForecastError, PlanningWindow, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transit::TransitSchedule;

/// 單月覆蓋結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCoverage {
    /// 模擬範圍內庫存足以覆蓋當日需求的天數
    pub count: u32,

    /// 模擬範圍天數（當前月為今天到月底，其餘月份為整月）
    #[serde(rename = "daysInMonth")]
    pub days_in_month: u32,
}

impl MonthCoverage {
    /// 該月是否全數覆蓋
    pub fn is_fully_covered(&self) -> bool {
        self.count >= self.days_in_month
    }
}

/// 今日庫存可售天數
///
/// `Decimal` 無法表示無窮大，故以顯式枚舉表達
/// 「無預測需求 ⇒ 庫存可撐無限期」。
/// 序列化為 JSON 數值或 null（有限天數以 float 輸出，
/// 而非 Decimal 預設的字串形式）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DaysOfStock {
    /// 有限天數
    Finite(#[serde(with = "rust_decimal::serde::float")] Decimal),
    /// 無預測需求，視為無限期
    Unbounded,
}

impl DaysOfStock {
    /// 是否為無限期
    pub fn is_unbounded(&self) -> bool {
        matches!(self, DaysOfStock::Unbounded)
    }

    /// 取得有限天數（無限期回傳 None）
    pub fn finite(&self) -> Option<Decimal> {
        match self {
            DaysOfStock::Finite(days) => Some(*days),
            DaysOfStock::Unbounded => None,
        }
    }
}

/// 庫存耗竭模擬器
pub struct DepletionSimulator;

impl DepletionSimulator {
    /// 今日庫存可售天數（點估計，獨立於逐日模擬）
    ///
    /// 當前月日均需求 = 當月預測 / 當月整月天數；
    /// 日均需求為正時回傳 庫存 / 日均需求，否則為無限期。
    pub fn days_of_stock_today(
        stock: Decimal,
        forecast_m0: Decimal,
        days_in_current_month: u32,
    ) -> DaysOfStock {
        if forecast_m0 > Decimal::ZERO && days_in_current_month > 0 {
            let daily_sale = forecast_m0 / Decimal::from(days_in_current_month);
            if daily_sale > Decimal::ZERO {
                return DaysOfStock::Finite(stock / daily_sale);
            }
        }
        DaysOfStock::Unbounded
    }

    /// 逐日模擬 5 個月的庫存覆蓋
    ///
    /// 當前月從今天的日次模擬到月底（部分月份），其餘月份模擬整月；
    /// 日均需求的分母固定採整月天數，與模擬起日無關。
    /// 無預測需求的月份整段視為覆蓋，不執行逐日迴圈，
    /// 該月內的到貨因此不會入帳。
    pub fn simulate(
        initial_stock: Decimal,
        window: &PlanningWindow,
        forecasts: &[Decimal],
        transits: &TransitSchedule,
    ) -> Result<Vec<MonthCoverage>> {
        let mut coverages = Vec::with_capacity(window.periods.len());
        // 月末餘額跨月結轉
        let mut balance = initial_stock;

        for (i, period) in window.periods.iter().enumerate() {
            let monthly_forecast = forecasts.get(i).copied().unwrap_or(Decimal::ZERO);
            let daily_sale = if monthly_forecast > Decimal::ZERO {
                monthly_forecast / Decimal::from(period.days_in_month)
            } else {
                Decimal::ZERO
            };

            let start_day = if i == 0 { window.today.day() } else { 1 };
            let range_days = period.days_in_month - start_day + 1;

            let mut count: u32 = 0;
            if daily_sale > Decimal::ZERO {
                for day in start_day..=period.days_in_month {
                    let date = period.date_of(day).ok_or_else(|| {
                        ForecastError::InvalidDate(format!(
                            "{}-{:02}-{:02}",
                            period.year,
                            period.month_index + 1,
                            day
                        ))
                    })?;

                    // 到貨先入帳，再檢查當日覆蓋
                    if let Some(quantity) = transits.arrival_on(date) {
                        balance += quantity;
                    }
                    if balance >= daily_sale {
                        count += 1;
                    }
                    balance -= daily_sale;
                    if balance < Decimal::ZERO {
                        balance = Decimal::ZERO;
                    }
                }
            } else {
                count = range_days;
            }

            coverages.push(MonthCoverage {
                count,
                days_in_month: range_days,
            });
        }

        Ok(coverages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use forecast_core::PurchaseOrder;

    fn window_at(y: i32, m: u32, d: u32) -> PlanningWindow {
        PlanningWindow::starting_at(NaiveDate::from_ymd_opt(y, m, d).unwrap()).unwrap()
    }

    fn dec(n: u32) -> Decimal {
        Decimal::from(n)
    }

    #[test]
    fn test_days_of_stock_point_estimate() {
        // 庫存 100、當月預測 310、31 天 ⇒ 日銷 10 ⇒ 可售 10 天
        let days = DepletionSimulator::days_of_stock_today(dec(100), dec(310), 31);
        assert_eq!(days, DaysOfStock::Finite(dec(10)));
    }

    #[test]
    fn test_days_of_stock_no_demand_is_unbounded() {
        let days = DepletionSimulator::days_of_stock_today(dec(50), Decimal::ZERO, 31);
        assert!(days.is_unbounded());
        assert_eq!(days.finite(), None);
    }

    #[test]
    fn test_simulate_basic_depletion() {
        // 2026-01-01 起算：庫存 100、預測 [310,0,0,0,0]、日銷 10
        let window = window_at(2026, 1, 1);
        let forecasts = vec![dec(310)];
        let transits = TransitSchedule::default();

        let coverages =
            DepletionSimulator::simulate(dec(100), &window, &forecasts, &transits).unwrap();

        assert_eq!(coverages.len(), 5);
        assert_eq!(
            coverages[0],
            MonthCoverage {
                count: 10,
                days_in_month: 31
            }
        );
        // 其餘月份無需求：整月覆蓋
        assert_eq!(coverages[1].count, coverages[1].days_in_month);
        assert!(coverages[1].is_fully_covered());
    }

    #[test]
    fn test_simulate_transit_credit_extends_coverage() {
        // 同上場景，但 1/5 到貨 500：此後餘額不再耗盡，整月覆蓋
        let window = window_at(2026, 1, 1);
        let forecasts = vec![dec(310)];
        let orders = vec![PurchaseOrder::new(
            dec(500),
            Some("2026-01-05".to_string()),
        )];
        let transits = TransitSchedule::build(&orders, window.today);

        let coverages =
            DepletionSimulator::simulate(dec(100), &window, &forecasts, &transits).unwrap();

        assert_eq!(
            coverages[0],
            MonthCoverage {
                count: 31,
                days_in_month: 31
            }
        );
    }

    #[test]
    fn test_simulate_zero_stock_positive_demand() {
        let window = window_at(2026, 1, 1);
        let forecasts = vec![dec(310)];
        let transits = TransitSchedule::default();

        let coverages =
            DepletionSimulator::simulate(Decimal::ZERO, &window, &forecasts, &transits).unwrap();

        assert_eq!(coverages[0].count, 0);
        assert_eq!(coverages[0].days_in_month, 31);
    }

    #[test]
    fn test_simulate_mid_month_partial_range() {
        // 1/20 起算：當前月只模擬 12 天，但日銷分母仍為 31
        let window = window_at(2026, 1, 20);
        let forecasts = vec![dec(310)];
        let transits = TransitSchedule::default();

        let coverages =
            DepletionSimulator::simulate(dec(100), &window, &forecasts, &transits).unwrap();

        assert_eq!(coverages[0].days_in_month, 12);
        assert_eq!(coverages[0].count, 10);
    }

    #[test]
    fn test_simulate_balance_carries_across_months() {
        // 庫存 400、一二月各 310：一月整月覆蓋後剩 90，
        // 二月日銷 310/28，只夠覆蓋前 8 天
        let window = window_at(2026, 1, 1);
        let forecasts = vec![dec(310), dec(310)];
        let transits = TransitSchedule::default();

        let coverages =
            DepletionSimulator::simulate(dec(400), &window, &forecasts, &transits).unwrap();

        assert_eq!(coverages[0].count, 31);
        assert_eq!(coverages[1].days_in_month, 28);
        assert_eq!(coverages[1].count, 8);
    }

    #[test]
    fn test_simulate_empty_forecasts_fully_covered() {
        let window = window_at(2026, 1, 1);
        let transits = TransitSchedule::default();

        let coverages =
            DepletionSimulator::simulate(dec(50), &window, &[], &transits).unwrap();

        for coverage in &coverages {
            assert!(coverage.is_fully_covered());
        }
    }

    #[test]
    fn test_simulate_zero_demand_month_skips_arrivals() {
        // 無需求月份不執行逐日迴圈，該月內到貨不入帳
        let window = window_at(2026, 1, 1);
        let forecasts = vec![Decimal::ZERO, dec(28)];
        let orders = vec![PurchaseOrder::new(
            dec(100),
            Some("2026-01-10".to_string()),
        )];
        let transits = TransitSchedule::build(&orders, window.today);

        let coverages =
            DepletionSimulator::simulate(Decimal::ZERO, &window, &forecasts, &transits).unwrap();

        // 一月無需求：全覆蓋
        assert!(coverages[0].is_fully_covered());
        // 二月日銷 1，但一月的到貨未入帳 ⇒ 覆蓋 0 天
        assert_eq!(coverages[1].count, 0);
    }

    #[test]
    fn test_coverage_sum_never_exceeds_range_sum() {
        let window = window_at(2026, 3, 15);
        let forecasts = vec![dec(100), dec(200), dec(300), dec(400), dec(500)];
        let transits = TransitSchedule::default();

        let coverages =
            DepletionSimulator::simulate(dec(1000), &window, &forecasts, &transits).unwrap();

        let covered: u32 = coverages.iter().map(|c| c.count).sum();
        let total: u32 = coverages.iter().map(|c| c.days_in_month).sum();
        assert!(covered <= total);
    }

    #[test]
    fn test_days_of_stock_serializes_untagged() {
        let unbounded = serde_json::to_value(DaysOfStock::Unbounded).unwrap();
        assert!(unbounded.is_null());

        // 有限天數輸出為 JSON 數值
        let finite = serde_json::to_value(DaysOfStock::Finite(dec(10))).unwrap();
        assert!(finite.is_number());
        assert_eq!(finite, serde_json::json!(10.0));
    }
}
