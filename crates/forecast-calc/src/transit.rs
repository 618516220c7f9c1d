//! 在途到貨排程
//!
//! 將單一 SKU 的採購訂單清單轉為「日期 → 當日到貨總量」的查詢表。
//! 日期鍵一律使用日曆日期成分（`NaiveDate`），不做任何時區換算。

use chrono::NaiveDate;
use forecast_core::PurchaseOrder;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// 在途到貨排程表
///
/// 只收錄到貨日有效且嚴格晚於「今天」的訂單；
/// 同日到貨的多筆訂單彙總為單一桶。
#[derive(Debug, Clone, Default)]
pub struct TransitSchedule {
    arrivals: HashMap<NaiveDate, Decimal>,
}

impl TransitSchedule {
    /// 由採購訂單清單建立排程表
    pub fn build(orders: &[PurchaseOrder], today: NaiveDate) -> Self {
        let mut arrivals: HashMap<NaiveDate, Decimal> = HashMap::new();

        for order in orders {
            // 缺漏或無法解析的到貨日：整筆排除
            let Some(eta) = order.eta_date() else {
                continue;
            };
            // 僅排程嚴格晚於今天的到貨（今天或過去的日期不入帳）
            if eta <= today {
                continue;
            }
            *arrivals.entry(eta).or_insert(Decimal::ZERO) += order.quantity;
        }

        Self { arrivals }
    }

    /// 查詢指定日期的到貨量
    pub fn arrival_on(&self, date: NaiveDate) -> Option<Decimal> {
        self.arrivals.get(&date).copied()
    }

    /// 排程中的到貨日數
    pub fn len(&self) -> usize {
        self.arrivals.len()
    }

    /// 排程是否為空
    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty()
    }

    /// 排程到貨總量
    pub fn total_quantity(&self) -> Decimal {
        self.arrivals.values().copied().sum()
    }
}
