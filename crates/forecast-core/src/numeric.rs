//! 數值正規化
//!
//! 來源資料的數值欄位型態不一：可能是數字、含千分位逗號的字串、
//! null 或其他雜訊。此模組將它們一律收斂為 `Decimal`，
//! 無法解析的輸入視為 0，絕不回傳錯誤。

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

use crate::calendar::WINDOW_MONTHS;

/// 將異質數值輸入轉為 `Decimal`
///
/// - 數字：直接轉換（科學記號亦可）
/// - 字串：移除千分位逗號後解析
/// - null、布林、陣列、物件等其他型態：一律視為 0
pub fn clean_number(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => {
            let stripped: String = s.chars().filter(|c| *c != ',').collect();
            parse_decimal(stripped.trim())
        }
        _ => Decimal::ZERO,
    }
}

fn parse_decimal(raw: &str) -> Decimal {
    if raw.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .unwrap_or(Decimal::ZERO)
}

/// serde 欄位輔助：寬鬆解析單一數值欄位
pub fn lenient_decimal<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(clean_number(&value))
}

/// serde 欄位輔助：寬鬆解析預測序列
///
/// 非陣列輸入視為空序列；超過視窗月份數的項目截斷。
pub fn lenient_forecasts<'de, D>(deserializer: D) -> std::result::Result<Vec<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items.iter().take(WINDOW_MONTHS).map(clean_number).collect())
}
