//! SKU 與採購訂單模型
//!
//! 此處即驗證邊界：來源快照在反序列化時逐欄位收斂
//! （缺漏補預設、畸形欄位歸零或清空），核心演算法
//! 之後只會看到強型別資料。

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::numeric::{lenient_decimal, lenient_forecasts};

/// 採購訂單（在途）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// 到貨數量
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub quantity: Decimal,

    /// 預計到貨日（ISO-8601 日期字串，可能缺漏或無效）
    #[serde(rename = "date_of_arrival", default)]
    pub eta: Option<String>,
}

impl PurchaseOrder {
    /// 創建新的採購訂單
    pub fn new(quantity: Decimal, eta: Option<String>) -> Self {
        Self { quantity, eta }
    }

    /// 解析預計到貨日
    ///
    /// 缺漏或無法解析的日期回傳 None，該筆訂單即不參與排程。
    pub fn eta_date(&self) -> Option<NaiveDate> {
        self.eta
            .as_deref()
            .and_then(|s| s.trim().parse::<NaiveDate>().ok())
    }
}

/// SKU 記錄
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuRecord {
    /// SKU 編號（唯一鍵）
    pub id: String,

    /// 顯示名稱
    #[serde(rename = "sku_name", default)]
    pub name: Option<String>,

    /// 品牌
    #[serde(default)]
    pub brand: Option<String>,

    /// 類別
    #[serde(default)]
    pub category: Option<String>,

    /// 負責採購人員
    #[serde(default)]
    pub owner: Option<String>,

    /// 現有庫存
    #[serde(rename = "stock_actual", default, deserialize_with = "lenient_decimal")]
    pub stock: Decimal,

    /// 月營收目標（GMV）
    #[serde(
        rename = "objetivo_mensual_gmv",
        default,
        deserialize_with = "lenient_decimal"
    )]
    pub target_gmv: Decimal,

    /// 未來各月的預測需求，索引 0 為當前月，至多 5 筆
    #[serde(default, deserialize_with = "lenient_forecasts")]
    pub forecasts: Vec<Decimal>,

    /// 待到貨採購訂單
    #[serde(default, deserialize_with = "lenient_orders")]
    pub purchase_orders: Vec<PurchaseOrder>,
}

impl SkuRecord {
    /// 創建新的 SKU 記錄
    pub fn new(id: String) -> Self {
        Self {
            id,
            name: None,
            brand: None,
            category: None,
            owner: None,
            stock: Decimal::ZERO,
            target_gmv: Decimal::ZERO,
            forecasts: Vec::new(),
            purchase_orders: Vec::new(),
        }
    }

    /// 建構器模式：設置顯示名稱
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// 建構器模式：設置品牌
    pub fn with_brand(mut self, brand: String) -> Self {
        self.brand = Some(brand);
        self
    }

    /// 建構器模式：設置類別
    pub fn with_category(mut self, category: String) -> Self {
        self.category = Some(category);
        self
    }

    /// 建構器模式：設置負責人
    pub fn with_owner(mut self, owner: String) -> Self {
        self.owner = Some(owner);
        self
    }

    /// 建構器模式：設置現有庫存
    pub fn with_stock(mut self, stock: Decimal) -> Self {
        self.stock = stock;
        self
    }

    /// 建構器模式：設置月營收目標
    pub fn with_target_gmv(mut self, target_gmv: Decimal) -> Self {
        self.target_gmv = target_gmv;
        self
    }

    /// 建構器模式：設置預測序列
    pub fn with_forecasts(mut self, forecasts: Vec<Decimal>) -> Self {
        self.forecasts = forecasts;
        self
    }

    /// 建構器模式：設置採購訂單
    pub fn with_purchase_orders(mut self, purchase_orders: Vec<PurchaseOrder>) -> Self {
        self.purchase_orders = purchase_orders;
        self
    }

    /// 取得指定月份位移的預測需求，缺漏視為 0
    pub fn forecast_for(&self, month_offset: usize) -> Decimal {
        self.forecasts
            .get(month_offset)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

/// serde 欄位輔助：寬鬆解析採購訂單清單
///
/// 非陣列輸入視為空清單；無法解析的個別項目直接略過，
/// 不因單筆壞資料使整個 SKU 失敗。
fn lenient_orders<'de, D>(deserializer: D) -> std::result::Result<Vec<PurchaseOrder>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}
