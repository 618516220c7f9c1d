//! 分組彙總層
//!
//! 將逐 SKU 的投影結果彙總為品牌／類別／負責人層級的摘要列，
//! 以及以金額加權的覆蓋完成度（風險／進度檢視用）。

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::ProjectedSku;

/// 缺漏分組欄位時使用的組名
pub const UNASSIGNED_GROUP: &str = "未指定";

/// 分組維度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    /// 不分組（逐 SKU 一列）
    Sku,
    /// 依品牌
    Brand,
    /// 依類別
    Category,
    /// 依負責人
    Owner,
}

impl GroupBy {
    /// 取得 SKU 在此維度的分組鍵，缺漏或空白欄位歸入未指定組
    fn key_of(&self, sku: &ProjectedSku) -> String {
        let field = match self {
            GroupBy::Sku => return sku.record.id.clone(),
            GroupBy::Brand => sku.record.brand.as_deref(),
            GroupBy::Category => sku.record.category.as_deref(),
            GroupBy::Owner => sku.record.owner.as_deref(),
        };
        field
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(UNASSIGNED_GROUP)
            .to_string()
    }
}

/// 分組彙總列
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedRow {
    /// 分組鍵
    pub key: String,

    /// 庫存合計
    pub stock: Decimal,

    /// 月營收目標合計
    pub target_gmv: Decimal,

    /// 組內成員
    pub items: Vec<ProjectedSku>,
}

/// 依維度彙總投影結果
///
/// 依月營收目標合計遞減排序。`sort_by` 為穩定排序，
/// 同值的組保持首次出現（插入）順序，確保結果可重現。
pub fn group_rows(skus: &[ProjectedSku], group_by: GroupBy) -> Vec<GroupedRow> {
    let mut rows: Vec<GroupedRow> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for sku in skus {
        let key = group_by.key_of(sku);
        let pos = *index.entry(key.clone()).or_insert_with(|| {
            rows.push(GroupedRow {
                key,
                stock: Decimal::ZERO,
                target_gmv: Decimal::ZERO,
                items: Vec::new(),
            });
            rows.len() - 1
        });

        let row = &mut rows[pos];
        row.stock += sku.record.stock;
        row.target_gmv += sku.record.target_gmv;
        row.items.push(sku.clone());
    }

    rows.sort_by(|a, b| b.target_gmv.cmp(&a.target_gmv));
    rows
}

/// 進度／風險彙總列
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressRow {
    /// 分組鍵
    pub key: String,

    /// 覆蓋完成度（0–100）
    pub percent: Decimal,
}

/// 以金額加權計算各組的覆蓋完成度
///
/// 每個 SKU 的完成度為視窗內覆蓋天數佔模擬天數的比例，
/// 權重為其月營收目標（金額加權，而非單純計數）。
/// 結果依百分比遞減排序，同值保持插入順序。
pub fn coverage_progress(skus: &[ProjectedSku], group_by: GroupBy) -> Vec<ProgressRow> {
    struct Accumulator {
        key: String,
        total: Decimal,
        done: Decimal,
    }

    let mut groups: Vec<Accumulator> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for sku in skus {
        let key = group_by.key_of(sku);
        let pos = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(Accumulator {
                key,
                total: Decimal::ZERO,
                done: Decimal::ZERO,
            });
            groups.len() - 1
        });

        let amount = sku.record.target_gmv;
        let simulated = sku.simulated_days();
        let ratio = if simulated > 0 {
            Decimal::from(sku.covered_days()) / Decimal::from(simulated)
        } else {
            Decimal::ZERO
        };

        let group = &mut groups[pos];
        group.total += amount;
        group.done += amount * ratio;
    }

    let mut rows: Vec<ProgressRow> = groups
        .into_iter()
        .map(|group| ProgressRow {
            key: group.key,
            percent: if group.total > Decimal::ZERO {
                group.done / group.total * Decimal::from(100)
            } else {
                Decimal::ZERO
            },
        })
        .collect();

    rows.sort_by(|a, b| b.percent.cmp(&a.percent));
    rows
}
