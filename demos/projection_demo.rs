//! 庫存投影計算示例

use forecast::{
    coverage_progress, group_rows, DaysOfStock, ForecastProjector, GroupBy, PlanningWindow,
    PurchaseOrder, SkuRecord,
};
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    println!("=== 庫存投影計算示例 ===\n");

    // 以系統時鐘建立 5 個月計劃視窗
    let window = PlanningWindow::current()?;
    println!("計劃視窗起算日: {}", window.today);
    for period in &window.periods {
        println!(
            "  - {} {}（{} 天）",
            period.year, period.label, period.days_in_month
        );
    }

    // 建立 SKU 快照
    let skus = vec![
        SkuRecord::new("MOUSE-001".to_string())
            .with_name("無線滑鼠".to_string())
            .with_brand("ACME".to_string())
            .with_owner("王小明".to_string())
            .with_stock(Decimal::from(100))
            .with_target_gmv(Decimal::from(50_000))
            .with_forecasts(vec![Decimal::from(310), Decimal::from(280)])
            .with_purchase_orders(vec![PurchaseOrder::new(
                Decimal::from(500),
                Some((window.today + chrono::Duration::days(4)).to_string()),
            )]),
        SkuRecord::new("KEYB-002".to_string())
            .with_name("機械鍵盤".to_string())
            .with_brand("Globex".to_string())
            .with_owner("王小明".to_string())
            .with_stock(Decimal::from(40))
            .with_target_gmv(Decimal::from(120_000))
            .with_forecasts(vec![Decimal::from(600)]),
    ];

    // 執行投影
    let projector = ForecastProjector::new(window);
    let result = projector.project_batch(&skus);

    println!("\n投影結果:");
    for sku in &result.skus {
        let runway = match sku.days_of_stock {
            DaysOfStock::Finite(days) => format!("{:.1} 天", days),
            DaysOfStock::Unbounded => "無限期".to_string(),
        };
        println!("  - {} 今日可售 {}", sku.record.id, runway);
        for (period, coverage) in projector.window().periods.iter().zip(&sku.projections) {
            println!(
                "      {}：覆蓋 {}/{} 天",
                period.label, coverage.count, coverage.days_in_month
            );
        }
    }

    // 分組彙總
    println!("\n依負責人彙總:");
    for row in group_rows(&result.skus, GroupBy::Owner) {
        println!(
            "  - {}：SKU {} 筆，庫存合計 {}，目標 GMV 合計 {}",
            row.key,
            row.items.len(),
            row.stock,
            row.target_gmv
        );
    }

    println!("\n依品牌的覆蓋完成度（金額加權）:");
    for row in coverage_progress(&result.skus, GroupBy::Brand) {
        println!("  - {}：{:.1}%", row.key, row.percent);
    }

    Ok(())
}
