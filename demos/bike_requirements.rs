//! # 腳踏車需求計算範例
//!
//! 從 JSON 目錄快照計算兩款腳踏車的待採購與待生產清單。

use partreq::*;

const CATALOG: &str = r#"{
    "parts": [
        { "key": 1, "identifier": "BIKE-CITY", "name": "City bike", "assembly": true,
          "total_in_stock": 2, "required_for_sales_orders": 1, "in_production": 3 },
        { "key": 2, "identifier": "BIKE-KIDS", "name": "Kids bike", "assembly": true },
        { "key": 3, "identifier": "FRAME-001", "name": "Frame", "assembly": true, "total_in_stock": 4 },
        { "key": 4, "identifier": "TUBE-001", "name": "Steel tube", "purchaseable": true,
          "total_in_stock": 10, "required_for_build_orders": 6, "on_order": 20,
          "suppliers": ["Steel Works"] },
        { "key": 5, "identifier": "WHEEL-001", "name": "Wheel", "purchaseable": true,
          "total_in_stock": 8, "suppliers": ["Wheel Co"] },
        { "key": 6, "identifier": "BELL-001", "name": "Bell", "purchaseable": true },
        { "key": 7, "identifier": "GREASE-001", "name": "Grease", "purchaseable": true, "consumable": true }
    ],
    "boms": [
        { "parent": 1, "lines": [
            { "child": "FRAME-001", "quantity": 1 },
            { "child": "WHEEL-001", "quantity": 2 },
            { "child": "BELL-001", "quantity": 1, "is_optional": true },
            { "child": "GREASE-001", "quantity": "0.1", "is_consumable": true }
        ] },
        { "parent": 2, "lines": [
            { "child": "FRAME-001", "quantity": 1 },
            { "child": "WHEEL-001", "quantity": 2 }
        ] },
        { "parent": 3, "lines": [
            { "child": "TUBE-001", "quantity": 3 }
        ] }
    ]
}"#;

fn print_partition(partition: &OutputPartition) {
    println!("待採購:");
    for part in &partition.parts_to_order {
        println!(
            "  - {:<12} 需求 {:>6} 可用 {:>6} 在途 {:>6} 待採購 {:>6}",
            part.identifier(),
            part.total_required,
            part.available,
            part.part.on_order,
            part.to_order()
        );
    }

    println!("待生產:");
    for part in &partition.assemblies_to_build {
        println!(
            "  - {:<12} 需求 {:>6} 可用 {:>6} 生產中 {:>6} 待生產 {:>6}",
            part.identifier(),
            part.total_required,
            part.available,
            part.part.in_production,
            part.to_build()
        );
    }
}

fn main() -> anyhow::Result<()> {
    telemetry::init();

    let catalog = InMemoryCatalog::from_json_str(CATALOG)?;
    let config = PlannerConfig::from_json_str(
        r#"{ "filter": { "hide_consumables": true, "hide_optional": true } }"#,
    )?;
    let calculator = RequirementCalculator::new(catalog, config);

    let requests = vec![
        PartRequest::new("BIKE-CITY", 10),
        PartRequest::new("BIKE-KIDS", 5),
        PartRequest::new("BIKE-TANDEM", 1),
    ];

    let result = calculator.calculate(&requests)?;

    println!("=== 全部結果 ===");
    print_partition(&result.filtered(&FilterOptions::default()));

    println!();
    println!("=== 隱藏耗材與選配件 ===");
    print_partition(&calculator.visible(&result));

    if !result.diagnostics.is_empty() {
        println!();
        println!("診斷:");
        for diagnostic in &result.diagnostics {
            println!("  {}", diagnostic);
        }
    }

    Ok(())
}
