//! 分類不變量的性質測試

use partreq::*;
use proptest::prelude::*;
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
struct PartShape {
    assembly: bool,
    stock: u32,
    build: u32,
    sales: u32,
    in_production: u32,
    per_unit: u32,
}

fn part_shape() -> impl Strategy<Value = PartShape> {
    (any::<bool>(), 0u32..20, 0u32..10, 0u32..10, 0u32..10, 1u32..5).prop_map(
        |(assembly, stock, build, sales, in_production, per_unit)| PartShape {
            assembly,
            stock,
            build,
            sales,
            in_production,
            per_unit,
        },
    )
}

fn record(key: u64, shape: &PartShape) -> PartRecord {
    let kind = if shape.assembly {
        PartKind::Assembly
    } else {
        PartKind::Purchaseable
    };
    PartRecord::new(key, format!("P{}", key), kind)
        .with_stock(Decimal::from(shape.stock))
        .with_commitments(Decimal::from(shape.build), Decimal::from(shape.sales))
        .with_in_production(if shape.assembly {
            Decimal::from(shape.in_production)
        } else {
            Decimal::ZERO
        })
}

/// 頂層組裝件 P0，子件 P1..Pn 皆為末端件
fn build_catalog(top: &PartShape, children: &[PartShape]) -> (InMemoryCatalog, Vec<PartRecord>) {
    let mut top_shape = top.clone();
    top_shape.assembly = true;

    let mut records = vec![record(0, &top_shape)];
    let mut lines = Vec::new();
    for (i, shape) in children.iter().enumerate() {
        let key = i as u64 + 1;
        records.push(record(key, shape));
        lines.push(BomRelation::new(format!("P{}", key), Decimal::from(shape.per_unit)));
    }

    let mut catalog = InMemoryCatalog::new();
    for r in &records {
        catalog.insert_part(r.clone());
    }
    catalog.insert_bom(PartKey(0), lines);
    (catalog, records)
}

proptest! {
    #[test]
    fn inclusion_rules_hold(
        top in part_shape(),
        children in prop::collection::vec(part_shape(), 1..6),
        demand in 0u32..30,
    ) {
        let (catalog, records) = build_catalog(&top, &children);
        let result = RequirementCalculator::new(catalog, PlannerConfig::default())
            .calculate(&[PartRequest::new("P0", demand)])
            .unwrap();

        for part in &records {
            let required = result.requirements.total_required(part.key);
            let available = part.total_in_stock - part.committed();
            let ordered = result.part_to_order(&part.identifier);
            let built = result.assembly_to_build(&part.identifier);

            prop_assert!(ordered.is_none() || built.is_none());

            if required.is_zero() && part.in_production.is_zero() {
                prop_assert!(ordered.is_none() && built.is_none());
            }

            match part.kind {
                PartKind::Purchaseable => {
                    let to_order = (required - available).max(Decimal::ZERO);
                    prop_assert_eq!(
                        ordered.is_some(),
                        required > Decimal::ZERO && to_order > Decimal::ZERO
                    );
                    if let Some(p) = ordered {
                        prop_assert_eq!(p.to_order(), to_order);
                    }
                }
                PartKind::Assembly => {
                    let to_build = (required - (available + part.in_production)).max(Decimal::ZERO);
                    prop_assert_eq!(
                        built.is_some(),
                        (required > Decimal::ZERO && to_build > Decimal::ZERO)
                            || part.in_production > Decimal::ZERO
                    );
                    if let Some(a) = built {
                        prop_assert_eq!(a.to_build(), to_build);
                    }
                }
                _ => unreachable!(),
            }
        }
    }

    #[test]
    fn covered_parent_passes_nothing_down(
        top in part_shape(),
        children in prop::collection::vec(part_shape(), 1..6),
        demand in 0u32..30,
    ) {
        let (catalog, records) = build_catalog(&top, &children);
        let effective = top.stock as i64 - top.build as i64 - top.sales as i64
            + top.in_production as i64;
        // 需求不超過父件有效可用量
        let demand = demand.min(effective.max(0) as u32);

        let result = RequirementCalculator::new(catalog, PlannerConfig::default())
            .calculate(&[PartRequest::new("P0", demand)])
            .unwrap();

        for child in records.iter().skip(1) {
            prop_assert!(result.requirements.contains(child.key));
            prop_assert_eq!(result.requirements.total_required(child.key), Decimal::ZERO);
        }
    }

    #[test]
    fn child_demand_is_net_times_per_unit(
        top in part_shape(),
        children in prop::collection::vec(part_shape(), 1..6),
        demand in 0u32..30,
    ) {
        let (catalog, records) = build_catalog(&top, &children);
        let parent = &records[0];
        let effective = parent.total_in_stock - parent.committed() + parent.in_production;
        let demand_dec = Decimal::from(demand);
        let net = demand_dec - demand_dec.min(effective.max(Decimal::ZERO));

        let result = RequirementCalculator::new(catalog, PlannerConfig::default())
            .calculate(&[PartRequest::new("P0", demand)])
            .unwrap();

        for (child, shape) in records.iter().skip(1).zip(children.iter()) {
            prop_assert_eq!(
                result.requirements.total_required(child.key),
                net * Decimal::from(shape.per_unit)
            );
        }
    }
}
