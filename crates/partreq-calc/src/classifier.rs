//! 採購/生產分類

use partreq_cache::{PartCache, PartLookup};
use partreq_core::{PartKind, PartRecord};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregation::{AggregatedRequirement, RequirementTable};
use crate::availability::AvailabilityCalculator;
use crate::Diagnostic;

/// 補足方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Provision {
    /// 外購：待採購數量（不扣在途採購）
    Order { to_order: Decimal },
    /// 組裝：待生產數量（已扣生產中數量）
    Build { to_build: Decimal },
}

/// 計算後的物料
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatedPart {
    /// 物料記錄
    pub part: PartRecord,

    /// 需求總和
    pub total_required: Decimal,

    /// 可用量（庫存 - 承諾）
    pub available: Decimal,

    /// 補足方式與數量
    pub provision: Provision,

    /// 所有引用皆為選配行
    pub is_optional: bool,

    /// 耗材（物料本身或所有引用行）
    pub is_consumable: bool,
}

impl CalculatedPart {
    /// 待採購數量（非外購件為 0）
    pub fn to_order(&self) -> Decimal {
        match self.provision {
            Provision::Order { to_order } => to_order,
            Provision::Build { .. } => Decimal::ZERO,
        }
    }

    /// 待生產數量（非組裝件為 0）
    pub fn to_build(&self) -> Decimal {
        match self.provision {
            Provision::Build { to_build } => to_build,
            Provision::Order { .. } => Decimal::ZERO,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.part.identifier
    }

    /// 是否需要列入輸出
    ///
    /// 外購件：本次有需求且待採購 > 0；組裝件：本次有需求且待生產 > 0，
    /// 或仍有生產中數量。需求為 0 時，承諾超過庫存產生的缺口不列入。
    pub fn is_actionable(&self) -> bool {
        let demanded = self.total_required > Decimal::ZERO;
        match self.provision {
            Provision::Order { to_order } => demanded && to_order > Decimal::ZERO,
            Provision::Build { to_build } => {
                (demanded && to_build > Decimal::ZERO) || self.part.in_production > Decimal::ZERO
            }
        }
    }
}

/// 兩個輸出集合
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutputPartition {
    pub parts_to_order: Vec<CalculatedPart>,
    pub assemblies_to_build: Vec<CalculatedPart>,
}

impl OutputPartition {
    pub fn is_empty(&self) -> bool {
        self.parts_to_order.is_empty() && self.assemblies_to_build.is_empty()
    }

    fn sort(&mut self) {
        self.parts_to_order
            .sort_by(|a, b| a.part.identifier.cmp(&b.part.identifier));
        self.assemblies_to_build
            .sort_by(|a, b| a.part.identifier.cmp(&b.part.identifier));
    }
}

/// 採購/生產分類器
pub struct OrderBuildClassifier;

impl OrderBuildClassifier {
    /// 計算單一物料；無法分類時回傳 None
    ///
    /// 同時可外購與組裝的物料依外購處理。
    pub fn calculate_part(
        part: &PartRecord,
        requirement: &AggregatedRequirement,
    ) -> Option<CalculatedPart> {
        let available = AvailabilityCalculator::available(part);
        let total_required = requirement.total_required;

        let provision = match part.kind {
            PartKind::Purchaseable | PartKind::Both => Provision::Order {
                to_order: (total_required - available).max(Decimal::ZERO),
            },
            PartKind::Assembly => Provision::Build {
                to_build: (total_required - (available + part.in_production)).max(Decimal::ZERO),
            },
            PartKind::Unclassified => return None,
        };

        Some(CalculatedPart {
            part: part.clone(),
            total_required,
            available,
            provision,
            is_optional: requirement.is_optional(),
            is_consumable: part.is_consumable || requirement.is_consumable_line(),
        })
    }

    /// 對需求表中每個物料分類並分配到輸出集合
    pub fn classify<L: PartLookup + ?Sized>(
        table: &RequirementTable,
        cache: &PartCache<'_, L>,
    ) -> (OutputPartition, Vec<Diagnostic>) {
        let mut partition = OutputPartition::default();
        let mut diagnostics = Vec::new();

        for requirement in table.iter() {
            let Some(part) = cache.get(requirement.key) else {
                tracing::debug!("物料 {} 不在緩存中，略過分類", requirement.key);
                continue;
            };

            match Self::calculate_part(part, requirement) {
                Some(calculated) if calculated.is_actionable() => {
                    let provision = calculated.provision;
                    match provision {
                        Provision::Order { .. } => partition.parts_to_order.push(calculated),
                        Provision::Build { .. } => partition.assemblies_to_build.push(calculated),
                    }
                }
                Some(_) => {}
                None => {
                    let diagnostic = Diagnostic::unclassifiable(&part.identifier);
                    tracing::warn!("{}", diagnostic.message);
                    diagnostics.push(diagnostic);
                }
            }
        }

        partition.sort();
        diagnostics.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        (partition, diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::LineFlags;
    use partreq_cache::InMemoryCatalog;
    use partreq_core::PartKey;
    use rstest::rstest;

    fn requirement(key: u64, total: u32) -> AggregatedRequirement {
        let mut table = RequirementTable::new();
        table.add(PartKey(key), Decimal::from(total), LineFlags::default());
        table.get(PartKey(key)).cloned().unwrap()
    }

    #[rstest]
    // 需求, 庫存, 工單佔用, 銷售佔用, 待採購
    #[case(5, 5, 3, 0, 3)]
    #[case(5, 10, 0, 0, 0)]
    #[case(5, 2, 3, 1, 7)]
    #[case(0, 0, 0, 0, 0)]
    fn test_to_order(
        #[case] required: u32,
        #[case] stock: u32,
        #[case] build: u32,
        #[case] sales: u32,
        #[case] expected: u32,
    ) {
        let part = PartRecord::new(1, "P", PartKind::Purchaseable)
            .with_stock(Decimal::from(stock))
            .with_commitments(Decimal::from(build), Decimal::from(sales));

        let calculated = OrderBuildClassifier::calculate_part(&part, &requirement(1, required)).unwrap();
        assert_eq!(calculated.to_order(), Decimal::from(expected));
        assert_eq!(calculated.is_actionable(), expected > 0);
    }

    #[test]
    fn test_on_order_is_informational() {
        let part = PartRecord::new(1, "P", PartKind::Purchaseable)
            .with_on_order(Decimal::from(50));

        let calculated = OrderBuildClassifier::calculate_part(&part, &requirement(1, 5)).unwrap();
        assert_eq!(calculated.to_order(), Decimal::from(5));
        assert_eq!(calculated.part.on_order, Decimal::from(50));
    }

    #[rstest]
    // 需求, 庫存, 生產中, 待生產, 列入
    #[case(10, 4, 0, 6, true)]
    #[case(10, 10, 0, 0, false)]
    #[case(10, 4, 6, 0, true)]
    #[case(0, 0, 2, 0, true)]
    #[case(0, 0, 0, 0, false)]
    fn test_to_build(
        #[case] required: u32,
        #[case] stock: u32,
        #[case] in_production: u32,
        #[case] expected: u32,
        #[case] included: bool,
    ) {
        let part = PartRecord::new(1, "A", PartKind::Assembly)
            .with_stock(Decimal::from(stock))
            .with_in_production(Decimal::from(in_production));

        let calculated = OrderBuildClassifier::calculate_part(&part, &requirement(1, required)).unwrap();
        assert_eq!(calculated.to_build(), Decimal::from(expected));
        assert_eq!(calculated.is_actionable(), included);
    }

    #[test]
    fn test_zero_demand_over_committed_is_not_actionable() {
        let purchased = PartRecord::new(1, "P", PartKind::Purchaseable)
            .with_commitments(Decimal::ZERO, Decimal::ONE);
        let calculated = OrderBuildClassifier::calculate_part(&purchased, &requirement(1, 0)).unwrap();
        assert_eq!(calculated.to_order(), Decimal::ONE);
        assert!(!calculated.is_actionable());

        let built = PartRecord::new(2, "A", PartKind::Assembly)
            .with_commitments(Decimal::from(3), Decimal::ZERO);
        let calculated = OrderBuildClassifier::calculate_part(&built, &requirement(2, 0)).unwrap();
        assert_eq!(calculated.to_build(), Decimal::from(3));
        assert!(!calculated.is_actionable());
    }

    #[test]
    fn test_both_is_treated_as_purchaseable() {
        let part = PartRecord::new(1, "B", PartKind::Both)
            .with_in_production(Decimal::from(100));

        let calculated = OrderBuildClassifier::calculate_part(&part, &requirement(1, 3)).unwrap();
        assert!(matches!(calculated.provision, Provision::Order { .. }));
        assert_eq!(calculated.to_order(), Decimal::from(3));
    }

    #[test]
    fn test_unclassified_is_excluded_with_diagnostic() {
        let catalog = InMemoryCatalog::new()
            .with_part(PartRecord::new(1, "DOC", PartKind::Unclassified))
            .with_part(PartRecord::new(2, "P", PartKind::Purchaseable));
        let mut cache = PartCache::new(&catalog);
        cache.resolve("DOC").unwrap();
        cache.resolve("P").unwrap();

        let mut table = RequirementTable::new();
        table.add(PartKey(1), Decimal::from(4), LineFlags::default());
        table.add(PartKey(2), Decimal::from(4), LineFlags::default());

        let (partition, diagnostics) = OrderBuildClassifier::classify(&table, &cache);

        assert_eq!(partition.parts_to_order.len(), 1);
        assert_eq!(partition.parts_to_order[0].identifier(), "P");
        assert!(partition.assemblies_to_build.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].identifier, "DOC");
    }

    #[test]
    fn test_partition_is_sorted() {
        let catalog = InMemoryCatalog::new()
            .with_part(PartRecord::new(1, "ZETA", PartKind::Purchaseable))
            .with_part(PartRecord::new(2, "ALPHA", PartKind::Purchaseable));
        let mut cache = PartCache::new(&catalog);
        cache.resolve("ZETA").unwrap();
        cache.resolve("ALPHA").unwrap();

        let mut table = RequirementTable::new();
        table.add(PartKey(1), Decimal::ONE, LineFlags::default());
        table.add(PartKey(2), Decimal::ONE, LineFlags::default());

        let (partition, _) = OrderBuildClassifier::classify(&table, &cache);
        let ids: Vec<_> = partition.parts_to_order.iter().map(|p| p.identifier()).collect();
        assert_eq!(ids, vec!["ALPHA", "ZETA"]);
    }
}
