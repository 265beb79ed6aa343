//! 結果顯示篩選

use partreq_core::FilterOptions;

use crate::classifier::{CalculatedPart, OutputPartition};

/// 對輸出集合做純篩選，不影響計算
pub struct ResultAttributeFilter;

impl ResultAttributeFilter {
    /// 套用篩選，回傳新的輸出集合
    pub fn apply(partition: &OutputPartition, options: &FilterOptions) -> OutputPartition {
        if options.is_noop() {
            return partition.clone();
        }

        let keep = |part: &&CalculatedPart| Self::retains(part, options);
        OutputPartition {
            parts_to_order: partition.parts_to_order.iter().filter(keep).cloned().collect(),
            assemblies_to_build: partition
                .assemblies_to_build
                .iter()
                .filter(keep)
                .cloned()
                .collect(),
        }
    }

    /// 此物料是否保留
    pub fn retains(part: &CalculatedPart, options: &FilterOptions) -> bool {
        if options.hide_consumables && part.is_consumable {
            return false;
        }
        if options.hide_optional && part.is_optional {
            return false;
        }
        !options
            .hidden_suppliers
            .iter()
            .any(|supplier| part.part.has_supplier(supplier))
    }
}
