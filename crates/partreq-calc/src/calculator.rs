//! 需求主計算器

use partreq_cache::{PartCache, PartLookup};
use partreq_core::{PartRequest, PlannerConfig};

use crate::aggregation::RequirementAggregator;
use crate::classifier::{OrderBuildClassifier, OutputPartition};
use crate::CalculationResult;

/// 需求計算器
///
/// 每次 [`calculate`](Self::calculate) 都建立新的緩存與需求表，
/// 多次計算之間不共享狀態。
pub struct RequirementCalculator<L: PartLookup> {
    /// 庫存系統查詢來源
    lookup: L,

    /// 計算配置
    config: PlannerConfig,
}

impl<L: PartLookup> RequirementCalculator<L> {
    /// 創建新的需求計算器
    pub fn new(lookup: L, config: PlannerConfig) -> Self {
        Self { lookup, config }
    }

    /// 主計算入口
    ///
    /// 只有庫存系統無法連線、配置無效或需求數量為負時回傳錯誤；
    /// 其他問題皆記錄在結果的診斷信息中。
    pub fn calculate(&self, requests: &[PartRequest]) -> partreq_core::Result<CalculationResult> {
        self.config.validate()?;
        for request in requests {
            request.validate()?;
        }

        tracing::info!("開始需求計算：頂層需求 {} 筆", requests.len());
        let start_time = std::time::Instant::now();

        let mut cache = PartCache::new(&self.lookup);

        // Step 1: BOM 展開與需求累計
        tracing::debug!("Step 1: BOM 展開");
        let aggregation = RequirementAggregator::new(&self.config).aggregate(requests, &mut cache)?;
        tracing::debug!("需求表物料數量: {}", aggregation.table.len());

        // Step 2: 可用量與採購/生產分類
        tracing::debug!("Step 2: 採購/生產分類");
        let (partition, classify_diagnostics) =
            OrderBuildClassifier::classify(&aggregation.table, &cache);

        let mut result = CalculationResult::empty();
        result.parts_to_order = partition.parts_to_order;
        result.assemblies_to_build = partition.assemblies_to_build;
        result.diagnostics = aggregation.diagnostics;
        for diagnostic in classify_diagnostics {
            result.add_diagnostic(diagnostic);
        }
        result.requirements = aggregation.table;
        result.calculation_time_ms = Some(start_time.elapsed().as_millis() as u64);

        let stats = cache.stats();
        tracing::info!("需求計算完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "待採購 {} 筆，待生產 {} 筆，診斷 {} 筆（緩存命中 {}，查詢 {}）",
            result.parts_to_order.len(),
            result.assemblies_to_build.len(),
            result.diagnostics.len(),
            stats.hits,
            stats.misses
        );

        Ok(result)
    }

    /// 以配置中的篩選選項取得顯示用集合
    pub fn visible(&self, result: &CalculationResult) -> OutputPartition {
        result.filtered(&self.config.filter)
    }

    /// 獲取配置引用
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// 獲取查詢來源引用
    pub fn lookup(&self) -> &L {
        &self.lookup
    }
}
