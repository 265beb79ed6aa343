//! # Part Requirement Calculation Engine
//!
//! BOM 展開、淨需求計算與採購/生產分類

pub mod aggregation;
pub mod availability;
pub mod calculator;
pub mod classifier;
pub mod filter;

// Re-export 主要類型
pub use aggregation::{AggregatedRequirement, RequirementAggregator, RequirementTable};
pub use availability::AvailabilityCalculator;
pub use calculator::RequirementCalculator;
pub use classifier::{CalculatedPart, OrderBuildClassifier, OutputPartition, Provision};
pub use filter::ResultAttributeFilter;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// 需求計算結果
#[derive(Debug, Clone, Serialize)]
pub struct CalculationResult {
    /// 計算批次ID
    pub run_id: Uuid,

    /// 計算時間
    pub calculated_at: DateTime<Utc>,

    /// 待採購物料
    pub parts_to_order: Vec<CalculatedPart>,

    /// 待生產組裝件
    pub assemblies_to_build: Vec<CalculatedPart>,

    /// 診斷信息
    pub diagnostics: Vec<Diagnostic>,

    /// 展開後的需求表
    pub requirements: RequirementTable,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u64>,
}

impl CalculationResult {
    /// 創建空的計算結果
    pub fn empty() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            calculated_at: Utc::now(),
            parts_to_order: Vec::new(),
            assemblies_to_build: Vec::new(),
            diagnostics: Vec::new(),
            requirements: RequirementTable::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加診斷
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// 依識別碼查找待採購物料
    pub fn part_to_order(&self, identifier: &str) -> Option<&CalculatedPart> {
        self.parts_to_order
            .iter()
            .find(|p| p.part.identifier == identifier)
    }

    /// 依識別碼查找待生產組裝件
    pub fn assembly_to_build(&self, identifier: &str) -> Option<&CalculatedPart> {
        self.assemblies_to_build
            .iter()
            .find(|p| p.part.identifier == identifier)
    }

    /// 某類診斷
    pub fn diagnostics_of(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }

    /// 套用顯示篩選（不重新計算）
    pub fn filtered(&self, options: &partreq_core::FilterOptions) -> OutputPartition {
        let partition = OutputPartition {
            parts_to_order: self.parts_to_order.clone(),
            assemblies_to_build: self.assemblies_to_build.clone(),
        };
        ResultAttributeFilter::apply(&partition, options)
    }
}

/// 診斷類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    /// 找不到物料，略過該需求或分支
    PartNotFound,
    /// 組裝件沒有 BOM，視為末端件
    MissingOrEmptyBom,
    /// BOM 循環引用，中止該頂層需求
    CyclicBom,
    /// 展開深度超過上限，中止該頂層需求
    DepthLimitExceeded,
    /// 既非外購亦非組裝，不列入結果
    UnclassifiablePart,
}

/// 診斷信息
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub identifier: String,
    pub kind: DiagnosticKind,
    pub message: String,
    pub severity: WarningSeverity,
}

impl Diagnostic {
    pub fn new(
        identifier: impl Into<String>,
        kind: DiagnosticKind,
        message: String,
        severity: WarningSeverity,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            kind,
            message,
            severity,
        }
    }

    /// 找不到物料；`parent` 為引用它的父件（頂層需求則為 None）
    pub fn part_not_found(identifier: &str, parent: Option<&str>) -> Self {
        let message = match parent {
            Some(parent) => format!("找不到物料 {}（由 {} 的 BOM 引用），略過此分支", identifier, parent),
            None => format!("找不到物料 {}，略過此需求", identifier),
        };
        Self::new(identifier, DiagnosticKind::PartNotFound, message, WarningSeverity::Warning)
    }

    pub fn empty_bom(identifier: &str) -> Self {
        Self::new(
            identifier,
            DiagnosticKind::MissingOrEmptyBom,
            format!("組裝件 {} 沒有 BOM，視為末端件", identifier),
            WarningSeverity::Warning,
        )
    }

    /// BOM 循環；`identifier` 為被中止的頂層需求
    pub fn cyclic_bom(identifier: &str, path: &[String]) -> Self {
        Self::new(
            identifier,
            DiagnosticKind::CyclicBom,
            format!(
                "需求 {} 的 BOM 含循環引用: {}，已中止此需求",
                identifier,
                path.join(" -> ")
            ),
            WarningSeverity::Error,
        )
    }

    /// 展開超過深度上限；`path` 為超限時的展開路徑（過長的循環也會落在這裡）
    pub fn depth_exceeded(identifier: &str, path: &[String], limit: usize) -> Self {
        Self::new(
            identifier,
            DiagnosticKind::DepthLimitExceeded,
            format!(
                "需求 {} 的 BOM 展開超過 {} 層，已中止此需求: {}",
                identifier,
                limit,
                path.join(" -> ")
            ),
            WarningSeverity::Error,
        )
    }

    pub fn unclassifiable(identifier: &str) -> Self {
        Self::new(
            identifier,
            DiagnosticKind::UnclassifiablePart,
            format!("物料 {} 既非外購件亦非組裝件，不列入結果", identifier),
            WarningSeverity::Warning,
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.severity, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}
