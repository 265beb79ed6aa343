//! # Part Requirement Planner
//!
//! 依頂層組裝需求展開 BOM，計算各物料的待採購與待生產數量。

pub mod telemetry;

pub use partreq_cache::{CatalogSnapshot, InMemoryCatalog, LookupError, PartCache, PartLookup};
pub use partreq_calc::{
    AggregatedRequirement, CalculatedPart, CalculationResult, Diagnostic, DiagnosticKind,
    OutputPartition, Provision, RequirementCalculator, ResultAttributeFilter, WarningSeverity,
};
pub use partreq_core::{
    BomRelation, FilterOptions, PartKey, PartKind, PartRecord, PartRequest, PlannerConfig,
    PlannerError, Result,
};
