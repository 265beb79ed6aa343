//! # Part Requirement Core
//!
//! 核心資料模型與類型定義

pub mod bom;
pub mod config;
pub mod part;
pub mod request;

// Re-export 主要類型
pub use bom::BomRelation;
pub use config::{FilterOptions, PlannerConfig};
pub use part::{PartKey, PartKind, PartRecord, RawPartRecord};
pub use request::PartRequest;

/// 需求計算錯誤類型
///
/// 只有會中止整次計算的錯誤才出現在這裡；單筆需求層級的問題
/// 以診斷訊息回報。
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("庫存系統無法連線: {0}")]
    CatalogUnavailable(String),

    #[error("無效的配置: {0}")]
    InvalidConfig(String),

    #[error("目錄資料格式錯誤: {0}")]
    InvalidCatalog(String),

    #[error("無效的需求: {0}")]
    InvalidRequest(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
