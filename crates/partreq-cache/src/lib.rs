//! # Part Requirement Cache
//!
//! 庫存系統查詢介面與單次計算緩存

pub mod lookup;
pub mod part_cache;
pub mod snapshot;

// Re-export 主要類型
pub use lookup::{LookupError, PartLookup};
pub use part_cache::{CacheStats, PartCache};
pub use snapshot::{BomEntry, CatalogSnapshot, InMemoryCatalog};
