//! 庫存系統查詢介面

use partreq_core::{BomRelation, PartKey, PartRecord};

/// 查詢錯誤
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// 識別碼無法解析（可略過）
    #[error("找不到物料: {0}")]
    NotFound(String),

    /// 連線或認證失敗，重試已耗盡（整次計算中止）
    #[error("庫存系統無法連線: {0}")]
    Unavailable(String),
}

impl LookupError {
    /// 是否為會中止整次計算的錯誤
    pub fn is_fatal(&self) -> bool {
        matches!(self, LookupError::Unavailable(_))
    }
}

impl From<LookupError> for partreq_core::PlannerError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::Unavailable(msg) => partreq_core::PlannerError::CatalogUnavailable(msg),
            LookupError::NotFound(id) => {
                partreq_core::PlannerError::InvalidCatalog(format!("找不到物料: {}", id))
            }
        }
    }
}

/// 物料查詢來源
///
/// 實作者負責自身的重試、退避與認證；回傳 [`LookupError::Unavailable`]
/// 代表已放棄。
pub trait PartLookup {
    /// 依識別碼解析物料
    fn resolve(&self, identifier: &str) -> Result<PartRecord, LookupError>;

    /// 取得組裝件的 BOM 行（非組裝件或無 BOM 時回傳空集合）
    fn bom_of(&self, key: PartKey) -> Result<Vec<BomRelation>, LookupError>;
}

impl<T: PartLookup + ?Sized> PartLookup for &T {
    fn resolve(&self, identifier: &str) -> Result<PartRecord, LookupError> {
        (**self).resolve(identifier)
    }

    fn bom_of(&self, key: PartKey) -> Result<Vec<BomRelation>, LookupError> {
        (**self).bom_of(key)
    }
}
