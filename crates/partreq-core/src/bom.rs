//! BOM 行模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{PlannerError, Result};

/// BOM 行：父件單位用量中的一個子件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomRelation {
    /// 子件識別碼
    pub child: String,

    /// 每單位父件所需子件數量
    pub quantity: Decimal,

    /// 是否為耗材行
    #[serde(default)]
    pub is_consumable: bool,

    /// 是否為選配行
    #[serde(default)]
    pub is_optional: bool,
}

impl BomRelation {
    /// 創建新的 BOM 行
    pub fn new(child: impl Into<String>, quantity: Decimal) -> Self {
        Self {
            child: child.into(),
            quantity,
            is_consumable: false,
            is_optional: false,
        }
    }

    /// 建構器模式：標記為耗材
    pub fn as_consumable(mut self) -> Self {
        self.is_consumable = true;
        self
    }

    /// 建構器模式：標記為選配
    pub fn as_optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    /// 子件需求 = 父件淨需求 × 單位用量
    ///
    /// 耗材與選配旗標不影響數量。
    pub fn child_quantity(&self, parent_quantity: Decimal) -> Decimal {
        parent_quantity * self.quantity
    }

    /// 單位用量必須大於 0
    pub fn validate(&self) -> Result<()> {
        if self.quantity <= Decimal::ZERO {
            return Err(PlannerError::InvalidCatalog(format!(
                "BOM 行 {} 的單位用量必須大於 0: {}",
                self.child, self.quantity
            )));
        }
        Ok(())
    }
}
