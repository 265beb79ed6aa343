//! 頂層需求

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{PlannerError, Result};

/// 頂層需求：要組裝的物料與數量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartRequest {
    /// 物料識別碼
    pub identifier: String,

    /// 需求數量
    pub quantity: Decimal,
}

impl PartRequest {
    /// 創建新的頂層需求
    pub fn new(identifier: impl Into<String>, quantity: u32) -> Self {
        Self {
            identifier: identifier.into(),
            quantity: Decimal::from(quantity),
        }
    }

    /// 需求數量不可為負
    pub fn validate(&self) -> Result<()> {
        if self.quantity < Decimal::ZERO {
            return Err(PlannerError::InvalidRequest(format!(
                "{} 的需求數量不可為負: {}",
                self.identifier, self.quantity
            )));
        }
        Ok(())
    }
}

impl<S: Into<String>> From<(S, u32)> for PartRequest {
    fn from((identifier, quantity): (S, u32)) -> Self {
        Self::new(identifier, quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_tuple() {
        let request: PartRequest = ("BIKE-001", 10).into();
        assert_eq!(request.identifier, "BIKE-001");
        assert_eq!(request.quantity, Decimal::from(10));
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let request: PartRequest =
            serde_json::from_str(r#"{ "identifier": "S", "quantity": -7 }"#).unwrap();
        assert!(matches!(request.validate(), Err(PlannerError::InvalidRequest(_))));
        assert!(PartRequest::new("S", 0).validate().is_ok());
    }
}
