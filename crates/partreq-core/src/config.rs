//! 計算配置

use serde::{Deserialize, Serialize};

use crate::{PlannerError, Result};

/// 預設 BOM 展開深度上限
pub const DEFAULT_MAX_BOM_DEPTH: usize = 64;

/// 需求計算配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// BOM 展開深度上限（超過即中止該頂層需求）
    pub max_bom_depth: usize,

    /// 組裝件 BOM 為空時以 warn 級別記錄日誌（否則為 debug）
    ///
    /// 診斷信息一律保留在結果中。
    pub warn_on_empty_bom: bool,

    /// 結果篩選選項
    pub filter: FilterOptions,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_bom_depth: DEFAULT_MAX_BOM_DEPTH,
            warn_on_empty_bom: true,
            filter: FilterOptions::default(),
        }
    }
}

impl PlannerConfig {
    /// 從 JSON 載入配置，缺少的欄位使用預設值
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| PlannerError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置展開深度上限
    pub fn with_max_bom_depth(mut self, depth: usize) -> Self {
        self.max_bom_depth = depth;
        self
    }

    /// 建構器模式：設置空 BOM 的日誌級別
    pub fn with_warn_on_empty_bom(mut self, warn: bool) -> Self {
        self.warn_on_empty_bom = warn;
        self
    }

    /// 建構器模式：設置篩選選項
    pub fn with_filter(mut self, filter: FilterOptions) -> Self {
        self.filter = filter;
        self
    }

    /// 檢查配置是否有效
    pub fn validate(&self) -> Result<()> {
        if self.max_bom_depth == 0 {
            return Err(PlannerError::InvalidConfig(
                "max_bom_depth 必須大於 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// 結果篩選選項（僅影響顯示，不重新計算）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// 隱藏耗材
    pub hide_consumables: bool,

    /// 隱藏選配件
    pub hide_optional: bool,

    /// 隱藏由這些供應商提供的物料
    pub hidden_suppliers: Vec<String>,
}

impl FilterOptions {
    /// 建構器模式：隱藏耗材
    pub fn hiding_consumables(mut self) -> Self {
        self.hide_consumables = true;
        self
    }

    /// 建構器模式：隱藏選配件
    pub fn hiding_optional(mut self) -> Self {
        self.hide_optional = true;
        self
    }

    /// 建構器模式：隱藏指定供應商
    pub fn hiding_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.hidden_suppliers.push(supplier.into());
        self
    }

    /// 是否沒有任何篩選條件
    pub fn is_noop(&self) -> bool {
        !self.hide_consumables && !self.hide_optional && self.hidden_suppliers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlannerConfig::default();
        assert_eq!(config.max_bom_depth, DEFAULT_MAX_BOM_DEPTH);
        assert!(config.warn_on_empty_bom);
        assert!(config.filter.is_noop());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_json_partial() {
        let config = PlannerConfig::from_json_str(
            r#"{ "max_bom_depth": 8, "filter": { "hide_consumables": true } }"#,
        )
        .unwrap();

        assert_eq!(config.max_bom_depth, 8);
        assert!(config.warn_on_empty_bom);
        assert!(config.filter.hide_consumables);
        assert!(!config.filter.hide_optional);
    }

    #[test]
    fn test_config_rejects_zero_depth() {
        let err = PlannerConfig::from_json_str(r#"{ "max_bom_depth": 0 }"#).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidConfig(_)));
    }

    #[test]
    fn test_config_rejects_malformed_json() {
        assert!(PlannerConfig::from_json_str("{ max_bom_depth").is_err());
    }

    #[test]
    fn test_filter_builder() {
        let filter = FilterOptions::default()
            .hiding_optional()
            .hiding_supplier("ACME");

        assert!(filter.hide_optional);
        assert_eq!(filter.hidden_suppliers, vec!["ACME".to_string()]);
        assert!(!filter.is_noop());
    }
}
