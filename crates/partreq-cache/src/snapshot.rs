//! 離線目錄快照

use partreq_core::{BomRelation, PartKey, PartRecord, PlannerError, RawPartRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::lookup::{LookupError, PartLookup};

/// 一個組裝件的 BOM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BomEntry {
    /// 父件主鍵
    pub parent: u64,

    /// BOM 行
    #[serde(default)]
    pub lines: Vec<BomRelation>,
}

/// 目錄快照（庫存系統匯出的 JSON）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub parts: Vec<RawPartRecord>,

    #[serde(default)]
    pub boms: Vec<BomEntry>,
}

/// 記憶體中的物料目錄
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    parts: HashMap<PartKey, PartRecord>,
    by_identifier: HashMap<String, PartKey>,
    boms: HashMap<PartKey, Vec<BomRelation>>,
}

impl InMemoryCatalog {
    /// 創建空目錄
    pub fn new() -> Self {
        Self::default()
    }

    /// 從 JSON 快照載入
    pub fn from_json_str(json: &str) -> partreq_core::Result<Self> {
        let snapshot: CatalogSnapshot =
            serde_json::from_str(json).map_err(|e| PlannerError::InvalidCatalog(e.to_string()))?;
        Self::from_snapshot(snapshot)
    }

    /// 從快照建立目錄
    ///
    /// 主鍵或識別碼重複、BOM 父件不存在、或單位用量不為正時回傳錯誤。
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> partreq_core::Result<Self> {
        let mut catalog = Self::new();

        for raw in snapshot.parts {
            let part = PartRecord::from(raw);
            if catalog.parts.contains_key(&part.key) {
                return Err(PlannerError::InvalidCatalog(format!(
                    "物料主鍵重複: {}",
                    part.key
                )));
            }
            if catalog.by_identifier.contains_key(&part.identifier) {
                return Err(PlannerError::InvalidCatalog(format!(
                    "物料識別碼重複: {}",
                    part.identifier
                )));
            }
            catalog.insert_part(part);
        }

        for entry in snapshot.boms {
            let parent = PartKey(entry.parent);
            if !catalog.parts.contains_key(&parent) {
                return Err(PlannerError::InvalidCatalog(format!(
                    "BOM 父件不存在: {}",
                    parent
                )));
            }
            for line in &entry.lines {
                line.validate()?;
            }
            catalog.boms.insert(parent, entry.lines);
        }

        tracing::debug!(
            "目錄載入完成：物料 {} 筆，BOM {} 筆",
            catalog.parts.len(),
            catalog.boms.len()
        );

        Ok(catalog)
    }

    /// 添加物料（同主鍵覆寫）
    pub fn insert_part(&mut self, part: PartRecord) {
        self.by_identifier.insert(part.identifier.clone(), part.key);
        self.parts.insert(part.key, part);
    }

    /// 設置組裝件的 BOM
    pub fn insert_bom(&mut self, parent: PartKey, lines: Vec<BomRelation>) {
        self.boms.insert(parent, lines);
    }

    /// 建構器模式：添加物料
    pub fn with_part(mut self, part: PartRecord) -> Self {
        self.insert_part(part);
        self
    }

    /// 建構器模式：設置 BOM
    pub fn with_bom(mut self, parent: u64, lines: Vec<BomRelation>) -> Self {
        self.insert_bom(PartKey(parent), lines);
        self
    }

    /// 物料數量
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl PartLookup for InMemoryCatalog {
    fn resolve(&self, identifier: &str) -> Result<PartRecord, LookupError> {
        let key = self
            .by_identifier
            .get(identifier)
            .copied()
            .or_else(|| identifier.trim().parse::<u64>().ok().map(PartKey));

        key.and_then(|k| self.parts.get(&k))
            .cloned()
            .ok_or_else(|| LookupError::NotFound(identifier.to_string()))
    }

    fn bom_of(&self, key: PartKey) -> Result<Vec<BomRelation>, LookupError> {
        Ok(self.boms.get(&key).cloned().unwrap_or_default())
    }
}
