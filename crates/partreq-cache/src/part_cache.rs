//! 單次計算的物料緩存

use partreq_core::{BomRelation, PartKey, PartRecord};
use std::collections::{HashMap, HashSet};

use crate::lookup::{LookupError, PartLookup};

/// 緩存命中統計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}

/// 物料緩存
///
/// 每次計算建立一個新的實例，計算期間不淘汰任何項目。
/// 物料與 BOM 皆以數字主鍵記憶，識別碼只是指向主鍵的別名。
pub struct PartCache<'a, L: PartLookup + ?Sized> {
    lookup: &'a L,
    parts: HashMap<PartKey, PartRecord>,
    aliases: HashMap<String, PartKey>,
    missing: HashSet<String>,
    boms: HashMap<PartKey, Vec<BomRelation>>,
    stats: CacheStats,
}

impl<'a, L: PartLookup + ?Sized> PartCache<'a, L> {
    /// 創建空緩存
    pub fn new(lookup: &'a L) -> Self {
        Self {
            lookup,
            parts: HashMap::new(),
            aliases: HashMap::new(),
            missing: HashSet::new(),
            boms: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// 解析物料
    ///
    /// 找不到的識別碼同樣會被記住；`Unavailable` 不記憶，直接回傳。
    pub fn resolve(&mut self, identifier: &str) -> Result<PartRecord, LookupError> {
        if let Some(key) = self.aliases.get(identifier) {
            if let Some(part) = self.parts.get(key) {
                self.stats.hits += 1;
                return Ok(part.clone());
            }
        }
        if self.missing.contains(identifier) {
            self.stats.hits += 1;
            return Err(LookupError::NotFound(identifier.to_string()));
        }

        self.stats.misses += 1;
        match self.lookup.resolve(identifier) {
            Ok(record) => {
                let key = record.key;
                self.aliases.insert(identifier.to_string(), key);
                self.aliases.insert(record.identifier.clone(), key);
                let part = self.parts.entry(key).or_insert(record);
                Ok(part.clone())
            }
            Err(LookupError::NotFound(id)) => {
                tracing::debug!("物料 {} 不存在，記錄為缺失", id);
                self.missing.insert(identifier.to_string());
                Err(LookupError::NotFound(id))
            }
            Err(err) => Err(err),
        }
    }

    /// 取得組裝件的 BOM 行
    pub fn bom_of(&mut self, key: PartKey) -> Result<Vec<BomRelation>, LookupError> {
        if let Some(lines) = self.boms.get(&key) {
            self.stats.hits += 1;
            return Ok(lines.clone());
        }

        self.stats.misses += 1;
        let lines = self.lookup.bom_of(key)?;
        self.boms.insert(key, lines.clone());
        Ok(lines)
    }

    /// 依主鍵取得已緩存的物料
    pub fn get(&self, key: PartKey) -> Option<&PartRecord> {
        self.parts.get(&key)
    }

    /// 已緩存的物料數量
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// 命中統計
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
