//! BOM 展開與需求累計

use partreq_cache::{LookupError, PartCache, PartLookup};
use partreq_core::{BomRelation, PartKey, PartRecord, PartRequest, PlannerConfig, PlannerError};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::availability::AvailabilityCalculator;
use crate::Diagnostic;

/// 單一物料的累計需求
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedRequirement {
    /// 物料主鍵
    pub key: PartKey,

    /// 所有父件傳下來的需求總和
    pub total_required: Decimal,

    /// 引用次數（頂層需求與 BOM 行）
    pub references: usize,

    /// 來自選配行的引用次數
    pub optional_references: usize,

    /// 來自耗材行的引用次數
    pub consumable_references: usize,
}

impl AggregatedRequirement {
    fn new(key: PartKey) -> Self {
        Self {
            key,
            total_required: Decimal::ZERO,
            references: 0,
            optional_references: 0,
            consumable_references: 0,
        }
    }

    /// 所有引用皆為選配行
    pub fn is_optional(&self) -> bool {
        self.references > 0 && self.optional_references == self.references
    }

    /// 所有引用皆為耗材行
    pub fn is_consumable_line(&self) -> bool {
        self.references > 0 && self.consumable_references == self.references
    }
}

/// 引用來源的旗標
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineFlags {
    pub optional: bool,
    pub consumable: bool,
}

impl From<&BomRelation> for LineFlags {
    fn from(line: &BomRelation) -> Self {
        Self {
            optional: line.is_optional,
            consumable: line.is_consumable,
        }
    }
}

/// 需求表
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequirementTable {
    entries: HashMap<PartKey, AggregatedRequirement>,
}

impl RequirementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 累加需求（首次出現時建立項目，數量為 0 也會記錄）
    pub fn add(&mut self, key: PartKey, quantity: Decimal, flags: LineFlags) {
        let entry = self
            .entries
            .entry(key)
            .or_insert_with(|| AggregatedRequirement::new(key));
        entry.total_required += quantity;
        entry.references += 1;
        if flags.optional {
            entry.optional_references += 1;
        }
        if flags.consumable {
            entry.consumable_references += 1;
        }
    }

    /// 合併另一張需求表
    pub fn merge(&mut self, other: RequirementTable) {
        for (key, req) in other.entries {
            let entry = self
                .entries
                .entry(key)
                .or_insert_with(|| AggregatedRequirement::new(key));
            entry.total_required += req.total_required;
            entry.references += req.references;
            entry.optional_references += req.optional_references;
            entry.consumable_references += req.consumable_references;
        }
    }

    pub fn get(&self, key: PartKey) -> Option<&AggregatedRequirement> {
        self.entries.get(&key)
    }

    /// 某物料的需求總和（未出現時為 0）
    pub fn total_required(&self, key: PartKey) -> Decimal {
        self.entries
            .get(&key)
            .map(|r| r.total_required)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn contains(&self, key: PartKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AggregatedRequirement> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 單筆頂層需求展開失敗的原因
#[derive(Debug, thiserror::Error)]
pub enum ExplosionError {
    #[error("BOM 循環引用: {}", .path.join(" -> "))]
    Cycle { path: Vec<String> },

    #[error("BOM 展開深度超過 {limit} 層: {}", .path.join(" -> "))]
    DepthExceeded { path: Vec<String>, limit: usize },

    #[error(transparent)]
    Catalog(#[from] LookupError),
}

/// 展開結果
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub table: RequirementTable,
    pub diagnostics: Vec<Diagnostic>,
}

/// 需求累計器
pub struct RequirementAggregator<'r> {
    config: &'r PlannerConfig,
}

impl<'r> RequirementAggregator<'r> {
    pub fn new(config: &'r PlannerConfig) -> Self {
        Self { config }
    }

    /// 展開所有頂層需求
    ///
    /// 每筆頂層需求先展開到暫存表，成功後才併入結果，
    /// 因此因循環中止的需求不會留下任何累計量。
    pub fn aggregate<L: PartLookup + ?Sized>(
        &self,
        requests: &[PartRequest],
        cache: &mut PartCache<'_, L>,
    ) -> partreq_core::Result<Aggregation> {
        let mut aggregation = Aggregation::default();

        for request in requests {
            let part = match cache.resolve(&request.identifier) {
                Ok(part) => part,
                Err(LookupError::NotFound(id)) => {
                    let diagnostic = Diagnostic::part_not_found(&id, None);
                    tracing::warn!("{}", diagnostic.message);
                    aggregation.diagnostics.push(diagnostic);
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            tracing::debug!("展開頂層需求: {} x {}", part.identifier, request.quantity);

            let mut walk = Explosion::new(cache, self.config);
            let outcome = walk.explode(&part, request.quantity, LineFlags::default());
            let (table, diagnostics) = walk.finish();
            aggregation.diagnostics.extend(diagnostics);

            match outcome {
                Ok(()) => aggregation.table.merge(table),
                Err(ExplosionError::Cycle { path }) => {
                    let diagnostic = Diagnostic::cyclic_bom(&request.identifier, &path);
                    tracing::warn!("{}", diagnostic.message);
                    aggregation.diagnostics.push(diagnostic);
                }
                Err(ExplosionError::DepthExceeded { path, limit }) => {
                    let diagnostic = Diagnostic::depth_exceeded(&request.identifier, &path, limit);
                    tracing::warn!("{}", diagnostic.message);
                    aggregation.diagnostics.push(diagnostic);
                }
                Err(ExplosionError::Catalog(err)) => {
                    return Err(match err {
                        LookupError::Unavailable(msg) => PlannerError::CatalogUnavailable(msg),
                        other => other.into(),
                    });
                }
            }
        }

        Ok(aggregation)
    }
}

/// 單筆頂層需求的深度優先展開
struct Explosion<'c, 'a, L: PartLookup + ?Sized> {
    cache: &'c mut PartCache<'a, L>,
    config: &'c PlannerConfig,
    table: RequirementTable,
    diagnostics: Vec<Diagnostic>,
    /// 目前路徑上的祖先（依序）
    path: Vec<String>,
    on_path: HashSet<PartKey>,
}

impl<'c, 'a, L: PartLookup + ?Sized> Explosion<'c, 'a, L> {
    fn new(cache: &'c mut PartCache<'a, L>, config: &'c PlannerConfig) -> Self {
        Self {
            cache,
            config,
            table: RequirementTable::new(),
            diagnostics: Vec::new(),
            path: Vec::new(),
            on_path: HashSet::new(),
        }
    }

    fn finish(self) -> (RequirementTable, Vec<Diagnostic>) {
        (self.table, self.diagnostics)
    }

    fn explode(
        &mut self,
        part: &PartRecord,
        quantity_needed: Decimal,
        flags: LineFlags,
    ) -> Result<(), ExplosionError> {
        if self.on_path.contains(&part.key) {
            let mut path = self.path.clone();
            path.push(part.identifier.clone());
            return Err(ExplosionError::Cycle { path });
        }
        if self.path.len() >= self.config.max_bom_depth {
            let mut path = self.path.clone();
            path.push(part.identifier.clone());
            return Err(ExplosionError::DepthExceeded {
                path,
                limit: self.config.max_bom_depth,
            });
        }

        // 毛需求：不扣除本身庫存
        self.table.add(part.key, quantity_needed, flags);

        if !part.kind.is_assembly() {
            return Ok(());
        }

        let effective = AvailabilityCalculator::effective_availability(part);
        let covered = quantity_needed.min(effective.max(Decimal::ZERO));
        let net_for_children = quantity_needed - covered;

        let lines = match self.cache.bom_of(part.key) {
            Ok(lines) => lines,
            Err(LookupError::NotFound(_)) => Vec::new(),
            Err(err) => return Err(err.into()),
        };

        if lines.is_empty() {
            let diagnostic = Diagnostic::empty_bom(&part.identifier);
            if self.config.warn_on_empty_bom {
                tracing::warn!("{}", diagnostic.message);
            } else {
                tracing::debug!("{}", diagnostic.message);
            }
            self.diagnostics.push(diagnostic);
            return Ok(());
        }

        tracing::debug!(
            "BOM 展開: {} 需求 {}，可覆蓋 {}，子件淨需求 {}",
            part.identifier,
            quantity_needed,
            covered,
            net_for_children
        );

        self.path.push(part.identifier.clone());
        self.on_path.insert(part.key);

        for line in &lines {
            let child = match self.cache.resolve(&line.child) {
                Ok(child) => child,
                Err(LookupError::NotFound(id)) => {
                    let diagnostic = Diagnostic::part_not_found(&id, Some(&part.identifier));
                    tracing::warn!("{}", diagnostic.message);
                    self.diagnostics.push(diagnostic);
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            let child_quantity = line.child_quantity(net_for_children);
            self.explode(&child, child_quantity, LineFlags::from(line))?;
        }

        self.path.pop();
        self.on_path.remove(&part.key);

        Ok(())
    }
}
