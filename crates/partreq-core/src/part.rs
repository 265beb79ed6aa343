//! 物料模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 物料主鍵（庫存系統中的穩定數字鍵）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartKey(pub u64);

impl fmt::Display for PartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PartKey {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// 物料類別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartKind {
    /// 外購件
    Purchaseable,
    /// 組裝件
    Assembly,
    /// 可外購亦可組裝
    Both,
    /// 無法分類（既非外購亦非組裝）
    Unclassified,
}

impl PartKind {
    /// 由庫存系統的兩個布林旗標推導類別
    pub fn from_flags(purchaseable: bool, assembly: bool) -> Self {
        match (purchaseable, assembly) {
            (true, true) => PartKind::Both,
            (true, false) => PartKind::Purchaseable,
            (false, true) => PartKind::Assembly,
            (false, false) => PartKind::Unclassified,
        }
    }

    pub fn is_purchaseable(&self) -> bool {
        matches!(self, PartKind::Purchaseable | PartKind::Both)
    }

    pub fn is_assembly(&self) -> bool {
        matches!(self, PartKind::Assembly | PartKind::Both)
    }
}

/// 物料記錄（所有數量欄位皆已填妥）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartRecord {
    /// 數字主鍵
    pub key: PartKey,

    /// 人類可讀識別碼（可能與主鍵不同）
    pub identifier: String,

    /// 顯示名稱
    pub name: String,

    /// 物料類別
    pub kind: PartKind,

    /// 是否為耗材
    pub is_consumable: bool,

    /// 供應商名稱
    pub supplier_names: Vec<String>,

    /// 總庫存
    pub total_in_stock: Decimal,

    /// 工單已佔用數量
    pub required_for_build_orders: Decimal,

    /// 銷售訂單已佔用數量
    pub required_for_sales_orders: Decimal,

    /// 在途採購數量（僅外購件有意義）
    pub on_order: Decimal,

    /// 生產中數量（僅組裝件有意義）
    pub in_production: Decimal,
}

impl PartRecord {
    /// 創建新的物料記錄，數量欄位預設為 0
    pub fn new(key: u64, identifier: impl Into<String>, kind: PartKind) -> Self {
        let identifier = identifier.into();
        Self {
            key: PartKey(key),
            name: identifier.clone(),
            identifier,
            kind,
            is_consumable: false,
            supplier_names: Vec::new(),
            total_in_stock: Decimal::ZERO,
            required_for_build_orders: Decimal::ZERO,
            required_for_sales_orders: Decimal::ZERO,
            on_order: Decimal::ZERO,
            in_production: Decimal::ZERO,
        }
    }

    /// 建構器模式：設置顯示名稱
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// 建構器模式：設置總庫存
    pub fn with_stock(mut self, total_in_stock: Decimal) -> Self {
        self.total_in_stock = total_in_stock;
        self
    }

    /// 建構器模式：設置工單與銷售訂單佔用
    pub fn with_commitments(mut self, build_orders: Decimal, sales_orders: Decimal) -> Self {
        self.required_for_build_orders = build_orders;
        self.required_for_sales_orders = sales_orders;
        self
    }

    /// 建構器模式：設置在途採購數量
    pub fn with_on_order(mut self, on_order: Decimal) -> Self {
        self.on_order = on_order;
        self
    }

    /// 建構器模式：設置生產中數量
    pub fn with_in_production(mut self, in_production: Decimal) -> Self {
        self.in_production = in_production;
        self
    }

    /// 建構器模式：標記為耗材
    pub fn as_consumable(mut self) -> Self {
        self.is_consumable = true;
        self
    }

    /// 建構器模式：添加供應商
    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier_names.push(supplier.into());
        self
    }

    /// 已承諾數量（工單 + 銷售訂單）
    pub fn committed(&self) -> Decimal {
        self.required_for_build_orders + self.required_for_sales_orders
    }

    /// 檢查供應商清單是否包含指定名稱（不分大小寫）
    pub fn has_supplier(&self, supplier: &str) -> bool {
        self.supplier_names
            .iter()
            .any(|s| s.eq_ignore_ascii_case(supplier))
    }
}

/// 庫存系統回傳的原始物料資料
///
/// 任何數量欄位都可能缺失或為 null，在此邊界一次性轉為 0，
/// 之後的計算一律使用 [`PartRecord`]。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPartRecord {
    pub key: u64,
    pub identifier: Option<String>,
    pub name: Option<String>,
    pub purchaseable: Option<bool>,
    pub assembly: Option<bool>,
    pub consumable: Option<bool>,
    pub suppliers: Option<Vec<String>>,
    pub total_in_stock: Option<Decimal>,
    pub required_for_build_orders: Option<Decimal>,
    pub required_for_sales_orders: Option<Decimal>,
    pub on_order: Option<Decimal>,
    pub in_production: Option<Decimal>,
}

impl From<RawPartRecord> for PartRecord {
    fn from(raw: RawPartRecord) -> Self {
        let kind = PartKind::from_flags(
            raw.purchaseable.unwrap_or(false),
            raw.assembly.unwrap_or(false),
        );
        let identifier = raw
            .identifier
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| raw.key.to_string());
        let name = raw.name.unwrap_or_else(|| identifier.clone());
        let zero = |v: Option<Decimal>| v.unwrap_or(Decimal::ZERO);

        Self {
            key: PartKey(raw.key),
            identifier,
            name,
            kind,
            is_consumable: raw.consumable.unwrap_or(false),
            supplier_names: raw.suppliers.unwrap_or_default(),
            total_in_stock: zero(raw.total_in_stock),
            required_for_build_orders: zero(raw.required_for_build_orders),
            required_for_sales_orders: zero(raw.required_for_sales_orders),
            on_order: zero(raw.on_order),
            in_production: zero(raw.in_production),
        }
    }
}
