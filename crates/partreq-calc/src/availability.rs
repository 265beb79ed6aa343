//! 可用量計算

use partreq_core::PartRecord;
use rust_decimal::Decimal;

/// 可用量計算器
pub struct AvailabilityCalculator;

impl AvailabilityCalculator {
    /// 可用量 = 總庫存 - (工單佔用 + 銷售訂單佔用)
    ///
    /// 不含在途採購與生產中數量；結果可為負（超額承諾），不做截斷。
    pub fn available(part: &PartRecord) -> Decimal {
        part.total_in_stock - part.committed()
    }

    /// 組裝件有效可用量 = 可用量 + 生產中數量
    pub fn effective_availability(part: &PartRecord) -> Decimal {
        Self::available(part) + part.in_production
    }
}
