use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 订单号 → 操作员要求"换下一位"的次数
pub type SkipCounter = BTreeMap<String, u32>;

/// 待拣货订单
///
/// 解析后不可变；有效优先级由原始代码和当前时间推导，不保存在订单上
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    /// 订单号（固定前缀的 6 位数字）
    pub id: String,
    /// 原始优先级代码
    pub raw_priority: u8,
    /// 件数
    pub item_count: u32,
}

impl Order {
    pub fn new(id: impl Into<String>, raw_priority: u8, item_count: u32) -> Self {
        Self {
            id: id.into(),
            raw_priority,
            item_count,
        }
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[订单 #{} 优先级#{} 件数#{}]",
            self.id, self.raw_priority, self.item_count
        )
    }
}

/// 已打上实时优先级的订单
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedOrder {
    pub order: Order,
    /// 实时（有效）优先级，越小越紧急
    pub effective_priority: u8,
}
