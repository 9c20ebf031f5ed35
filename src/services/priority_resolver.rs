//! 实时优先级服务
//!
//! 根据原始代码和当前时间计算有效优先级。当前时间作为参数传入，
//! 每次展示队列都要重新计算，结果不能缓存。

use crate::models::{Order, PriorityRules, QueuedOrder};
use chrono::NaiveTime;
use tracing::debug;

/// 实时优先级服务
#[derive(Debug, Clone)]
pub struct PriorityResolver {
    rules: PriorityRules,
}

impl PriorityResolver {
    pub fn new(rules: PriorityRules) -> Self {
        Self { rules }
    }

    /// (原始代码, 当前时间) → 有效优先级，先命中的规则生效
    pub fn resolve(&self, raw: u8, now: NaiveTime) -> u8 {
        let r = &self.rules;

        if r.pinned.contains(&raw) {
            return raw;
        }
        if r.local_band.contains(&raw) && now >= r.local_cutoff {
            return r.local_escalated;
        }
        if r.far_band.contains(&raw) && now >= r.far_cutoff {
            return r.far_escalated;
        }
        if raw == r.remote_city && now >= r.remote_cutoff {
            return r.remote_escalated;
        }
        if r.local_band.contains(&raw) || r.far_band.contains(&raw) {
            return r.not_yet_urgent;
        }
        raw
    }

    /// 给订单打上实时优先级并排序
    ///
    /// 有效优先级升序，同级按件数降序；再相同时保持原始顺序。
    /// 超过截单时间的订单升级为 16/17/18，因此排在所有未超时订单之后。
    pub fn build_queue(&self, orders: &[Order], now: NaiveTime) -> Vec<QueuedOrder> {
        let mut queue: Vec<QueuedOrder> = orders
            .iter()
            .map(|order| QueuedOrder {
                effective_priority: self.resolve(order.raw_priority, now),
                order: order.clone(),
            })
            .collect();

        queue.sort_by(|a, b| {
            a.effective_priority
                .cmp(&b.effective_priority)
                .then_with(|| b.order.item_count.cmp(&a.order.item_count))
        });

        debug!(
            "队列已按 {} 重新排序，共 {} 个订单",
            now.format("%H:%M"),
            queue.len()
        );
        queue
    }
}

impl Default for PriorityResolver {
    fn default() -> Self {
        Self::new(PriorityRules::default())
    }
}
