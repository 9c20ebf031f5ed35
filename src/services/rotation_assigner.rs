//! 轮转分配服务
//!
//! 按优先级顺序遍历订单队列，每单交给当前分数最低的可接单人员，
//! 然后把该人分数加 1。这是局部贪心，不追求全局最优。

use crate::models::{
    priority_label, FairnessScores, Order, QueuedOrder, SkipCounter, WorkerId,
};
use serde::Serialize;
use tracing::{debug, warn};

/// 一行分配结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub order: Order,
    pub effective_priority: u8,
    pub label: String,
    pub worker: WorkerId,
    /// 计算时使用的"换下一位"次数
    pub skip: u32,
    /// 接单后该人的分数
    pub score_after: i64,
    /// 选择前的候选排名（分数升序）
    pub candidates: Vec<(WorkerId, i64)>,
}

/// 一次分配的完整结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RotationResult {
    pub assignments: Vec<Assignment>,
    /// 没有可接单人员而未分配的订单
    pub unassigned: Vec<QueuedOrder>,
    /// 超出显示上限、本次没有计算的订单
    pub beyond_cap: Vec<QueuedOrder>,
    /// 分配结束后的工作分数
    pub final_scores: FairnessScores,
}

/// 轮转分配服务
#[derive(Debug, Clone)]
pub struct RotationAssigner {
    display_cap: usize,
}

impl RotationAssigner {
    pub fn new(display_cap: usize) -> Self {
        Self { display_cap }
    }

    /// 对整条队列执行一次分配
    ///
    /// `scores` 不会被修改，分配在其副本上进行
    pub fn assign(
        &self,
        queue: &[QueuedOrder],
        scores: &FairnessScores,
        skips: &SkipCounter,
    ) -> RotationResult {
        let mut working = scores.clone();
        let mut last: Option<WorkerId> = None;
        let mut result = RotationResult::default();

        for (position, queued) in queue.iter().enumerate() {
            if result.assignments.len() >= self.display_cap {
                result.beyond_cap.extend_from_slice(&queue[position..]);
                break;
            }

            let candidates = rank_candidates(&working);
            if candidates.is_empty() {
                warn!(
                    "⚠️ 没有可接单人员，剩余 {} 个订单未分配",
                    queue.len() - position
                );
                result.unassigned.extend_from_slice(&queue[position..]);
                break;
            }

            let skip = skips.get(&queued.order.id).copied().unwrap_or(0);
            let worker = select_candidate(&candidates, skip, last);

            let score_after = match working.get_mut(&worker) {
                Some(score) => {
                    *score += 1;
                    *score
                }
                None => continue,
            };

            debug!(
                "{} → 编号 {} (跳过 {}，分数 {})",
                queued.order, worker, skip, score_after
            );

            result.assignments.push(Assignment {
                order: queued.order.clone(),
                effective_priority: queued.effective_priority,
                label: priority_label(queued.effective_priority),
                worker,
                skip,
                score_after,
                candidates,
            });
            last = Some(worker);
        }

        result.final_scores = working;
        result
    }
}

/// 按分数升序排列候选；同分按编号升序
pub fn rank_candidates(scores: &FairnessScores) -> Vec<(WorkerId, i64)> {
    let mut ranked: Vec<(WorkerId, i64)> = scores.iter().map(|(&w, &s)| (w, s)).collect();
    ranked.sort_by_key(|&(_, score)| score);
    ranked
}

/// 从候选中选人
///
/// 取第 `min(skip, 候选数-1)` 位；没有跳过时若选中的人正是上一单的人，
/// 且还有其他候选，则改选第 2 位。`candidates` 不能为空。
pub fn select_candidate(
    candidates: &[(WorkerId, i64)],
    skip: u32,
    last: Option<WorkerId>,
) -> WorkerId {
    let max_index = candidates.len().saturating_sub(1);
    let mut index = (skip as usize).min(max_index);

    if skip == 0 && candidates.len() > 1 && Some(candidates[index].0) == last {
        index = 1;
    }

    candidates[index].0
}
