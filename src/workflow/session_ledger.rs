//! 会话账本
//!
//! 保存一次操作会话中的队列、分数、跳过计数和已完成标记。
//! 这些状态只能整体替换或整体清空。

use chrono::NaiveTime;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppResult, SessionError};
use crate::models::{FairnessScores, Order, SessionInput, SkipCounter, WorkerId};
use crate::services::{select_candidate, Assignment, ScoreCard};
use crate::workflow::assignment_flow::{AssignmentFlow, Plan};

/// 界面显示的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub worker: WorkerId,
    pub order_id: String,
    pub label: String,
    pub item_count: u32,
    pub score_after: i64,
    pub skip: u32,
}

impl From<&Assignment> for DisplayRow {
    fn from(a: &Assignment) -> Self {
        Self {
            worker: a.worker,
            order_id: a.order.id.clone(),
            label: a.label.clone(),
            item_count: a.order.item_count,
            score_after: a.score_after,
            skip: a.skip,
        }
    }
}

/// 会话内的全部可变状态
#[derive(Debug, Clone, Default)]
struct SessionState {
    orders: Vec<Order>,
    score_card: ScoreCard,
    skips: SkipCounter,
    plan: Option<Plan>,
    done: BTreeSet<String>,
}

/// 会话账本
pub struct SessionLedger {
    flow: AssignmentFlow,
    state: SessionState,
}

impl SessionLedger {
    pub fn new(config: &Config) -> AppResult<Self> {
        Ok(Self {
            flow: AssignmentFlow::new(config)?,
            state: SessionState::default(),
        })
    }

    /// 用新输入重新计算
    ///
    /// 输入有误时返回错误，原有状态保持不变
    pub fn calculate(&mut self, input: &SessionInput, now: NaiveTime) -> AppResult<&Plan> {
        let parsed = self.flow.prepare(input)?;
        let plan = self
            .flow
            .assign(&parsed.orders, &parsed.score_card, &self.state.skips, now);

        self.state.orders = parsed.orders;
        self.state.score_card = parsed.score_card;
        Ok(&*self.state.plan.insert(plan))
    }

    /// 按新的时间重新排序并分配，分数沿用上次计算
    ///
    /// 实时优先级随时间变化，同样的输入在不同时间刷新可能得到不同顺序
    pub fn refresh(&mut self, now: NaiveTime) -> AppResult<&Plan> {
        if self.state.plan.is_none() {
            return Err(SessionError::NotCalculated.into());
        }
        let plan = self.flow.assign(
            &self.state.orders,
            &self.state.score_card,
            &self.state.skips,
            now,
        );
        Ok(&*self.state.plan.insert(plan))
    }

    /// "换下一位"：该订单跳过计数加 1，只重新选择这一行
    pub fn assign_next_best(&mut self, order_id: &str) -> AppResult<&Assignment> {
        let plan = self.state.plan.as_mut().ok_or(SessionError::NotCalculated)?;

        let Some(row) = plan
            .rotation
            .assignments
            .iter_mut()
            .find(|a| a.order.id == order_id)
        else {
            let known = self.state.orders.iter().any(|o| o.id == order_id);
            return Err(if known {
                SessionError::OrderNotAssigned {
                    order_id: order_id.to_string(),
                }
            } else {
                SessionError::UnknownOrder {
                    order_id: order_id.to_string(),
                }
            }
            .into());
        };

        let skip = self.state.skips.entry(order_id.to_string()).or_insert(0);
        *skip += 1;

        let worker = select_candidate(&row.candidates, *skip, None);
        let base = row
            .candidates
            .iter()
            .find(|(w, _)| *w == worker)
            .map(|&(_, s)| s)
            .unwrap_or(row.score_after - 1);

        info!(
            "🔁 订单 {} 换下一位: 编号 {} → 编号 {} (跳过 {})",
            order_id, row.worker, worker, skip
        );

        // 分数表跟着这一单从原接单人转到新接单人
        let scores = &mut plan.rotation.final_scores;
        if let Some(s) = scores.get_mut(&row.worker) {
            *s -= 1;
        }
        *scores.entry(worker).or_insert(base) += 1;

        row.worker = worker;
        row.skip = *skip;
        row.score_after = base + 1;
        Ok(&*row)
    }

    /// 标记完成：只从显示中移除，不影响评分
    pub fn mark_done(&mut self, order_id: &str) -> AppResult<()> {
        if !self.state.orders.iter().any(|o| o.id == order_id) {
            return Err(SessionError::UnknownOrder {
                order_id: order_id.to_string(),
            }
            .into());
        }
        self.state.done.insert(order_id.to_string());
        Ok(())
    }

    /// 清空会话：队列、分数、跳过计数一起重置
    pub fn clear(&mut self) {
        if self.state.plan.is_some() {
            warn!("🧹 清空会话 ({} 个跳过记录)", self.state.skips.len());
        }
        self.state = SessionState::default();
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.state.plan.as_ref()
    }

    pub fn skip_count(&self, order_id: &str) -> u32 {
        self.state.skips.get(order_id).copied().unwrap_or(0)
    }

    /// 未标记完成的分配行
    pub fn display_rows(&self) -> Vec<DisplayRow> {
        self.state
            .plan
            .iter()
            .flat_map(|p| p.rotation.assignments.iter())
            .filter(|a| !self.state.done.contains(&a.order.id))
            .map(DisplayRow::from)
            .collect()
    }

    /// 分配后的分数表
    pub fn score_table(&self) -> FairnessScores {
        self.state
            .plan
            .as_ref()
            .map(|p| p.rotation.final_scores.clone())
            .unwrap_or_default()
    }
}
