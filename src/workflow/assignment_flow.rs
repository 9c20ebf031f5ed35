//! 分配流程 - 流程层
//!
//! 核心职责：定义一次"计算"的完整流程
//!
//! 流程顺序：
//! 1. 文本提取 → 历史记录 / 今日累计 / 订单
//! 2. 实时优先级 → 排序后的队列
//! 3. 公平评分 → 分数表
//! 4. 轮转分配 → 分配结果

use chrono::NaiveTime;
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::error::{AppResult, InputError};
use crate::models::{Order, SessionInput, SkipCounter, WorkerId};
use crate::services::{
    FairnessScorer, PriorityResolver, RotationAssigner, RotationResult, ScoreCard, TextExtractor,
};

/// 一次计算的结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    /// 计算时使用的时间
    pub computed_at: NaiveTime,
    /// 评分明细（分配前）
    pub score_card: ScoreCard,
    pub rotation: RotationResult,
}

impl Plan {
    /// 导出为 JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// 解析后的输入
#[derive(Debug, Clone)]
pub struct ParsedInput {
    pub orders: Vec<Order>,
    pub score_card: ScoreCard,
}

/// 分配流程
///
/// - 编排提取、优先级、评分、分配
/// - 不持有会话状态，跳过计数由调用方传入
pub struct AssignmentFlow {
    extractor: TextExtractor,
    resolver: PriorityResolver,
    scorer: FairnessScorer,
    assigner: RotationAssigner,
    roster_ids: Vec<WorkerId>,
}

impl AssignmentFlow {
    /// 创建新的分配流程
    pub fn new(config: &Config) -> AppResult<Self> {
        Ok(Self {
            extractor: TextExtractor::new(config)?,
            resolver: PriorityResolver::new(config.priority.clone()),
            scorer: FairnessScorer::new(config),
            assigner: RotationAssigner::new(config.display_cap),
            roster_ids: config.roster.clone(),
        })
    }

    /// 解析输入并评分
    ///
    /// 订单文本为空或没有可识别订单时返回错误，不做任何计算
    pub fn prepare(&self, input: &SessionInput) -> AppResult<ParsedInput> {
        if input.orders.trim().is_empty() {
            return Err(InputError::EmptyOrders.into());
        }

        let orders = self.extractor.parse_orders(&input.orders);
        if orders.is_empty() {
            return Err(InputError::NoRecognizableOrders {
                lines: input.orders.lines().count(),
            }
            .into());
        }

        let history = self.extractor.parse_history(&input.history);
        let today = self.extractor.parse_counts(&input.today);
        let roster = input.roster(&self.roster_ids);

        info!(
            "📋 解析完成: {} 个订单, {} 个历史周期, 今日 {} 人有记录",
            orders.len(),
            history.len(),
            today.len()
        );

        let score_card = self.scorer.score(&history, &today, &roster);
        Ok(ParsedInput { orders, score_card })
    }

    /// 按当前时间排序队列并分配
    pub fn assign(
        &self,
        orders: &[Order],
        score_card: &ScoreCard,
        skips: &SkipCounter,
        now: NaiveTime,
    ) -> Plan {
        let queue = self.resolver.build_queue(orders, now);
        let rotation = self.assigner.assign(&queue, &score_card.scores(), skips);

        info!(
            "✓ 分配完成 ({}): {} 单已分配, {} 单无人可接, {} 单超出显示上限",
            now.format("%H:%M"),
            rotation.assignments.len(),
            rotation.unassigned.len(),
            rotation.beyond_cap.len()
        );

        Plan {
            computed_at: now,
            score_card: score_card.clone(),
            rotation,
        }
    }

    /// 完整流程：解析 → 评分 → 排序 → 分配
    pub fn run(&self, input: &SessionInput, skips: &SkipCounter, now: NaiveTime) -> AppResult<Plan> {
        let parsed = self.prepare(input)?;
        Ok(self.assign(&parsed.orders, &parsed.score_card, skips, now))
    }
}
