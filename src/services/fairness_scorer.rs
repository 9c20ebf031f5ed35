//! 公平评分服务
//!
//! 把历史与今日计数合成一个可比较的分数，分数越低越应该接下一单。
//!
//! 1. 历史累计 = 各周期计数之和
//! 2. 缺勤 = 历史至少有 `absence_window` 个周期，且最近这些周期计数为 0
//! 3. 基线 = 各周期总量的平均值 ÷ 名单总人数
//! 4. 豁免或缺勤的人：基线 + 今日；其他人：历史累计 + 今日（记为"挣得分"）
//! 5. 得分为 0、未豁免且未缺勤的人，改为 最高挣得分 + `penalty_margin`

use crate::config::Config;
use crate::models::{CountRecord, FairnessScores, HistoryLedger, Roster, WorkerId};
use serde::Serialize;
use tracing::{debug, info};

/// 单人评分明细
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub worker: WorkerId,
    pub historical_total: u64,
    pub today: u32,
    pub absent: bool,
    pub pardoned: bool,
    /// 是否被零产出惩罚
    pub penalized: bool,
    pub score: i64,
}

/// 评分结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreCard {
    /// 每人基线
    pub baseline: i64,
    /// 最高挣得分
    pub max_earned: i64,
    pub breakdown: Vec<ScoreBreakdown>,
}

impl ScoreCard {
    /// 只取分数，供轮转分配使用
    pub fn scores(&self) -> FairnessScores {
        self.breakdown.iter().map(|b| (b.worker, b.score)).collect()
    }

    pub fn get(&self, worker: WorkerId) -> Option<&ScoreBreakdown> {
        self.breakdown.iter().find(|b| b.worker == worker)
    }
}

/// 公平评分服务
#[derive(Debug, Clone)]
pub struct FairnessScorer {
    absence_window: usize,
    penalty_margin: i64,
}

impl FairnessScorer {
    pub fn new(config: &Config) -> Self {
        Self {
            absence_window: config.absence_window,
            penalty_margin: config.penalty_margin,
        }
    }

    /// 计算名单中所有可接单人员的分数
    pub fn score(&self, history: &HistoryLedger, today: &CountRecord, roster: &Roster) -> ScoreCard {
        let baseline = self.baseline_per_worker(history, roster.size());
        let pardoned = roster.pardoned();

        let mut breakdown = Vec::new();
        let mut max_earned: i64 = 0;

        for worker in roster.eligible() {
            let historical_total = history.total_for(worker);
            let today_count = today.get(worker);
            let absent = self.is_absent(history, worker);
            let is_pardoned = pardoned.contains(&worker);

            let score = if is_pardoned || absent {
                baseline + i64::from(today_count)
            } else {
                let earned = to_score(historical_total) + i64::from(today_count);
                max_earned = max_earned.max(earned);
                earned
            };

            breakdown.push(ScoreBreakdown {
                worker,
                historical_total,
                today: today_count,
                absent,
                pardoned: is_pardoned,
                penalized: false,
                score,
            });
        }

        let penalty = max_earned + self.penalty_margin;
        for entry in breakdown.iter_mut() {
            if entry.score == 0 && !entry.pardoned && !entry.absent {
                debug!("编号 {} 零产出且未豁免，分数调整为 {}", entry.worker, penalty);
                entry.score = penalty;
                entry.penalized = true;
            }
        }

        info!(
            "✓ 评分完成: {} 人可接单，基线 {}，最高挣得分 {}",
            breakdown.len(),
            baseline,
            max_earned
        );

        ScoreCard {
            baseline,
            max_earned,
            breakdown,
        }
    }

    /// 历史足够长且最近几个周期计数全为 0
    fn is_absent(&self, history: &HistoryLedger, worker: WorkerId) -> bool {
        history.len() >= self.absence_window
            && history.recent_total_for(worker, self.absence_window) == 0
    }

    /// 各周期总量的平均值按名单总人数平分，向下取整
    fn baseline_per_worker(&self, history: &HistoryLedger, roster_size: usize) -> i64 {
        if history.is_empty() || roster_size == 0 {
            return 0;
        }
        let sum: u64 = history.entries().iter().map(|e| e.total()).sum();
        let mean = sum as f64 / history.len() as f64;
        (mean / roster_size as f64).floor() as i64
    }
}

fn to_score(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkerStatus;

    fn scorer() -> FairnessScorer {
        FairnessScorer::new(&Config::default())
    }

    fn record(pairs: &[(WorkerId, u32)]) -> CountRecord {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_zero_activity_penalty() {
        let roster = Roster::new(&[1, 2, 3]);
        let card = scorer().score(
            &HistoryLedger::default(),
            &record(&[(1, 5), (2, 5), (3, 0)]),
            &roster,
        );

        let scores = card.scores();
        assert_eq!(scores[&1], 5);
        assert_eq!(scores[&2], 5);
        assert_eq!(scores[&3], 10);
        assert!(card.get(3).unwrap().penalized);
    }

    #[test]
    fn test_absent_worker_gets_baseline_not_penalty() {
        let roster = Roster::new(&[1, 2, 3]);
        // 每周期总量 30，名单 3 人 → 基线 10
        let history = HistoryLedger::new(vec![
            record(&[(1, 15), (2, 15), (3, 0)]),
            record(&[(1, 15), (2, 15), (3, 0)]),
            record(&[(1, 15), (2, 15), (3, 0)]),
        ]);
        let card = scorer().score(&history, &record(&[(1, 2), (2, 1)]), &roster);

        let w3 = card.get(3).unwrap();
        assert!(w3.absent);
        assert!(!w3.penalized);
        assert_eq!(w3.score, 10);
        assert_eq!(card.get(1).unwrap().score, 47);
    }

    #[test]
    fn test_absent_worker_with_empty_baseline_keeps_zero() {
        let roster = Roster::new(&[1, 2]);
        let history = HistoryLedger::new(vec![record(&[]), record(&[]), record(&[])]);
        let card = scorer().score(&history, &record(&[(1, 4)]), &roster);

        // 两人都缺勤：分数 = 基线 0 + 今日
        assert_eq!(card.get(1).unwrap().score, 4);
        assert_eq!(card.get(2).unwrap().score, 0);
        assert!(!card.get(2).unwrap().penalized);
    }

    #[test]
    fn test_short_history_never_marks_absent() {
        let roster = Roster::new(&[1, 2]);
        let history = HistoryLedger::new(vec![record(&[(1, 6)]), record(&[(1, 6)])]);
        let card = scorer().score(&history, &record(&[]), &roster);

        let w2 = card.get(2).unwrap();
        assert!(!w2.absent);
        assert!(w2.penalized);
        assert_eq!(w2.score, 12 + 5);
    }

    #[test]
    fn test_pardoned_worker_uses_baseline() {
        let mut roster = Roster::new(&[1, 2]);
        roster.set_status(
            2,
            WorkerStatus {
                pardoned: true,
                ..Default::default()
            },
        );
        let history = HistoryLedger::new(vec![record(&[(1, 9), (2, 1)])]);
        let card = scorer().score(&history, &record(&[]), &roster);

        // 基线 = 10 / 2 = 5
        assert_eq!(card.baseline, 5);
        assert_eq!(card.get(2).unwrap().score, 5);
        assert_eq!(card.get(1).unwrap().score, 9);
    }

    #[test]
    fn test_pardoned_worker_never_penalized() {
        let ids: Vec<WorkerId> = (1..=20).collect();
        let mut roster = Roster::new(&ids);
        roster.set_status(
            2,
            WorkerStatus {
                pardoned: true,
                ..Default::default()
            },
        );
        // 总量 15，名单 20 人 → 基线 0
        let history = HistoryLedger::new(vec![record(&[(2, 15)])]);
        let card = scorer().score(&history, &record(&[]), &roster);

        assert_eq!(card.baseline, 0);
        let w2 = card.get(2).unwrap();
        assert_eq!(w2.historical_total, 15);
        assert!(w2.pardoned);
        assert!(!w2.penalized);
        assert_eq!(w2.score, 0);
        assert!(card.get(1).unwrap().penalized);
    }

    #[test]
    fn test_only_eligible_workers_scored() {
        let mut roster = Roster::new(&[1, 2, 3]);
        roster.set_status(
            1,
            WorkerStatus {
                present: false,
                ..Default::default()
            },
        );
        roster.set_status(
            2,
            WorkerStatus {
                on_meal: true,
                ..Default::default()
            },
        );
        let card = scorer().score(&HistoryLedger::default(), &record(&[(3, 1)]), &roster);

        assert_eq!(card.scores().keys().copied().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_baseline_divides_by_full_roster() {
        // 名单 4 人，但历史里只有 2 人有数据
        let roster = Roster::new(&[1, 2, 3, 5]);
        let history = HistoryLedger::new(vec![record(&[(1, 10), (2, 10)]), record(&[(1, 7)])]);
        // 平均 (20 + 7) / 2 = 13.5，÷ 4 = 3.375 → 3
        assert_eq!(scorer().baseline_per_worker(&history, roster.size()), 3);
    }
}
