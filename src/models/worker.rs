//! 拣货员（surtidor）相关数据模型

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// 拣货员编号，来自固定名单，允许不连续
pub type WorkerId = u32;

/// 公平分数（越低越应该接下一单），只包含可接单人员
pub type FairnessScores = BTreeMap<WorkerId, i64>;

/// 单个统计周期内每位拣货员完成的订单数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRecord {
    counts: BTreeMap<WorkerId, u32>,
}

impl CountRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入一条计数，同一编号后写覆盖先写
    pub fn insert(&mut self, worker: WorkerId, count: u32) {
        self.counts.insert(worker, count);
    }

    /// 获取某人的计数，不存在时视为 0
    pub fn get(&self, worker: WorkerId) -> u32 {
        self.counts.get(&worker).copied().unwrap_or(0)
    }

    /// 本周期所有人的订单总数
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<(WorkerId, u32)> for CountRecord {
    fn from_iter<I: IntoIterator<Item = (WorkerId, u32)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

/// 历史记录，按时间顺序排列（最早的在前）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLedger {
    entries: Vec<CountRecord>,
}

impl HistoryLedger {
    pub fn new(entries: Vec<CountRecord>) -> Self {
        Self { entries }
    }

    pub fn push(&mut self, record: CountRecord) {
        self.entries.push(record);
    }

    pub fn entries(&self) -> &[CountRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 某人在全部历史中的累计订单数
    pub fn total_for(&self, worker: WorkerId) -> u64 {
        self.entries.iter().map(|e| u64::from(e.get(worker))).sum()
    }

    /// 某人在最近 `window` 个周期中的订单数
    pub fn recent_total_for(&self, worker: WorkerId, window: usize) -> u64 {
        let start = self.entries.len().saturating_sub(window);
        self.entries[start..]
            .iter()
            .map(|e| u64::from(e.get(worker)))
            .sum()
    }
}

/// 单次计算中某位拣货员的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerStatus {
    /// 是否在岗
    pub present: bool,
    /// 是否在用餐
    pub on_meal: bool,
    /// 是否豁免零产出惩罚
    pub pardoned: bool,
}

impl Default for WorkerStatus {
    fn default() -> Self {
        Self {
            present: true,
            on_meal: false,
            pardoned: false,
        }
    }
}

impl WorkerStatus {
    /// 在岗且不在用餐才可接单；豁免只影响评分
    pub fn is_eligible(&self) -> bool {
        self.present && !self.on_meal
    }
}

/// 全体名单的状态表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    statuses: BTreeMap<WorkerId, WorkerStatus>,
}

impl Roster {
    /// 用默认状态（在岗、未用餐、未豁免）创建名单
    pub fn new(ids: &[WorkerId]) -> Self {
        Self {
            statuses: ids.iter().map(|&id| (id, WorkerStatus::default())).collect(),
        }
    }

    /// 更新某人的状态，不在名单中的编号会被忽略
    pub fn set_status(&mut self, worker: WorkerId, status: WorkerStatus) -> bool {
        match self.statuses.get_mut(&worker) {
            Some(slot) => {
                *slot = status;
                true
            }
            None => false,
        }
    }

    /// 名单总人数（包括不可接单的人）
    pub fn size(&self) -> usize {
        self.statuses.len()
    }

    pub fn eligible(&self) -> BTreeSet<WorkerId> {
        self.statuses
            .iter()
            .filter(|(_, s)| s.is_eligible())
            .map(|(&id, _)| id)
            .collect()
    }

    pub fn pardoned(&self) -> BTreeSet<WorkerId> {
        self.statuses
            .iter()
            .filter(|(_, s)| s.pardoned)
            .map(|(&id, _)| id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_total_uses_last_entries() {
        let ledger = HistoryLedger::new(vec![
            [(1, 7)].into_iter().collect(),
            [(1, 0), (2, 3)].into_iter().collect(),
            [(2, 1)].into_iter().collect(),
            [(1, 0)].into_iter().collect(),
        ]);

        assert_eq!(ledger.total_for(1), 7);
        assert_eq!(ledger.recent_total_for(1, 3), 0);
        assert_eq!(ledger.recent_total_for(2, 3), 4);
        assert_eq!(ledger.recent_total_for(2, 10), 4);
    }

    #[test]
    fn test_eligibility_ignores_pardon() {
        let mut roster = Roster::new(&[1, 2, 3]);
        roster.set_status(
            2,
            WorkerStatus {
                on_meal: true,
                ..Default::default()
            },
        );
        roster.set_status(
            3,
            WorkerStatus {
                pardoned: true,
                ..Default::default()
            },
        );

        assert!(!roster.set_status(4, WorkerStatus::default()));
        assert_eq!(roster.eligible().into_iter().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(roster.pardoned().into_iter().collect::<Vec<_>>(), vec![3]);
        assert_eq!(roster.size(), 3);
    }
}
