use serde::{Deserialize, Serialize};

use super::worker::{Roster, WorkerId, WorkerStatus};

/// 单名拣货员的界面勾选状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerFlags {
    pub id: WorkerId,
    #[serde(default = "default_true")]
    pub present: bool,
    #[serde(default)]
    pub on_meal: bool,
    #[serde(default)]
    pub pardoned: bool,
}

fn default_true() -> bool {
    true
}

impl From<WorkerFlags> for WorkerStatus {
    fn from(flags: WorkerFlags) -> Self {
        WorkerStatus {
            present: flags.present,
            on_meal: flags.on_meal,
            pardoned: flags.pardoned,
        }
    }
}

/// 一次"计算"所需的全部原始输入
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInput {
    /// 历史记录文本，每行一个周期
    #[serde(default)]
    pub history: String,
    /// 今日累计文本
    #[serde(default)]
    pub today: String,
    /// 待分配订单文本
    #[serde(default)]
    pub orders: String,
    /// 拣货员状态，未列出的人使用默认状态
    #[serde(default)]
    pub workers: Vec<WorkerFlags>,
}

impl SessionInput {
    /// 用名单和勾选状态构建状态表
    pub fn roster(&self, ids: &[WorkerId]) -> Roster {
        let mut roster = Roster::new(ids);
        for flags in &self.workers {
            if !roster.set_status(flags.id, (*flags).into()) {
                tracing::warn!("⚠️ 编号 {} 不在名单中，忽略其状态", flags.id);
            }
        }
        roster
    }
}
