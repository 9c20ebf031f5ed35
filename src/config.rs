use crate::error::{AppError, AppResult, ConfigError};
use crate::models::priority::{parse_hhmm, PriorityRules};
use crate::models::WorkerId;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 订单号总位数（含前缀）
pub const ORDER_ID_LEN: usize = 6;

/// 程序配置文件
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 固定名单（允许有空号）
    pub roster: Vec<WorkerId>,
    /// 订单号固定的两位前缀
    pub order_prefix: String,
    /// 判定缺勤的回看周期数
    pub absence_window: usize,
    /// 零产出惩罚在最高得分之上追加的分数
    pub penalty_margin: i64,
    /// 最多显示的分配行数
    pub display_cap: usize,
    /// 实时优先级规则
    pub priority: PriorityRules,
    /// 本次输入的 TOML 文件
    pub session_file: String,
    /// 输出报告文件
    pub report_file: String,
    /// 可选的 JSON 导出文件
    pub json_output: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roster: vec![1, 2, 3, 5, 6, 7, 8, 9, 10, 11, 12],
            order_prefix: "47".to_string(),
            absence_window: 3,
            penalty_margin: 5,
            display_cap: 40,
            priority: PriorityRules::default(),
            session_file: "sesion.toml".to_string(),
            report_file: "asignacion.txt".to_string(),
            json_output: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 用环境变量覆盖已有配置，无法解析的值保留原值
    pub fn with_env_overrides(self) -> Self {
        let base = self;
        let mut priority = base.priority.clone();
        if let Some(t) = std::env::var("LOCAL_CUTOFF").ok().and_then(|v| parse_hhmm(&v)) {
            priority.local_cutoff = t;
        }
        if let Some(t) = std::env::var("FAR_CUTOFF").ok().and_then(|v| parse_hhmm(&v)) {
            priority.far_cutoff = t;
        }
        if let Some(t) = std::env::var("REMOTE_CUTOFF").ok().and_then(|v| parse_hhmm(&v)) {
            priority.remote_cutoff = t;
        }

        Self {
            roster: std::env::var("ROSTER").ok().and_then(|v| parse_roster(&v)).unwrap_or(base.roster),
            order_prefix: std::env::var("ORDER_PREFIX").unwrap_or(base.order_prefix),
            absence_window: std::env::var("ABSENCE_WINDOW").ok().and_then(|v| v.parse().ok()).unwrap_or(base.absence_window),
            penalty_margin: std::env::var("PENALTY_MARGIN").ok().and_then(|v| v.parse().ok()).unwrap_or(base.penalty_margin),
            display_cap: std::env::var("DISPLAY_CAP").ok().and_then(|v| v.parse().ok()).unwrap_or(base.display_cap),
            priority,
            session_file: std::env::var("SESSION_FILE").unwrap_or(base.session_file),
            report_file: std::env::var("REPORT_FILE").unwrap_or(base.report_file),
            json_output: std::env::var("JSON_OUTPUT").ok().or(base.json_output),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(base.verbose_logging),
        }
    }

    /// 从 TOML 文本解析配置，缺省字段使用默认值
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件加载配置
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.roster.is_empty() {
            return Err(ConfigError::EmptyRoster.into());
        }
        let prefix_ok = !self.order_prefix.is_empty()
            && self.order_prefix.len() < ORDER_ID_LEN
            && self.order_prefix.chars().all(|c| c.is_ascii_digit());
        if !prefix_ok {
            return Err(ConfigError::InvalidOrderPrefix {
                prefix: self.order_prefix.clone(),
            }
            .into());
        }
        Ok(())
    }
}

/// 解析 "1,2,3,5" 形式的名单
fn parse_roster(value: &str) -> Option<Vec<WorkerId>> {
    let ids: Vec<WorkerId> = value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().ok())
        .collect::<Option<_>>()?;
    if ids.is_empty() {
        None
    } else {
        Some(ids)
    }
}
