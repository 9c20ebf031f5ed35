//! # Surtido Rotation
//!
//! 把待拣货订单轮流分配给拣货员（surtidor），让工作量长期保持均衡，
//! 同时遵守按截单时间变化的实时优先级和人员在岗状态。
//!
//! ## 架构设计
//!
//! ### ① 数据模型（Models）
//! - `models/` - 计数记录、历史记录、订单、优先级规则、人员状态
//!
//! ### ② 业务能力层（Services）
//! - `TextExtractor` - 解析粘贴的表格文本
//! - `PriorityResolver` - 按当前时间计算实时优先级
//! - `FairnessScorer` - 计算公平分数
//! - `RotationAssigner` - 贪心轮转分配
//!
//! ### ③ 流程层（Workflow）
//! - `AssignmentFlow` - 一次计算（提取 → 优先级 → 评分 → 分配）
//! - `SessionLedger` - 会话状态（队列、分数、跳过计数）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/dispatch_app` - 加载输入、输出报告
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{CountRecord, HistoryLedger, Order, SessionInput, WorkerId};
pub use orchestrator::App;
pub use services::{FairnessScorer, PriorityResolver, RotationAssigner, TextExtractor};
pub use workflow::{AssignmentFlow, DisplayRow, Plan, SessionLedger};
