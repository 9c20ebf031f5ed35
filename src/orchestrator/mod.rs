//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! dispatch_app (加载输入、输出报告)
//!     ↓
//! workflow::SessionLedger (会话状态)
//!     ↓
//! workflow::AssignmentFlow (一次计算)
//!     ↓
//! services (能力层：提取 / 优先级 / 评分 / 分配)
//! ```

pub mod dispatch_app;

pub use dispatch_app::App;
