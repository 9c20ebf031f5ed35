//! 分配应用 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：写启动日志、创建会话账本
//! 2. **加载输入**：从 TOML 读取本次粘贴的文本和人员状态
//! 3. **计算**：用当前时间跑一次完整流程
//! 4. **输出**：打印分配表、写报告文件、可选导出 JSON

use crate::config::Config;
use crate::models::load_session_input;
use crate::utils::logging::{
    format_rows, log_startup, print_final_stats, render_report, write_report,
};
use crate::workflow::SessionLedger;
use anyhow::{Context, Result};
use chrono::NaiveTime;
use std::path::Path;
use tracing::info;

/// 应用主结构
pub struct App {
    config: Config,
    ledger: SessionLedger,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        config.validate()?;
        log_startup(&config.roster, config.display_cap);

        let ledger = SessionLedger::new(&config)?;
        Ok(Self { config, ledger })
    }

    /// 运行应用主逻辑
    pub async fn run(&mut self) -> Result<()> {
        self.run_at(chrono::Local::now().time()).await
    }

    /// 以指定时间运行，便于复现某一时刻的分配
    pub async fn run_at(&mut self, now: NaiveTime) -> Result<()> {
        info!("\n📁 正在加载输入: {}", self.config.session_file);
        let input = load_session_input(Path::new(&self.config.session_file)).await?;

        self.ledger
            .calculate(&input, now)
            .context("计算分配失败")?;

        let rows = self.ledger.display_rows();
        let Some(plan) = self.ledger.plan() else {
            return Ok(());
        };

        info!("\n{}", format_rows(&rows));

        write_report(&self.config.report_file, &render_report(plan, &rows))?;

        if let Some(json_path) = &self.config.json_output {
            let json = plan.to_json().context("JSON 导出失败")?;
            tokio::fs::write(json_path, json)
                .await
                .with_context(|| format!("无法写入 JSON 文件: {}", json_path))?;
            info!("📝 JSON 已导出至: {}", json_path);
        }

        print_final_stats(plan, &self.config.report_file);
        Ok(())
    }
}
