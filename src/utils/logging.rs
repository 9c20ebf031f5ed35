//! 日志与报告工具模块
//!
//! 提供分配结果的格式化、日志输出和报告文件写入

use crate::error::{AppError, AppResult};
use crate::models::FairnessScores;
use crate::services::ScoreCard;
use crate::workflow::{DisplayRow, Plan};
use std::fs;
use tracing::info;

fn push_line(out: &mut String, line: String) {
    out.push_str(&line);
    out.push('\n');
}

/// 报告文件头
fn report_header() -> String {
    format!(
        "{}\n订单分配报告 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    )
}

/// 记录程序启动信息
///
/// # 参数
/// - `roster`: 名单
/// - `display_cap`: 显示上限
pub fn log_startup(roster: &[u32], display_cap: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 订单轮转分配");
    info!("👥 名单: {:?}", roster);
    info!("📊 最多显示 {} 行", display_cap);
    info!("{}", "=".repeat(60));
}

/// 把分配行格式化为表格
pub fn format_rows(rows: &[DisplayRow]) -> String {
    let mut out = String::new();
    push_line(
        &mut out,
        format!(
            "{:>3}  {:>7}  {:<8}  {:<28}  {:>6}  {:>6}",
            "#", "SURTIDOR", "PEDIDO", "PRIORIDAD", "PIEZAS", "PUNTOS"
        ),
    );
    for (i, row) in rows.iter().enumerate() {
        let skip = if row.skip > 0 {
            format!("  (+{})", row.skip)
        } else {
            String::new()
        };
        push_line(
            &mut out,
            format!(
                "{:>3}  {:>7}  {:<8}  {:<28}  {:>6}  {:>6}{}",
                i + 1,
                row.worker,
                row.order_id,
                row.label,
                row.item_count,
                row.score_after,
                skip
            ),
        );
    }
    out
}

/// 把评分明细和分配后分数格式化为表格
pub fn format_scores(card: &ScoreCard, final_scores: &FairnessScores) -> String {
    let mut out = String::new();
    push_line(&mut out, format!("基线: {}  最高挣得分: {}", card.baseline, card.max_earned));
    push_line(
        &mut out,
        format!(
            "{:>7}  {:>8}  {:>5}  {:<10}  {:>6}  {:>6}",
            "SURTIDOR", "HISTORIA", "HOY", "ESTADO", "INICIO", "FINAL"
        ),
    );
    for b in &card.breakdown {
        let state = if b.pardoned {
            "perdonado"
        } else if b.absent {
            "ausente"
        } else if b.penalized {
            "castigado"
        } else {
            ""
        };
        let final_score = final_scores.get(&b.worker).copied().unwrap_or(b.score);
        push_line(
            &mut out,
            format!(
                "{:>7}  {:>8}  {:>5}  {:<10}  {:>6}  {:>6}",
                b.worker, b.historical_total, b.today, state, b.score, final_score
            ),
        );
    }
    out
}

/// 完整报告文本
pub fn render_report(plan: &Plan, rows: &[DisplayRow]) -> String {
    let mut out = report_header();
    push_line(&mut out, format!("计算时间: {}\n", plan.computed_at.format("%H:%M")));
    out.push_str(&format_rows(rows));

    if !plan.rotation.unassigned.is_empty() {
        push_line(&mut out, format!("\n无人可接 ({} 单):", plan.rotation.unassigned.len()));
        for q in &plan.rotation.unassigned {
            push_line(&mut out, format!("  {}", q.order.id));
        }
    }
    if !plan.rotation.beyond_cap.is_empty() {
        push_line(&mut out, format!("\n超出显示上限: {} 单", plan.rotation.beyond_cap.len()));
    }

    out.push('\n');
    out.push_str(&format_scores(&plan.score_card, &plan.rotation.final_scores));
    out
}

/// 写入报告文件
pub fn write_report(path: &str, content: &str) -> AppResult<()> {
    fs::write(path, content).map_err(|e| AppError::file_write_failed(path, e))
}

/// 打印最终统计信息
///
/// # 参数
/// - `plan`: 分配结果
/// - `report_path`: 报告文件路径
pub fn print_final_stats(plan: &Plan, report_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 分配完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 已分配: {}", plan.rotation.assignments.len());
    info!("❌ 无人可接: {}", plan.rotation.unassigned.len());
    info!("{}", "=".repeat(60));
    info!("\n报告已保存至: {}", report_path);
}
