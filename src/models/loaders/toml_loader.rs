use crate::models::session_input::SessionInput;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载一次计算的输入
pub async fn load_session_input(toml_file_path: &Path) -> Result<SessionInput> {
    if !toml_file_path.exists() {
        anyhow::bail!("文件不存在: {}", toml_file_path.display());
    }

    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let input: SessionInput = toml::from_str(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))?;

    tracing::info!(
        "正在加载: {} ({} 个人员状态)",
        toml_file_path.file_name().unwrap_or_default().to_string_lossy(),
        input.workers.len()
    );

    Ok(input)
}
