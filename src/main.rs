use anyhow::Result;
use std::path::Path;
use surtido_rotation::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = match std::env::var("SURTIDO_CONFIG") {
        Ok(path) => Config::load(Path::new(&path))?.with_env_overrides(),
        Err(_) => Config::from_env(),
    };

    // 初始化日志
    logger::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config)?.run().await?;

    Ok(())
}
