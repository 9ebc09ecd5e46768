use anyhow::Result;
use wipo_crawler::app::App;
use wipo_crawler::config::Config;
use wipo_crawler::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::load();

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
