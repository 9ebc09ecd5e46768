//! 日志工具模块
//!
//! 提供 tracing 初始化与横幅输出的辅助函数

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::crawler::CrawlState;

/// 初始化日志系统
///
/// `RUST_LOG` 可覆盖默认过滤级别
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("wipo_crawler=info,warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 WIPO 专利分类爬虫启动");
    info!(
        "启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📋 队列文件: {}", config.queue_file);
    info!("📌 检查点文件: {}", config.checkpoint_file);
    info!("📄 数据集文件: {}", config.data_file);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(state: &CrawlState, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 本轮处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 完成分类号: {}", state.completed);
    info!("❌ 放弃分类号: {}", state.abandoned);
    info!(
        "📄 落盘页数: {} / 写入记录: {}",
        state.pages_flushed, state.records_written
    );
    info!("{}", "=".repeat(60));
    info!("\n数据已保存至: {}", config.data_file);
}
