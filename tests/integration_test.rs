use std::fs;

use tempfile::TempDir;
use wipo_crawler::browser::connect_to_browser_and_page;
use wipo_crawler::config::Config;
use wipo_crawler::crawler::CrawlController;
use wipo_crawler::session::ChromiumDriver;
use wipo_crawler::storage::{CheckpointLog, DatasetWriter, PageProgress, WorkQueue};
use wipo_crawler::utils::logging;

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_browser_connection() {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::load();

    // 测试浏览器连接
    let result = connect_to_browser_and_page(config.browser_debug_port, &config.start_url).await;

    assert!(result.is_ok(), "应该能够成功连接浏览器");
}

#[tokio::test]
#[ignore]
async fn test_crawl_single_ipc() {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::load();

    // 连接浏览器
    let (_browser, page) =
        connect_to_browser_and_page(config.browser_debug_port, &config.start_url)
            .await
            .expect("连接浏览器失败");

    // 准备只含一个分类号的临时队列
    let dir = TempDir::new().unwrap();
    let queue_path = dir.path().join("ipcs.txt");
    fs::write(&queue_path, "A23P20/17\n").unwrap();

    let driver = ChromiumDriver::new(
        page,
        config.page_load_timeout(),
        config.element_probe_timeout(),
    );
    let controller = CrawlController::new(
        driver,
        WorkQueue::open(&queue_path),
        CheckpointLog::open(dir.path().join("checkpoint.log")),
        PageProgress::open(dir.path().join("progress.txt")),
        DatasetWriter::open(dir.path().join("data.csv")),
        &config,
    );

    // 处理该分类号
    let state = controller.run().await.expect("爬取失败");

    assert_eq!(state.completed, 1, "分类号应该处理完成");
    assert!(
        dir.path().join("data.csv").exists(),
        "数据集文件应该已创建"
    );
}
