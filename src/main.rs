use anyhow::Result;
use log::info;

use dex_routing::cli::CliApp;
use dex_routing::config::Config;
use dex_routing::log_adapter::LogAdapter;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载 .env 文件
    dotenv::dotenv().ok();

    let matches = CliApp::build_cli().get_matches();

    // 加载配置
    let config = Config::load_from(CliApp::config_path(&matches))?;

    // 初始化日志系统
    if let Err(e) = LogAdapter::init(&config.log_level) {
        eprintln!("日志初始化失败: {}", e);
    }
    info!("配置加载完成");

    let app = CliApp::new(config, CliApp::pairs_file(&matches));
    app.run(matches).await
}
