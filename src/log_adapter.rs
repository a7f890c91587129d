use log::LevelFilter;
use std::str::FromStr;

/// 日志适配器：统一初始化 env_logger
pub struct LogAdapter;

impl LogAdapter {
    /// 初始化日志系统。
    ///
    /// 设置了 RUST_LOG 时以环境变量为准，否则使用配置中的级别。
    pub fn init(default_level: &str) -> Result<(), Box<dyn std::error::Error>> {
        let env = env_logger::Env::default().default_filter_or(Self::level_filter(default_level).as_str());
        env_logger::Builder::from_env(env)
            .format_timestamp_millis()
            .try_init()?;
        Ok(())
    }

    /// 解析日志级别，无法识别时退回 info
    pub fn level_filter(level: &str) -> LevelFilter {
        LevelFilter::from_str(level.trim()).unwrap_or(LevelFilter::Info)
    }
}
