use anyhow::{Context, Result};
use config::{Environment, File};
use serde::{Deserialize, Serialize};

use crate::core::RouteLimits;

/// 默认配置文件（不存在时忽略）
pub const DEFAULT_CONFIG_FILE: &str = "dexrouting";
/// 环境变量前缀，例如 DEXROUTING__SERVER__PORT=8080
pub const ENV_PREFIX: &str = "DEXROUTING";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    /// 路径搜索上限，不配置即穷举
    #[serde(default)]
    pub routing: RouteLimits,
    #[serde(default)]
    pub data: DataConfig,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// 交易对 JSON 文件；为空时使用内置示例数据
    pub pairs_file: Option<String>,
}

impl Config {
    /// 默认值 -> dexrouting.{toml,yaml,json} -> DEXROUTING__* 环境变量
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// 指定配置文件时该文件必须存在
    pub fn load_from(path: Option<&str>) -> Result<Self> {
        let file = match path {
            Some(path) => File::with_name(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000_i64)?
            .set_default("log_level", "info")?
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("加载配置失败")?;

        let config: Config = settings
            .try_deserialize()
            .context("解析配置失败")?;
        Ok(config)
    }

    pub fn route_limits(&self) -> RouteLimits {
        self.routing
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::load_from(None).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.route_limits(), RouteLimits::unbounded());
        assert!(config.data.pairs_file.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
log_level = "debug"

[server]
host = "0.0.0.0"
port = 8080

[routing]
max_hops = 4

[data]
pairs_file = "pairs.json"
"#
        )
        .unwrap();

        let config = Config::load_from(file.path().to_str()).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.route_limits().max_hops, Some(4));
        assert_eq!(config.route_limits().max_routes, None);
        assert_eq!(config.data.pairs_file.as_deref(), Some("pairs.json"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(Config::load_from(Some("/nonexistent/dexrouting.toml")).is_err());
    }
}
