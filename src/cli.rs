use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::info;
use std::sync::Arc;
use tabled::{Table, Tabled};

use crate::config::Config;
use crate::core::{AllRoutesResult, BestRouteResult, Route};
use crate::dex::{FixturePairSource, JsonFilePairSource, PairSource};
use crate::routing_service::DexRoutingService;
use crate::server;
use crate::utils::format_rate;

// 命令行参数常量
const CONFIG_ARG: &str = "config";
const PAIRS_FILE_ARG: &str = "pairs-file";
const JSON_ARG: &str = "json";
const FROM_ARG: &str = "from";
const TO_ARG: &str = "to";

const SERVE_CMD: &str = "serve";
const ROUTES_CMD: &str = "routes";
const BEST_CMD: &str = "best";
const TOKENS_CMD: &str = "tokens";
const POOLS_CMD: &str = "pools";

/// 终端表格中的一行路径
#[derive(Tabled)]
struct RouteRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "路径")]
    path: String,
    #[tabled(rename = "跳数")]
    hops: usize,
    #[tabled(rename = "预估收益")]
    estimated_return: String,
}

#[derive(Tabled)]
struct PoolRow {
    #[tabled(rename = "交易对")]
    symbol: String,
    #[tabled(rename = "代币A")]
    token_a: String,
    #[tabled(rename = "代币B")]
    token_b: String,
    #[tabled(rename = "比例")]
    ratio: String,
}

/// CLI应用程序结构
pub struct CliApp {
    config: Config,
    service: DexRoutingService,
}

impl CliApp {
    /// 按配置选择数据源；命令行的 --pairs-file 优先于配置文件
    pub fn new(config: Config, pairs_file: Option<String>) -> Self {
        let source: Arc<dyn PairSource> = match pairs_file.or_else(|| config.data.pairs_file.clone()) {
            Some(path) => {
                info!("使用交易对文件: {}", path);
                Arc::new(JsonFilePairSource::new(path))
            }
            None => {
                info!("使用内置示例交易对");
                Arc::new(FixturePairSource::new())
            }
        };

        let service = DexRoutingService::with_limits(source, config.route_limits());
        Self { config, service }
    }

    pub fn service(&self) -> &DexRoutingService {
        &self.service
    }

    /// 构建命令行参数解析器
    pub fn build_cli() -> Command {
        let token_args = [
            Arg::new(FROM_ARG).help("源代币符号").required(true),
            Arg::new(TO_ARG).help("目标代币符号").required(true),
        ];
        let json_arg = Arg::new(JSON_ARG)
            .long(JSON_ARG)
            .help("以 JSON 格式输出")
            .action(ArgAction::SetTrue);

        Command::new("dex-routing")
            .version("0.1.0")
            .about("DEX 多跳兑换路径查询")
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                Arg::new(CONFIG_ARG)
                    .long(CONFIG_ARG)
                    .short('c')
                    .global(true)
                    .value_name("FILE")
                    .help("配置文件路径"),
            )
            .arg(
                Arg::new(PAIRS_FILE_ARG)
                    .long(PAIRS_FILE_ARG)
                    .short('p')
                    .global(true)
                    .value_name("PATH")
                    .help("交易对 JSON 文件 (默认使用内置示例数据)"),
            )
            .subcommand(Command::new(SERVE_CMD).about("启动 HTTP 服务"))
            .subcommand(
                Command::new(ROUTES_CMD)
                    .about("列出两个代币之间的所有兑换路径")
                    .args(token_args.clone())
                    .arg(json_arg.clone()),
            )
            .subcommand(
                Command::new(BEST_CMD)
                    .about("查询收益最高的兑换路径")
                    .args(token_args)
                    .arg(json_arg),
            )
            .subcommand(Command::new(TOKENS_CMD).about("列出所有代币"))
            .subcommand(Command::new(POOLS_CMD).about("列出所有交易对"))
    }

    /// 读取全局参数中的配置文件路径
    pub fn config_path(matches: &ArgMatches) -> Option<&str> {
        matches.get_one::<String>(CONFIG_ARG).map(String::as_str)
    }

    pub fn pairs_file(matches: &ArgMatches) -> Option<String> {
        matches.get_one::<String>(PAIRS_FILE_ARG).cloned()
    }

    /// 运行CLI应用程序
    pub async fn run(&self, matches: ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some((SERVE_CMD, _)) => {
                info!("启动 HTTP 服务...");
                server::serve(&self.config.server, self.service.clone()).await
            }
            Some((ROUTES_CMD, sub)) => {
                let (from, to) = Self::token_args(sub)?;
                let result = self.service.list_all_routes(from, to).await?;
                if sub.get_flag(JSON_ARG) {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    println!("{}", render_all_routes(&result));
                }
                Ok(())
            }
            Some((BEST_CMD, sub)) => {
                let (from, to) = Self::token_args(sub)?;
                let result = self.service.get_best_route(from, to).await?;
                if sub.get_flag(JSON_ARG) {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    println!("{}", render_best_route(&result));
                }
                Ok(())
            }
            Some((TOKENS_CMD, _)) => {
                let tokens = self.service.source().list_tokens().await?;
                println!("{}", tokens.join("\n"));
                Ok(())
            }
            Some((POOLS_CMD, _)) => {
                let pools = self.service.source().list_pools().await?;
                let rows: Vec<PoolRow> = pools
                    .into_iter()
                    .map(|pool| PoolRow {
                        ratio: format!(
                            "{} : {}",
                            format_rate(&pool.price_ratio.0, 8),
                            format_rate(&pool.price_ratio.1, 8)
                        ),
                        symbol: pool.symbol,
                        token_a: pool.token_a,
                        token_b: pool.token_b,
                    })
                    .collect();
                println!("{}", Table::new(rows));
                Ok(())
            }
            _ => {
                Self::build_cli().print_help()?;
                Ok(())
            }
        }
    }

    fn token_args(matches: &ArgMatches) -> Result<(&str, &str)> {
        let from = matches
            .get_one::<String>(FROM_ARG)
            .context("缺少源代币参数")?;
        let to = matches
            .get_one::<String>(TO_ARG)
            .context("缺少目标代币参数")?;
        Ok((from.as_str(), to.as_str()))
    }
}

fn route_row(index: usize, route: &Route) -> RouteRow {
    RouteRow {
        index,
        path: route.to_string(),
        hops: route.hops(),
        estimated_return: route
            .value()
            .map(|value| format_rate(&value, 10))
            .unwrap_or_else(|| "-".to_string()),
    }
}

/// 渲染所有路径的表格
pub fn render_all_routes(result: &AllRoutesResult) -> String {
    if result.routes.is_empty() {
        return format!("{} 到 {} 之间没有可用路径", result.from_token, result.to_token);
    }

    let rows: Vec<RouteRow> = result
        .routes
        .iter()
        .enumerate()
        .map(|(i, route)| route_row(i + 1, route))
        .collect();
    format!(
        "{} -> {}: 共 {} 条路径\n{}",
        result.from_token,
        result.to_token,
        result.routes.len(),
        Table::new(rows)
    )
}

/// 渲染最优路径
pub fn render_best_route(result: &BestRouteResult) -> String {
    format!(
        "{} -> {} 最优路径: {}\n预估收益: {}",
        result.from_token,
        result.to_token,
        result.best_route,
        format_rate(&result.estimated_return, 10)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    #[test]
    fn test_cli_parses_subcommands() {
        let matches = CliApp::build_cli()
            .try_get_matches_from(["dex-routing", "--pairs-file", "pairs.json", "best", "DOGE", "BTC", "--json"])
            .unwrap();

        assert_eq!(CliApp::pairs_file(&matches).as_deref(), Some("pairs.json"));
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, BEST_CMD);
        assert_eq!(CliApp::token_args(sub).unwrap(), ("DOGE", "BTC"));
        assert!(sub.get_flag(JSON_ARG));
    }

    #[test]
    fn test_cli_requires_both_tokens() {
        let result = CliApp::build_cli().try_get_matches_from(["dex-routing", "routes", "DOGE"]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_render_routes_table() {
        let app = CliApp::new(Config::load().unwrap(), None);
        let result = app.service().list_all_routes("DOGE", "ETH").await.unwrap();

        let rendered = render_all_routes(&result);
        assert!(rendered.contains("共 3 条路径"));
        assert!(rendered.contains("DOGE -> DFI -> BTC -> ETH"));
    }

    #[test]
    fn test_render_empty_results() {
        let all = AllRoutesResult {
            from_token: "LTC".to_string(),
            to_token: "XRP".to_string(),
            routes: Vec::new(),
        };
        assert_eq!(render_all_routes(&all), "LTC 到 XRP 之间没有可用路径");

        let best = BestRouteResult {
            from_token: "LTC".to_string(),
            to_token: "XRP".to_string(),
            best_route: Route::empty(),
            estimated_return: BigDecimal::from(0),
        };
        assert!(render_best_route(&best).ends_with("预估收益: 0"));
    }
}
