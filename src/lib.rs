//! DEX Routing - 多跳兑换路径查询
//!
//! 根据交易对快照构建代币兑换图，枚举两个代币之间的所有简单路径，
//! 并选出累计收益最高的一条。

pub mod cli;
pub mod config;
pub mod core;
pub mod dex;
pub mod error;
pub mod log_adapter;
pub mod routing_service;
pub mod server;
pub mod utils;

// 重新导出常用类型
pub use crate::config::Config;
pub use crate::core::{
    AllRoutesResult, BestRouteResult, ExchangeGraph, PairRecord, Route, RouteEdge, RouteFinder,
    RouteLimits,
};
pub use dex::{FixturePairSource, JsonFilePairSource, PairSource};
pub use error::{RoutingError, RoutingResult};
pub use routing_service::DexRoutingService;
