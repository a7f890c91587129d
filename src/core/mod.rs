pub mod exchange_graph;
pub mod route_finder;
pub mod types;

// 重新导出核心类型，方便外部使用
pub use exchange_graph::ExchangeGraph;
pub use route_finder::{select_best_route, RouteFinder, RouteLimits};
pub use types::*;
