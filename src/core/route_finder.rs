use std::collections::HashSet;
use bigdecimal::BigDecimal;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use crate::core::exchange_graph::ExchangeGraph;
use crate::core::types::{rate_quotient, Route, RouteEdge};

/// 搜索上限，默认不限制（穷举全部简单路径）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteLimits {
    pub max_hops: Option<usize>,   // 单条路径的最大跳数
    pub max_routes: Option<usize>, // 最多返回的路径数
}

impl RouteLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }
}

/// 兑换路径查找器
#[derive(Debug, Clone, Default)]
pub struct RouteFinder {
    limits: RouteLimits,
}

impl RouteFinder {
    pub fn new(limits: RouteLimits) -> Self {
        Self { limits }
    }

    /// 枚举 source 到 target 之间的所有简单路径。
    ///
    /// source 与 target 相同时返回一条空路径（无论代币是否在图中）；
    /// 未知或不连通的代币返回空列表。结果顺序即邻接表的插入顺序。
    pub fn find_routes(&self, graph: &ExchangeGraph, source: &str, target: &str) -> Vec<Route> {
        if source == target {
            debug!("{} 与 {} 相同，返回空路径", source, target);
            return vec![Route::empty()];
        }

        if !graph.contains_token(source) {
            info!("起始代币 {} 不在兑换图中", source);
            return Vec::new();
        }

        let mut routes = Vec::new();
        let mut visited = HashSet::new();
        let mut current_path = Vec::new();

        visited.insert(source.to_string());
        self.dfs_search(graph, source, target, &mut visited, &mut current_path, &mut routes);

        info!("找到 {} 条从 {} 到 {} 的路径", routes.len(), source, target);
        routes
    }

    fn dfs_search(
        &self,
        graph: &ExchangeGraph,
        current_token: &str,
        target: &str,
        visited: &mut HashSet<String>,
        current_path: &mut Vec<RouteEdge>,
        routes: &mut Vec<Route>,
    ) {
        let Some(edges) = graph.get_edges_from(current_token) else {
            return;
        };

        let next_depth = current_path.len() + 1;
        if self.limits.max_hops.is_some_and(|max_hops| next_depth > max_hops) {
            return;
        }

        for edge in edges {
            if self.is_route_limit_reached(routes) {
                return;
            }

            // 同一路径内不重复经过代币
            if visited.contains(&edge.to_token) {
                continue;
            }

            if edge.to_token == target {
                let mut completed = current_path.clone();
                completed.push(edge.clone());
                routes.push(Route::new(completed));
                continue;
            }

            current_path.push(edge.clone());
            visited.insert(edge.to_token.clone());

            self.dfs_search(graph, &edge.to_token, target, visited, current_path, routes);

            // 回溯
            visited.remove(&edge.to_token);
            current_path.pop();
        }
    }

    fn is_route_limit_reached(&self, routes: &[Route]) -> bool {
        self.limits
            .max_routes
            .is_some_and(|max_routes| routes.len() >= max_routes)
    }
}

/// 选出累计收益最高的路径。
///
/// 按精确分数比较收益，收益相同时保留先出现的路径；无效路径（含非正汇率）
/// 不参与比较。没有可用路径时返回 `None`，由调用方区分“同一代币”与“无路径”。
pub fn select_best_route(routes: &[Route]) -> Option<(&Route, BigDecimal)> {
    let mut best: Option<(&Route, BigDecimal, BigDecimal)> = None;

    for route in routes {
        let Some((numerator, denominator)) = route.exact_value() else {
            debug!("忽略无效路径: {}", route);
            continue;
        };

        // 分母恒为正，交叉相乘比较
        let is_better = match &best {
            Some((_, best_numerator, best_denominator)) => {
                &numerator * best_denominator > best_numerator * &denominator
            }
            None => true,
        };
        if is_better {
            best = Some((route, numerator, denominator));
        }
    }

    best.map(|(route, numerator, denominator)| (route, rate_quotient(&numerator, &denominator)))
}
