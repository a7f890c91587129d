use std::collections::{HashMap, HashSet};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use crate::core::types::{PairRecord, RouteEdge};

/// 代币兑换图，每个交易对对应正反两条边
#[derive(Debug, Clone)]
pub struct ExchangeGraph {
    /// 邻接表：token -> 出边列表（保持交易对的输入顺序）
    pub adjacency_list: HashMap<String, Vec<RouteEdge>>,
    pub tokens: HashSet<String>,
    pub last_updated: DateTime<Utc>,
}

impl Default for ExchangeGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl ExchangeGraph {
    pub fn new() -> Self {
        Self {
            adjacency_list: HashMap::new(),
            tokens: HashSet::new(),
            last_updated: Utc::now(),
        }
    }

    /// 从交易对快照构建图。
    ///
    /// 两端相同或比例非正的交易对会被跳过，不视为错误；
    /// 同一对代币之间的多个交易对各自保留为独立的边。
    pub fn build_from_pairs(pairs: &[PairRecord]) -> Self {
        let mut graph = Self::new();
        let mut skipped = 0;

        for pair in pairs {
            if !pair.is_tradable() {
                warn!(
                    "跳过无效交易对: {} ({} / {}, 比例 {}:{})",
                    pair.symbol, pair.token_a, pair.token_b, pair.price_ratio.0, pair.price_ratio.1
                );
                skipped += 1;
                continue;
            }

            graph.add_edge(RouteEdge::forward(pair));
            graph.add_edge(RouteEdge::reverse(pair));
        }

        graph.last_updated = Utc::now();
        let (token_count, edge_count) = graph.get_stats();
        info!(
            "兑换图构建完成，代币数量: {}, 边数量: {}, 跳过交易对: {}",
            token_count, edge_count, skipped
        );
        graph
    }

    pub fn add_edge(&mut self, edge: RouteEdge) {
        debug!("添加边 {} -> {} ({})", edge.from_token, edge.to_token, edge.pair_symbol);
        self.tokens.insert(edge.from_token.clone());
        self.tokens.insert(edge.to_token.clone());

        self.adjacency_list
            .entry(edge.from_token.clone())
            .or_default()
            .push(edge);
    }

    /// 获取指定代币的所有出边
    pub fn get_edges_from(&self, token: &str) -> Option<&Vec<RouteEdge>> {
        self.adjacency_list.get(token)
    }

    pub fn contains_token(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// (代币数量, 边数量)
    pub fn get_stats(&self) -> (usize, usize) {
        let token_count = self.tokens.len();
        let edge_count = self.adjacency_list.values().map(|edges| edges.len()).sum();
        (token_count, edge_count)
    }
}
