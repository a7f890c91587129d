use bigdecimal::BigDecimal;
use log::{info, warn};
use num_traits::{One, Zero};
use std::sync::Arc;

use crate::core::{
    select_best_route, AllRoutesResult, BestRouteResult, ExchangeGraph, PairRecord, Route,
    RouteFinder, RouteLimits,
};
use crate::dex::PairSource;
use crate::error::RoutingResult;

/// 路由服务：每次查询获取一次交易对快照，构建兑换图并搜索路径
#[derive(Clone)]
pub struct DexRoutingService {
    source: Arc<dyn PairSource>,
    finder: RouteFinder,
}

impl DexRoutingService {
    pub fn new(source: Arc<dyn PairSource>) -> Self {
        Self::with_limits(source, RouteLimits::unbounded())
    }

    pub fn with_limits(source: Arc<dyn PairSource>, limits: RouteLimits) -> Self {
        Self {
            source,
            finder: RouteFinder::new(limits),
        }
    }

    pub fn source(&self) -> &Arc<dyn PairSource> {
        &self.source
    }

    /// 列出两个代币之间的所有兑换路径
    pub async fn list_all_routes(&self, from_token: &str, to_token: &str) -> RoutingResult<AllRoutesResult> {
        let pools = self.fetch_snapshot().await?;
        let graph = ExchangeGraph::build_from_pairs(&pools);
        let routes = self.finder.find_routes(&graph, from_token, to_token);

        Ok(AllRoutesResult {
            from_token: from_token.to_string(),
            to_token: to_token.to_string(),
            routes,
        })
    }

    /// 选出累计收益最高的兑换路径。
    ///
    /// 没有可用路径时：同一代币返回 (空路径, 1)，否则返回 (空路径, 0)。
    pub async fn get_best_route(&self, from_token: &str, to_token: &str) -> RoutingResult<BestRouteResult> {
        let pools = self.fetch_snapshot().await?;
        let graph = ExchangeGraph::build_from_pairs(&pools);
        let routes = self.finder.find_routes(&graph, from_token, to_token);

        let (best_route, estimated_return) = match select_best_route(&routes) {
            Some((route, value)) => {
                info!("最优路径 {} 预估收益 {}", route, value);
                (route.clone(), value)
            }
            None if from_token == to_token => (Route::empty(), BigDecimal::one()),
            None => {
                info!("{} 到 {} 之间没有可用路径", from_token, to_token);
                (Route::empty(), BigDecimal::zero())
            }
        };

        Ok(BestRouteResult {
            from_token: from_token.to_string(),
            to_token: to_token.to_string(),
            best_route,
            estimated_return,
        })
    }

    async fn fetch_snapshot(&self) -> RoutingResult<Vec<PairRecord>> {
        self.source.list_pools().await.map_err(|e| {
            warn!("从 {} 获取交易对快照失败: {}", self.source.name(), e);
            e
        })
    }
}
