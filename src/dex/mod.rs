pub mod fixture;
pub mod json_file;

use async_trait::async_trait;
use std::collections::HashSet;

use crate::core::types::{PairRecord, TokenSymbol};
use crate::error::RoutingResult;

pub use fixture::FixturePairSource;
pub use json_file::JsonFilePairSource;

/// 交易对快照的数据源。
///
/// 每次调用都可能返回不同的快照，路由查询只调用一次 `list_pools`
/// 并在整个计算过程中复用该结果。
#[async_trait]
pub trait PairSource: Send + Sync {
    /// 数据源名称
    fn name(&self) -> &str;

    /// 获取当前所有交易对
    async fn list_pools(&self) -> RoutingResult<Vec<PairRecord>>;

    /// 按交易对符号查找
    async fn get_pool(&self, symbol: &str) -> RoutingResult<Option<PairRecord>> {
        let pools = self.list_pools().await?;
        Ok(pools.into_iter().find(|pool| pool.symbol == symbol))
    }

    /// 所有出现过的代币，按首次出现的顺序
    async fn list_tokens(&self) -> RoutingResult<Vec<TokenSymbol>> {
        let pools = self.list_pools().await?;
        let mut seen = HashSet::new();
        let mut tokens = Vec::new();

        for pool in pools {
            for token in [pool.token_a, pool.token_b] {
                if seen.insert(token.clone()) {
                    tokens.push(token);
                }
            }
        }

        Ok(tokens)
    }
}
