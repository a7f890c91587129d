//! 内置的示例交易对数据。
//!
//! DOGE 兑换为 BTC 共有四条路径：
//!
//! - DOGE -> DFI -> ETH -> BTC
//! - DOGE -> DFI -> BTC
//! - DOGE -> ETH -> DFI -> BTC
//! - DOGE -> ETH -> BTC
//!
//! 以 DOGE -> DFI -> BTC 为例：
//!
//! ```text
//! 1 DOGE = 5 / 18933 DFI   = 0.0002641 DFI  (DOGE-DFI)
//! 1 DFI  = 2 / 1337 BTC    = 0.001496 BTC   (BTC-DFI)
//! 1 DOGE = 0.0002641 * 0.001496 BTC = 0.0000003951 BTC
//! ```
//!
//! ```text
//!                                           ┌───────┐
//!                     ┌────────┐            │  BTC  │
//!                     │        ├─ BTC-DFI ──┤       │
//!     ┌── DOGE-DFI ───┤  DFI   │            └───┬───┘
//!     │               │        │                │
//! ┌───┴────┐          └───┬────┘             BTC-ETH
//! │  DOGE  │              │                     │
//! └────┬───┘              │                 ┌───┴───┐
//!      │                  └─ ETH-DFI ───────┤  ETH  │
//!      └─────────── DOGE-ETH ───────────────┤       │
//!                                           └───────┘
//! ```

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use log::debug;

use crate::core::types::PairRecord;
use crate::dex::PairSource;
use crate::error::RoutingResult;

pub struct FixturePairSource {
    pools: Vec<PairRecord>,
}

impl Default for FixturePairSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FixturePairSource {
    pub fn new() -> Self {
        let pair = |symbol: &str, token_a: &str, token_b: &str, amount_a: u64, amount_b: u64| {
            PairRecord::new(
                symbol,
                token_a,
                token_b,
                BigDecimal::from(amount_a),
                BigDecimal::from(amount_b),
            )
        };

        Self {
            pools: vec![
                pair("ETH-DFI", "ETH", "DFI", 1, 5),            // 1 ETH = 5 DFI
                pair("BTC-DFI", "BTC", "DFI", 2, 1_337),        // 2 BTC = 1,337 DFI
                pair("DOGE-DFI", "DOGE", "DFI", 18_933, 5),     // 18,933 DOGE = 5 DFI
                pair("DOGE-ETH", "DOGE", "ETH", 18_617, 1),     // 18,617 DOGE = 1 ETH
                pair("BTC-ETH", "BTC", "ETH", 1, 132),          // 1 BTC = 132 ETH
            ],
        }
    }

    /// 使用自定义交易对，便于测试不同的拓扑
    pub fn with_pools(pools: Vec<PairRecord>) -> Self {
        Self { pools }
    }
}

#[async_trait]
impl PairSource for FixturePairSource {
    fn name(&self) -> &str {
        "fixture"
    }

    /// 返回的比例归一化为 (1, b/a)，见 [`PairRecord::normalized`]
    async fn list_pools(&self) -> RoutingResult<Vec<PairRecord>> {
        debug!("从内置数据返回 {} 个交易对", self.pools.len());
        Ok(self.pools.iter().map(PairRecord::normalized).collect())
    }
}
