use bigdecimal::BigDecimal;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::utils::{serialize_as_f64, serialize_ratio_as_f64, to_f64_lossy};

/// 汇率运算保留的有效位数
pub const RATE_PRECISION: u64 = 50;

/// 代币符号，同名即同一代币
pub type TokenSymbol = String;

/// 交易对记录：`a` 个 token_a 等值于 `b` 个 token_b
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PairRecord {
    pub symbol: String,
    pub token_a: TokenSymbol,
    pub token_b: TokenSymbol,
    #[serde(serialize_with = "serialize_ratio_as_f64")]
    pub price_ratio: (BigDecimal, BigDecimal),
}

impl PairRecord {
    pub fn new(
        symbol: impl Into<String>,
        token_a: impl Into<String>,
        token_b: impl Into<String>,
        amount_a: BigDecimal,
        amount_b: BigDecimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            token_a: token_a.into(),
            token_b: token_b.into(),
            price_ratio: (amount_a, amount_b),
        }
    }

    /// 两端代币不同且比例两侧都为正数时才可交易
    pub fn is_tradable(&self) -> bool {
        let zero = BigDecimal::zero();
        self.token_a != self.token_b && self.price_ratio.0 > zero && self.price_ratio.1 > zero
    }

    /// 1 个 token_a 可换得的 token_b 数量 (b/a)
    pub fn forward_rate(&self) -> BigDecimal {
        rate_quotient(&self.price_ratio.1, &self.price_ratio.0)
    }

    /// 1 个 token_b 可换得的 token_a 数量 (a/b)
    pub fn reverse_rate(&self) -> BigDecimal {
        rate_quotient(&self.price_ratio.0, &self.price_ratio.1)
    }

    /// 归一化为 (1, b/a)，单位汇率保持不变。
    ///
    /// 不可交易的记录，以及 b/a 不是有限小数的记录原样返回。
    pub fn normalized(&self) -> Self {
        let (amount_a, amount_b) = &self.price_ratio;
        if !self.is_tradable() || *amount_a == BigDecimal::one() {
            return self.clone();
        }

        let rate = amount_b / amount_a;
        if &rate * amount_a != *amount_b {
            return self.clone();
        }
        Self {
            price_ratio: (BigDecimal::one(), rate),
            ..self.clone()
        }
    }
}

/// 分数转为小数，保留 `RATE_PRECISION` 位有效数字
pub fn rate_quotient(numerator: &BigDecimal, denominator: &BigDecimal) -> BigDecimal {
    (numerator / denominator).with_prec(RATE_PRECISION)
}

/// 边相对于原始交易对的方向
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EdgeDirection {
    /// token_a -> token_b
    Forward,
    /// token_b -> token_a
    Reverse,
}

/// 图中的一条有向边，即一次代币兑换
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteEdge {
    pub from_token: TokenSymbol,
    pub to_token: TokenSymbol,
    pub pair_symbol: String,
    pub direction: EdgeDirection,
    #[serde(serialize_with = "serialize_ratio_as_f64")]
    pub price_ratio: (BigDecimal, BigDecimal),
    /// 单位汇率 (to_token/from_token)，仅用于展示
    #[serde(rename = "perUnitRate", serialize_with = "serialize_as_f64")]
    pub exchange_rate: BigDecimal,
}

impl RouteEdge {
    pub fn forward(pair: &PairRecord) -> Self {
        Self {
            from_token: pair.token_a.clone(),
            to_token: pair.token_b.clone(),
            pair_symbol: pair.symbol.clone(),
            direction: EdgeDirection::Forward,
            price_ratio: pair.price_ratio.clone(),
            exchange_rate: pair.forward_rate(),
        }
    }

    pub fn reverse(pair: &PairRecord) -> Self {
        Self {
            from_token: pair.token_b.clone(),
            to_token: pair.token_a.clone(),
            pair_symbol: pair.symbol.clone(),
            direction: EdgeDirection::Reverse,
            price_ratio: pair.price_ratio.clone(),
            exchange_rate: pair.reverse_rate(),
        }
    }

    /// 单位汇率的精确分数形式 (分子, 分母)
    pub fn rate_terms(&self) -> (&BigDecimal, &BigDecimal) {
        let (amount_a, amount_b) = &self.price_ratio;
        match self.direction {
            EdgeDirection::Forward => (amount_b, amount_a),
            EdgeDirection::Reverse => (amount_a, amount_b),
        }
    }
}

/// 一条兑换路径，空路径表示源代币与目标代币相同
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Route {
    pub edges: Vec<RouteEdge>,
}

impl Route {
    pub fn new(edges: Vec<RouteEdge>) -> Self {
        Self { edges }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn hops(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// 路径经过的代币序列（含起点与终点）
    pub fn tokens(&self) -> Vec<&str> {
        let mut tokens = Vec::with_capacity(self.edges.len() + 1);
        if let Some(first) = self.edges.first() {
            tokens.push(first.from_token.as_str());
        }
        tokens.extend(self.edges.iter().map(|edge| edge.to_token.as_str()));
        tokens
    }

    /// 累计收益的精确分数 (分子, 分母)，乘法不做舍入。
    ///
    /// 空路径为 1/1；任意一跳比例非正时整条路径无效，返回 `None`，
    /// 不让 0 参与比较。
    pub fn exact_value(&self) -> Option<(BigDecimal, BigDecimal)> {
        let zero = BigDecimal::zero();
        let mut numerator = BigDecimal::one();
        let mut denominator = BigDecimal::one();
        for edge in &self.edges {
            let (num, den) = edge.rate_terms();
            if *num <= zero || *den <= zero {
                return None;
            }
            numerator = numerator * num;
            denominator = denominator * den;
        }
        Some((numerator, denominator))
    }

    /// 累计收益：每单位源代币最终可得的目标代币数量，保留 `RATE_PRECISION` 位有效数字
    pub fn value(&self) -> Option<BigDecimal> {
        self.exact_value()
            .map(|(numerator, denominator)| rate_quotient(&numerator, &denominator))
    }

    /// 相邻边首尾相接，且每个代币最多出现一次
    pub fn is_simple(&self) -> bool {
        let chained = self
            .edges
            .windows(2)
            .all(|pair| pair[0].to_token == pair[1].from_token);
        let tokens = self.tokens();
        let unique: HashSet<&str> = tokens.iter().copied().collect();
        chained && unique.len() == tokens.len()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "(无需兑换)");
        }
        write!(f, "{}", self.tokens().join(" -> "))
    }
}

/// 列出全部路径的查询结果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllRoutesResult {
    pub from_token: TokenSymbol,
    pub to_token: TokenSymbol,
    pub routes: Vec<Route>,
}

/// 最优路径的查询结果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestRouteResult {
    pub from_token: TokenSymbol,
    pub to_token: TokenSymbol,
    pub best_route: Route,
    #[serde(serialize_with = "serialize_as_f64")]
    pub estimated_return: BigDecimal,
}

impl BestRouteResult {
    pub fn estimated_return_f64(&self) -> f64 {
        to_f64_lossy(&self.estimated_return)
    }
}
