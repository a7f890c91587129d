use thiserror::Error;

/// 路由查询中唯一会向调用方传播的错误：拿不到交易对快照
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("交易对数据源不可用: {0}")]
    SnapshotUnavailable(String),

    #[error("读取交易对文件失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("解析交易对数据失败: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type RoutingResult<T> = std::result::Result<T, RoutingError>;
