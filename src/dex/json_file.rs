use async_trait::async_trait;
use log::{debug, error};
use std::path::PathBuf;

use crate::core::types::PairRecord;
use crate::dex::PairSource;
use crate::error::{RoutingError, RoutingResult};

/// 从 JSON 文件读取交易对，每次查询都重新读取文件
pub struct JsonFilePairSource {
    path: PathBuf,
}

impl JsonFilePairSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PairSource for JsonFilePairSource {
    fn name(&self) -> &str {
        "json-file"
    }

    async fn list_pools(&self) -> RoutingResult<Vec<PairRecord>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            error!("读取交易对文件 {} 失败: {}", self.path.display(), e);
            RoutingError::Io(e)
        })?;

        let pools: Vec<PairRecord> = serde_json::from_str(&content)?;
        debug!("从 {} 读取到 {} 个交易对", self.path.display(), pools.len());
        Ok(pools)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_pairs_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"symbol":"ETH-DFI","tokenA":"ETH","tokenB":"DFI","priceRatio":[1,5]}},
                {{"symbol":"BTC-ETH","tokenA":"BTC","tokenB":"ETH","priceRatio":["1","132"]}}
            ]"#
        )
        .unwrap();

        let source = JsonFilePairSource::new(file.path());
        let pools = source.list_pools().await.unwrap();

        assert_eq!(pools.len(), 2);
        assert_eq!(pools[1].symbol, "BTC-ETH");
        assert_eq!(source.list_tokens().await.unwrap(), vec!["ETH", "DFI", "BTC"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let source = JsonFilePairSource::new("/nonexistent/pairs.json");
        assert!(matches!(source.list_pools().await, Err(RoutingError::Io(_))));
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let source = JsonFilePairSource::new(file.path());
        assert!(matches!(source.list_pools().await, Err(RoutingError::Parse(_))));
    }
}
