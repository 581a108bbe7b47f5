//! 域名服务合约客户端
//!
//! 能力接口 + 基于 ethers 的具体实现。两个合约入口：
//! `register(name) payable` 与 `setRecord(name, record)`，
//! 均返回可等待上链回执的交易。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ethers::abi::parse_abi;
use ethers::contract::Contract;
use ethers::providers::Middleware;
use ethers::types::{Address, H256, U256, U64};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// 回执轮询间隔
const RECEIPT_POLL_INTERVAL_MS: u64 = 2000;

/// 人类可读 ABI（完整 ABI 为外部部署产物，这里只消费两个入口）
const NAME_SERVICE_ABI: &[&str] = &[
    "function register(string name) payable",
    "function setRecord(string name, string record)",
];

/// 已提交、尚未确认的交易
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedTransaction {
    pub tx_hash: H256,
}

/// 上链执行结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiptStatus {
    /// status == 1
    Success,
    /// status == 0 或缺失（revert）
    Failed,
}

/// 已挖出交易的回执摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptSummary {
    pub tx_hash: H256,
    pub status: ReceiptStatus,
    pub block_number: Option<u64>,
    pub confirmed_at: DateTime<Utc>,
}

impl ReceiptSummary {
    pub fn is_success(&self) -> bool {
        self.status == ReceiptStatus::Success
    }
}

/// 域名服务合约能力接口
#[async_trait]
pub trait NameServiceClient: Send + Sync {
    /// 注册域名，`value` 为按长度分档计算出的注册价格
    async fn register(&self, name: &str, value: U256) -> Result<SubmittedTransaction, AppError>;

    /// 为域名写入文本记录
    async fn set_record(&self, name: &str, record: &str)
        -> Result<SubmittedTransaction, AppError>;

    /// 等待交易回执；不设超时，节点无响应时由调用侧决定如何收场
    async fn wait_for_receipt(&self, tx: &SubmittedTransaction)
        -> Result<ReceiptSummary, AppError>;
}

/// 基于 ethers 的合约客户端
///
/// 钱包侧签名通过传入的 Middleware 完成（例如 SignerMiddleware），
/// 客户端本身不持有任何密钥。
pub struct EthersNameService<M> {
    contract: Contract<M>,
    client: Arc<M>,
    poll_interval: Duration,
}

impl<M: Middleware + 'static> EthersNameService<M> {
    pub fn new(address: Address, client: Arc<M>) -> Result<Self, AppError> {
        let abi = parse_abi(NAME_SERVICE_ABI)
            .map_err(|e| AppError::Unexpected(format!("invalid name service abi: {}", e)))?;

        let contract = Contract::new(address, abi, Arc::clone(&client));

        Ok(Self {
            contract,
            client,
            poll_interval: Duration::from_millis(RECEIPT_POLL_INTERVAL_MS),
        })
    }
}

#[async_trait]
impl<M: Middleware + 'static> NameServiceClient for EthersNameService<M> {
    async fn register(&self, name: &str, value: U256) -> Result<SubmittedTransaction, AppError> {
        let call = self
            .contract
            .method::<_, ()>("register", name.to_string())
            .map_err(|e| AppError::Rpc(format!("encode register call: {}", e)))?
            .value(value);

        let sent = call
            .send()
            .await
            .map_err(|e| AppError::Rpc(format!("send register transaction: {}", e)))?;
        let tx_hash = *sent;

        tracing::info!(
            name = %name,
            value = %value,
            tx_hash = %format!("{:#x}", tx_hash),
            "register transaction submitted"
        );

        Ok(SubmittedTransaction { tx_hash })
    }

    async fn set_record(
        &self,
        name: &str,
        record: &str,
    ) -> Result<SubmittedTransaction, AppError> {
        let call = self
            .contract
            .method::<_, ()>("setRecord", (name.to_string(), record.to_string()))
            .map_err(|e| AppError::Rpc(format!("encode setRecord call: {}", e)))?;

        let sent = call
            .send()
            .await
            .map_err(|e| AppError::Rpc(format!("send setRecord transaction: {}", e)))?;
        let tx_hash = *sent;

        tracing::info!(
            name = %name,
            tx_hash = %format!("{:#x}", tx_hash),
            "setRecord transaction submitted"
        );

        Ok(SubmittedTransaction { tx_hash })
    }

    async fn wait_for_receipt(
        &self,
        tx: &SubmittedTransaction,
    ) -> Result<ReceiptSummary, AppError> {
        loop {
            match self.client.get_transaction_receipt(tx.tx_hash).await {
                Ok(Some(receipt)) => {
                    let status = match receipt.status {
                        Some(s) if s == U64::from(1u64) => ReceiptStatus::Success,
                        _ => ReceiptStatus::Failed,
                    };

                    return Ok(ReceiptSummary {
                        tx_hash: tx.tx_hash,
                        status,
                        block_number: receipt.block_number.map(|b| b.as_u64()),
                        confirmed_at: Utc::now(),
                    });
                }
                Ok(None) => {
                    tracing::debug!(
                        tx_hash = %format!("{:#x}", tx.tx_hash),
                        "receipt not yet available, polling again"
                    );
                    tokio::time::sleep(self.poll_interval).await;
                }
                Err(e) => {
                    return Err(AppError::Rpc(format!("fetch receipt: {}", e)));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abi_parses() {
        let abi = parse_abi(NAME_SERVICE_ABI).expect("abi parses");
        assert!(abi.function("register").is_ok());
        assert!(abi.function("setRecord").is_ok());
    }

    #[test]
    fn test_receipt_success_check() {
        let receipt = ReceiptSummary {
            tx_hash: H256::zero(),
            status: ReceiptStatus::Success,
            block_number: Some(42),
            confirmed_at: Utc::now(),
        };
        assert!(receipt.is_success());

        let failed = ReceiptSummary {
            status: ReceiptStatus::Failed,
            ..receipt
        };
        assert!(!failed.is_success());
    }
}
