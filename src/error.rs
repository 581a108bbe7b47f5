//! 统一错误类型定义
//!
//! 错误分类对应用户可见行为：提示安装钱包、校验提示、链上失败提示、仅记录日志

use ethers::types::H256;
use thiserror::Error;

/// 应用统一错误类型
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// 未检测到注入的钱包扩展
    #[error("no wallet provider available")]
    MissingWallet,

    /// 钱包拒绝了请求（连接或签名）
    #[error("wallet request rejected: {0}")]
    RequestRejected(String),

    /// 输入校验失败（域名为空或过短）
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// 交易已上链但执行失败（revert）
    #[error("transaction {tx_hash:#x} reverted on chain")]
    OnChainFailure { tx_hash: H256 },

    /// 当前链不在已知网络表中
    #[error("chain {0} is not a known network")]
    ChainNotSupported(u64),

    /// RPC 或节点通信错误
    #[error("rpc error: {0}")]
    Rpc(String),

    /// 其他未预期错误
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    /// 稳定的机器可读错误码
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingWallet => "missing_wallet",
            AppError::RequestRejected(_) => "request_rejected",
            AppError::ValidationFailed(_) => "validation_failed",
            AppError::OnChainFailure { .. } => "onchain_failure",
            AppError::ChainNotSupported(_) => "chain_not_supported",
            AppError::Rpc(_) => "rpc_error",
            AppError::Unexpected(_) => "internal",
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Unexpected(err.to_string())
    }
}
