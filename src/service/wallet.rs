//! 钱包能力接口
//!
//! 对应浏览器注入钱包的四个调用面：静默枚举账户、弹窗请求账户、
//! 查询链 ID、订阅链切换通知。核心不触达私钥，签名全部发生在钱包侧。

use async_trait::async_trait;
use ethers::types::Address;
use tokio::sync::broadcast;

use crate::error::AppError;

/// 钱包侧推送的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletEvent {
    /// 用户在钱包中切换了网络
    ChainChanged(u64),
}

/// 钱包提供方能力接口
///
/// 缺失钱包扩展的场景用 `Option<Arc<dyn WalletProvider>>` 表达，
/// 与浏览器里 `window.ethereum` 不存在的判断对应。
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// 枚举已授权账户（静默，不弹窗；eth_accounts 语义）
    async fn authorized_accounts(&self) -> Result<Vec<Address>, AppError>;

    /// 请求账户授权（可能弹窗；eth_requestAccounts 语义）
    ///
    /// 用户在钱包中拒绝时返回 [`AppError::RequestRejected`]
    async fn request_accounts(&self) -> Result<Vec<Address>, AppError>;

    /// 查询当前激活链 ID
    async fn chain_id(&self) -> Result<u64, AppError>;

    /// 订阅链切换通知，订阅存续于视图挂载期
    fn subscribe(&self) -> broadcast::Receiver<WalletEvent>;
}
