//! 集成测试公共设施
//!
//! 钱包与合约的确定性测试替身：可脚本化弹窗结果、回执结果与链切换事件，
//! 并记录全部合约调用供断言

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use ethers::types::{Address, H256, U256};
use tokio::sync::broadcast;

use gns_client::error::AppError;
use gns_client::service::contract::{
    NameServiceClient, ReceiptStatus, ReceiptSummary, SubmittedTransaction,
};
use gns_client::service::wallet::{WalletEvent, WalletProvider};

/// 测试默认账户
pub fn test_account() -> Address {
    Address::repeat_byte(0x42)
}

// ----------------------------------------------------------------------
// 钱包替身
// ----------------------------------------------------------------------

pub struct MockWallet {
    authorized: Vec<Address>,
    prompt_result: Result<Vec<Address>, AppError>,
    chain: u64,
    /// eth_accounts 语义的调用计数（静默）
    pub silent_calls: AtomicUsize,
    /// eth_requestAccounts 语义的调用计数（弹窗）
    pub prompt_calls: AtomicUsize,
    chain_tx: broadcast::Sender<WalletEvent>,
}

impl MockWallet {
    pub fn new() -> Self {
        let (chain_tx, _) = broadcast::channel(8);
        Self {
            authorized: Vec::new(),
            prompt_result: Ok(Vec::new()),
            chain: 80001,
            silent_calls: AtomicUsize::new(0),
            prompt_calls: AtomicUsize::new(0),
            chain_tx,
        }
    }

    /// 预置一个已授权账户（模拟先前的连接授权）
    pub fn with_authorized(mut self, account: Address) -> Self {
        self.authorized.push(account);
        self
    }

    /// 弹窗请求将返回该账户
    pub fn with_prompt_account(mut self, account: Address) -> Self {
        self.prompt_result = Ok(vec![account]);
        self
    }

    /// 弹窗请求将被用户拒绝
    pub fn rejecting_prompt(mut self) -> Self {
        self.prompt_result = Err(AppError::RequestRejected(
            "User rejected the request".to_string(),
        ));
        self
    }

    pub fn with_chain(mut self, chain_id: u64) -> Self {
        self.chain = chain_id;
        self
    }

    /// 模拟钱包推送链切换通知
    pub fn emit_chain_changed(&self, chain_id: u64) {
        let _ = self.chain_tx.send(WalletEvent::ChainChanged(chain_id));
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn authorized_accounts(&self) -> Result<Vec<Address>, AppError> {
        self.silent_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.authorized.clone())
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, AppError> {
        self.prompt_calls.fetch_add(1, Ordering::SeqCst);
        self.prompt_result.clone()
    }

    async fn chain_id(&self) -> Result<u64, AppError> {
        Ok(self.chain)
    }

    fn subscribe(&self) -> broadcast::Receiver<WalletEvent> {
        self.chain_tx.subscribe()
    }
}

// ----------------------------------------------------------------------
// 合约替身
// ----------------------------------------------------------------------

/// 记录下来的合约调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractCall {
    Register { name: String, value: U256 },
    SetRecord { name: String, record: String },
}

/// 单个入口的脚本化行为
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scripted {
    /// 交易发出并按给定状态确认
    Confirm(ReceiptStatus),
    /// 发送即抛错（用户拒签 / 网络故障）
    ErrorOnSend,
    /// 发送成功但等待回执时抛错
    ErrorOnConfirm,
}

pub struct MockNameService {
    register_script: Scripted,
    record_script: Scripted,
    pub calls: Mutex<Vec<ContractCall>>,
    pending: Mutex<HashMap<H256, Scripted>>,
    next_hash: AtomicU64,
}

impl MockNameService {
    /// 两步都成功确认
    pub fn happy() -> Self {
        Self::scripted(
            Scripted::Confirm(ReceiptStatus::Success),
            Scripted::Confirm(ReceiptStatus::Success),
        )
    }

    pub fn scripted(register_script: Scripted, record_script: Scripted) -> Self {
        Self {
            register_script,
            record_script,
            calls: Mutex::new(Vec::new()),
            pending: Mutex::new(HashMap::new()),
            next_hash: AtomicU64::new(1),
        }
    }

    /// register 上链但执行失败
    pub fn register_reverts() -> Self {
        Self::scripted(
            Scripted::Confirm(ReceiptStatus::Failed),
            Scripted::Confirm(ReceiptStatus::Success),
        )
    }

    pub fn recorded_calls(&self) -> Vec<ContractCall> {
        self.calls.lock().unwrap().clone()
    }

    fn issue(&self, script: Scripted) -> Result<SubmittedTransaction, AppError> {
        match script {
            Scripted::ErrorOnSend => Err(AppError::Rpc("scripted send failure".to_string())),
            _ => {
                let tx_hash =
                    H256::from_low_u64_be(self.next_hash.fetch_add(1, Ordering::SeqCst));
                self.pending.lock().unwrap().insert(tx_hash, script);
                Ok(SubmittedTransaction { tx_hash })
            }
        }
    }
}

#[async_trait]
impl NameServiceClient for MockNameService {
    async fn register(&self, name: &str, value: U256) -> Result<SubmittedTransaction, AppError> {
        self.calls.lock().unwrap().push(ContractCall::Register {
            name: name.to_string(),
            value,
        });
        self.issue(self.register_script)
    }

    async fn set_record(
        &self,
        name: &str,
        record: &str,
    ) -> Result<SubmittedTransaction, AppError> {
        self.calls.lock().unwrap().push(ContractCall::SetRecord {
            name: name.to_string(),
            record: record.to_string(),
        });
        self.issue(self.record_script)
    }

    async fn wait_for_receipt(
        &self,
        tx: &SubmittedTransaction,
    ) -> Result<ReceiptSummary, AppError> {
        let script = self
            .pending
            .lock()
            .unwrap()
            .get(&tx.tx_hash)
            .copied()
            .ok_or_else(|| AppError::Unexpected("unknown transaction".to_string()))?;

        match script {
            Scripted::Confirm(status) => Ok(ReceiptSummary {
                tx_hash: tx.tx_hash,
                status,
                block_number: Some(100),
                confirmed_at: Utc::now(),
            }),
            Scripted::ErrorOnConfirm => {
                Err(AppError::Rpc("scripted confirmation failure".to_string()))
            }
            Scripted::ErrorOnSend => unreachable!("send errors never produce a pending tx"),
        }
    }
}
