//! 域名注册视图服务
//!
//! 渲染层的无头核心：连接状态、网络状态、表单状态与两步注册流程。
//! 链切换不做增量更新，向宿主发出整页重载指令后由宿主重建视图。

use std::sync::Arc;

use ethers::types::{Address, H256};
use serde::Serialize;
use tokio::sync::broadcast;

use crate::config::AppConfig;
use crate::domain::name::{full_name, registration_price, validate_name};
use crate::domain::network::DEFAULT_NETWORKS;
use crate::domain::view_state::{DomainFormState, NetworkState, SubmissionPhase};
use crate::error::AppError;
use crate::service::contract::NameServiceClient;
use crate::service::wallet::{WalletEvent, WalletProvider};

/// 钱包安装引导（原版提示语）
const INSTALL_WALLET_MESSAGE: &str = "Get MetaMask -> https://metamask.io/";

/// 互斥的两种渲染形态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViewPhase {
    /// 未连接：展示连接引导
    ConnectPrompt,
    /// 已连接：展示注册表单
    RegistrationForm,
}

/// 视图要求宿主执行的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCommand {
    /// 整页重载：丢弃视图并重新挂载
    Reload,
}

/// 连接操作结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// 连接成功，采用钱包返回的首个账户
    Connected(Address),
    /// 未检测到钱包扩展
    MissingWallet,
    /// 请求被拒绝或出错；仅记录日志，状态不变
    Failed,
}

impl ConnectOutcome {
    /// 需要展示给用户的提示；None 表示无弹窗
    pub fn user_message(&self) -> Option<String> {
        match self {
            ConnectOutcome::MissingWallet => Some(INSTALL_WALLET_MESSAGE.to_string()),
            _ => None,
        }
    }
}

/// 提交操作结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 未连接钱包（正常渲染路径下不可达）
    NotConnected,
    /// 已有提交在途，本次未发出任何合约调用
    AlreadyInFlight,
    /// 域名为空，静默不处理
    NothingToSubmit,
    /// 域名短于最小长度
    NameTooShort { min: usize },
    /// 两步全部确认成功，表单已清空
    Registered { register_tx: H256, record_tx: H256 },
    /// 交易上链但执行失败，表单保留
    TransactionFailed { tx_hash: H256 },
    /// 任一步骤抛错（用户拒签、网络故障、revert 抛出）；仅记录日志
    Errored,
}

impl SubmitOutcome {
    /// 需要展示给用户的提示；None 表示无弹窗（与原版行为一致）
    pub fn user_message(&self) -> Option<String> {
        match self {
            SubmitOutcome::NameTooShort { min } => {
                Some(format!("Domain must be at least {} characters long", min))
            }
            SubmitOutcome::TransactionFailed { .. } => {
                Some("Transaction failed! Please try again".to_string())
            }
            _ => None,
        }
    }
}

/// 视图状态的原子快照（供宿主渲染与测试断言）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSnapshot {
    pub connected_account: Option<Address>,
    pub network: Option<NetworkState>,
    pub form: DomainFormState,
    pub phase: SubmissionPhase,
}

impl std::fmt::Display for ViewSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => write!(f, "{}", json),
            Err(_) => write!(f, "<unserializable view snapshot>"),
        }
    }
}

/// 域名注册视图
pub struct RegistrationView {
    config: Arc<AppConfig>,
    /// None 对应浏览器中不存在注入钱包
    provider: Option<Arc<dyn WalletProvider>>,
    contract: Arc<dyn NameServiceClient>,

    connected_account: Option<Address>,
    network: Option<NetworkState>,
    form: DomainFormState,
    phase: SubmissionPhase,
}

impl RegistrationView {
    pub fn new(
        config: Arc<AppConfig>,
        provider: Option<Arc<dyn WalletProvider>>,
        contract: Arc<dyn NameServiceClient>,
    ) -> Self {
        Self {
            config,
            provider,
            contract,
            connected_account: None,
            network: None,
            form: DomainFormState::default(),
            phase: SubmissionPhase::Idle,
        }
    }

    // ------------------------------------------------------------------
    // 状态访问
    // ------------------------------------------------------------------

    pub fn connected_account(&self) -> Option<Address> {
        self.connected_account
    }

    pub fn network(&self) -> Option<&NetworkState> {
        self.network.as_ref()
    }

    pub fn form(&self) -> &DomainFormState {
        &self.form
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// 提交控件仅在已连接时可达
    pub fn view_phase(&self) -> ViewPhase {
        if self.connected_account.is_some() {
            ViewPhase::RegistrationForm
        } else {
            ViewPhase::ConnectPrompt
        }
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            connected_account: self.connected_account,
            network: self.network.clone(),
            form: self.form.clone(),
            phase: self.phase,
        }
    }

    /// 候选域名输入绑定（每次击键调用）
    pub fn set_domain(&mut self, domain: impl Into<String>) {
        self.form.domain = domain.into();
    }

    /// 文本记录输入绑定（每次击键调用）
    pub fn set_record(&mut self, record: impl Into<String>) {
        self.form.record = record.into();
    }

    // ------------------------------------------------------------------
    // 挂载期检查
    // ------------------------------------------------------------------

    /// 挂载时调用一次：静默采用已授权账户、解析当前网络、建立链切换订阅。
    ///
    /// 钱包扩展缺失只记诊断日志，视图停留在连接引导形态。
    /// 返回的订阅由宿主轮询，收到事件后交给 [`Self::handle_wallet_event`]。
    pub async fn check_existing_connection(
        &mut self,
    ) -> Option<broadcast::Receiver<WalletEvent>> {
        let provider = match &self.provider {
            Some(p) => Arc::clone(p),
            None => {
                tracing::warn!("no wallet provider injected, showing connect prompt");
                return None;
            }
        };

        // 静默枚举，绝不弹窗
        match provider.authorized_accounts().await {
            Ok(accounts) => match accounts.first() {
                Some(account) => {
                    tracing::info!(account = %format!("{:#x}", account), "found an authorized account");
                    self.connected_account = Some(*account);
                }
                None => {
                    tracing::debug!("no authorized account found");
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, code = e.code(), "failed to enumerate accounts");
            }
        }

        match provider.chain_id().await {
            Ok(chain_id) => {
                let network = NetworkState::resolve(chain_id, &DEFAULT_NETWORKS);
                if !network.known {
                    // 展示不受影响；合约可能未部署在该链上（已知的原版行为缺口）
                    tracing::warn!(chain_id, "active chain is not in the network table");
                }
                tracing::info!(chain_id, label = %network.label, "resolved active network");
                self.network = Some(network);
            }
            Err(e) => {
                tracing::warn!(error = %e, code = e.code(), "failed to query chain id");
            }
        }

        Some(provider.subscribe())
    }

    /// 处理钱包推送事件。链切换不做任何就地状态修改，
    /// 每条通知恰好产生一条整页重载指令。
    pub fn handle_wallet_event(&self, event: WalletEvent) -> ViewCommand {
        match event {
            WalletEvent::ChainChanged(chain_id) => {
                tracing::info!(chain_id, "chain changed, requesting full reload");
                ViewCommand::Reload
            }
        }
    }

    // ------------------------------------------------------------------
    // 用户操作
    // ------------------------------------------------------------------

    /// 用户点击连接：请求账户授权（可能弹窗）
    pub async fn connect_wallet(&mut self) -> ConnectOutcome {
        let provider = match &self.provider {
            Some(p) => Arc::clone(p),
            None => {
                tracing::warn!("connect requested but no wallet provider available");
                return ConnectOutcome::MissingWallet;
            }
        };

        match provider.request_accounts().await {
            Ok(accounts) => match accounts.first() {
                Some(account) => {
                    tracing::info!(account = %format!("{:#x}", account), "connected");
                    self.connected_account = Some(*account);
                    ConnectOutcome::Connected(*account)
                }
                None => {
                    tracing::warn!("wallet returned no accounts");
                    ConnectOutcome::Failed
                }
            },
            Err(e) => {
                // 拒绝与出错同样处理：记录日志，连接状态保持不变
                tracing::error!(error = %e, code = e.code(), "wallet connect request failed");
                ConnectOutcome::Failed
            }
        }
    }

    /// 用户点击提交：register（附带分档价格）确认成功后再 setRecord，
    /// 两步都确认成功才清空表单；任何失败都保留表单以便重试。
    pub async fn submit_registration(&mut self) -> SubmitOutcome {
        if self.connected_account.is_none() {
            tracing::warn!("submit requested without a connected account");
            return SubmitOutcome::NotConnected;
        }

        // 重复提交保护：上一次提交未走完前拒绝新提交
        if self.phase.is_in_flight() {
            tracing::warn!(phase = %self.phase, "submission already in flight, ignoring");
            return SubmitOutcome::AlreadyInFlight;
        }

        let name = self.form.domain.clone();
        let record = self.form.record.clone();

        if name.is_empty() {
            return SubmitOutcome::NothingToSubmit;
        }

        if let Err(e) = validate_name(&name, &self.config.pricing) {
            tracing::info!(error = %e, "rejected candidate name");
            return SubmitOutcome::NameTooShort {
                min: self.config.pricing.min_name_len,
            };
        }

        let outcome = self.run_two_step_submission(&name, &record).await;

        // 无论结果如何，阶段回到 Idle；仅完全成功时清空表单
        self.transition(SubmissionPhase::Idle);
        if matches!(outcome, SubmitOutcome::Registered { .. }) {
            self.form.clear();
        }

        outcome
    }

    /// 两步提交主体；错误在此集中捕获并转为结果枚举
    async fn run_two_step_submission(&mut self, name: &str, record: &str) -> SubmitOutcome {
        let price = registration_price(name, &self.config.pricing);
        let display_name = full_name(name, &self.config.contract.tld);

        tracing::info!(
            name = %display_name,
            price = %price,
            "minting domain"
        );

        self.transition(SubmissionPhase::AwaitingRegisterConfirmation);

        let register_tx = match self.contract.register(name, price).await {
            Ok(tx) => tx,
            Err(e) => {
                tracing::error!(error = %e, code = e.code(), "register call failed");
                return SubmitOutcome::Errored;
            }
        };

        let register_receipt = match self.contract.wait_for_receipt(&register_tx).await {
            Ok(receipt) => receipt,
            Err(e) => {
                tracing::error!(error = %e, code = e.code(), "register confirmation failed");
                return SubmitOutcome::Errored;
            }
        };

        if !register_receipt.is_success() {
            // 依赖注册成功的 setRecord 绝不发出
            tracing::warn!(
                tx_hash = %format!("{:#x}", register_receipt.tx_hash),
                "register transaction reverted"
            );
            return SubmitOutcome::TransactionFailed {
                tx_hash: register_receipt.tx_hash,
            };
        }

        tracing::info!(
            name = %display_name,
            tx_hash = %format!("{:#x}", register_receipt.tx_hash),
            block = ?register_receipt.block_number,
            "domain minted"
        );

        self.transition(SubmissionPhase::AwaitingRecordConfirmation);

        let record_tx = match self.contract.set_record(name, record).await {
            Ok(tx) => tx,
            Err(e) => {
                tracing::error!(error = %e, code = e.code(), "setRecord call failed");
                return SubmitOutcome::Errored;
            }
        };

        let record_receipt = match self.contract.wait_for_receipt(&record_tx).await {
            Ok(receipt) => receipt,
            Err(e) => {
                tracing::error!(error = %e, code = e.code(), "setRecord confirmation failed");
                return SubmitOutcome::Errored;
            }
        };

        if !record_receipt.is_success() {
            tracing::warn!(
                tx_hash = %format!("{:#x}", record_receipt.tx_hash),
                "setRecord transaction reverted"
            );
            return SubmitOutcome::TransactionFailed {
                tx_hash: record_receipt.tx_hash,
            };
        }

        tracing::info!(
            name = %display_name,
            tx_hash = %format!("{:#x}", record_receipt.tx_hash),
            "record set"
        );

        SubmitOutcome::Registered {
            register_tx: register_tx.tx_hash,
            record_tx: record_tx.tx_hash,
        }
    }

    /// 阶段转换；非法转换只记日志，不让视图卡死
    fn transition(&mut self, next: SubmissionPhase) {
        if self.phase != next && !self.phase.can_transition_to(&next) {
            tracing::warn!(from = %self.phase, to = %next, "unexpected submission phase transition");
        }
        self.phase = next;
    }
}
