//! Service 模块
//!
//! 钱包与合约能力接口，以及驱动注册流程的视图服务

pub mod contract;
pub mod registration_view;
pub mod wallet;

// 重新导出常用类型
pub use contract::{
    EthersNameService, NameServiceClient, ReceiptStatus, ReceiptSummary, SubmittedTransaction,
};
pub use registration_view::{
    ConnectOutcome, RegistrationView, SubmitOutcome, ViewCommand, ViewPhase, ViewSnapshot,
};
pub use wallet::{WalletEvent, WalletProvider};
