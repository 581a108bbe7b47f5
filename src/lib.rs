//! GNS Client - GMI 域名服务前端核心
//!
//! 无头模式：钱包与合约均为注入能力，核心不持有私钥、不发起 HTTP 服务

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod service;

// 重新导出常用类型
pub use config::AppConfig;
pub use error::AppError;

// 统一模块导出
pub mod prelude {
    pub use crate::{
        config::AppConfig,
        domain::{NetworkInfo, NetworkRegistry, SubmissionPhase},
        error::AppError,
        service::{
            ConnectOutcome, NameServiceClient, RegistrationView, SubmitOutcome, ViewCommand,
            WalletEvent, WalletProvider,
        },
    };
}
