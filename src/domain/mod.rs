//! Domain 模块
//!
//! 包含视图状态、网络表与域名定价等领域模型

pub mod name;
pub mod network;
pub mod view_state;

// 重新导出常用类型
pub use name::{full_name, registration_price, validate_name};
pub use network::{NetworkInfo, NetworkRegistry, DEFAULT_NETWORKS};
pub use view_state::{DomainFormState, NetworkState, SubmissionPhase};
