//! 视图状态定义
//!
//! 全部为挂载期内的瞬态状态；链切换触发整页重载后重新构建

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::network::NetworkRegistry;

/// 当前激活网络的展示状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkState {
    /// 钱包报告的链 ID
    pub chain_id: u64,
    /// 展示标签（未知链为降级描述）
    pub label: String,
    /// 是否在内置网络表中
    pub known: bool,
}

impl NetworkState {
    /// 通过网络表解析链 ID
    pub fn resolve(chain_id: u64, registry: &NetworkRegistry) -> Self {
        Self {
            chain_id,
            label: registry.display_label(chain_id),
            known: registry.is_known(chain_id),
        }
    }
}

/// 注册表单状态（两个自由文本输入框）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainFormState {
    /// 候选域名（不含后缀）
    pub domain: String,
    /// 关联文本记录
    pub record: String,
}

impl DomainFormState {
    /// 仅在两步提交全部成功后调用
    pub fn clear(&mut self) {
        self.domain.clear();
        self.record.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.domain.is_empty() && self.record.is_empty()
    }
}

/// 单次提交的阶段状态机
///
/// Idle → AwaitingRegisterConfirmation → AwaitingRecordConfirmation → Idle；
/// 任一等待阶段失败回到 Idle（表单内容保留）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionPhase {
    /// 空闲，可接受新提交
    Idle,
    /// register 交易已发出，等待上链确认
    AwaitingRegisterConfirmation,
    /// setRecord 交易已发出，等待上链确认
    AwaitingRecordConfirmation,
}

impl SubmissionPhase {
    /// 是否有提交在途（兼作重复提交保护）
    pub fn is_in_flight(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// 验证状态转换合法性
    pub fn can_transition_to(&self, target: &Self) -> bool {
        use SubmissionPhase::*;

        match (self, target) {
            // Idle → 发出 register
            (Idle, AwaitingRegisterConfirmation) => true,

            // register 确认成功 → 发出 setRecord；失败 → 回到 Idle
            (AwaitingRegisterConfirmation, AwaitingRecordConfirmation)
            | (AwaitingRegisterConfirmation, Idle) => true,

            // setRecord 确认（成功或失败）→ 回到 Idle
            (AwaitingRecordConfirmation, Idle) => true,

            // 其他转换非法
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingRegisterConfirmation => "awaiting_register_confirmation",
            Self::AwaitingRecordConfirmation => "awaiting_record_confirmation",
        }
    }
}

impl fmt::Display for SubmissionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for SubmissionPhase {
    fn default() -> Self {
        Self::Idle
    }
}
