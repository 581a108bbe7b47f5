//! 网络配置模块
//!
//! 链 ID 到展示信息的静态映射，仅用于展示，不做功能门控

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// 单条网络展示信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    /// 链 ID (EIP-155)
    pub chain_id: u64,
    /// 网络名称
    pub name: String,
    /// 原生代币符号 (ETH, MATIC, etc.)
    pub symbol: String,
    /// 是否为测试网
    pub is_testnet: bool,
}

/// 网络注册表
#[derive(Debug, Clone, Default)]
pub struct NetworkRegistry {
    configs: HashMap<u64, NetworkInfo>,
}

/// 内置网络表（合约部署所在的两个测试网）
pub static DEFAULT_NETWORKS: Lazy<NetworkRegistry> = Lazy::new(NetworkRegistry::with_defaults);

impl NetworkRegistry {
    /// 创建预配置的注册表
    pub fn with_defaults() -> Self {
        let mut registry = Self::default();

        registry.insert(NetworkInfo {
            chain_id: 4,
            name: "Rinkeby".to_string(),
            symbol: "ETH".to_string(),
            is_testnet: true,
        });
        registry.insert(NetworkInfo {
            chain_id: 80001,
            name: "Polygon Mumbai".to_string(),
            symbol: "MATIC".to_string(),
            is_testnet: true,
        });

        registry
    }

    /// 创建空注册表（测试用）
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, info: NetworkInfo) {
        self.configs.insert(info.chain_id, info);
    }

    /// 按链 ID 查询
    pub fn get(&self, chain_id: u64) -> Option<&NetworkInfo> {
        self.configs.get(&chain_id)
    }

    pub fn is_known(&self, chain_id: u64) -> bool {
        self.configs.contains_key(&chain_id)
    }

    /// 展示标签；未知链降级为通用描述而非报错
    pub fn display_label(&self, chain_id: u64) -> String {
        match self.configs.get(&chain_id) {
            Some(info) => info.name.clone(),
            None => format!("unknown network ({})", chain_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_entries() {
        let registry = NetworkRegistry::with_defaults();

        let rinkeby = registry.get(4).expect("rinkeby present");
        assert_eq!(rinkeby.name, "Rinkeby");
        assert_eq!(rinkeby.symbol, "ETH");
        assert!(rinkeby.is_testnet);

        let mumbai = registry.get(80001).expect("mumbai present");
        assert_eq!(mumbai.name, "Polygon Mumbai");
        assert_eq!(mumbai.symbol, "MATIC");
    }

    #[test]
    fn test_unknown_chain_fallback_label() {
        let registry = NetworkRegistry::with_defaults();

        assert!(!registry.is_known(1));
        assert_eq!(registry.display_label(1), "unknown network (1)");
        assert_eq!(registry.display_label(80001), "Polygon Mumbai");
    }
}
