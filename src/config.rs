//! 配置管理模块
//! 支持从环境变量和配置文件加载配置

use std::path::Path;

use anyhow::{Context, Result};
use ethers::types::Address;
use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub contract: ContractConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 域名服务合约配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractConfig {
    /// 合约地址 (0x 开头的 40 位十六进制)
    pub address: String,
    /// 域名展示后缀
    pub tld: String,
}

/// 注册费用配置（按域名长度分档）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// 3 字符域名价格 (wei)
    pub three_char_price_wei: u128,
    /// 4 字符域名价格 (wei)
    pub four_char_price_wei: u128,
    /// 5 字符及以上域名价格 (wei)
    pub base_price_wei: u128,
    /// 域名最小长度
    pub min_name_len: usize,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "text"
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            address: "0x934333c64FaCa3bFA87fB7a9863dc18A4D6e5B3C".to_string(),
            tld: ".gmi".to_string(),
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        // 0.5 / 0.3 / 0.1 个原生代币
        Self {
            three_char_price_wei: 500_000_000_000_000_000,
            four_char_price_wei: 300_000_000_000_000_000,
            base_price_wei: 100_000_000_000_000_000,
            min_name_len: 3,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl ContractConfig {
    /// 解析为链上地址类型
    pub fn parsed_address(&self) -> Result<Address> {
        self.address
            .parse::<Address>()
            .with_context(|| format!("Invalid contract address: {}", self.address))
    }
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self {
            contract: ContractConfig::default(),
            pricing: PricingConfig::default(),
            logging: LoggingConfig::default(),
        };

        if let Ok(addr) = std::env::var("GNS_CONTRACT_ADDRESS") {
            config.contract.address = addr;
        }
        if let Ok(tld) = std::env::var("GNS_TLD") {
            config.contract.tld = tld;
        }
        if let Ok(level) = std::env::var("GNS_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(format) = std::env::var("GNS_LOG_FORMAT") {
            config.logging.format = format;
        }

        Ok(config)
    }

    /// 从配置文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse config file as TOML")?;

        Ok(config)
    }

    /// 从环境变量和配置文件合并加载（配置文件优先级更高）
    pub fn from_env_and_file<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let mut config = Self::from_env()?;

        if let Some(path) = path {
            if path.as_ref().exists() {
                config = Self::from_file(path)?;
            }
        }

        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<()> {
        // 验证合约地址格式
        let addr = &self.contract.address;
        if !addr.starts_with("0x") || addr.len() != 42 || hex::decode(&addr[2..]).is_err() {
            anyhow::bail!("GNS_CONTRACT_ADDRESS must be a 0x-prefixed 20-byte hex address");
        }

        // 验证域名后缀
        if !self.contract.tld.starts_with('.') || self.contract.tld.len() < 2 {
            anyhow::bail!("GNS_TLD must start with '.' and not be empty");
        }

        // 价格分档必须严格递减（短域名更贵）
        if self.pricing.three_char_price_wei <= self.pricing.four_char_price_wei
            || self.pricing.four_char_price_wei <= self.pricing.base_price_wei
        {
            anyhow::bail!("Price tiers must be strictly decreasing with name length");
        }

        if self.pricing.min_name_len == 0 {
            anyhow::bail!("min_name_len must be at least 1");
        }

        // 验证日志级别
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            anyhow::bail!(
                "Invalid log level: {} (expected one of {:?})",
                self.logging.level,
                valid_levels
            );
        }

        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            contract: ContractConfig::default(),
            pricing: PricingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
