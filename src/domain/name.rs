//! 域名校验与定价模块
//!
//! 注册价格按域名长度分档：越短越贵

use ethers::types::U256;

use crate::config::PricingConfig;
use crate::error::AppError;

/// 校验候选域名（不含后缀）
pub fn validate_name(name: &str, pricing: &PricingConfig) -> Result<(), AppError> {
    if name.is_empty() {
        return Err(AppError::ValidationFailed("domain is empty".to_string()));
    }

    // 按字符计数而非字节，避免多字节字符被错误拒绝
    if name.chars().count() < pricing.min_name_len {
        return Err(AppError::ValidationFailed(format!(
            "domain must be at least {} characters long",
            pricing.min_name_len
        )));
    }

    Ok(())
}

/// 计算注册价格
///
/// 3 字符 → 最高档；4 字符 → 中间档；5 字符及以上 → 基础档。
/// 调用方需先通过 [`validate_name`]。
pub fn registration_price(name: &str, pricing: &PricingConfig) -> U256 {
    let len = name.chars().count();
    debug_assert!(len >= pricing.min_name_len);

    let wei = match len {
        3 => pricing.three_char_price_wei,
        4 => pricing.four_char_price_wei,
        _ => pricing.base_price_wei,
    };

    U256::from(wei)
}

/// 拼接展示用完整域名（候选名 + 固定后缀）
pub fn full_name(name: &str, tld: &str) -> String {
    format!("{}{}", name, tld)
}
