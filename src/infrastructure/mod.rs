//! Infrastructure 模块
//!
//! 横切关注点：日志初始化

pub mod logging;

pub use logging::init_logging;
