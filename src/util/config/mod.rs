//! 配置管理模块
//!
//! - types: 配置数据结构定义
//! - loader: 配置加载和环境变量处理

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::*;
