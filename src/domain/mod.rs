//! Domain 模块
//!
//! 包含核心业务逻辑和领域模型

pub mod address;
pub mod identity;
pub mod transaction;

// 重新导出常用类型
pub use identity::{SigningIdentity, Wallet};
pub use transaction::{FeeTier, SignedTransaction, Transaction};
