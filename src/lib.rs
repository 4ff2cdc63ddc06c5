//! octotx - Octra 网络自动转账机器人
//!
//! 每日一轮：遍历钱包 → 遍历收款地址 → 解析 nonce → 构建并签名交易 → 提交

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod service;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::AppError;

pub mod prelude {
    pub use crate::{
        config::Config,
        domain::{identity::Wallet, transaction::SignedTransaction},
        error::AppError,
        service::{campaign::CampaignRunner, rpc_client::RpcClient},
    };
}
