//! 统一错误类型
//!
//! 核心业务错误走 `AppError`，应用边界（配置加载、main）使用 anyhow

use thiserror::Error;

/// 业务错误分类
#[derive(Debug, Error)]
pub enum AppError {
    /// 私钥解码后长度既不是 32 字节（seed）也不是 64 字节（expanded secret key）
    #[error("invalid private key length: expected 32 or 64 bytes, got {0}")]
    InvalidKeyLength(usize),

    /// 私钥格式错误（base64 解码失败、keypair 校验失败等）
    #[error("invalid private key encoding: {0}")]
    InvalidKeyEncoding(String),

    /// RPC 调用无法完成（网络故障、超时）
    #[error("transport error: {0}")]
    Transport(String),

    /// 远端返回非成功状态或无法识别的响应体
    #[error("remote rejection: {0}")]
    RemoteRejection(String),

    /// 交易序列化失败
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 配置错误
    #[error("config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
