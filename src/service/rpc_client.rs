//! RPC 客户端
//!
//! 核心只依赖 `LedgerApi` 契约；`RpcClient` 是其 reqwest 实现。
//! /send-tx 的双形态响应（结构化 JSON vs 纯文本 "OK <hash>"）在
//! `interpret_submit` 中一次性归一为 `SubmitReply`，不在别处重复嗅探。

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::RpcConfig;
use crate::domain::transaction::SignedTransaction;
use crate::error::{AppError, Result};

/// 固定客户端标识头
const USER_AGENT: &str = concat!("octotx/", env!("CARGO_PKG_VERSION"));

/// /balance/{address} 的账户记录，字段缺失按 0 处理
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceRecord {
    pub nonce: u64,
    pub balance: f64,
}

/// 暂存池中的一条待确认交易
#[derive(Debug, Clone, PartialEq)]
pub struct StagedTx {
    pub from: String,
    pub nonce: u64,
}

/// /send-tx 的原始响应（状态码 + 响应体）
#[derive(Debug, Clone)]
pub struct SubmitResponse {
    pub status: u16,
    pub body: String,
}

/// 提交结果的归一化形态
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitReply {
    Accepted { tx_hash: String },
    Rejected { message: String },
}

/// 远端账本服务契约
#[async_trait]
pub trait LedgerApi: Send + Sync {
    /// 查询确认态账户记录
    async fn balance(&self, address: &str) -> Result<BalanceRecord>;

    /// 查询全局暂存池
    async fn staging(&self) -> Result<Vec<StagedTx>>;

    /// 提交已签名交易，返回原始响应
    async fn submit(&self, tx: &SignedTransaction) -> Result<SubmitResponse>;
}

/// 归一化 /send-tx 响应
///
/// HTTP 200 下接受两种成功形态：
/// - JSON 体带 `status: "accepted"` 和非空 `tx_hash`
/// - 以 "ok"（不区分大小写）开头的纯文本，最后一个空白分隔 token 即哈希
///
/// 其余一律 `Rejected`，携带原始响应体
pub fn interpret_submit(response: &SubmitResponse) -> SubmitReply {
    if response.status == 200 {
        if let Ok(value) = serde_json::from_str::<Value>(&response.body) {
            if value.get("status").and_then(Value::as_str) == Some("accepted") {
                if let Some(hash) = value.get("tx_hash").and_then(Value::as_str) {
                    if !hash.is_empty() {
                        return SubmitReply::Accepted {
                            tx_hash: hash.to_string(),
                        };
                    }
                }
            }
        }

        if response.body.to_lowercase().starts_with("ok") {
            if let Some(hash) = response.body.split_whitespace().last() {
                return SubmitReply::Accepted {
                    tx_hash: hash.to_string(),
                };
            }
        }
    }

    SubmitReply::Rejected {
        message: response.body.clone(),
    }
}

/// reqwest 实现：固定 30 秒超时 + 客户端标识头
pub struct RpcClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl RpcClient {
    pub fn new(config: &RpcConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http_client: client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

#[async_trait]
impl LedgerApi for RpcClient {
    async fn balance(&self, address: &str) -> Result<BalanceRecord> {
        let response = self
            .http_client
            .get(self.url(&format!("/balance/{}", address)))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AppError::RemoteRejection(format!(
                "balance query failed with status {}: {}",
                status, body
            )));
        }

        let value: Value = serde_json::from_str(&body)?;
        Ok(BalanceRecord {
            nonce: lenient_u64(value.get("nonce")),
            balance: lenient_f64(value.get("balance")),
        })
    }

    async fn staging(&self) -> Result<Vec<StagedTx>> {
        let response = self
            .http_client
            .get(self.url("/staging"))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AppError::RemoteRejection(format!(
                "staging query failed with status {}: {}",
                status, body
            )));
        }

        let value: Value = serde_json::from_str(&body)?;
        let staged = value
            .get("staged_transactions")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| {
                        let from = entry.get("from")?.as_str()?.to_string();
                        Some(StagedTx {
                            from,
                            nonce: lenient_u64(entry.get("nonce")),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(staged)
    }

    async fn submit(&self, tx: &SignedTransaction) -> Result<SubmitResponse> {
        let response = self
            .http_client
            .post(self.url("/send-tx"))
            .header("Accept", "application/json")
            .json(tx)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(SubmitResponse { status, body })
    }
}

/// 宽松取整数：接受 JSON number 或数字字符串，缺失/无法解析按 0
fn lenient_u64(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.parse().unwrap_or(0),
        _ => 0,
    }
}

/// 宽松取浮点：接受 JSON number 或数字字符串，缺失/无法解析按 0
fn lenient_f64(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.parse().unwrap_or(0.0),
        _ => 0.0,
    }
}
