//! 交易构建与签名编解码
//!
//! 规范化消息：serde_json 序列化后去掉所有空白字符、折叠 `,}` / `,]`，
//! 得到的字节序列即签名对象。远端验签按字节比对，字段顺序不可变。

use base64::Engine;
use ed25519_dalek::Signer;
use serde::{Deserialize, Serialize};

use crate::domain::identity::SigningIdentity;
use crate::error::Result;

/// 1 显示单位 = 1_000_000 micro 单位
pub const MICRO_UNITS: u64 = 1_000_000;

/// 金额阈值：低于 1000 显示单位走低费档
const HIGH_FEE_THRESHOLD: f64 = 1000.0;

/// 费率档位（线上取值 "1" / "3"）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeTier {
    #[serde(rename = "1")]
    Low,
    #[serde(rename = "3")]
    High,
}

impl FeeTier {
    /// 按显示金额选档
    pub fn for_amount(amount: f64) -> Self {
        if amount < HIGH_FEE_THRESHOLD {
            Self::Low
        } else {
            Self::High
        }
    }
}

/// 待签名交易。字段声明顺序即线上 JSON 字段顺序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub from: String,
    #[serde(rename = "to_")]
    pub to: String,
    /// micro 单位整数金额，线上以字符串传输
    pub amount: String,
    pub nonce: u64,
    pub ou: FeeTier,
    /// Unix 秒 + 亚 10 毫秒抖动
    pub timestamp: f64,
}

impl Transaction {
    /// 构建一笔转账交易
    ///
    /// `amount` 为显示单位，向下取整转换为 micro 单位
    pub fn build(from: &str, to: &str, amount: f64, nonce: u64, timestamp: f64) -> Self {
        let micro_amount = (amount * MICRO_UNITS as f64).floor() as u64;
        Self {
            from: from.to_string(),
            to: to.to_string(),
            amount: micro_amount.to_string(),
            nonce,
            ou: FeeTier::for_amount(amount),
            timestamp,
        }
    }

    /// 生成规范化消息（签名和验签共用的字节序列来源）
    pub fn canonical_message(&self) -> Result<String> {
        let raw = serde_json::to_string(self)?;
        let stripped: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        Ok(stripped.replace(",}", "}").replace(",]", "]"))
    }
}

/// 已签名交易：原始字段 + base64 签名和公钥，构建后不可变
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub signature: String,
    pub public_key: String,
}

/// 对交易做 detached 签名，产出可提交的已签名交易
pub fn sign_transaction(tx: &Transaction, identity: &SigningIdentity) -> Result<SignedTransaction> {
    let message = tx.canonical_message()?;
    let signature = identity.signing_key().sign(message.as_bytes());

    let engine = base64::engine::general_purpose::STANDARD;
    Ok(SignedTransaction {
        transaction: tx.clone(),
        signature: engine.encode(signature.to_bytes()),
        public_key: engine.encode(identity.verifying_key().to_bytes()),
    })
}
