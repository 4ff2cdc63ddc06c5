//! 签名身份与钱包
//!
//! 私钥来源：每行一条 base64 编码的密钥材料。
//! 32 字节按 ed25519 seed 处理，64 字节按 expanded secret key 处理。

use base64::Engine;
use ed25519_dalek::{SigningKey, VerifyingKey};

use crate::domain::address;
use crate::error::{AppError, Result};

/// 签名身份：密钥材料加载一次后不可变
#[derive(Clone)]
pub struct SigningIdentity {
    signing_key: SigningKey,
}

impl SigningIdentity {
    /// 从 base64 编码的密钥材料构建身份
    ///
    /// 解码后长度必须恰好为 32 或 64 字节，否则返回 `InvalidKeyLength`
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| AppError::InvalidKeyEncoding(e.to_string()))?;

        let signing_key = match bytes.len() {
            32 => {
                let mut seed = [0u8; 32];
                seed.copy_from_slice(&bytes);
                SigningKey::from_bytes(&seed)
            }
            64 => {
                let mut keypair = [0u8; 64];
                keypair.copy_from_slice(&bytes);
                SigningKey::from_keypair_bytes(&keypair)
                    .map_err(|e| AppError::InvalidKeyEncoding(e.to_string()))?
            }
            other => return Err(AppError::InvalidKeyLength(other)),
        };

        Ok(Self { signing_key })
    }

    pub fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// 公钥的 hex 表示（仅用于日志展示）
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.verifying_key().to_bytes())
    }
}

impl std::fmt::Debug for SigningIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 不打印密钥材料
        f.debug_struct("SigningIdentity")
            .field("public_key", &self.public_key_hex())
            .finish()
    }
}

/// 钱包：地址由公钥唯一确定，派生一次后不再变化
#[derive(Debug, Clone)]
pub struct Wallet {
    pub address: String,
    pub identity: SigningIdentity,
}

impl Wallet {
    /// 从 base64 私钥构建钱包（解码 + 地址派生）
    pub fn from_base64_key(encoded: &str) -> Result<Self> {
        let identity = SigningIdentity::from_base64(encoded)?;
        let address = address::derive_address(&identity);
        Ok(Self { address, identity })
    }
}
