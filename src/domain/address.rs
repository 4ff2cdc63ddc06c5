//! 地址派生
//!
//! 地址 = "oct" + Base58(SHA-256(公钥))，其中 Base58 使用比特币字母表，
//! 哈希的每个前导零字节对应编码结果的一个前导 '1'（bs58 的标准行为）

use sha2::{Digest, Sha256};

use crate::domain::identity::SigningIdentity;

/// 网络地址前缀
pub const ADDRESS_PREFIX: &str = "oct";

/// 从签名身份派生网络地址（纯函数，确定性）
pub fn derive_address(identity: &SigningIdentity) -> String {
    let public_key = identity.verifying_key().to_bytes();
    let hashed = Sha256::digest(public_key);
    address_from_hash(&hashed)
}

/// 哈希 → 地址字符串
fn address_from_hash(hash: &[u8]) -> String {
    format!("{}{}", ADDRESS_PREFIX, bs58::encode(hash).into_string())
}
