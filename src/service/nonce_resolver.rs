//! Nonce 解析
//!
//! 每次转账前重新读取确认态和暂存池，不做缓存：暂存状态在两笔转账之间
//! 可能变化。两个读并发发出，纯粹为降低延迟，彼此无顺序依赖。

use crate::service::rpc_client::LedgerApi;

/// Nonce 解析器：确认态 nonce 与暂存池最大 nonce 取较大者
pub struct NonceResolver<'a> {
    api: &'a dyn LedgerApi,
}

impl<'a> NonceResolver<'a> {
    pub fn new(api: &'a dyn LedgerApi) -> Self {
        Self { api }
    }

    /// 解析当前已占用的最高 nonce；下一笔交易应使用返回值 + 1
    ///
    /// 任一读失败时该侧按 0 处理并记录 warning（保持远端尽力而为语义，
    /// 不向上传播——见 DESIGN.md 的开放问题记录）
    pub async fn resolve(&self, address: &str) -> u64 {
        let (balance_result, staging_result) =
            tokio::join!(self.api.balance(address), self.api.staging());

        let confirmed = match balance_result {
            Ok(record) => record.nonce,
            Err(e) => {
                tracing::warn!(
                    address = %address,
                    error = %e,
                    "balance lookup failed, treating confirmed nonce as 0"
                );
                0
            }
        };

        let pending_max = match staging_result {
            Ok(staged) => staged
                .iter()
                .filter(|tx| tx.from == address)
                .map(|tx| tx.nonce)
                .max(),
            Err(e) => {
                tracing::warn!(
                    address = %address,
                    error = %e,
                    "staging pool lookup failed, ignoring pending transactions"
                );
                None
            }
        };

        confirmed.max(pending_max.unwrap_or(0))
    }
}
