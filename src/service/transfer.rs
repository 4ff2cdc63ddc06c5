//! 单笔转账执行
//!
//! 一次尝试：解析 nonce → 构建交易 → 签名 → 提交 → 归一化响应。
//! 失败不重试，结果交由上层记录后继续下一个收款地址。

use std::sync::Arc;

use crate::domain::identity::Wallet;
use crate::domain::transaction::{self, Transaction};
use crate::infrastructure::randomness::Randomness;
use crate::service::nonce_resolver::NonceResolver;
use crate::service::rpc_client::{interpret_submit, LedgerApi, SubmitReply};
use crate::utils::time_utils;

/// 单笔转账的最终结果，仅存活到日志记录完成
#[derive(Debug, Clone, PartialEq)]
pub enum TransferOutcome {
    Sent { tx_hash: String },
    Failed { error: String },
}

impl TransferOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }
}

/// 转账执行器
pub struct TransferExecutor {
    api: Arc<dyn LedgerApi>,
    rng: Arc<dyn Randomness>,
}

impl TransferExecutor {
    pub fn new(api: Arc<dyn LedgerApi>, rng: Arc<dyn Randomness>) -> Self {
        Self { api, rng }
    }

    /// 执行一笔转账，`amount` 为显示单位
    pub async fn execute(&self, wallet: &Wallet, to: &str, amount: f64) -> TransferOutcome {
        let resolved = NonceResolver::new(self.api.as_ref())
            .resolve(&wallet.address)
            .await;

        let timestamp = time_utils::unix_timestamp() + self.rng.timestamp_jitter();
        let tx = Transaction::build(&wallet.address, to, amount, resolved + 1, timestamp);

        let signed = match transaction::sign_transaction(&tx, &wallet.identity) {
            Ok(signed) => signed,
            Err(e) => {
                return TransferOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        match self.api.submit(&signed).await {
            Ok(response) => match interpret_submit(&response) {
                SubmitReply::Accepted { tx_hash } => TransferOutcome::Sent { tx_hash },
                SubmitReply::Rejected { message } => TransferOutcome::Failed { error: message },
            },
            Err(e) => TransferOutcome::Failed {
                error: e.to_string(),
            },
        }
    }
}
