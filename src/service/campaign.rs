//! 转账轮次编排
//!
//! 外层循环：逐钱包；内层循环：按配置顺序逐收款地址。
//! 钱包之间、收款地址之间严格串行，发送间隔随机延迟（限速措施）。
//! 单个钱包内的任何错误只记录日志，不中断后续钱包。

use std::sync::Arc;
use std::time::Duration;

use crate::config::CampaignConfig;
use crate::domain::identity::Wallet;
use crate::infrastructure::randomness::Randomness;
use crate::service::rpc_client::LedgerApi;
use crate::service::transfer::{TransferExecutor, TransferOutcome};

/// 轮次执行器
pub struct CampaignRunner {
    api: Arc<dyn LedgerApi>,
    rng: Arc<dyn Randomness>,
    executor: TransferExecutor,
    config: CampaignConfig,
    recipients: Vec<String>,
}

impl CampaignRunner {
    pub fn new(
        api: Arc<dyn LedgerApi>,
        rng: Arc<dyn Randomness>,
        config: CampaignConfig,
        recipients: Vec<String>,
    ) -> Self {
        let executor = TransferExecutor::new(api.clone(), rng.clone());
        Self {
            api,
            rng,
            executor,
            config,
            recipients,
        }
    }

    /// 对所有钱包跑一轮完整的转账
    ///
    /// 外部调度器保证同一时刻至多一轮在跑，这里不做重入保护
    pub async fn run_campaign(&self, wallets: &[Wallet]) {
        tracing::info!(
            wallets = wallets.len(),
            recipients = self.recipients.len(),
            "starting campaign run"
        );

        for wallet in wallets {
            if let Err(e) = self.send_to_all(wallet).await {
                tracing::error!(
                    address = %wallet.address,
                    error = %e,
                    "wallet processing failed, continuing with next wallet"
                );
            }
            self.pause().await;
        }

        tracing::info!("campaign run complete");
    }

    /// 单个钱包：按顺序给每个收款地址发一笔
    async fn send_to_all(&self, wallet: &Wallet) -> anyhow::Result<()> {
        for to in &self.recipients {
            // 自转账直接跳过，不触发任何 RPC、不计延迟
            if *to == wallet.address {
                continue;
            }

            tracing::info!(address = %wallet.address, "processing wallet");

            let amount = self.rng.transfer_amount(
                self.config.min_transfer_amount,
                self.config.max_transfer_amount,
            );

            let balance = match self.api.balance(&wallet.address).await {
                Ok(record) => record.balance,
                Err(e) => {
                    tracing::warn!(
                        address = %wallet.address,
                        error = %e,
                        "balance lookup failed, treating balance as 0"
                    );
                    0.0
                }
            };
            tracing::info!(address = %wallet.address, balance = %format!("{:.4}", balance), "balance fetched");

            if balance < amount {
                tracing::warn!(
                    address = %wallet.address,
                    balance = balance,
                    amount = amount,
                    "balance too low, skipping recipient"
                );
                self.pause().await;
                continue;
            }

            tracing::info!(from = %wallet.address, to = %to, amount = amount, "sending transfer");

            match self.executor.execute(wallet, to, amount).await {
                TransferOutcome::Sent { tx_hash } => {
                    tracing::info!(
                        from = %wallet.address,
                        to = %to,
                        amount = amount,
                        tx_hash = %tx_hash,
                        "transfer accepted"
                    );
                }
                TransferOutcome::Failed { error } => {
                    tracing::warn!(
                        from = %wallet.address,
                        to = %to,
                        amount = amount,
                        error = %error,
                        "transfer failed"
                    );
                }
            }

            self.pause().await;
        }

        Ok(())
    }

    /// 随机延迟
    async fn pause(&self) {
        let delay = self
            .rng
            .delay_ms(self.config.min_delay_ms, self.config.max_delay_ms);
        tracing::debug!(delay_ms = delay, "waiting before next send");
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
}
