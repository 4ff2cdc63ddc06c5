//! octotx 主入口
//! 启动即跑一轮，之后每天在配置的 UTC 整点再跑一轮

use std::sync::Arc;

use anyhow::{Context, Result};
use octotx::{
    config::{self, Config},
    domain::identity::Wallet,
    infrastructure::{logging, randomness::ThreadRandomness},
    service::{campaign::CampaignRunner, rpc_client::RpcClient},
    utils::time_utils,
};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. 加载环境变量与配置（CONFIG_PATH 指向的 TOML 文件优先）
    dotenvy::dotenv().ok();
    let config = match std::env::var("CONFIG_PATH") {
        Ok(path) => Config::from_env_and_file(Some(path.as_str()))?,
        Err(_) => Config::from_env()?,
    };
    config.validate()?;

    // 2. 初始化日志
    logging::init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    tracing::info!("🚀 Starting octotx auto-transfer bot");

    // 3. 加载私钥与收款地址（每行一条）
    let keys = config::load_lines(&config.wallet.private_keys_path)
        .context("failed to load private keys")?;
    let recipients = config::load_lines(&config.wallet.recipients_path)
        .context("failed to load recipients")?;

    if recipients.is_empty() {
        anyhow::bail!("recipient list is empty: {}", config.wallet.recipients_path);
    }

    // 4. 逐条解码私钥并派生地址；坏密钥只跳过自身，不中断整个运行
    let mut wallets = Vec::new();
    for (idx, key) in keys.iter().enumerate() {
        match Wallet::from_base64_key(key) {
            Ok(wallet) => {
                tracing::info!(address = %wallet.address, "✅ wallet loaded");
                wallets.push(wallet);
            }
            Err(e) => {
                tracing::error!(line = idx + 1, error = %e, "skipping unusable private key");
            }
        }
    }

    if wallets.is_empty() {
        anyhow::bail!(
            "no usable wallets in {}",
            config.wallet.private_keys_path
        );
    }

    tracing::info!(
        wallets = wallets.len(),
        recipients = recipients.len(),
        rpc = %config.rpc.base_url,
        "configuration loaded"
    );

    // 5. 组装轮次执行器
    let api = Arc::new(RpcClient::new(&config.rpc));
    let rng = Arc::new(ThreadRandomness);
    let runner = CampaignRunner::new(api, rng, config.campaign.clone(), recipients);

    // 6. 启动即跑一轮，之后每日定时触发；调度保证轮次之间不重叠
    runner.run_campaign(&wallets).await;

    loop {
        let wait = time_utils::duration_until_next_daily_run(config.campaign.run_hour_utc);
        tracing::info!(
            next_run_in = %time_utils::format_duration(wait.as_secs()),
            run_hour_utc = config.campaign.run_hour_utc,
            "campaign complete, waiting for next daily run"
        );
        tokio::time::sleep(wait).await;
        runner.run_campaign(&wallets).await;
    }
}
