//! 配置管理模块
//! 支持从环境变量和配置文件加载配置

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub rpc: RpcConfig,
    pub wallet: WalletConfig,
    #[serde(default)]
    pub campaign: CampaignConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// RPC 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

/// 钱包输入配置（私钥文件 + 收款地址文件，均为每行一条）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletConfig {
    pub private_keys_path: String,
    pub recipients_path: String,
}

/// 转账轮次配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignConfig {
    /// 每次发送之间的随机延迟下限（毫秒）
    pub min_delay_ms: u64,
    /// 随机延迟上限（毫秒）
    pub max_delay_ms: u64,
    /// 单笔随机金额下限（显示单位）
    pub min_transfer_amount: f64,
    /// 单笔随机金额上限（显示单位）
    pub max_transfer_amount: f64,
    /// 每日触发时刻（UTC 整点）
    pub run_hour_utc: u32,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "text"
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("OCT_RPC_URL")
                .unwrap_or_else(|_| "https://octra.network".into()),
            timeout_secs: std::env::var("OCT_RPC_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            private_keys_path: std::env::var("OCT_PRIVATE_KEYS_PATH")
                .unwrap_or_else(|_| "privatekey.txt".into()),
            recipients_path: std::env::var("OCT_RECIPIENTS_PATH")
                .unwrap_or_else(|_| "recipient.txt".into()),
        }
    }
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: std::env::var("OCT_MIN_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10_000),
            max_delay_ms: std::env::var("OCT_MAX_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(20_000),
            min_transfer_amount: std::env::var("OCT_MIN_TRANSFER_AMOUNT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.01),
            max_transfer_amount: std::env::var("OCT_MAX_TRANSFER_AMOUNT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.1),
            run_hour_utc: std::env::var("OCT_RUN_HOUR_UTC")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".into()),
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            rpc: RpcConfig::default(),
            wallet: WalletConfig::default(),
            campaign: CampaignConfig::default(),
            logging: LoggingConfig::default(),
        })
    }

    /// 从配置文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file as TOML")?;

        Ok(config)
    }

    /// 从环境变量和配置文件合并加载（配置文件优先级更高）
    pub fn from_env_and_file<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let mut config = Self::from_env()?;

        if let Some(path) = path {
            if path.as_ref().exists() {
                config = Self::from_file(path)?;
            }
        }

        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<()> {
        if !self.rpc.base_url.starts_with("http://") && !self.rpc.base_url.starts_with("https://")
        {
            anyhow::bail!("rpc.base_url must start with http:// or https://");
        }

        if self.campaign.min_delay_ms > self.campaign.max_delay_ms {
            anyhow::bail!("campaign.min_delay_ms must not exceed campaign.max_delay_ms");
        }

        if self.campaign.min_transfer_amount <= 0.0
            || self.campaign.min_transfer_amount > self.campaign.max_transfer_amount
        {
            anyhow::bail!(
                "campaign transfer amounts must satisfy 0 < min_transfer_amount <= max_transfer_amount"
            );
        }

        if self.campaign.run_hour_utc >= 24 {
            anyhow::bail!("campaign.run_hour_utc must be in 0..24");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            anyhow::bail!("logging.level must be one of: {:?}", valid_levels);
        }

        if self.logging.format != "json" && self.logging.format != "text" {
            anyhow::bail!("logging.format must be 'json' or 'text'");
        }

        Ok(())
    }
}

/// 读取一个每行一条的文本文件（私钥或收款地址）
/// 空行和首尾空白会被忽略
pub fn load_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read input file: {:?}", path.as_ref()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
