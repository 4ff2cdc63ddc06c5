//! 轮次级集成测试
//!
//! 用脚本化的 LedgerApi 替身走完整条链路：
//! 钱包解码 → 地址派生 → nonce 解析（确认态 + 暂存池）→ 签名 → 提交

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::Engine;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use octotx::config::CampaignConfig;
use octotx::domain::identity::Wallet;
use octotx::domain::transaction::SignedTransaction;
use octotx::error::Result;
use octotx::infrastructure::randomness::Randomness;
use octotx::service::campaign::CampaignRunner;
use octotx::service::rpc_client::{BalanceRecord, LedgerApi, StagedTx, SubmitResponse};

/// 预先编排好账户状态和暂存池的账本替身
struct ScriptedLedger {
    confirmed_nonce: u64,
    balance: f64,
    staged: Vec<StagedTx>,
    balance_calls: AtomicUsize,
    submitted: Mutex<Vec<SignedTransaction>>,
}

impl ScriptedLedger {
    fn new(confirmed_nonce: u64, balance: f64, staged: Vec<StagedTx>) -> Self {
        Self {
            confirmed_nonce,
            balance,
            staged,
            balance_calls: AtomicUsize::new(0),
            submitted: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LedgerApi for ScriptedLedger {
    async fn balance(&self, _address: &str) -> Result<BalanceRecord> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        Ok(BalanceRecord {
            nonce: self.confirmed_nonce,
            balance: self.balance,
        })
    }

    async fn staging(&self) -> Result<Vec<StagedTx>> {
        Ok(self.staged.clone())
    }

    async fn submit(&self, tx: &SignedTransaction) -> Result<SubmitResponse> {
        self.submitted.lock().unwrap().push(tx.clone());
        Ok(SubmitResponse {
            status: 200,
            body: format!(r#"{{"status":"accepted","tx_hash":"hash-{}"}}"#, tx.transaction.nonce),
        })
    }
}

struct InstantRandomness;

impl Randomness for InstantRandomness {
    fn transfer_amount(&self, min: f64, _max: f64) -> f64 {
        min
    }

    fn delay_ms(&self, _min: u64, _max: u64) -> u64 {
        0
    }

    fn timestamp_jitter(&self) -> f64 {
        0.0
    }
}

fn config() -> CampaignConfig {
    CampaignConfig {
        min_delay_ms: 0,
        max_delay_ms: 0,
        min_transfer_amount: 0.05,
        max_transfer_amount: 0.05,
        run_hour_utc: 1,
    }
}

fn wallet_from_seed(seed: [u8; 32]) -> Wallet {
    let encoded = base64::engine::general_purpose::STANDARD.encode(seed);
    Wallet::from_base64_key(&encoded).unwrap()
}

#[tokio::test]
async fn campaign_reconciles_nonce_against_staging_pool() {
    let sender = wallet_from_seed([21u8; 32]);

    // 确认态 nonce 5，暂存池里本地址最高 7 → 下一笔应使用 8
    let staged = vec![
        StagedTx {
            from: sender.address.clone(),
            nonce: 3,
        },
        StagedTx {
            from: sender.address.clone(),
            nonce: 7,
        },
        StagedTx {
            from: "octUnrelated".into(),
            nonce: 42,
        },
    ];
    let api = Arc::new(ScriptedLedger::new(5, 10.0, staged));

    let runner = CampaignRunner::new(
        api.clone(),
        Arc::new(InstantRandomness),
        config(),
        vec!["octRecipient".into()],
    );
    runner.run_campaign(std::slice::from_ref(&sender)).await;

    let submitted = api.submitted.lock().unwrap();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].transaction.nonce, 8);
}

#[tokio::test]
async fn campaign_submits_verifiable_signed_transactions() {
    let sender = wallet_from_seed([22u8; 32]);
    let api = Arc::new(ScriptedLedger::new(0, 10.0, Vec::new()));

    let runner = CampaignRunner::new(
        api.clone(),
        Arc::new(InstantRandomness),
        config(),
        vec!["octRecipient".into()],
    );
    runner.run_campaign(std::slice::from_ref(&sender)).await;

    let submitted = api.submitted.lock().unwrap();
    assert_eq!(submitted.len(), 1);
    let signed = &submitted[0];

    // 线上字段齐备
    assert_eq!(signed.transaction.from, sender.address);
    assert_eq!(signed.transaction.to, "octRecipient");
    assert_eq!(signed.transaction.amount, "50000");

    // 签名对规范化消息可验
    let engine = base64::engine::general_purpose::STANDARD;
    let pk_bytes: [u8; 32] = engine
        .decode(&signed.public_key)
        .unwrap()
        .try_into()
        .unwrap();
    let verifying_key = VerifyingKey::from_bytes(&pk_bytes).unwrap();

    let sig_bytes: [u8; 64] = engine
        .decode(&signed.signature)
        .unwrap()
        .try_into()
        .unwrap();
    let signature = Signature::from_bytes(&sig_bytes);

    let message = signed.transaction.canonical_message().unwrap();
    assert!(verifying_key.verify(message.as_bytes(), &signature).is_ok());
}

#[tokio::test]
async fn campaign_processes_multiple_wallets_sequentially() {
    let wallets = [
        wallet_from_seed([31u8; 32]),
        wallet_from_seed([32u8; 32]),
        wallet_from_seed([33u8; 32]),
    ];
    let api = Arc::new(ScriptedLedger::new(0, 10.0, Vec::new()));

    let runner = CampaignRunner::new(
        api.clone(),
        Arc::new(InstantRandomness),
        config(),
        vec!["octA".into(), "octB".into()],
    );
    runner.run_campaign(&wallets).await;

    let submitted = api.submitted.lock().unwrap();
    assert_eq!(submitted.len(), 6, "3 wallets x 2 recipients");

    // 严格串行：同一钱包的两笔相邻出现
    let senders: Vec<&str> = submitted
        .iter()
        .map(|tx| tx.transaction.from.as_str())
        .collect();
    for pair in senders.chunks(2) {
        assert_eq!(pair[0], pair[1]);
    }
}
