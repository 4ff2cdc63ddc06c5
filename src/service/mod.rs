pub mod campaign;
pub mod nonce_resolver;
pub mod rpc_client;
pub mod transfer;

// 重新导出常用类型
pub use campaign::CampaignRunner;
pub use rpc_client::{LedgerApi, RpcClient};
pub use transfer::{TransferExecutor, TransferOutcome};
