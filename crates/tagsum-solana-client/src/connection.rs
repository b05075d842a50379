//! Ledger connection seam.
//!
//! [`LedgerConnection`] is the narrow set of RPC calls the summary client
//! needs. [`RpcLedger`] backs it with the nonblocking Solana RPC client; tests
//! substitute an in-memory ledger.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_request::{RpcError, RpcResponseErrorData};
use solana_sdk::account::Account;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use tagsum_core::config::{Commitment, NetworkConfig};

use crate::error::ConnectionError;

#[async_trait]
pub trait LedgerConnection: Send + Sync {
    /// Fetch an account, `None` if it does not exist.
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, ConnectionError>;

    /// Every account owned by `program_id`.
    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
    ) -> Result<Vec<(Pubkey, Account)>, ConnectionError>;

    async fn get_latest_blockhash(&self) -> Result<Hash, ConnectionError>;

    /// Submit a signed transaction and wait for confirmation.
    async fn send_transaction(&self, tx: &Transaction) -> Result<Signature, ConnectionError>;
}

pub fn commitment_config(c: Commitment) -> CommitmentConfig {
    match c {
        Commitment::Processed => CommitmentConfig::processed(),
        Commitment::Confirmed => CommitmentConfig::confirmed(),
        Commitment::Finalized => CommitmentConfig::finalized(),
    }
}

/// RPC-backed connection. Every call is bounded by `timeout`.
pub struct RpcLedger {
    rpc: RpcClient,
    commitment: CommitmentConfig,
    timeout: Duration,
}

impl RpcLedger {
    pub fn new(url: impl Into<String>, commitment: CommitmentConfig, timeout: Duration) -> Self {
        let url = url.into();
        Self {
            rpc: RpcClient::new_with_timeout_and_commitment(url, timeout, commitment),
            commitment,
            timeout,
        }
    }

    pub fn from_config(cfg: &NetworkConfig) -> Self {
        Self::new(
            cfg.rpc_url.clone(),
            commitment_config(cfg.commitment),
            Duration::from_millis(cfg.timeout_ms),
        )
    }

    pub fn url(&self) -> String {
        self.rpc.url()
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, ConnectionError>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(res) => res.map_err(map_client_error),
            Err(_) => Err(ConnectionError::Timeout(self.timeout)),
        }
    }
}

#[async_trait]
impl LedgerConnection for RpcLedger {
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, ConnectionError> {
        let resp = self
            .bounded(self.rpc.get_account_with_commitment(address, self.commitment))
            .await?;
        Ok(resp.value)
    }

    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
    ) -> Result<Vec<(Pubkey, Account)>, ConnectionError> {
        self.bounded(self.rpc.get_program_accounts(program_id)).await
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, ConnectionError> {
        self.bounded(self.rpc.get_latest_blockhash()).await
    }

    async fn send_transaction(&self, tx: &Transaction) -> Result<Signature, ConnectionError> {
        let signature = tx.signatures.first().copied().unwrap_or_default();
        match self.bounded(self.rpc.send_and_confirm_transaction(tx)).await {
            Err(ConnectionError::Timeout(after)) => {
                Err(ConnectionError::Unconfirmed { signature, after })
            }
            other => other,
        }
    }
}

/// Split RPC failures into transport problems and cluster rejections. For
/// preflight failures the simulation logs are kept; program errors live there.
fn map_client_error(err: ClientError) -> ConnectionError {
    let message = err.to_string();
    match err.kind() {
        ClientErrorKind::RpcError(RpcError::RpcResponseError { data, .. }) => {
            let logs = match data {
                RpcResponseErrorData::SendTransactionPreflightFailure(sim) => {
                    sim.logs.clone().unwrap_or_default()
                }
                _ => Vec::new(),
            };
            ConnectionError::rejected(message, logs)
        }
        ClientErrorKind::TransactionError(_) | ClientErrorKind::SigningError(_) => {
            ConnectionError::rejected(message, Vec::new())
        }
        _ => ConnectionError::Transport(message),
    }
}
