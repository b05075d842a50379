//! High-level client for the tagged-summaries program.
//!
//! Validation runs before any network round trip. The program is the final
//! authority: its rejections are classified into [`SummaryClientError`] and
//! never retried here.

use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use solana_program::pubkey::Pubkey;
use solana_program::system_program;
use solana_sdk::account::Account;
use solana_sdk::instruction::Instruction;
use solana_sdk::signature::{Signature, Signer};
use solana_sdk::transaction::Transaction;
use tagsum_core::config::{LimitsConfig, NetworkConfig};
use tagsum_core::model::AiProcessingResult;
use tagsum_core::ordering::sort_desc_by_key;
use tagsum_core::validation::{self, ValidationError};
use tracing::{debug, info, warn};

use crate::accounts::{is_tagged_summary, SummaryStore, TaggedSummary};
use crate::connection::LedgerConnection;
use crate::error::{classify, classify_query, Submission, SummaryClientError};
use crate::instructions::{self, StoreTaggedSummaryArgs};
use crate::pda;

pub type SharedSigner = Arc<dyn Signer + Send + Sync>;

/// Everything the client needs from its environment, injected explicitly.
#[derive(Clone)]
pub struct ProviderBundle {
    pub connection: Arc<dyn LedgerConnection>,
    /// `None` means no wallet is connected; read-only calls still work.
    pub signer: Option<SharedSigner>,
    pub program_id: Pubkey,
}

impl ProviderBundle {
    pub fn new(connection: Arc<dyn LedgerConnection>, program_id: Pubkey) -> Self {
        Self {
            connection,
            signer: None,
            program_id,
        }
    }

    pub fn with_signer(mut self, signer: SharedSigner) -> Self {
        self.signer = Some(signer);
        self
    }
}

/// Parse a base58 program id.
pub fn parse_program_id(s: &str) -> Result<Pubkey, SummaryClientError> {
    Pubkey::from_str(s.trim()).map_err(|e| SummaryClientError::InvalidProgramId(format!("{s}: {e}")))
}

/// Check the parts of a [`NetworkConfig`] that need Solana types.
pub fn validate_network(cfg: &NetworkConfig) -> Result<Pubkey, SummaryClientError> {
    parse_program_id(&cfg.program_id)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status", content = "signature")]
pub enum InitOutcome {
    AlreadyInitialized,
    Initialized(#[serde(serialize_with = "display")] Signature),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReceipt {
    #[serde(serialize_with = "display")]
    pub signature: Signature,
    #[serde(serialize_with = "display")]
    pub address: Pubkey,
    pub transaction_hash: String,
}

fn is_unallocated(acc: &Account) -> bool {
    acc.owner == system_program::id() && acc.data.is_empty()
}

fn display<T: std::fmt::Display, S: serde::Serializer>(v: &T, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(v)
}

pub struct SummaryChainClient {
    bundle: ProviderBundle,
    limits: LimitsConfig,
    store_address: Pubkey,
}

impl SummaryChainClient {
    pub fn new(bundle: ProviderBundle) -> Self {
        Self::with_limits(bundle, LimitsConfig::default())
    }

    pub fn with_limits(bundle: ProviderBundle, limits: LimitsConfig) -> Self {
        let (store_address, _bump) = pda::derive_store_address(&bundle.program_id);
        Self {
            bundle,
            limits,
            store_address,
        }
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.bundle.program_id
    }

    pub fn store_address(&self) -> Pubkey {
        self.store_address
    }

    pub fn limits(&self) -> &LimitsConfig {
        &self.limits
    }

    /// The connected wallet, if any.
    pub fn wallet(&self) -> Option<Pubkey> {
        self.bundle.signer.as_ref().map(|s| s.pubkey())
    }

    pub fn summary_address(&self, transaction_hash: &str, student_wallet: &Pubkey) -> Pubkey {
        pda::derive_summary_address(&self.bundle.program_id, transaction_hash, student_wallet).0
    }

    fn signer(&self) -> Result<&SharedSigner, SummaryClientError> {
        self.bundle.signer.as_ref().ok_or(SummaryClientError::NotConnected)
    }

    /// Fetch an account owned by the program. Missing is `Ok(None)`.
    ///
    /// Anyone can send lamports to a PDA, so a system-owned account with no
    /// data is treated as missing too.
    async fn fetch_owned(&self, address: &Pubkey) -> Result<Option<Account>, SummaryClientError> {
        debug!(address = %address, "fetching account");
        let account = self
            .bundle
            .connection
            .get_account(address)
            .await
            .map_err(classify_query)?;
        match account {
            Some(acc) if is_unallocated(&acc) => {
                debug!(address = %address, lamports = acc.lamports, "funded but unallocated");
                Ok(None)
            }
            Some(acc) if acc.owner != self.bundle.program_id => {
                Err(SummaryClientError::InvalidAccountData(format!(
                    "{address} is owned by {}, not the summaries program",
                    acc.owner
                )))
            }
            other => Ok(other),
        }
    }

    pub async fn get_store(&self) -> Result<Option<SummaryStore>, SummaryClientError> {
        match self.fetch_owned(&self.store_address).await? {
            Some(acc) => Ok(Some(SummaryStore::try_from_account_data(&acc.data)?)),
            None => Ok(None),
        }
    }

    /// Fetch the record for `(transaction_hash, student_wallet)`.
    pub async fn get_record(
        &self,
        transaction_hash: &str,
        student_wallet: &Pubkey,
    ) -> Result<Option<TaggedSummary>, SummaryClientError> {
        validation::validate_transaction_hash(transaction_hash, &self.limits)?;
        let address = self.summary_address(transaction_hash, student_wallet);
        match self.fetch_owned(&address).await? {
            Some(acc) => Ok(Some(TaggedSummary::try_from_account_data(&acc.data)?)),
            None => Ok(None),
        }
    }

    /// Every decodable record owned by the program, newest first.
    ///
    /// This scans all program accounts, so the cost grows with the total
    /// number of records across all wallets.
    pub async fn list_all_records(&self) -> Result<Vec<TaggedSummary>, SummaryClientError> {
        let accounts = self
            .bundle
            .connection
            .get_program_accounts(&self.bundle.program_id)
            .await
            .map_err(classify_query)?;
        debug!(count = accounts.len(), "scanned program accounts");

        let mut records = Vec::new();
        for (address, acc) in accounts {
            if !is_tagged_summary(&acc.data) {
                continue;
            }
            match TaggedSummary::try_from_account_data(&acc.data) {
                Ok(rec) => records.push(rec),
                Err(e) => warn!(address = %address, error = %e, "skipping undecodable record"),
            }
        }
        sort_desc_by_key(&mut records, |r| (r.timestamp, r.id));
        Ok(records)
    }

    pub async fn list_records_for_student(
        &self,
        student_wallet: &Pubkey,
    ) -> Result<Vec<TaggedSummary>, SummaryClientError> {
        let mut records = self.list_all_records().await?;
        records.retain(|r| r.student_wallet == *student_wallet);
        Ok(records)
    }

    /// Create the store if it does not exist yet. Losing an init race to
    /// another caller counts as already initialized.
    pub async fn ensure_store_initialized(&self) -> Result<InitOutcome, SummaryClientError> {
        let signer = self.signer()?;
        if self.get_store().await?.is_some() {
            debug!(store = %self.store_address, "store already initialized");
            return Ok(InitOutcome::AlreadyInitialized);
        }

        let ix = instructions::initialize(&self.bundle.program_id, &signer.pubkey())?;
        match self.send(signer, ix, Submission::Initialize).await {
            Ok(signature) => {
                info!(store = %self.store_address, %signature, "initialized summary store");
                Ok(InitOutcome::Initialized(signature))
            }
            Err(SummaryClientError::StoreAlreadyInitialized) => {
                debug!(store = %self.store_address, "store initialized concurrently");
                Ok(InitOutcome::AlreadyInitialized)
            }
            Err(e) => Err(e),
        }
    }

    /// Validate and store one tagged summary for the connected wallet.
    pub async fn submit(
        &self,
        result: &AiProcessingResult,
        transaction_hash: &str,
    ) -> Result<SubmitReceipt, SummaryClientError> {
        let signer = self.signer()?;
        validation::validate_result(result, &self.limits)?;
        validation::validate_transaction_hash(transaction_hash, &self.limits)?;
        let confidence_score = result.confidence_u8().ok_or(ValidationError::InvalidConfidence {
            score: result.confidence_score,
            max: self.limits.max_confidence,
        })?;

        let student = signer.pubkey();
        let address = self.summary_address(transaction_hash, &student);
        debug!(%address, %student, "derived summary address");

        if self.fetch_owned(&self.store_address).await?.is_none() {
            return Err(SummaryClientError::StoreNotInitialized);
        }

        let args = StoreTaggedSummaryArgs {
            transaction_hash: transaction_hash.to_string(),
            summary: result.summary.clone(),
            tags: result.tags.clone(),
            category: result.category.clone(),
            confidence_score,
        };
        let ix = instructions::store_tagged_summary(&self.bundle.program_id, &student, args)?;
        let signature = self
            .send(signer, ix, Submission::StoreSummary { address })
            .await?;
        info!(%address, %signature, "stored tagged summary");

        Ok(SubmitReceipt {
            signature,
            address,
            transaction_hash: transaction_hash.to_string(),
        })
    }

    /// Initialize the store on first use, then submit.
    pub async fn submit_with_store(
        &self,
        result: &AiProcessingResult,
        transaction_hash: &str,
    ) -> Result<SubmitReceipt, SummaryClientError> {
        self.signer()?;
        validation::validate_result(result, &self.limits)?;
        validation::validate_transaction_hash(transaction_hash, &self.limits)?;
        self.ensure_store_initialized().await?;
        self.submit(result, transaction_hash).await
    }

    async fn send(
        &self,
        signer: &SharedSigner,
        ix: Instruction,
        submission: Submission,
    ) -> Result<Signature, SummaryClientError> {
        let conn = &self.bundle.connection;
        let blockhash = conn
            .get_latest_blockhash()
            .await
            .map_err(|e| classify(e, submission))?;

        let payer = signer.pubkey();
        let mut tx = Transaction::new_with_payer(&[ix], Some(&payer));
        tx.try_sign(&[signer], blockhash)
            .map_err(|e| SummaryClientError::Signing(e.to_string()))?;

        conn.send_transaction(&tx)
            .await
            .map_err(|e| classify(e, submission))
    }
}
