//! Account records owned by the tagged-summaries program.
//!
//! On-chain layout is Anchor's: an 8-byte discriminator followed by the
//! Borsh-encoded fields in declaration order. Accounts are zero-padded to
//! their allocated space, so decoding ignores trailing bytes.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use crate::constants::{ACCOUNT_SUMMARY_STORE, ACCOUNT_TAGGED_SUMMARY, DISCRIMINATOR_LEN};
use crate::error::SummaryClientError;

/// Global singleton: who initialized the store and how many records exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStore {
    #[serde(with = "pubkey_string")]
    pub authority: Pubkey,
    pub total_summaries: u64,
}

/// One AI-tagged transaction record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggedSummary {
    pub id: u64,
    pub transaction_hash: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub category: String,
    pub confidence_score: u8,
    pub timestamp: i64,
    #[serde(with = "pubkey_string")]
    pub student_wallet: Pubkey,
}

// Wire mirrors. Pubkeys travel as raw 32-byte arrays so the codec does not
// depend on which borsh version solana-program was built against.

#[derive(BorshSerialize, BorshDeserialize)]
struct SummaryStoreWire {
    authority: [u8; 32],
    total_summaries: u64,
}

#[derive(BorshSerialize, BorshDeserialize)]
struct TaggedSummaryWire {
    id: u64,
    transaction_hash: String,
    summary: String,
    tags: Vec<String>,
    category: String,
    confidence_score: u8,
    timestamp: i64,
    student_wallet: [u8; 32],
}

/// Strip and check the discriminator, returning the field bytes.
fn body<'a>(data: &'a [u8], expected: &[u8; 8], kind: &str) -> Result<&'a [u8], SummaryClientError> {
    if data.len() < DISCRIMINATOR_LEN {
        return Err(SummaryClientError::InvalidAccountData(format!(
            "{kind}: {} bytes is shorter than the discriminator",
            data.len()
        )));
    }
    let (disc, rest) = data.split_at(DISCRIMINATOR_LEN);
    if disc != expected {
        return Err(SummaryClientError::InvalidAccountData(format!(
            "{kind}: discriminator mismatch"
        )));
    }
    Ok(rest)
}

fn encode<T: BorshSerialize>(disc: &[u8; 8], wire: &T) -> Result<Vec<u8>, SummaryClientError> {
    let mut out = disc.to_vec();
    wire.serialize(&mut out)
        .map_err(|e| SummaryClientError::InvalidAccountData(e.to_string()))?;
    Ok(out)
}

/// True if the account data starts with the TaggedSummary discriminator.
pub fn is_tagged_summary(data: &[u8]) -> bool {
    data.len() >= DISCRIMINATOR_LEN && data[..DISCRIMINATOR_LEN] == ACCOUNT_TAGGED_SUMMARY
}

impl SummaryStore {
    pub fn try_from_account_data(data: &[u8]) -> Result<Self, SummaryClientError> {
        let mut rest = body(data, &ACCOUNT_SUMMARY_STORE, "SummaryStore")?;
        let wire = SummaryStoreWire::deserialize(&mut rest)
            .map_err(|e| SummaryClientError::InvalidAccountData(format!("SummaryStore: {e}")))?;
        Ok(Self {
            authority: Pubkey::new_from_array(wire.authority),
            total_summaries: wire.total_summaries,
        })
    }

    pub fn to_account_data(&self) -> Result<Vec<u8>, SummaryClientError> {
        encode(
            &ACCOUNT_SUMMARY_STORE,
            &SummaryStoreWire {
                authority: self.authority.to_bytes(),
                total_summaries: self.total_summaries,
            },
        )
    }
}

impl TaggedSummary {
    pub fn try_from_account_data(data: &[u8]) -> Result<Self, SummaryClientError> {
        let mut rest = body(data, &ACCOUNT_TAGGED_SUMMARY, "TaggedSummary")?;
        let wire = TaggedSummaryWire::deserialize(&mut rest)
            .map_err(|e| SummaryClientError::InvalidAccountData(format!("TaggedSummary: {e}")))?;
        Ok(Self {
            id: wire.id,
            transaction_hash: wire.transaction_hash,
            summary: wire.summary,
            tags: wire.tags,
            category: wire.category,
            confidence_score: wire.confidence_score,
            timestamp: wire.timestamp,
            student_wallet: Pubkey::new_from_array(wire.student_wallet),
        })
    }

    pub fn to_account_data(&self) -> Result<Vec<u8>, SummaryClientError> {
        encode(
            &ACCOUNT_TAGGED_SUMMARY,
            &TaggedSummaryWire {
                id: self.id,
                transaction_hash: self.transaction_hash.clone(),
                summary: self.summary.clone(),
                tags: self.tags.clone(),
                category: self.category.clone(),
                confidence_score: self.confidence_score,
                timestamp: self.timestamp,
                student_wallet: self.student_wallet.to_bytes(),
            },
        )
    }
}

/// Serialize pubkeys as base58 strings in JSON output.
mod pubkey_string {
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer, Serializer};
    use solana_program::pubkey::Pubkey;

    pub fn serialize<S: Serializer>(key: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(key)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Pubkey, D::Error> {
        let s = String::deserialize(deserializer)?;
        Pubkey::from_str(&s).map_err(serde::de::Error::custom)
    }
}
