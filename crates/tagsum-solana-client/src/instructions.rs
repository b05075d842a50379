//! Instruction builders for the tagged-summaries program.
//!
//! Anchor encoding: an 8-byte discriminator (`sha256("global:<name>")[..8]`)
//! followed by the Borsh-encoded arguments.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;
use solana_program::system_program;

use crate::constants::{DISCRIMINATOR_LEN, IX_INITIALIZE, IX_STORE_TAGGED_SUMMARY};
use crate::error::SummaryClientError;
use crate::pda;

/// Arguments of `store_tagged_summary`, in wire order.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct StoreTaggedSummaryArgs {
    pub transaction_hash: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub category: String,
    pub confidence_score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryInstruction {
    Initialize,
    StoreTaggedSummary(StoreTaggedSummaryArgs),
}

impl SummaryInstruction {
    pub fn data(&self) -> Result<Vec<u8>, SummaryClientError> {
        match self {
            Self::Initialize => Ok(IX_INITIALIZE.to_vec()),
            Self::StoreTaggedSummary(args) => {
                let mut out = IX_STORE_TAGGED_SUMMARY.to_vec();
                args.serialize(&mut out)
                    .map_err(|e| SummaryClientError::InvalidAccountData(e.to_string()))?;
                Ok(out)
            }
        }
    }

    /// Decode instruction data. Used by tooling that inspects transactions.
    pub fn unpack(data: &[u8]) -> Result<Self, SummaryClientError> {
        if data.len() < DISCRIMINATOR_LEN {
            return Err(SummaryClientError::InvalidAccountData(
                "instruction data shorter than discriminator".into(),
            ));
        }
        let (disc, mut rest) = data.split_at(DISCRIMINATOR_LEN);
        if disc == IX_INITIALIZE {
            Ok(Self::Initialize)
        } else if disc == IX_STORE_TAGGED_SUMMARY {
            let args = StoreTaggedSummaryArgs::deserialize(&mut rest)
                .map_err(|e| SummaryClientError::InvalidAccountData(e.to_string()))?;
            Ok(Self::StoreTaggedSummary(args))
        } else {
            Err(SummaryClientError::InvalidAccountData(format!(
                "unknown instruction discriminator {}",
                hex::encode(disc)
            )))
        }
    }
}

/// Build `initialize`: creates the store PDA with `authority` as payer and owner.
pub fn initialize(program_id: &Pubkey, authority: &Pubkey) -> Result<Instruction, SummaryClientError> {
    let (store, _bump) = pda::derive_store_address(program_id);
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(store, false),
            AccountMeta::new(*authority, true),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: SummaryInstruction::Initialize.data()?,
    })
}

/// Build `store_tagged_summary` for `student`. The record PDA is derived from
/// the args' transaction hash.
pub fn store_tagged_summary(
    program_id: &Pubkey,
    student: &Pubkey,
    args: StoreTaggedSummaryArgs,
) -> Result<Instruction, SummaryClientError> {
    let pdas = pda::pdas_for_summary(program_id, &args.transaction_hash, student);
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(pdas.record.0, false),
            AccountMeta::new(pdas.store.0, false),
            AccountMeta::new(*student, true),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: SummaryInstruction::StoreTaggedSummary(args).data()?,
    })
}
