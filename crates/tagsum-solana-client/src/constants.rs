//! Constants shared with the on-chain tagged-summaries program.
//!
//! Keep these stable because they affect PDA derivation and the Anchor wire
//! format. The discriminators are copied from the program IDL; tests recompute
//! them from their Anchor preimages.

use solana_program::pubkey;
use solana_program::pubkey::Pubkey;

/// PDA seed for the global summary store.
pub const SEED_SUMMARY_STORE: &[u8] = b"summary_store";

/// PDA seed for tagged summary records.
pub const SEED_TAGGED_SUMMARY: &[u8] = b"tagged_summary";

/// Number of Keccak-256 digest bytes used as the transaction hash seed.
pub const HASH_SEED_LEN: usize = 8;

/// Length of every Anchor discriminator.
pub const DISCRIMINATOR_LEN: usize = 8;

/// Deployed program id (devnet).
pub const DEFAULT_PROGRAM_ID: Pubkey = pubkey!("F8qn46JxkYB3koH2tZc38qceCK3PHQ5PafaJR6u5AyD7");

/// `sha256("global:initialize")[..8]`
pub const IX_INITIALIZE: [u8; 8] = [175, 175, 109, 31, 13, 152, 155, 237];

/// `sha256("global:store_tagged_summary")[..8]`
pub const IX_STORE_TAGGED_SUMMARY: [u8; 8] = [162, 209, 213, 124, 174, 65, 80, 198];

/// `sha256("account:SummaryStore")[..8]`
pub const ACCOUNT_SUMMARY_STORE: [u8; 8] = [17, 251, 92, 202, 242, 205, 34, 113];

/// `sha256("account:TaggedSummary")[..8]`
pub const ACCOUNT_TAGGED_SUMMARY: [u8; 8] = [254, 19, 124, 133, 84, 230, 133, 226];

/// Compute an Anchor discriminator: `sha256("<namespace>:<name>")[..8]`.
pub fn anchor_discriminator(namespace: &str, name: &str) -> [u8; 8] {
    let digest = tagsum_core::hashing::sha256(format!("{namespace}:{name}").as_bytes());
    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
    out
}
