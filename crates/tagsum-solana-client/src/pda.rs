//! PDA derivation helpers for the tagged-summaries program.
//!
//! These helpers implement deterministic address derivation and match the
//! on-chain program's seeds:
//! - store: `["summary_store"]`
//! - record: `["tagged_summary", keccak256(transaction_hash)[..8], student_wallet]`
//!
//! The transaction hash is condensed because seeds are capped at 32 bytes each;
//! a 64-character hex string would not fit. The digest must be Keccak-256 (not
//! SHA3-256) over the hash's UTF-8 bytes, exactly as the program computes it.
//! The string is used as given: callers that accept user input should
//! lowercase it first, since case changes the address.

use solana_program::keccak;
use solana_program::pubkey::Pubkey;

use crate::constants::{HASH_SEED_LEN, SEED_SUMMARY_STORE, SEED_TAGGED_SUMMARY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryPdas {
    pub store: (Pubkey, u8),
    pub record: (Pubkey, u8),
}

/// First 8 bytes of `keccak256(transaction_hash)`.
pub fn summary_hash_seed(transaction_hash: &str) -> [u8; HASH_SEED_LEN] {
    let digest = keccak::hash(transaction_hash.as_bytes()).to_bytes();
    let mut seed = [0u8; HASH_SEED_LEN];
    seed.copy_from_slice(&digest[..HASH_SEED_LEN]);
    seed
}

/// Derive the summary store PDA.
pub fn derive_store_address(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[SEED_SUMMARY_STORE], program_id)
}

/// Derive a tagged summary PDA for a (transaction hash, student wallet) pair.
pub fn derive_summary_address(
    program_id: &Pubkey,
    transaction_hash: &str,
    student_wallet: &Pubkey,
) -> (Pubkey, u8) {
    let seed = summary_hash_seed(transaction_hash);
    Pubkey::find_program_address(
        &[SEED_TAGGED_SUMMARY, &seed, student_wallet.as_ref()],
        program_id,
    )
}

/// Collect the PDAs a `store_tagged_summary` instruction touches.
pub fn pdas_for_summary(
    program_id: &Pubkey,
    transaction_hash: &str,
    student_wallet: &Pubkey,
) -> SummaryPdas {
    SummaryPdas {
        store: derive_store_address(program_id),
        record: derive_summary_address(program_id, transaction_hash, student_wallet),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_PROGRAM_ID;
    use proptest::prelude::*;

    fn hex_hash() -> impl Strategy<Value = String> {
        "[0-9a-f]{64}"
    }

    fn wallet() -> impl Strategy<Value = Pubkey> {
        any::<[u8; 32]>().prop_map(Pubkey::new_from_array)
    }

    #[test]
    fn seed_is_keccak_not_sha3() {
        // keccak256("") = c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470
        assert_eq!(hex::encode(summary_hash_seed("")), "c5d2460186f7233c");
    }

    #[test]
    fn seed_differs_from_raw_string_prefix() {
        let h = "ab".repeat(32);
        assert_ne!(&summary_hash_seed(&h)[..], &h.as_bytes()[..HASH_SEED_LEN]);
    }

    #[test]
    fn store_is_off_curve_and_stable() {
        let (a, bump_a) = derive_store_address(&DEFAULT_PROGRAM_ID);
        let (b, bump_b) = derive_store_address(&DEFAULT_PROGRAM_ID);
        assert_eq!((a, bump_a), (b, bump_b));
        assert!(!a.is_on_curve());
    }

    #[test]
    fn store_depends_on_program() {
        let other = Pubkey::new_unique();
        assert_ne!(derive_store_address(&DEFAULT_PROGRAM_ID).0, derive_store_address(&other).0);
    }

    #[test]
    fn bundle_matches_individual_derivations() {
        let h = "0f".repeat(32);
        let w = Pubkey::new_unique();
        let p = pdas_for_summary(&DEFAULT_PROGRAM_ID, &h, &w);
        assert_eq!(p.store, derive_store_address(&DEFAULT_PROGRAM_ID));
        assert_eq!(p.record, derive_summary_address(&DEFAULT_PROGRAM_ID, &h, &w));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn distinct_wallets_give_distinct_addresses(h in hex_hash(), w1 in wallet(), w2 in wallet()) {
            prop_assume!(w1 != w2);
            let a = derive_summary_address(&DEFAULT_PROGRAM_ID, &h, &w1).0;
            let b = derive_summary_address(&DEFAULT_PROGRAM_ID, &h, &w2).0;
            prop_assert_ne!(a, b);
        }

        #[test]
        fn distinct_hashes_give_distinct_addresses(h1 in hex_hash(), h2 in hex_hash(), w in wallet()) {
            prop_assume!(h1 != h2);
            let a = derive_summary_address(&DEFAULT_PROGRAM_ID, &h1, &w).0;
            let b = derive_summary_address(&DEFAULT_PROGRAM_ID, &h2, &w).0;
            prop_assert_ne!(a, b);
        }

        #[test]
        fn derivation_is_pure(h in hex_hash(), w in wallet()) {
            prop_assert_eq!(
                derive_summary_address(&DEFAULT_PROGRAM_ID, &h, &w),
                derive_summary_address(&DEFAULT_PROGRAM_ID, &h, &w)
            );
        }
    }
}
