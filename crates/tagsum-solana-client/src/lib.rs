//! tagsum-solana-client
//!
//! A small, focused Rust client for the on-chain tagged-summaries program.
//!
//! It includes:
//! - constant seeds, discriminators and the deployed program id
//! - PDA derivation helpers
//! - Anchor account and instruction codecs
//! - a [`LedgerConnection`] seam with an RPC-backed implementation
//! - [`SummaryChainClient`], which validates, submits and reads records
//!
//! The connection and signer are injected through [`ProviderBundle`]; nothing
//! here reads the environment.

pub mod accounts;
pub mod connection;
pub mod constants;
pub mod error;
pub mod instructions;
pub mod pda;
pub mod summary_client;

pub use accounts::{SummaryStore, TaggedSummary};
pub use connection::{LedgerConnection, RpcLedger};
pub use constants::*;
pub use error::{ConnectionError, ErrorClass, ProgramErrorCode, SummaryClientError};
pub use pda::*;
pub use summary_client::{
    parse_program_id, validate_network, InitOutcome, ProviderBundle, SharedSigner, SubmitReceipt,
    SummaryChainClient,
};
