//! Error taxonomy for the tagged-summaries client.
//!
//! The program reports failures as human-readable text (transaction error
//! strings plus program logs), not structured codes. Rejections are therefore
//! classified by substring into the typed variants below; anything that does
//! not match is surfaced unchanged in [`SummaryClientError::Rejected`].

use std::time::Duration;

use solana_program::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use tagsum_core::validation::ValidationError;
use thiserror::Error;

/// Failure reported by a [`crate::connection::LedgerConnection`].
#[derive(Debug, Clone, Error)]
pub enum ConnectionError {
    /// The RPC round trip itself failed.
    #[error("rpc transport error: {0}")]
    Transport(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// A transaction was sent but confirmation did not arrive in time. It may
    /// still land.
    #[error("transaction {signature} not confirmed after {after:?}")]
    Unconfirmed { signature: Signature, after: Duration },

    /// The request reached the cluster and the transaction was refused.
    #[error("transaction rejected: {message}")]
    Rejected { message: String, logs: Vec<String> },
}

impl ConnectionError {
    pub fn rejected(message: impl Into<String>, logs: Vec<String>) -> Self {
        Self::Rejected {
            message: message.into(),
            logs,
        }
    }
}

/// Custom errors declared by the program, with their Anchor error numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramErrorCode {
    TooManyTags,
    SummaryTooLong,
    InvalidConfidence,
    InvalidHash,
}

impl ProgramErrorCode {
    pub const ALL: [ProgramErrorCode; 4] = [
        Self::TooManyTags,
        Self::SummaryTooLong,
        Self::InvalidConfidence,
        Self::InvalidHash,
    ];

    pub fn code(&self) -> u32 {
        match self {
            Self::TooManyTags => 6000,
            Self::SummaryTooLong => 6001,
            Self::InvalidConfidence => 6002,
            Self::InvalidHash => 6003,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::TooManyTags => "TooManyTags",
            Self::SummaryTooLong => "SummaryTooLong",
            Self::InvalidConfidence => "InvalidConfidence",
            Self::InvalidHash => "InvalidHash",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::TooManyTags => "Too many tags (maximum 15 allowed)",
            Self::SummaryTooLong => "Summary too long (maximum 800 characters)",
            Self::InvalidConfidence => "Invalid confidence score (0-100 only)",
            Self::InvalidHash => "Transaction hash must be 64 characters",
        }
    }

    /// Find a program error in rejection text.
    ///
    /// Matches the error name (any case), `custom program error: 0x1770`
    /// style hex codes, and Anchor's `Error Number: 6000` log line.
    pub fn from_text(text: &str) -> Option<Self> {
        let lower = text.to_ascii_lowercase();
        Self::ALL.into_iter().find(|c| {
            lower.contains(&c.name().to_ascii_lowercase())
                || lower.contains(&format!("custom program error: {:#x}", c.code()))
                || lower.contains(&format!("error number: {}", c.code()))
        })
    }
}

/// Broad class of a failure, for callers that only care about policy
/// (retry, report, fix input).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Precondition,
    Validation,
    ProgramRejection,
    Transport,
}

#[derive(Debug, Error)]
pub enum SummaryClientError {
    #[error("wallet not connected: no signer available")]
    NotConnected,

    #[error("summary store is not initialized")]
    StoreNotInitialized,

    #[error("invalid program id: {0}")]
    InvalidProgramId(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("a tagged summary already exists at {address} for this transaction and wallet")]
    DuplicateRecord { address: Pubkey },

    #[error("summary store already initialized")]
    StoreAlreadyInitialized,

    #[error("program error {} ({}): {}", .0.code(), .0.name(), .0.message())]
    Program(ProgramErrorCode),

    /// Rejection text that matched nothing known, kept verbatim.
    #[error("{0}")]
    Rejected(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Check `signature` before resubmitting; a resend of a landed summary
    /// fails as a duplicate.
    #[error("transaction {signature} not confirmed after {after:?}; check its status before resubmitting")]
    Unconfirmed { signature: Signature, after: Duration },

    #[error("invalid account data: {0}")]
    InvalidAccountData(String),
}

impl SummaryClientError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::NotConnected
            | Self::StoreNotInitialized
            | Self::InvalidProgramId(_)
            | Self::Signing(_) => ErrorClass::Precondition,
            Self::Validation(_) => ErrorClass::Validation,
            Self::DuplicateRecord { .. }
            | Self::StoreAlreadyInitialized
            | Self::Program(_)
            | Self::Rejected(_) => ErrorClass::ProgramRejection,
            Self::Transport(_)
            | Self::Timeout(_)
            | Self::Unconfirmed { .. }
            | Self::InvalidAccountData(_) => ErrorClass::Transport,
        }
    }
}

/// Which instruction a rejection belongs to. "Account already in use" means
/// different things for the two instructions.
#[derive(Debug, Clone, Copy)]
pub enum Submission {
    Initialize,
    StoreSummary { address: Pubkey },
}

const ALREADY_IN_USE: &str = "already in use";
const ACCOUNT_NOT_INITIALIZED: [&str; 3] = [
    "accountnotinitialized",
    "custom program error: 0xbc4",
    "error number: 3012",
];

/// Map a connection failure to the client taxonomy.
pub fn classify(err: ConnectionError, submission: Submission) -> SummaryClientError {
    let (message, logs) = match err {
        ConnectionError::Transport(msg) => return SummaryClientError::Transport(msg),
        ConnectionError::Timeout(d) => return SummaryClientError::Timeout(d),
        ConnectionError::Unconfirmed { signature, after } => {
            return SummaryClientError::Unconfirmed { signature, after }
        }
        ConnectionError::Rejected { message, logs } => (message, logs),
    };

    let mut text = message.clone();
    for line in &logs {
        text.push('\n');
        text.push_str(line);
    }
    let lower = text.to_ascii_lowercase();

    if lower.contains(ALREADY_IN_USE) {
        return match submission {
            Submission::Initialize => SummaryClientError::StoreAlreadyInitialized,
            Submission::StoreSummary { address } => SummaryClientError::DuplicateRecord { address },
        };
    }
    if let Some(code) = ProgramErrorCode::from_text(&text) {
        return SummaryClientError::Program(code);
    }
    if matches!(submission, Submission::StoreSummary { .. })
        && ACCOUNT_NOT_INITIALIZED.iter().any(|p| lower.contains(p))
    {
        return SummaryClientError::StoreNotInitialized;
    }
    SummaryClientError::Rejected(message)
}

/// Map a failed read. Reads submit nothing, so there is nothing to classify
/// beyond transport versus refusal.
pub fn classify_query(err: ConnectionError) -> SummaryClientError {
    match err {
        ConnectionError::Transport(msg) => SummaryClientError::Transport(msg),
        ConnectionError::Timeout(d) => SummaryClientError::Timeout(d),
        ConnectionError::Unconfirmed { signature, after } => {
            SummaryClientError::Unconfirmed { signature, after }
        }
        ConnectionError::Rejected { message, .. } => SummaryClientError::Rejected(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn store() -> Submission {
        Submission::StoreSummary {
            address: Pubkey::new_unique(),
        }
    }

    #[test]
    fn already_in_use_depends_on_instruction() {
        let err = || {
            ConnectionError::rejected(
                "Error processing Instruction 0: custom program error: 0x0",
                vec!["Allocate: account Address { address: X, base: None } already in use".into()],
            )
        };
        assert_matches!(
            classify(err(), Submission::Initialize),
            SummaryClientError::StoreAlreadyInitialized
        );
        assert_matches!(classify(err(), store()), SummaryClientError::DuplicateRecord { .. });
    }

    #[test]
    fn program_errors_by_name_hex_and_number() {
        let by_name = ConnectionError::rejected(
            "simulation failed",
            vec!["Program log: AnchorError occurred. Error Code: TooManyTags.".into()],
        );
        assert_matches!(
            classify(by_name, store()),
            SummaryClientError::Program(ProgramErrorCode::TooManyTags)
        );

        let by_hex = ConnectionError::rejected(
            "Error processing Instruction 0: custom program error: 0x1771",
            vec![],
        );
        assert_matches!(
            classify(by_hex, store()),
            SummaryClientError::Program(ProgramErrorCode::SummaryTooLong)
        );

        let by_number = ConnectionError::rejected("failed", vec!["Error Number: 6003.".into()]);
        assert_matches!(
            classify(by_number, store()),
            SummaryClientError::Program(ProgramErrorCode::InvalidHash)
        );

        let by_idl_name = ConnectionError::rejected("invalidConfidence", vec![]);
        assert_matches!(
            classify(by_idl_name, store()),
            SummaryClientError::Program(ProgramErrorCode::InvalidConfidence)
        );
    }

    #[test]
    fn missing_store_is_a_precondition() {
        let err = ConnectionError::rejected(
            "failed",
            vec!["Error Code: AccountNotInitialized. Error Number: 3012.".into()],
        );
        let e = classify(err, store());
        assert_matches!(e, SummaryClientError::StoreNotInitialized);
        assert_eq!(e.class(), ErrorClass::Precondition);
    }

    #[test]
    fn unmatched_rejection_is_kept_verbatim() {
        let err = ConnectionError::rejected("Blockhash not found", vec!["noise".into()]);
        match classify(err, store()) {
            SummaryClientError::Rejected(msg) => assert_eq!(msg, "Blockhash not found"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn transport_passes_through() {
        let e = classify(ConnectionError::Transport("connection refused".into()), store());
        assert_matches!(e, SummaryClientError::Transport(ref m) if m == "connection refused");
        assert_eq!(e.class(), ErrorClass::Transport);

        let e = classify(ConnectionError::Timeout(Duration::from_secs(1)), store());
        assert_eq!(e.class(), ErrorClass::Transport);
    }

    #[test]
    fn unconfirmed_send_keeps_signature() {
        let signature = Signature::from([7u8; 64]);
        let err = ConnectionError::Unconfirmed {
            signature,
            after: Duration::from_secs(30),
        };
        let e = classify(err, store());
        assert_matches!(e, SummaryClientError::Unconfirmed { signature: s, .. } if s == signature);
        assert_eq!(e.class(), ErrorClass::Transport);
        assert!(e.to_string().contains(&signature.to_string()));
    }

    #[test]
    fn hex_codes_are_exact() {
        assert_eq!(
            ProgramErrorCode::from_text("custom program error: 0x1773"),
            Some(ProgramErrorCode::InvalidHash)
        );
        assert_eq!(ProgramErrorCode::from_text("custom program error: 0x0"), None);
    }
}
