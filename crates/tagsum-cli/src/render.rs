//! Human-readable rendering of shared domain types.

use std::io;

use tagsum_core::model::AiProcessingResult;
use tagsum_solana_client::TaggedSummary;
use termcolor::WriteColor;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::output::field;

/// Unix seconds as RFC 3339, or the raw number if out of range.
pub fn timestamp(secs: i64) -> String {
    OffsetDateTime::from_unix_timestamp(secs)
        .ok()
        .and_then(|t| t.format(&Rfc3339).ok())
        .unwrap_or_else(|| secs.to_string())
}

pub fn ai_result(w: &mut dyn WriteColor, r: &AiProcessingResult) -> io::Result<()> {
    field(w, "summary", &r.summary)?;
    field(w, "tags", r.tags.join(", "))?;
    field(w, "category", &r.category)?;
    field(w, "confidence", r.confidence_score)
}

pub fn record(w: &mut dyn WriteColor, r: &TaggedSummary) -> io::Result<()> {
    field(w, "id", r.id)?;
    field(w, "transaction", &r.transaction_hash)?;
    field(w, "summary", &r.summary)?;
    field(w, "tags", r.tags.join(", "))?;
    field(w, "category", &r.category)?;
    field(w, "confidence", r.confidence_score)?;
    field(w, "time", timestamp(r.timestamp))?;
    field(w, "wallet", r.student_wallet)
}
