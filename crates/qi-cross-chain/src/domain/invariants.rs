//! # Domain Invariants
//!
//! Checks a fetched record must pass before its sender is taken as the
//! credit recipient. Failing any of these is a terminal rejection, not
//! a retry.

use super::entities::{ClaimedTransfer, ForeignTxRecord};
use super::errors::RejectReason;
use shared_types::Address;

/// Invariant: the record names a sender.
///
/// An all-zero sender is the chains' convention for "no sender"
/// (coinbase-style or malformed records) and cannot receive credit.
pub fn invariant_has_sender(sender: &Address) -> Result<(), RejectReason> {
    if sender.iter().all(|byte| *byte == 0) {
        return Err(RejectReason::MissingSender);
    }
    Ok(())
}

/// Invariant: a positive transfer was recorded.
pub fn invariant_positive_amount(amount: u64) -> Result<(), RejectReason> {
    if amount == 0 {
        return Err(RejectReason::ZeroAmount);
    }
    Ok(())
}

/// Invariant: the record matches what the reference claims.
pub fn invariant_matches_claim(
    record: &ForeignTxRecord,
    claim: &ClaimedTransfer,
) -> Result<(), RejectReason> {
    if record.asset != claim.asset {
        return Err(RejectReason::AssetMismatch {
            claimed: claim.asset.clone(),
            recorded: record.asset.clone(),
        });
    }
    if record.amount != claim.amount {
        return Err(RejectReason::AmountMismatch {
            claimed: claim.amount,
            recorded: record.amount,
        });
    }
    Ok(())
}

/// Run every record invariant in order.
pub fn validate_record(
    record: &ForeignTxRecord,
    claim: &ClaimedTransfer,
) -> Result<(), RejectReason> {
    invariant_has_sender(&record.sender)?;
    invariant_positive_amount(record.amount)?;
    invariant_matches_claim(record, claim)?;
    Ok(())
}
