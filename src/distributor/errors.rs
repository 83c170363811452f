//! Error types for the payout distributor

use odra::prelude::*;

#[odra::odra_error]
pub enum PayoutError {
    /// Recipient or distributor identity is the zero account
    InvalidAddress = 1,
    /// Token address is the zero account where a real token was expected
    InvalidToken = 2,
    /// Supplied cumulative total is below the recorded value
    InvalidTotalReward = 3,
    /// Batch arrays differ in length
    InvalidArrayLengths = 4,
    /// Signature does not verify, or the signer is not the distributor
    InvalidSignature = 5,
    /// Signature bytes are structurally invalid
    MalformedSignature = 6,
    /// Caller is not the distributor
    NotAuthorized = 7,
    /// Aggregate payout counter overflow
    Overflow = 8,
}
