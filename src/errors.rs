//! Error definitions for the reward token contract
use odra::prelude::*;

/// Custom errors for CEP-18 token operations
#[odra::odra_error]
pub enum TokenError {
    /// Insufficient allowance for transfer
    InsufficientAllowance = 100,

    /// Insufficient balance for operation
    InsufficientBalance = 101,

    /// Caller is not the minter
    Unauthorized = 102,
}
