//! Event definitions for the payout distributor
use odra::prelude::*;
use odra::casper_types::{U256, U512};

/// Event emitted when a native reward delta is paid out
#[odra::event]
pub struct RewardSent {
    /// Caller that triggered the settlement
    pub caller: Address,
    /// Reward recipient
    pub recipient: Address,
    /// New cumulative total recorded for the recipient
    pub total_reward: U256,
    /// Amount delivered in this call
    pub amount: U256,
}

/// Event emitted when a token reward delta is paid out
#[odra::event]
pub struct TokenRewardSent {
    /// Caller that triggered the settlement
    pub caller: Address,
    /// Token that was paid out
    pub token: Address,
    /// Reward recipient
    pub recipient: Address,
    /// New cumulative total recorded for the (token, recipient) pair
    pub total_reward: U256,
    /// Amount delivered in this call
    pub amount: U256,
}

/// Event emitted when the distributor recovers native funds
#[odra::event]
pub struct NativeRecovered {
    /// Recovery target
    pub recipient: Address,
    /// Amount recovered
    pub amount: U256,
}

/// Event emitted when the distributor recovers token funds
#[odra::event]
pub struct TokenRecovered {
    /// Token recovered
    pub token: Address,
    /// Recovery target
    pub recipient: Address,
    /// Amount recovered
    pub amount: U256,
}

/// Event emitted when the contract receives CSPR for disbursement
#[odra::event]
pub struct Funded {
    /// Account that supplied the funds
    pub funder: Address,
    /// Attached amount in motes
    pub amount: U512,
}

/// Event emitted when the distributor identity is reassigned
#[odra::event]
pub struct DistributorChanged {
    /// Previous distributor
    pub previous: Address,
    /// New distributor
    pub current: Address,
}
