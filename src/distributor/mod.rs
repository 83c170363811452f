//! Payout distribution module
//!
//! A single distributor settles cumulative reward totals in native CSPR or
//! CEP-18 tokens. Each settlement supplies the total owed so far for an
//! (asset, recipient) pair and the contract pays only the delta since the
//! last settlement. Recipients can also self-serve a payout by presenting
//! a message signed by the distributor.

pub mod payout_distributor;
pub mod errors;
pub mod events;


pub use payout_distributor::{native_token_address, zero_address, PayoutDistributor};
pub use errors::PayoutError;
pub use events::*;
