//! Payout Distributor - cumulative-total reward settlement
//!
//! The distributor authorizes payouts of native CSPR or of CEP-18 tokens by
//! supplying, per recipient, the cumulative total owed so far. The contract
//! records the total and transfers only the difference since the previous
//! settlement, so the distributor never tracks running balances off-chain.
//! Recipients can also self-serve a payout by presenting a claim message
//! signed by the distributor.

use odra::prelude::*;
use odra::casper_types::account::AccountHash;
use odra::casper_types::bytesrepr::{Bytes, ToBytes};
use odra::casper_types::{PublicKey, U256, U512};
use odra::ContractRef;
use super::errors::PayoutError;
use super::events::*;
use crate::token::Cep18TokenContractRef;

/// Prefix applied to every claim message before signing, matching the
/// convention wallets use for off-chain message signing.
const SIGNED_MESSAGE_PREFIX: &[u8] = b"Casper Message:\n";

/// Reserved address meaning "native CSPR" in the token-reward interface.
pub fn native_token_address() -> Address {
    Address::Account(AccountHash::new([0xEE; 32]))
}

/// The null identity. Never a valid recipient, token, or distributor.
pub fn zero_address() -> Address {
    Address::Account(AccountHash::new([0u8; 32]))
}

/// Asset kind, resolved from the sentinel convention once at the call
/// boundary so the settlement path is written once.
enum Asset {
    Native,
    Token(Address),
}

/// Payout Distributor contract
#[odra::module]
pub struct PayoutDistributor {
    /// Sole principal authorized to settle and recover funds
    distributor: Var<Address>,
    /// Cumulative native reward sent per recipient
    native_rewards: Mapping<Address, U256>,
    /// Cumulative token reward sent per (token, recipient)
    token_rewards: Mapping<(Address, Address), U256>,
    /// Aggregate native amount paid out
    total_native_sent: Var<U256>,
    /// Aggregate amount paid out per token
    total_token_sent: Mapping<Address, U256>,
}

#[odra::module]
impl PayoutDistributor {
    /// Initialize the distributor identity
    pub fn init(&mut self, distributor: Address) {
        if distributor == zero_address() {
            self.env().revert(PayoutError::InvalidAddress);
        }
        self.distributor.set(distributor);
        self.total_native_sent.set(U256::zero());
    }

    // ========================================
    // Settlement (distributor only)
    // ========================================

    /// Settle the cumulative native reward for a recipient
    ///
    /// # Arguments
    /// * `recipient` - Reward recipient
    /// * `total_reward` - Total native amount owed so far, in motes
    ///
    /// # Returns
    /// The amount transferred in this call (total minus what was already
    /// recorded; zero totals pay nothing and emit nothing)
    pub fn settle_native(&mut self, recipient: Address, total_reward: U256) -> U256 {
        self.only_distributor();
        self.settle(Asset::Native, recipient, total_reward)
    }

    /// Settle the cumulative token reward for a recipient
    ///
    /// The native sentinel address routes the call to the native path.
    pub fn settle_token(&mut self, token: Address, recipient: Address, total_reward: U256) -> U256 {
        self.only_distributor();
        let asset = self.resolve_asset(token);
        self.settle(asset, recipient, total_reward)
    }

    // ========================================
    // Signed Claims (anyone may call)
    // ========================================

    /// Settle a native reward authorized by a distributor-signed message
    ///
    /// The message binds `(recipient, total_reward)`, so a signature cannot
    /// be replayed with different parameters. Replaying an already-settled
    /// claim pays a zero delta and is a no-op.
    pub fn claim_native(
        &mut self,
        recipient: Address,
        total_reward: U256,
        signer: PublicKey,
        signature: Bytes,
    ) -> U256 {
        let message = self.native_claim_message(recipient, total_reward);
        self.verify_claim(&message, &signer, &signature);
        self.settle(Asset::Native, recipient, total_reward)
    }

    /// Settle a token reward authorized by a distributor-signed message
    pub fn claim_token(
        &mut self,
        token: Address,
        recipient: Address,
        total_reward: U256,
        signer: PublicKey,
        signature: Bytes,
    ) -> U256 {
        let message = self.token_claim_message(token, recipient, total_reward);
        self.verify_claim(&message, &signer, &signature);
        let asset = self.resolve_asset(token);
        self.settle(asset, recipient, total_reward)
    }

    /// Exact bytes the distributor signs to authorize a native claim
    pub fn native_claim_message(&self, recipient: Address, total_reward: U256) -> Bytes {
        self.claim_message(None, &recipient, &total_reward)
    }

    /// Exact bytes the distributor signs to authorize a token claim
    pub fn token_claim_message(
        &self,
        token: Address,
        recipient: Address,
        total_reward: U256,
    ) -> Bytes {
        self.claim_message(Some(&token), &recipient, &total_reward)
    }

    // ========================================
    // Batch Settlement (distributor only)
    // ========================================

    /// Settle native rewards for parallel recipient/total arrays
    ///
    /// Applied in array order; any failing entry reverts the whole call.
    pub fn settle_native_batch(
        &mut self,
        recipients: Vec<Address>,
        total_rewards: Vec<U256>,
    ) -> Vec<U256> {
        self.only_distributor();

        if recipients.len() != total_rewards.len() {
            self.env().revert(PayoutError::InvalidArrayLengths);
        }

        let mut amounts = Vec::new();
        for (recipient, total_reward) in recipients.into_iter().zip(total_rewards) {
            amounts.push(self.settle(Asset::Native, recipient, total_reward));
        }
        amounts
    }

    /// Settle token rewards for parallel token/recipient/total arrays
    pub fn settle_token_batch(
        &mut self,
        tokens: Vec<Address>,
        recipients: Vec<Address>,
        total_rewards: Vec<U256>,
    ) -> Vec<U256> {
        self.only_distributor();

        if tokens.len() != recipients.len() || recipients.len() != total_rewards.len() {
            self.env().revert(PayoutError::InvalidArrayLengths);
        }

        let mut amounts = Vec::new();
        for ((token, recipient), total_reward) in
            tokens.into_iter().zip(recipients).zip(total_rewards)
        {
            let asset = self.resolve_asset(token);
            amounts.push(self.settle(asset, recipient, total_reward));
        }
        amounts
    }

    // ========================================
    // Recovery (distributor only)
    // ========================================

    /// Withdraw native funds held by the contract
    ///
    /// Recovery does not touch the reward ledgers; it moves whatever the
    /// contract holds, including funds a later settlement would have spent.
    pub fn recover_native(&mut self, recipient: Address, amount: U256) {
        self.only_distributor();

        if recipient == zero_address() {
            self.env().revert(PayoutError::InvalidAddress);
        }

        if amount > U256::zero() {
            self.env().transfer_tokens(&recipient, &to_motes(amount));
            self.env().emit_event(NativeRecovered { recipient, amount });
        }
    }

    /// Withdraw token funds held by the contract
    pub fn recover_token(&mut self, token: Address, recipient: Address, amount: U256) {
        self.only_distributor();

        if token == zero_address() {
            self.env().revert(PayoutError::InvalidToken);
        }
        if recipient == zero_address() {
            self.env().revert(PayoutError::InvalidAddress);
        }

        if amount > U256::zero() {
            let mut token_contract = Cep18TokenContractRef::new(self.env(), token);
            token_contract.transfer(recipient, amount);
            self.env().emit_event(TokenRecovered {
                token,
                recipient,
                amount,
            });
        }
    }

    // ========================================
    // Funding and Administration
    // ========================================

    /// Accept CSPR to disburse later
    #[odra(payable)]
    pub fn fund(&mut self) {
        let amount = self.env().attached_value();
        self.env().emit_event(Funded {
            funder: self.env().caller(),
            amount,
        });
    }

    /// Reassign the distributor identity
    pub fn set_distributor(&mut self, new_distributor: Address) {
        self.only_distributor();

        if new_distributor == zero_address() {
            self.env().revert(PayoutError::InvalidAddress);
        }

        let previous = self.distributor();
        self.distributor.set(new_distributor);
        self.env().emit_event(DistributorChanged {
            previous,
            current: new_distributor,
        });
    }

    // ========================================
    // View Functions
    // ========================================

    /// Get the distributor identity
    pub fn distributor(&self) -> Address {
        self.distributor.get_or_revert_with(PayoutError::NotAuthorized)
    }

    /// Cumulative native reward recorded for a recipient
    pub fn native_reward_of(&self, recipient: Address) -> U256 {
        self.native_rewards.get(&recipient).unwrap_or_default()
    }

    /// Cumulative token reward recorded for a (token, recipient) pair
    ///
    /// The native sentinel reads the native ledger, mirroring `settle_token`.
    pub fn token_reward_of(&self, token: Address, recipient: Address) -> U256 {
        match self.resolve_asset(token) {
            Asset::Native => self.native_reward_of(recipient),
            Asset::Token(token) => self.token_rewards.get(&(token, recipient)).unwrap_or_default(),
        }
    }

    /// Aggregate native amount paid out over the contract lifetime
    pub fn total_native_sent(&self) -> U256 {
        self.total_native_sent.get_or_default()
    }

    /// Aggregate amount paid out for a token over the contract lifetime
    pub fn total_token_sent(&self, token: Address) -> U256 {
        self.total_token_sent.get(&token).unwrap_or_default()
    }

    /// The sentinel address that selects native CSPR in the token interface
    pub fn native_token(&self) -> Address {
        native_token_address()
    }

    // ========================================
    // Internal Functions
    // ========================================

    fn settle(&mut self, asset: Asset, recipient: Address, total_reward: U256) -> U256 {
        if recipient == zero_address() {
            self.env().revert(PayoutError::InvalidAddress);
        }

        let recorded = self.recorded_total(&asset, &recipient);
        if total_reward < recorded {
            self.env().revert(PayoutError::InvalidTotalReward);
        }

        let amount = total_reward - recorded;
        if amount == U256::zero() {
            return amount;
        }

        let caller = self.env().caller();
        match asset {
            Asset::Native => {
                self.native_rewards.set(&recipient, total_reward);
                let sent = self.checked_add(self.total_native_sent.get_or_default(), amount);
                self.total_native_sent.set(sent);
                self.env().transfer_tokens(&recipient, &to_motes(amount));
                self.env().emit_event(RewardSent {
                    caller,
                    recipient,
                    total_reward,
                    amount,
                });
            }
            Asset::Token(token) => {
                self.token_rewards.set(&(token, recipient), total_reward);
                let sent =
                    self.checked_add(self.total_token_sent.get(&token).unwrap_or_default(), amount);
                self.total_token_sent.set(&token, sent);
                let mut token_contract = Cep18TokenContractRef::new(self.env(), token);
                token_contract.transfer(recipient, amount);
                self.env().emit_event(TokenRewardSent {
                    caller,
                    token,
                    recipient,
                    total_reward,
                    amount,
                });
            }
        }

        amount
    }

    fn recorded_total(&self, asset: &Asset, recipient: &Address) -> U256 {
        match asset {
            Asset::Native => self.native_rewards.get(recipient).unwrap_or_default(),
            Asset::Token(token) => self
                .token_rewards
                .get(&(*token, *recipient))
                .unwrap_or_default(),
        }
    }

    fn resolve_asset(&self, token: Address) -> Asset {
        if token == native_token_address() {
            return Asset::Native;
        }
        if token == zero_address() {
            self.env().revert(PayoutError::InvalidToken);
        }
        Asset::Token(token)
    }

    fn verify_claim(&self, message: &Bytes, signer: &PublicKey, signature: &Bytes) {
        // A raw ed25519 or secp256k1 signature is at least 64 bytes.
        if signature.len() < 64 {
            self.env().revert(PayoutError::MalformedSignature);
        }

        if !self.env().verify_signature(message, signature, signer) {
            self.env().revert(PayoutError::InvalidSignature);
        }

        if Address::Account(signer.to_account_hash()) != self.distributor() {
            self.env().revert(PayoutError::InvalidSignature);
        }
    }

    fn claim_message(
        &self,
        token: Option<&Address>,
        recipient: &Address,
        total_reward: &U256,
    ) -> Bytes {
        let mut message = Vec::new();
        message.extend_from_slice(SIGNED_MESSAGE_PREFIX);
        if let Some(token) = token {
            message.extend(token.to_bytes().unwrap_or_revert(&self.env()));
        }
        message.extend(recipient.to_bytes().unwrap_or_revert(&self.env()));
        message.extend(total_reward.to_bytes().unwrap_or_revert(&self.env()));
        Bytes::from(message)
    }

    fn checked_add(&self, lhs: U256, rhs: U256) -> U256 {
        lhs.checked_add(rhs)
            .unwrap_or_else(|| self.env().revert(PayoutError::Overflow))
    }

    fn only_distributor(&self) {
        let caller = self.env().caller();
        let distributor = self.distributor.get_or_revert_with(PayoutError::NotAuthorized);
        if caller != distributor {
            self.env().revert(PayoutError::NotAuthorized);
        }
    }
}

/// Widen a U256 reward amount into the U512 motes domain used by native
/// transfers. Walks the u64 limbs so the full range converts losslessly.
fn to_motes(amount: U256) -> U512 {
    let mut motes = U512::zero();
    for limb in amount.0.iter().rev() {
        motes = (motes << 64) | U512::from(*limb);
    }
    motes
}
