//! CEP-18 compatible reward token
//!
//! Fungible token used to fund token-denominated payouts. The account that
//! deploys the token becomes its minter; only the minter can mint or burn.
use odra::prelude::*;
use odra::casper_types::U256;
use crate::events::{Transfer, Approval};
use crate::errors::TokenError;

/// Reward token module implementing the CEP-18 standard with a gated supply
#[odra::module]
pub struct RewardToken {
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Token decimals
    decimals: Var<u8>,
    /// Total supply of tokens
    total_supply: Var<U256>,
    /// Balance mapping: owner -> balance
    balances: Mapping<Address, U256>,
    /// Allowance mapping: owner -> spender -> amount
    allowances: Mapping<(Address, Address), U256>,
    /// Account allowed to mint and burn
    minter: Var<Address>,
}

#[odra::module]
impl RewardToken {
    /// Initialize the token metadata; the deployer becomes the minter
    pub fn init(&mut self, name: String, symbol: String, decimals: u8) {
        let caller = self.env().caller();
        self.name.set(name);
        self.symbol.set(symbol);
        self.decimals.set(decimals);
        self.total_supply.set(U256::zero());
        self.minter.set(caller);
    }

    /// Get the token name
    pub fn name(&self) -> String {
        self.name.get_or_default()
    }

    /// Get the token symbol
    pub fn symbol(&self) -> String {
        self.symbol.get_or_default()
    }

    /// Get the token decimals
    pub fn decimals(&self) -> u8 {
        self.decimals.get_or_default()
    }

    /// Get the total supply
    pub fn total_supply(&self) -> U256 {
        self.total_supply.get_or_default()
    }

    /// Get the minter account
    pub fn minter(&self) -> Address {
        self.minter.get_or_revert_with(TokenError::Unauthorized)
    }

    /// Get the balance of an address
    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).unwrap_or_default()
    }

    /// Get the allowance for a spender
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or_default()
    }

    /// Transfer tokens to another address
    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.transfer_internal(caller, to, amount);
        true
    }

    /// Approve a spender to spend tokens
    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.approve_internal(caller, spender, amount);
        true
    }

    /// Transfer tokens from one address to another (requires approval)
    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        let current_allowance = self.allowance(from, caller);

        if current_allowance < amount {
            self.env().revert(TokenError::InsufficientAllowance);
        }

        self.approve_internal(from, caller, current_allowance - amount);
        self.transfer_internal(from, to, amount);
        true
    }

    /// Mint new tokens (minter only)
    pub fn mint(&mut self, to: Address, amount: U256) {
        self.only_minter();

        self.total_supply.set(self.total_supply() + amount);
        self.balances.set(&to, self.balance_of(to) + amount);

        self.env().emit_event(Transfer {
            from: Address::from(self.env().self_address()),
            to,
            value: amount,
        });
    }

    /// Burn tokens (minter only)
    pub fn burn(&mut self, from: Address, amount: U256) {
        self.only_minter();

        let current_balance = self.balance_of(from);
        if current_balance < amount {
            self.env().revert(TokenError::InsufficientBalance);
        }

        self.balances.set(&from, current_balance - amount);
        self.total_supply.set(self.total_supply() - amount);

        self.env().emit_event(Transfer {
            from,
            to: Address::from(self.env().self_address()),
            value: amount,
        });
    }

    /// Hand the minter role to another account (minter only)
    pub fn set_minter(&mut self, new_minter: Address) {
        self.only_minter();
        self.minter.set(new_minter);
    }

    // Internal functions

    fn transfer_internal(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            self.env().revert(TokenError::InsufficientBalance);
        }

        self.balances.set(&from, from_balance - amount);
        self.balances.set(&to, self.balance_of(to) + amount);

        self.env().emit_event(Transfer {
            from,
            to,
            value: amount,
        });
    }

    fn approve_internal(&mut self, owner: Address, spender: Address, amount: U256) {
        self.allowances.set(&(owner, spender), amount);

        self.env().emit_event(Approval {
            owner,
            spender,
            value: amount,
        });
    }

    fn only_minter(&self) {
        let caller = self.env().caller();
        let minter = self.minter.get_or_revert_with(TokenError::Unauthorized);
        if caller != minter {
            self.env().revert(TokenError::Unauthorized);
        }
    }
}

/// External token interface for interacting with CEP-18 tokens
#[odra::external_contract]
pub trait Cep18Token {
    /// Get the balance of an address
    fn balance_of(&self, owner: Address) -> U256;

    /// Transfer tokens
    fn transfer(&mut self, to: Address, amount: U256) -> bool;

    /// Transfer tokens from another address
    fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool;

    /// Approve a spender
    fn approve(&mut self, spender: Address, amount: U256) -> bool;

    /// Get allowance
    fn allowance(&self, owner: Address, spender: Address) -> U256;

    /// Get total supply
    fn total_supply(&self) -> U256;
}

#[cfg(test)]
mod tests {
    use super::*;
    use odra::host::{Deployer, HostEnv};

    fn setup() -> (HostEnv, RewardTokenHostRef) {
        let env = odra_test::env();
        let init_args = RewardTokenInitArgs {
            name: String::from("Reward Token"),
            symbol: String::from("RWD"),
            decimals: 9,
        };
        let token = RewardToken::deploy(&env, init_args);
        (env, token)
    }

    #[test]
    fn test_token_metadata() {
        let (env, token) = setup();

        assert_eq!(token.name(), "Reward Token");
        assert_eq!(token.symbol(), "RWD");
        assert_eq!(token.decimals(), 9);
        assert_eq!(token.total_supply(), U256::zero());
        assert_eq!(token.minter(), env.get_account(0));
    }

    #[test]
    fn test_mint_and_transfer() {
        let (env, mut token) = setup();

        let user1 = env.get_account(1);
        let user2 = env.get_account(2);
        let amount = U256::from(1_000);
        token.mint(user1, amount);

        assert_eq!(token.total_supply(), amount);
        assert_eq!(token.balance_of(user1), amount);

        env.set_caller(user1);
        let transfer_amount = U256::from(400);
        token.transfer(user2, transfer_amount);

        assert_eq!(token.balance_of(user1), amount - transfer_amount);
        assert_eq!(token.balance_of(user2), transfer_amount);
    }

    #[test]
    fn test_mint_requires_minter() {
        let (env, mut token) = setup();

        let outsider = env.get_account(1);
        env.set_caller(outsider);

        let result = token.try_mint(outsider, U256::from(1_000));
        assert_eq!(result, Err(TokenError::Unauthorized.into()));
        assert_eq!(token.total_supply(), U256::zero());
    }

    #[test]
    fn test_burn_reduces_supply() {
        let (env, mut token) = setup();

        let user = env.get_account(1);
        token.mint(user, U256::from(1_000));
        token.burn(user, U256::from(300));

        assert_eq!(token.balance_of(user), U256::from(700));
        assert_eq!(token.total_supply(), U256::from(700));

        let result = token.try_burn(user, U256::from(5_000));
        assert_eq!(result, Err(TokenError::InsufficientBalance.into()));
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let (env, mut token) = setup();

        let user1 = env.get_account(1);
        let user2 = env.get_account(2);
        token.mint(user1, U256::from(100));

        env.set_caller(user1);
        let result = token.try_transfer(user2, U256::from(200));
        assert_eq!(result, Err(TokenError::InsufficientBalance.into()));
    }

    #[test]
    fn test_transfer_from_requires_allowance() {
        let (env, mut token) = setup();

        let owner = env.get_account(1);
        let spender = env.get_account(2);
        let receiver = env.get_account(3);
        token.mint(owner, U256::from(1_000));

        env.set_caller(spender);
        let result = token.try_transfer_from(owner, receiver, U256::from(500));
        assert_eq!(result, Err(TokenError::InsufficientAllowance.into()));

        env.set_caller(owner);
        token.approve(spender, U256::from(500));

        env.set_caller(spender);
        token.transfer_from(owner, receiver, U256::from(500));
        assert_eq!(token.balance_of(receiver), U256::from(500));
        assert_eq!(token.allowance(owner, spender), U256::zero());
    }

    #[test]
    fn test_set_minter_hands_over_role() {
        let (env, mut token) = setup();

        let new_minter = env.get_account(1);
        token.set_minter(new_minter);
        assert_eq!(token.minter(), new_minter);

        let result = token.try_mint(new_minter, U256::from(1));
        assert_eq!(result, Err(TokenError::Unauthorized.into()));

        env.set_caller(new_minter);
        token.mint(new_minter, U256::from(1));
        assert_eq!(token.balance_of(new_minter), U256::from(1));
    }
}
