//! sUSD Stable Debt Token Contract
//!
//! CEP-18 compatible 6-decimal stable token used as the pool's debt
//! asset. Balance bookkeeping only: minting is admin-gated (pool
//! funding and test fixtures); the ledger moves tokens through the
//! standard transfer / approve / transfer_from surface.

use crate::errors::LendError;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use odra::casper_types::bytesrepr::ToBytes;
use odra::casper_types::{Key, U256};
use odra::prelude::*;

const TOKEN_NAME: &str = "sUSD";
const TOKEN_SYMBOL: &str = "sUSD";
const TOKEN_DECIMALS: u8 = 6;

const CEP18_NAME_KEY: &str = "name";
const CEP18_SYMBOL_KEY: &str = "symbol";
const CEP18_DECIMALS_KEY: &str = "decimals";
const CEP18_TOTAL_SUPPLY_KEY: &str = "total_supply";
const CEP18_BALANCES_DICT: &str = "balances";
const CEP18_ALLOWANCES_DICT: &str = "allowances";

/// sUSD Stable Token Contract
#[odra::module]
pub struct StableUsd {
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Decimals (6 for sUSD)
    decimals: Var<u8>,
    /// Total supply
    total_supply: Var<U256>,
    /// Balance mapping
    balances: Mapping<Address, U256>,
    /// Allowance mapping (owner -> spender -> amount)
    allowances: Mapping<(Address, Address), U256>,
    /// Admin address (sole authorized minter)
    admin: Var<Address>,
}

#[odra::module]
impl StableUsd {
    /// Initialize the stable token
    pub fn init(&mut self, admin: Address) {
        self.name.set(String::from(TOKEN_NAME));
        self.symbol.set(String::from(TOKEN_SYMBOL));
        self.decimals.set(TOKEN_DECIMALS);
        self.total_supply.set(U256::zero());
        self.admin.set(admin);
        self.env().init_dictionary(CEP18_BALANCES_DICT);
        self.env().init_dictionary(CEP18_ALLOWANCES_DICT);
        self.env().set_named_value(CEP18_NAME_KEY, String::from(TOKEN_NAME));
        self.env().set_named_value(CEP18_SYMBOL_KEY, String::from(TOKEN_SYMBOL));
        self.env().set_named_value(CEP18_DECIMALS_KEY, TOKEN_DECIMALS);
        self.env().set_named_value(CEP18_TOTAL_SUPPLY_KEY, U256::zero());
    }

    // ========== CEP-18 Standard Functions ==========

    /// Get token name
    pub fn name(&self) -> String {
        self.name.get().unwrap_or_else(|| String::from(TOKEN_NAME))
    }

    /// Get token symbol
    pub fn symbol(&self) -> String {
        self.symbol.get().unwrap_or_else(|| String::from(TOKEN_SYMBOL))
    }

    /// Get decimals
    pub fn decimals(&self) -> u8 {
        self.decimals.get().unwrap_or(TOKEN_DECIMALS)
    }

    /// Get total supply
    pub fn total_supply(&self) -> U256 {
        self.total_supply.get().unwrap_or(U256::zero())
    }

    /// Get balance of an account
    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).unwrap_or(U256::zero())
    }

    /// Get allowance for spender
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or(U256::zero())
    }

    /// Transfer tokens to recipient
    pub fn transfer(&mut self, recipient: Address, amount: U256) -> bool {
        let sender = self.env().caller();
        self.transfer_internal(sender, recipient, amount);
        true
    }

    /// Approve spender to spend tokens
    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let owner = self.env().caller();
        self.approve_internal(owner, spender, amount);
        true
    }

    /// Transfer tokens from owner to recipient (requires allowance)
    pub fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) -> bool {
        let spender = self.env().caller();

        let current_allowance = self.allowance(owner, spender);
        if current_allowance < amount {
            self.env().revert(LendError::InsufficientAllowance);
        }

        self.transfer_internal(owner, recipient, amount);
        self.approve_internal(owner, spender, current_allowance - amount);
        true
    }

    // ========== Admin Functions ==========

    /// Mint new tokens (admin only)
    pub fn mint(&mut self, to: Address, amount: U256) {
        self.require_admin();

        let current_balance = self.balance_of(to);
        self.balances.set(&to, current_balance + amount);
        self.set_balance_cep18(to, current_balance + amount);

        let new_supply = self.total_supply() + amount;
        self.total_supply.set(new_supply);
        self.env().set_named_value(CEP18_TOTAL_SUPPLY_KEY, new_supply);
    }

    /// Get the admin address
    pub fn get_admin(&self) -> Option<Address> {
        self.admin.get()
    }

    // ========== Internal Functions ==========

    fn transfer_internal(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            self.env().revert(LendError::InsufficientTokenBalance);
        }

        let new_from_balance = from_balance - amount;
        self.balances.set(&from, new_from_balance);
        self.set_balance_cep18(from, new_from_balance);

        let new_to_balance = self.balance_of(to) + amount;
        self.balances.set(&to, new_to_balance);
        self.set_balance_cep18(to, new_to_balance);
    }

    fn approve_internal(&mut self, owner: Address, spender: Address, amount: U256) {
        self.allowances.set(&(owner, spender), amount);
        self.set_allowance_cep18(owner, spender, amount);
    }

    fn set_balance_cep18(&self, owner: Address, amount: U256) {
        let key = Self::cep18_balance_key(owner);
        self.env().set_dictionary_value(CEP18_BALANCES_DICT, key.as_bytes(), amount);
    }

    fn set_allowance_cep18(&self, owner: Address, spender: Address, amount: U256) {
        let key = Self::cep18_allowance_key(owner, spender);
        self.env().set_dictionary_value(CEP18_ALLOWANCES_DICT, key.as_bytes(), amount);
    }

    fn cep18_balance_key(owner: Address) -> String {
        let key = Key::from(owner);
        let bytes = key.to_bytes().unwrap_or_default();
        BASE64_STANDARD.encode(bytes)
    }

    fn cep18_allowance_key(owner: Address, spender: Address) -> String {
        let owner_key = Key::from(owner);
        let spender_key = Key::from(spender);
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&owner_key.to_bytes().unwrap_or_default());
        bytes.extend_from_slice(&spender_key.to_bytes().unwrap_or_default());
        BASE64_STANDARD.encode(bytes)
    }

    fn require_admin(&self) {
        let caller = self.env().caller();
        if self.admin.get().map_or(true, |admin| admin != caller) {
            self.env().revert(LendError::Unauthorized);
        }
    }
}
