//! Lending ledger contract.
//!
//! Holds per-account collateral (native CSPR) and debt (sUSD)
//! balances plus the pool's stable-token reserve. Every
//! balance-changing operation re-establishes the position invariant
//! `debt_value <= collateral_value * ltv_bps / 10000` before any
//! state is committed; a failed check leaves all balances untouched.
//!
//! Ordering rule for operations that call out (token transfers,
//! native sends): internal state is updated first, the external call
//! is issued last.

use crate::errors::LendError;
use crate::health;
use crate::types::{AccountPosition, AssetId};
use odra::casper_types::{runtime_args, U256, U512};
use odra::prelude::*;
use odra::CallDef;

/// Health factor floor, 1.0 scaled by 1e18
const MIN_HEALTH_FACTOR: u128 = 1_000_000_000_000_000_000;

/// Lending Ledger Contract
#[odra::module]
pub struct LendingLedger {
    /// Stable debt token contract address
    stable_token: Var<Address>,
    /// Oracle router contract address
    oracle_router: Var<Address>,
    /// Loan-to-value limit in basis points, fixed at construction
    ltv_bps: Var<u32>,
    /// Address allowed to credit collateral to third parties
    /// (the cross-chain receiver)
    depositor: Var<Address>,
    /// Collateral balance per account, in motes
    collateral: Mapping<Address, U256>,
    /// Debt balance per account, in stable units
    debt: Mapping<Address, U256>,
    /// Stable-token liquidity available for borrowing
    reserve: Var<U256>,
}

#[odra::module]
impl LendingLedger {
    /// Initialize the ledger.
    ///
    /// `ltv_bps` is immutable afterwards; `depositor` is the only
    /// caller permitted to deposit on behalf of another account.
    pub fn init(
        &mut self,
        stable_token: Address,
        oracle_router: Address,
        ltv_bps: u32,
        depositor: Address,
    ) {
        if ltv_bps == 0 || ltv_bps as u64 > health::BPS_SCALE {
            self.env().revert(LendError::InvalidConfig);
        }
        self.stable_token.set(stable_token);
        self.oracle_router.set(oracle_router);
        self.ltv_bps.set(ltv_bps);
        self.depositor.set(depositor);
        self.reserve.set(U256::zero());
    }

    // ========== Balance Operations ==========

    /// Deposit the attached CSPR as collateral for `beneficiary`.
    ///
    /// Self-service unless the caller is the configured depositor,
    /// which may credit any beneficiary. No solvency check: adding
    /// collateral only improves the position.
    #[odra(payable)]
    pub fn deposit_collateral(&mut self, beneficiary: Address) {
        let amount = u512_to_u256(self.env().attached_value());
        if amount.is_zero() {
            self.env().revert(LendError::AmountZero);
        }

        let caller = self.env().caller();
        if caller != beneficiary && self.depositor.get() != Some(caller) {
            self.env().revert(LendError::Unauthorized);
        }

        let current = self.collateral_of(beneficiary);
        self.collateral.set(&beneficiary, current + amount);
    }

    /// Withdraw `amount` motes of the caller's collateral.
    ///
    /// The health factor is evaluated against the post-withdrawal
    /// position; a debt-free account can always withdraw.
    pub fn withdraw_collateral(&mut self, amount: U256) {
        if amount.is_zero() {
            self.env().revert(LendError::AmountZero);
        }

        let caller = self.env().caller();
        let balance = self.collateral_of(caller);
        if amount > balance {
            self.env().revert(LendError::InsufficientCollateral);
        }

        let remaining = balance - amount;
        let debt = self.debt_of(caller);
        if !debt.is_zero() {
            let price = self.collateral_price();
            let value = health::collateral_value(remaining, price);
            let ltv_bps = self.get_ltv_bps();
            let hf = health::health_factor(value, ltv_bps, health::debt_value(debt));
            if hf < U256::from(MIN_HEALTH_FACTOR) {
                self.env().revert(LendError::HealthFactorBelowOne);
            }
        }

        // Balance debited before the native transfer goes out.
        self.collateral.set(&caller, remaining);
        self.env().transfer_tokens(&caller, &u256_to_u512(amount));
    }

    /// Borrow `amount` stable units against the caller's collateral.
    pub fn borrow_asset(&mut self, amount: U256) {
        if amount.is_zero() {
            self.env().revert(LendError::AmountZero);
        }

        let reserve = self.available_liquidity();
        if amount > reserve {
            self.env().revert(LendError::InsufficientLiquidity);
        }

        let caller = self.env().caller();
        let price = self.collateral_price();
        let value = health::collateral_value(self.collateral_of(caller), price);
        let new_debt = self.debt_of(caller) + amount;
        if !health::is_within_ltv(value, self.get_ltv_bps(), new_debt) {
            self.env().revert(LendError::InsufficientCollateral);
        }

        // Debt credited and reserve debited before the token leaves.
        self.debt.set(&caller, new_debt);
        self.reserve.set(reserve - amount);

        let args = runtime_args! {
            "recipient" => caller,
            "amount" => amount,
        };
        let transfer = CallDef::new("transfer", true, args);
        self.env().call_contract::<bool>(self.stable_token_address(), transfer);
    }

    /// Repay up to `amount` of the caller's debt.
    ///
    /// The transfer-in is capped at the outstanding debt, so paying
    /// more than owed never strands value in the pool. Repaying with
    /// no debt outstanding is a no-op.
    pub fn repay_asset(&mut self, amount: U256) {
        if amount.is_zero() {
            self.env().revert(LendError::AmountZero);
        }

        let caller = self.env().caller();
        let debt = self.debt_of(caller);
        let repaid = amount.min(debt);
        if repaid.is_zero() {
            return;
        }

        // Debt and reserve settled before the token is pulled.
        self.debt.set(&caller, debt - repaid);
        let reserve = self.available_liquidity();
        self.reserve.set(reserve + repaid);

        self.pull_stable_tokens(caller, repaid);
    }

    /// Add stable-token liquidity to the reserve (open to anyone).
    pub fn fund_reserve(&mut self, amount: U256) {
        if amount.is_zero() {
            self.env().revert(LendError::AmountZero);
        }

        let caller = self.env().caller();
        let reserve = self.available_liquidity();
        self.reserve.set(reserve + amount);

        self.pull_stable_tokens(caller, amount);
    }

    // ========== View Functions ==========

    /// Collateral balance of an account, in motes
    pub fn collateral_of(&self, account: Address) -> U256 {
        self.collateral.get(&account).unwrap_or(U256::zero())
    }

    /// Debt balance of an account, in stable units
    pub fn debt_of(&self, account: Address) -> U256 {
        self.debt.get(&account).unwrap_or(U256::zero())
    }

    /// Full position of an account in a single call
    pub fn position_of(&self, account: Address) -> AccountPosition {
        AccountPosition {
            collateral: self.collateral_of(account),
            debt: self.debt_of(account),
        }
    }

    /// Stable-token liquidity available for borrowing
    pub fn available_liquidity(&self) -> U256 {
        self.reserve.get().unwrap_or(U256::zero())
    }

    /// Loan-to-value limit in basis points
    pub fn get_ltv_bps(&self) -> u32 {
        self.ltv_bps.get().unwrap_or(0)
    }

    /// Configured third-party depositor (the cross-chain receiver)
    pub fn get_depositor(&self) -> Option<Address> {
        self.depositor.get()
    }

    /// Stable units an account could still borrow at the current
    /// price, ignoring reserve limits
    pub fn max_borrowable_of(&self, account: Address) -> U256 {
        let price = self.collateral_price();
        let value = health::collateral_value(self.collateral_of(account), price);
        let capacity = health::borrow_capacity(value, self.get_ltv_bps());
        let capacity_units =
            capacity * U256::from(health::DEBT_UNIT) / U256::from(health::VALUE_SCALE);

        let debt = self.debt_of(account);
        if debt >= capacity_units {
            U256::zero()
        } else {
            capacity_units - debt
        }
    }

    /// Health factor of an account, scaled by 1e18
    pub fn health_factor_of(&self, account: Address) -> U256 {
        let debt = self.debt_of(account);
        if debt.is_zero() {
            return U256::MAX;
        }
        let price = self.collateral_price();
        let value = health::collateral_value(self.collateral_of(account), price);
        health::health_factor(value, self.get_ltv_bps(), health::debt_value(debt))
    }

    // ========== Internal Functions ==========

    fn collateral_price(&self) -> U256 {
        let router = match self.oracle_router.get() {
            Some(addr) => addr,
            None => self.env().revert(LendError::InvalidConfig),
        };
        let args = runtime_args! { "asset" => AssetId::Cspr };
        let call_def = CallDef::new("get_price", false, args);
        self.env().call_contract(router, call_def)
    }

    fn pull_stable_tokens(&self, from: Address, amount: U256) {
        let args = runtime_args! {
            "owner" => from,
            "recipient" => self.env().self_address(),
            "amount" => amount,
        };
        let transfer_from = CallDef::new("transfer_from", true, args);
        self.env().call_contract::<bool>(self.stable_token_address(), transfer_from);
    }

    fn stable_token_address(&self) -> Address {
        match self.stable_token.get() {
            Some(addr) => addr,
            None => self.env().revert(LendError::InvalidConfig),
        }
    }
}

// ===== Helper Functions =====

/// Convert U512 to U256 by taking the lower 256 bits.
///
/// CSPR amounts fit comfortably: total supply is ~12B with 9 decimals.
pub(crate) fn u512_to_u256(value: U512) -> U256 {
    let mut bytes = [0u8; 64];
    value.to_little_endian(&mut bytes);
    U256::from_little_endian(&bytes[..32])
}

/// Convert U256 to U512
pub(crate) fn u256_to_u512(value: U256) -> U512 {
    let mut bytes = [0u8; 32];
    value.to_little_endian(&mut bytes);
    U512::from_little_endian(&bytes)
}
