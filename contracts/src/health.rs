//! Position valuation and health-factor math.
//!
//! Pure functions shared by the ledger's borrow and withdrawal checks:
//! - Collateral valuation at the oracle price (18-decimal unit of account)
//! - Debt valuation at par (the stable debt token is not oracle-priced)
//! - LTV borrow capacity and health factor
//!
//! Keeping these free of the contract environment makes every solvency
//! decision testable without a live VM.

use odra::casper_types::U256;

/// Basis points scale (100% = 10000 bps)
pub const BPS_SCALE: u64 = 10_000;

/// Value scale (1e18) - all values are 18-decimal fixed point
pub const VALUE_SCALE: u128 = 1_000_000_000_000_000_000;

/// Collateral unit (CSPR uses 9 decimals, amounts are in motes)
pub const COLLATERAL_UNIT: u64 = 1_000_000_000;

/// Debt unit (stable token uses 6 decimals)
pub const DEBT_UNIT: u64 = 1_000_000;

/// Value of a collateral amount at the given 18-decimal price.
///
/// `amount` is in motes (9 decimals), `price` is USD per whole CSPR
/// scaled by 1e18; the result is an 18-decimal USD value.
pub fn collateral_value(amount: U256, price: U256) -> U256 {
    amount * price / U256::from(COLLATERAL_UNIT)
}

/// Value of a debt amount, at par (1 stable unit = 1 unit of account).
pub fn debt_value(debt: U256) -> U256 {
    debt * U256::from(VALUE_SCALE) / U256::from(DEBT_UNIT)
}

/// Maximum debt value the given collateral value supports.
pub fn borrow_capacity(collateral_value: U256, ltv_bps: u32) -> U256 {
    collateral_value * U256::from(ltv_bps) / U256::from(BPS_SCALE)
}

/// Health factor of a position, scaled by 1e18.
///
/// HF = borrow_capacity / debt_value. A position with no debt is
/// always healthy and reports `U256::MAX`.
pub fn health_factor(collateral_value: U256, ltv_bps: u32, debt_value: U256) -> U256 {
    if debt_value.is_zero() {
        return U256::MAX;
    }
    borrow_capacity(collateral_value, ltv_bps) * U256::from(VALUE_SCALE) / debt_value
}

/// Whether a position with the given valuation can carry `new_debt`.
pub fn is_within_ltv(collateral_value: U256, ltv_bps: u32, new_debt: U256) -> bool {
    debt_value(new_debt) <= borrow_capacity(collateral_value, ltv_bps)
}
