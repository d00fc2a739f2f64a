//! Common types used across the lending protocol.

use odra::casper_types::U256;
use odra::prelude::*;

/// Asset identifier for oracle routing
#[odra::odra_type]
#[derive(Copy, PartialOrd, Ord)]
pub enum AssetId {
    /// Native CSPR (the collateral asset)
    Cspr,
    /// Stable debt token (treated at par, not oracle-priced)
    SUsd,
}

/// One round of raw price data as reported by an external feed
#[odra::odra_type]
pub struct FeedRound {
    /// Integer price in the feed's native decimals
    pub raw_price: U256,
    /// Decimal places of `raw_price`
    pub decimals: u8,
    /// Timestamp of the reading, in seconds
    pub timestamp: u64,
    /// Maximum age the feed guarantees for its own data, in seconds
    pub heartbeat: u64,
}

/// Account position held by the ledger
#[odra::odra_type]
#[derive(Default)]
pub struct AccountPosition {
    /// Collateral balance in motes (9 decimals)
    pub collateral: U256,
    /// Debt balance in stable units (6 decimals)
    pub debt: U256,
}

/// Decoded cross-chain deposit instruction
#[odra::odra_type]
pub struct DepositMessage {
    /// Account to credit
    pub beneficiary: Address,
    /// Collateral amount in motes
    pub amount: U256,
}
