//! CSPR-Lend Contracts
//!
//! Casper-native collateralized lending core: a single-pair ledger
//! (native CSPR collateral, sUSD debt) fed by a staleness-checked
//! oracle layer and a cross-chain deposit receiver.
//!
//! ## Architecture
//!
//! - **LendingLedger**: per-account collateral/debt balances, LTV and
//!   health-factor enforcement, stable-token reserve
//! - **OracleRouter**: asset id -> adapter registry
//! - **FeedOracleAdapter**: 18-decimal normalization of one external
//!   feed with heartbeat and protocol-wide staleness ceilings
//! - **FixedPriceOracle**: constant-price adapter for pegged assets
//! - **StoredPriceFeed**: push-model raw price source
//! - **CrossChainReceiver**: authenticated, replay-protected deposit
//!   path from a remote chain into the ledger
//! - **StableUsd**: CEP-18 style stable debt token
//!
//! Oracle registration, trusted remotes, and the receiver-to-ledger
//! link are one-time admin wiring; everything else is caller-scoped.

#![cfg_attr(target_arch = "wasm32", no_std)]

#[cfg(target_arch = "wasm32")]
extern crate alloc;

// Re-export odra for downstream usage
pub use odra;

// Core module declarations
pub mod errors;
pub mod health;
pub mod types;

// Contract modules
pub mod fixed_price;
pub mod ledger;
pub mod oracle_adapter;
pub mod oracle_router;
pub mod price_feed;
pub mod receiver;
pub mod stablecoin;
