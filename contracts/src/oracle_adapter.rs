//! Feed Oracle Adapter Contract
//!
//! Normalizes one external price feed into the canonical 18-decimal
//! price for one asset. Two independent staleness ceilings are
//! enforced on every read:
//! - the feed's own heartbeat (the age the feed guarantees), and
//! - the protocol-wide max delay, independent of any single feed.
//!
//! Both bounds are always evaluated; the tighter one governs. A
//! reading exactly at a boundary is still accepted.

use crate::errors::LendError;
use crate::types::{AssetId, FeedRound};
use odra::casper_types::{runtime_args, U256};
use odra::prelude::*;
use odra::CallDef;

/// Default protocol-wide maximum price age in seconds (24 hours)
pub const DEFAULT_MAX_PROTOCOL_DELAY: u64 = 86_400;

/// Canonical price decimals
const NORMALIZED_DECIMALS: u8 = 18;

/// Feed Oracle Adapter Contract
#[odra::module]
pub struct FeedOracleAdapter {
    /// Asset this adapter prices
    asset: Var<AssetId>,
    /// External feed contract address
    reader: Var<Address>,
    /// Protocol-wide staleness ceiling in seconds
    max_protocol_delay: Var<u64>,
}

#[odra::module]
impl FeedOracleAdapter {
    /// Initialize the adapter for one asset and one feed
    pub fn init(&mut self, asset: AssetId, reader: Address, max_protocol_delay: u64) {
        if max_protocol_delay == 0 {
            self.env().revert(LendError::InvalidConfig);
        }
        self.asset.set(asset);
        self.reader.set(reader);
        self.max_protocol_delay.set(max_protocol_delay);
    }

    /// Get the normalized 18-decimal price for `asset`.
    ///
    /// Pure read; fails rather than returning a degraded value.
    pub fn get_price(&self, asset: AssetId) -> U256 {
        let configured = match self.asset.get() {
            Some(a) => a,
            None => self.env().revert(LendError::InvalidConfig),
        };
        if asset != configured {
            self.env().revert(LendError::UnsupportedAsset);
        }

        let round = self.latest_round();
        let now = self.env().get_block_time();
        let max_delay = self.max_protocol_delay.get().unwrap_or(DEFAULT_MAX_PROTOCOL_DELAY);

        match check_and_normalize(&round, now, max_delay) {
            Ok(price) => price,
            Err(err) => self.env().revert(err),
        }
    }

    /// Get the configured asset
    pub fn get_asset(&self) -> Option<AssetId> {
        self.asset.get()
    }

    /// Get the feed contract address
    pub fn get_reader(&self) -> Option<Address> {
        self.reader.get()
    }

    /// Get the protocol-wide staleness ceiling in seconds
    pub fn get_max_protocol_delay(&self) -> u64 {
        self.max_protocol_delay.get().unwrap_or(DEFAULT_MAX_PROTOCOL_DELAY)
    }

    fn latest_round(&self) -> FeedRound {
        let reader = match self.reader.get() {
            Some(addr) => addr,
            None => self.env().revert(LendError::InvalidConfig),
        };
        let call_def = CallDef::new("latest_round", false, runtime_args! {});
        self.env().call_contract(reader, call_def)
    }
}

/// Validate a feed round against both staleness ceilings and rescale
/// it to 18 decimals: `raw_price * 10^(18 - decimals)`.
pub fn check_and_normalize(
    round: &FeedRound,
    now: u64,
    max_protocol_delay: u64,
) -> Result<U256, LendError> {
    if round.decimals > NORMALIZED_DECIMALS {
        return Err(LendError::DecimalsExceeded);
    }

    let age = now.saturating_sub(round.timestamp);
    if age > round.heartbeat {
        return Err(LendError::StaleOraclePrice);
    }
    if age > max_protocol_delay {
        return Err(LendError::StaleProtocolPrice);
    }

    let scale = U256::from(10u64).pow(U256::from(NORMALIZED_DECIMALS - round.decimals));
    Ok(round.raw_price * scale)
}
