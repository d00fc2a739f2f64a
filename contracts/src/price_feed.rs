//! Stored price feed contract.
//!
//! Push-model price source exposing the raw feed tuple
//! `(raw_price, decimals, timestamp, heartbeat)` consumed by
//! `FeedOracleAdapter`. An authorized feeder pushes rounds; the feed
//! itself performs no staleness or sanity checks - those belong to the
//! adapter layer.

use crate::errors::LendError;
use crate::types::FeedRound;
use odra::casper_types::U256;
use odra::prelude::*;

/// External price feed interface for cross-contract calls
#[odra::external_contract]
pub trait PriceFeedReader {
    /// Latest round as reported by the feed
    fn latest_round(&self) -> FeedRound;
}

/// Stored price feed contract
#[odra::module]
pub struct StoredPriceFeed {
    /// Authorized feeder address
    feeder: Var<Address>,
    /// Latest pushed round
    round: Var<FeedRound>,
}

#[odra::module]
impl StoredPriceFeed {
    /// Initialize the feed with its authorized feeder
    pub fn init(&mut self, feeder: Address) {
        self.feeder.set(feeder);
    }

    /// Push a new round (feeder only)
    pub fn set_round(&mut self, raw_price: U256, decimals: u8, timestamp: u64, heartbeat: u64) {
        self.require_feeder();
        self.round.set(FeedRound {
            raw_price,
            decimals,
            timestamp,
            heartbeat,
        });
    }

    /// Latest round; reverts if no round was ever pushed
    pub fn latest_round(&self) -> FeedRound {
        match self.round.get() {
            Some(round) => round,
            None => self.env().revert(LendError::InvalidConfig),
        }
    }

    /// Get the authorized feeder address
    pub fn get_feeder(&self) -> Option<Address> {
        self.feeder.get()
    }

    fn require_feeder(&self) {
        let caller = self.env().caller();
        if self.feeder.get().map_or(true, |feeder| feeder != caller) {
            self.env().revert(LendError::Unauthorized);
        }
    }
}
