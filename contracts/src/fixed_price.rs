//! Fixed price oracle contract.
//!
//! Returns a constant 18-decimal price for one asset. Useful for
//! pegged assets and for wiring the router in test deployments; no
//! staleness semantics apply.

use crate::errors::LendError;
use crate::types::AssetId;
use odra::casper_types::U256;
use odra::prelude::*;

/// Fixed Price Oracle Contract
#[odra::module]
pub struct FixedPriceOracle {
    /// Asset this oracle prices
    asset: Var<AssetId>,
    /// Constant price, 18-decimal fixed point
    price: Var<U256>,
}

#[odra::module]
impl FixedPriceOracle {
    /// Initialize with the asset and its constant price
    pub fn init(&mut self, asset: AssetId, price: U256) {
        self.asset.set(asset);
        self.price.set(price);
    }

    /// Get the fixed price for `asset`
    pub fn get_price(&self, asset: AssetId) -> U256 {
        let configured = match self.asset.get() {
            Some(a) => a,
            None => self.env().revert(LendError::InvalidConfig),
        };
        if asset != configured {
            self.env().revert(LendError::UnsupportedAsset);
        }
        match self.price.get() {
            Some(price) => price,
            None => self.env().revert(LendError::InvalidConfig),
        }
    }

    /// Get the configured asset
    pub fn get_asset(&self) -> Option<AssetId> {
        self.asset.get()
    }
}
