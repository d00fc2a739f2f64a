//! Oracle router contract.
//!
//! Registry mapping asset identifier to its price adapter. The router
//! holds no pricing logic of its own: `get_price` dispatches to the
//! registered adapter and propagates its result or failure unchanged.

use crate::errors::LendError;
use crate::types::AssetId;
use odra::casper_types::{runtime_args, U256};
use odra::prelude::*;
use odra::CallDef;

/// Price oracle interface shared by adapters
#[odra::external_contract]
pub trait PriceOracle {
    /// Normalized 18-decimal price for `asset`
    fn get_price(&self, asset: AssetId) -> U256;
}

/// Oracle Router Contract
#[odra::module]
pub struct OracleRouter {
    /// Protocol admin address
    admin: Var<Address>,
    /// Registered adapter per asset
    adapters: Mapping<AssetId, Address>,
}

#[odra::module]
impl OracleRouter {
    /// Initialize the router with its admin
    pub fn init(&mut self, admin: Address) {
        self.admin.set(admin);
    }

    /// Register or replace the adapter for an asset (admin only)
    pub fn set_oracle(&mut self, asset: AssetId, adapter: Address) {
        self.require_admin();
        self.adapters.set(&asset, adapter);
    }

    /// Get the normalized price for an asset via its adapter
    pub fn get_price(&self, asset: AssetId) -> U256 {
        let adapter = match self.adapters.get(&asset) {
            Some(addr) => addr,
            None => self.env().revert(LendError::NoOracleRegistered),
        };

        let args = runtime_args! { "asset" => asset };
        let call_def = CallDef::new("get_price", false, args);
        self.env().call_contract(adapter, call_def)
    }

    /// Get the registered adapter for an asset
    pub fn get_oracle(&self, asset: AssetId) -> Option<Address> {
        self.adapters.get(&asset)
    }

    /// Get the admin address
    pub fn get_admin(&self) -> Option<Address> {
        self.admin.get()
    }

    fn require_admin(&self) {
        let caller = self.env().caller();
        if self.admin.get().map_or(true, |admin| admin != caller) {
            self.env().revert(LendError::Unauthorized);
        }
    }
}
