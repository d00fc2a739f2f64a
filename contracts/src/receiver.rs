//! Cross-chain receiver contract.
//!
//! Accepts deposit instructions relayed from a remote chain through a
//! designated messaging endpoint and credits the attached native value
//! into the lending ledger for the named beneficiary.
//!
//! Every delivery runs the full validation pipeline in order; the
//! first failure aborts with no partial effect:
//! 1. caller is the endpoint
//! 2. (source chain, sender) matches the trusted-remote allowlist
//! 3. (source chain, nonce) has never been processed
//! 4. payload decodes as a deposit instruction
//! 5. instructed amount equals the value actually delivered
//! 6. nonce recorded, then the ledger credited
//!
//! The nonce is committed before the ledger call goes out, so a
//! re-entrant delivery observes the message as already processed.

use crate::errors::LendError;
use crate::ledger::u512_to_u256;
use crate::types::DepositMessage;
use odra::casper_types::bytesrepr::{FromBytes, ToBytes};
use odra::casper_types::{runtime_args, U256};
use odra::prelude::*;
use odra::CallDef;

/// Message type tag for collateral deposits
pub const MSG_DEPOSIT: u8 = 1;

/// Cross-Chain Receiver Contract
#[odra::module]
pub struct CrossChainReceiver {
    /// Designated messaging endpoint; the only permitted caller of
    /// `deliver`
    endpoint: Var<Address>,
    /// Protocol admin address
    admin: Var<Address>,
    /// Ledger this receiver credits, linked once after deployment
    ledger: Var<Option<Address>>,
    /// Expected sender identity per source chain id
    trusted_remotes: Mapping<u32, Vec<u8>>,
    /// Replay guard: (source chain id, nonce) pairs already accepted
    processed: Mapping<(u32, u64), bool>,
}

#[odra::module]
impl CrossChainReceiver {
    /// Initialize the receiver with its endpoint and admin
    pub fn init(&mut self, endpoint: Address, admin: Address) {
        self.endpoint.set(endpoint);
        self.admin.set(admin);
        self.ledger.set(None);
    }

    /// Deliver a cross-chain message with its native value attached.
    ///
    /// Callable only by the designated endpoint. Re-delivery of an
    /// already-processed message fails `Replay` without any credit.
    #[odra(payable)]
    pub fn deliver(&mut self, src_chain_id: u32, src_sender: Vec<u8>, nonce: u64, payload: Vec<u8>) {
        let caller = self.env().caller();
        if self.endpoint.get() != Some(caller) {
            self.env().revert(LendError::NotEndpoint);
        }

        let expected = self.trusted_remotes.get(&src_chain_id);
        let already_processed = self.is_processed(src_chain_id, nonce);
        if let Err(err) = validate_source(expected.as_deref(), &src_sender, already_processed) {
            self.env().revert(err);
        }

        let message = match decode_deposit(&payload) {
            Ok(message) => message,
            Err(err) => self.env().revert(err),
        };

        // Credit only value the receiver actually has custody of.
        let delivered = self.env().attached_value();
        if u512_to_u256(delivered) != message.amount {
            self.env().revert(LendError::ValueMismatch);
        }

        let ledger = match self.ledger.get().flatten() {
            Some(addr) => addr,
            None => self.env().revert(LendError::LedgerNotLinked),
        };

        // Nonce committed before the external credit call.
        self.processed.set(&(src_chain_id, nonce), true);

        let args = runtime_args! { "beneficiary" => message.beneficiary };
        let credit = CallDef::new("deposit_collateral", true, args).with_amount(delivered);
        self.env().call_contract::<()>(ledger, credit);
    }

    // ========== Admin Functions ==========

    /// Register the expected sender identity for a source chain
    /// (admin only, overwrites)
    pub fn set_trusted_remote(&mut self, src_chain_id: u32, src_sender: Vec<u8>) {
        self.require_admin();
        self.trusted_remotes.set(&src_chain_id, src_sender);
    }

    /// Link the ledger this receiver credits (admin only, once)
    pub fn link_ledger(&mut self, ledger: Address) {
        self.require_admin();
        if self.ledger.get().flatten().is_some() {
            self.env().revert(LendError::LedgerAlreadyLinked);
        }
        self.ledger.set(Some(ledger));
    }

    // ========== View Functions ==========

    /// Get the designated endpoint address
    pub fn get_endpoint(&self) -> Option<Address> {
        self.endpoint.get()
    }

    /// Get the linked ledger address
    pub fn get_ledger(&self) -> Option<Address> {
        self.ledger.get().flatten()
    }

    /// Get the trusted sender identity for a source chain
    pub fn get_trusted_remote(&self, src_chain_id: u32) -> Option<Vec<u8>> {
        self.trusted_remotes.get(&src_chain_id)
    }

    /// Whether a (source chain, nonce) pair was already accepted
    pub fn is_processed(&self, src_chain_id: u32, nonce: u64) -> bool {
        self.processed.get(&(src_chain_id, nonce)).unwrap_or(false)
    }

    fn require_admin(&self) {
        let caller = self.env().caller();
        if self.admin.get().map_or(true, |admin| admin != caller) {
            self.env().revert(LendError::Unauthorized);
        }
    }
}

// ===== Validation =====

/// Decide whether a message source is acceptable.
///
/// The sender must match the identity registered for the source chain
/// and the (chain, nonce) pair must be unseen. Sender identity is
/// checked first: an untrusted source is rejected independent of
/// nonce or payload state.
pub fn validate_source(
    expected_sender: Option<&[u8]>,
    src_sender: &[u8],
    already_processed: bool,
) -> Result<(), LendError> {
    match expected_sender {
        Some(expected) if expected == src_sender => {}
        _ => return Err(LendError::UntrustedSource),
    }
    if already_processed {
        return Err(LendError::Replay);
    }
    Ok(())
}

// ===== Payload Codec =====

/// Decode a deposit payload: `{u8 message_type, Address beneficiary,
/// U256 amount}` in fixed order, consumed in full.
pub fn decode_deposit(payload: &[u8]) -> Result<DepositMessage, LendError> {
    let (message_type, rest) = u8::from_bytes(payload).map_err(|_| LendError::InvalidPayload)?;
    if message_type != MSG_DEPOSIT {
        return Err(LendError::UnknownMessageType);
    }

    let (beneficiary, rest) = Address::from_bytes(rest).map_err(|_| LendError::InvalidPayload)?;
    let (amount, rest) = U256::from_bytes(rest).map_err(|_| LendError::InvalidPayload)?;
    if !rest.is_empty() {
        return Err(LendError::InvalidPayload);
    }

    Ok(DepositMessage { beneficiary, amount })
}

/// Encode a deposit payload for a beneficiary and amount
pub fn encode_deposit(beneficiary: Address, amount: U256) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.extend_from_slice(&MSG_DEPOSIT.to_bytes().unwrap_or_default());
    payload.extend_from_slice(&beneficiary.to_bytes().unwrap_or_default());
    payload.extend_from_slice(&amount.to_bytes().unwrap_or_default());
    payload
}
